//! Command handlers -- one module per subcommand

pub mod config;
pub mod probe;
pub mod run;
