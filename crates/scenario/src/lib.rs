//! Declarative flair scenarios and the runner that executes them.
//!
//! A [`Scenario`] is an ordered list of [`Step`]s plus cleanup actions.
//! [`Runner`] interprets it against any [`FlairApi`](flaircheck_client::FlairApi)
//! strictly in order and returns a [`RunReport`].
//!
//! # Example
//!
//! ```ignore
//! let runner = Runner::new(client, context);
//! let report = runner.run(&flair_lifecycle(), &mut NoopObserver).await;
//! assert!(report.tally.all_passed());
//! ```

pub mod lifecycle;
pub mod report;
pub mod runner;
pub mod step;

pub use lifecycle::{MOD_FLAIR, PUBLIC_FLAIR, WELCOME, flair_lifecycle};
pub use report::{CleanupRecord, NoopObserver, RunReport, StepObserver, StepRecord, Tally};
pub use runner::{Runner, ScenarioContext};
pub use step::{Action, Expectation, Observation, Scenario, Step};
