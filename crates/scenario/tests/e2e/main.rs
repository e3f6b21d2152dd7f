//! End-to-end tests for the scenario runner.
//!
//! These tests drive the flair lifecycle scenario against an in-memory
//! `FlairApi` fake and against an axum fake flair service over real HTTP.
//!
//! # Test Structure
//!
//! - `helpers/` -- flair store model, `FlairApi` fake, HTTP fake service, observers
//! - `scenarios/` -- test files organized by concern
//!
//! # Running
//!
//! ```bash
//! cargo test -p flaircheck-scenario --test e2e
//! ```

mod scenarios;
