//! student-tui - A terminal client for the student management service.
//!
//! The binary in `main.rs` wires these modules together: it parses the
//! command line, loads configuration, starts logging, and runs the
//! `App` event loop with a `TaskSpawner` doing network work off the UI.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod tasks;
pub mod ui;

pub use app::{App, Route};
pub use config::{Config, Settings};
pub use error::{AppError, Result};
