//! Public library modules for the CLI crate
pub mod app;
pub mod dispatcher;
pub mod input;
pub mod launch;
pub mod logging;
pub mod paths;
pub mod status;
pub mod tui;
pub mod viewer;
