//! Web server for the dashboard JSON API.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
