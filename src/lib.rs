//! Stride TUI - a terminal client for the Stride goal planner
//!
//! This library exposes modules for use in integration tests.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod logging;
pub mod models;
pub mod prelude;
pub mod session;
pub mod state;
pub mod ui;
pub mod widgets;
