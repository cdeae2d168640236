//! Authentication module for Stride TUI.
//!
//! This module provides authentication functionality including:
//! - Credentials storage and management
//! - Startup preflight that restores or rejects a stored session

pub mod credentials;
pub mod preflight;

pub use credentials::{Credentials, CredentialsManager};
pub use preflight::{persist_login, resolve_session, PreflightOutcome};
