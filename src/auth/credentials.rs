//! Credentials storage and management for Stride TUI.
//!
//! This module provides functionality for storing and loading
//! authentication credentials from `~/.stride/.credentials.json`.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".stride";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// Persisted authentication state for the Stride backend.
///
/// NOTE: Only the bearer token and user id are stored locally. Profile,
/// tasks, and goals are always fetched from the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Bearer token for API authentication.
    pub token: Option<String>,
    /// The authenticated user's ID.
    pub user_id: Option<String>,
    /// When the token was stored, as a Unix timestamp (seconds).
    pub saved_at: Option<i64>,
}

impl Credentials {
    /// Create new empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credentials from a fresh login, stamped with the current time.
    pub fn from_login(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user_id: Some(user_id.into()),
            saved_at: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// Check if the credentials have a token.
    ///
    /// Stride tokens carry no client-visible expiry; the startup preflight
    /// validates them against the profile endpoint instead.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

/// Manages credential storage and retrieval.
#[derive(Debug)]
pub struct CredentialsManager {
    /// Path to the credentials file.
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a new CredentialsManager.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let credentials_path = home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE);
        Some(Self { credentials_path })
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &PathBuf {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// Returns default credentials if the file doesn't exist or can't be read.
    pub fn load(&self) -> Credentials {
        if !self.credentials_path.exists() {
            return Credentials::default();
        }

        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(_) => return Credentials::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(creds) => creds,
            Err(_) => Credentials::default(),
        }
    }

    /// Save credentials to the credentials file.
    ///
    /// Creates the parent directory if it doesn't exist.
    /// Returns `true` if successful, `false` otherwise.
    pub fn save(&self, credentials: &Credentials) -> bool {
        if let Some(parent) = self.credentials_path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.credentials_path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, credentials).is_err() {
            return false;
        }

        writer.flush().is_ok()
    }

    /// Clear all stored credentials.
    ///
    /// Removes the credentials file if it exists.
    /// Returns `true` if successful or file didn't exist, `false` otherwise.
    pub fn clear(&self) -> bool {
        if !self.credentials_path.exists() {
            return true;
        }

        fs::remove_file(&self.credentials_path).is_ok()
    }
}
