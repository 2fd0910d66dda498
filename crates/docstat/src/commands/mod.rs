//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use docstat_core::{Config, Session};

pub mod analyze;
pub mod convert;
pub mod extract;
pub mod info;
pub mod shell;

/// Create a session that honors the configured input limit.
pub fn new_session(config: &Config) -> Session {
    Session::new().with_input_limit(config.input_limit())
}

/// Open `path` into a fresh session.
///
/// Shared by every command that starts from a document on disk.
pub fn open_document(path: &Utf8Path, config: &Config) -> anyhow::Result<Session> {
    let mut session = new_session(config);
    session
        .open(path)
        .with_context(|| format!("failed to open {path}"))?;
    Ok(session)
}
