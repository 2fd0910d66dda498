//! Core library for docstat.
//!
//! This crate provides the text analysis strategies, their runtime selection,
//! and the collaborators around them (documents, the text buffer, the
//! analysis log, configuration) used by the `docstat` CLI.
//!
//! # Modules
//!
//! - [`analysis`] - The analysis strategies and their reports
//! - [`selector`] - Choosing and running a strategy from a request
//! - [`session`] - Open, analyze and save handlers over one buffer
//! - [`document`] - `.docx` and plain-text reading and writing
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use docstat_core::{AnalysisKind, AnalysisLog, AnalysisRequest, run_analysis};
//!
//! let mut log = AnalysisLog::new();
//! let request = AnalysisRequest::new(AnalysisKind::WordFrequency).with_word("hello");
//! let outcome = run_analysis("Hello world. Hello!", &request, &mut log);
//!
//! assert_eq!(outcome.message(), "Relative frequency of 'hello': 0.6667");
//! assert_eq!(log.len(), 1);
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod buffer;
pub mod config;
pub mod document;
pub mod error;
pub mod log;
pub mod selector;
pub mod session;
pub mod text;

pub use analysis::{AnalysisKind, AnalysisReport, Metric, Strategy};
pub use buffer::TextBuffer;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use document::{DEFAULT_MAX_INPUT_BYTES, DocumentSource};
pub use error::{ConfigError, ConfigResult, DocumentError, DocumentResult};
pub use log::AnalysisLog;
pub use selector::{AnalysisRequest, CHOOSE_STRATEGY_PROMPT, Outcome, run_analysis};
pub use session::Session;
