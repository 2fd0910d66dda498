//! Analyze command — run one analysis strategy over a document.

use camino::Utf8PathBuf;
use clap::Args;
use docstat_core::{AnalysisKind, AnalysisRequest, Config, Outcome};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::open_document;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Document to analyze (.docx or plain text).
    pub file: Utf8PathBuf,

    /// Analysis to run: word-frequency, sentence-count or punctuation-count.
    /// Falls back to `default_strategy` from config.
    #[arg(short, long, value_name = "KIND")]
    pub strategy: Option<String>,

    /// Target word for word-frequency. Falls back to `default_word` from config.
    #[arg(short, long)]
    pub word: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    file: &'a str,
    #[serde(flatten)]
    outcome: &'a Outcome,
    log: &'a [String],
}

/// Build the request from CLI arguments, then config defaults.
///
/// A `--strategy` label that names no analysis selects nothing; it does not
/// fall back to the configured default.
fn build_request(args: &AnalyzeArgs, config: &Config) -> AnalysisRequest {
    let word = args.word.clone().or_else(|| config.default_word.clone());
    match args.strategy {
        Some(ref label) => AnalysisRequest::from_label(label, word),
        None => AnalysisRequest {
            kind: config.default_kind(),
            word,
        },
    }
}

/// Whether `--word` was given for an analysis that does not use it.
fn word_is_ignored(args: &AnalyzeArgs, request: &AnalysisRequest) -> bool {
    args.word.is_some() && request.kind.is_some_and(|kind| !kind.takes_word())
}

/// Open a document and run the selected analysis over its text.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(args: AnalyzeArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.file, strategy = ?args.strategy, word = ?args.word, "executing analyze command");

    let request = build_request(&args, config);
    if word_is_ignored(&args, &request) {
        warn!(word = ?args.word, "--word is only used by word-frequency");
    }
    if let Some(ref label) = args.strategy
        && request.kind.is_none()
    {
        warn!(strategy = %label, "unknown analysis strategy");
    }
    let mut session = open_document(&args.file, config)?;
    let outcome = session.analyze(&request);

    if global_json {
        let output = AnalyzeOutput {
            file: args.file.as_str(),
            outcome: &outcome,
            log: session.log().entries(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match outcome {
        Outcome::Analyzed(report) => println!("{}", report.message),
        Outcome::NoStrategy { prompt } => {
            let choices: Vec<_> = AnalysisKind::ALL.iter().map(AnalysisKind::as_str).collect();
            println!("{}", prompt.yellow());
            println!("  {} {}", "--strategy".dimmed(), choices.join(" | "));
        }
    }

    Ok(())
}
