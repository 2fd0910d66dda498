//! Extract command — print the text of a document.

use camino::Utf8PathBuf;
use clap::Args;
use docstat_core::Config;
use serde::Serialize;
use tracing::{debug, instrument};

use super::open_document;

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Document to read (.docx or plain text).
    pub file: Utf8PathBuf,
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    file: &'a str,
    paragraphs: Vec<String>,
    text: &'a str,
}

/// Print the buffer text a document opens into.
#[instrument(name = "cmd_extract", skip_all, fields(file = %args.file))]
pub fn cmd_extract(args: ExtractArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing extract command");

    let session = open_document(&args.file, config)?;
    let text = session.buffer().current_text();

    if global_json {
        let output = ExtractOutput {
            file: args.file.as_str(),
            paragraphs: session.buffer().lines(),
            text,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{text}");
    }

    Ok(())
}
