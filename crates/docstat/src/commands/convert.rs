//! Convert command — open one document and save its text as another.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use docstat_core::Config;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::open_document;

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Document to read (.docx or plain text).
    pub input: Utf8PathBuf,

    /// Where to save. A `.docx` extension writes a Word document; anything
    /// else writes plain text.
    pub output: Utf8PathBuf,
}

#[derive(Serialize)]
struct ConvertOutput<'a> {
    input: &'a str,
    output: &'a str,
    paragraphs: usize,
    log: &'a [String],
}

/// Round-trip a document through the text buffer.
#[instrument(name = "cmd_convert", skip_all, fields(input = %args.input, output = %args.output))]
pub fn cmd_convert(args: ConvertArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(input = %args.input, output = %args.output, "executing convert command");

    let mut session = open_document(&args.input, config)?;
    session
        .save(&args.output)
        .with_context(|| format!("failed to save {}", args.output))?;
    let paragraphs = session.buffer().lines().len();

    if global_json {
        let output = ConvertOutput {
            input: args.input.as_str(),
            output: args.output.as_str(),
            paragraphs,
            log: session.log().entries(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} {} → {} ({paragraphs} paragraphs)",
            "Saved:".green(),
            args.input,
            args.output,
        );
    }

    Ok(())
}
