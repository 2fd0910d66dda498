//! Shell command — an interactive editing session on stdin/stdout.
//!
//! Each input line is one user action, handled to completion before the
//! next line is read. The actions mirror an editor window: open a document,
//! type a target word, pick a strategy, run the analysis, edit the text,
//! save. Failed actions print an error and the session carries on.

use std::io::{self, BufRead, Write};

use camino::Utf8PathBuf;
use clap::Args;
use docstat_core::{AnalysisKind, AnalysisRequest, Config, Outcome, Session};
use tracing::{debug, instrument, warn};

use super::new_session;

const HELP: &str = "\
Commands:
  open PATH         Load a document into the buffer
  word [WORD]       Set (or clear) the target word
  strategy [KIND]   Select an analysis: word-frequency, sentence-count, punctuation-count
  analyze           Run the selected analysis on the buffer
  text              Show the buffer
  set TEXT          Replace the buffer with TEXT
  append TEXT       Add TEXT as a new line at the end of the buffer
  save PATH         Save the buffer as a document
  log               Show everything logged so far
  help              Show this help
  quit              Leave the shell";

/// Arguments for the `shell` subcommand.
#[derive(Args, Debug, Default)]
pub struct ShellArgs {
    /// Document to open before reading commands.
    pub file: Option<Utf8PathBuf>,
}

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Open(Utf8PathBuf),
    Word(Option<String>),
    Strategy(Option<String>),
    Analyze,
    Text,
    Set(String),
    Append(String),
    Save(Utf8PathBuf),
    Log,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse a line. Blank lines yield `Ok(None)`.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));
        let rest = (!rest.is_empty()).then(|| rest.to_string());

        let command = match verb.to_ascii_lowercase().as_str() {
            "open" => Self::Open(require_path(verb, rest)?),
            "save" => Self::Save(require_path(verb, rest)?),
            "word" => Self::Word(rest),
            "strategy" => Self::Strategy(rest),
            "analyze" => Self::Analyze,
            "text" => Self::Text,
            "set" => Self::Set(rest.unwrap_or_default()),
            "append" => Self::Append(rest.unwrap_or_default()),
            "log" => Self::Log,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

fn require_path(verb: &str, rest: Option<String>) -> Result<Utf8PathBuf, String> {
    rest.map(Utf8PathBuf::from)
        .ok_or_else(|| format!("usage: {verb} PATH"))
}

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Session plus the current selector and word-entry values.
struct Shell {
    session: Session,
    request: AnalysisRequest,
    json: bool,
}

impl Shell {
    fn new(session: Session, request: AnalysisRequest, json: bool) -> Self {
        Self {
            session,
            request,
            json,
        }
    }

    /// Read commands until `quit` or end of input.
    fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        write!(out, "> ")?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            let flow = match ShellCommand::parse(&line) {
                Ok(Some(command)) => self.dispatch(command, out)?,
                Ok(None) => Flow::Continue,
                Err(message) => {
                    writeln!(out, "error: {message}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Stop {
                return Ok(());
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Handle one command. Only errors writing to `out` escape.
    fn dispatch<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> io::Result<Flow> {
        debug!(?command, "shell command");
        match command {
            ShellCommand::Open(path) => match self.session.open(&path) {
                Ok(paragraphs) => writeln!(out, "Opened {path} ({paragraphs} paragraphs)")?,
                Err(err) => report_error(out, &anyhow::Error::new(err))?,
            },
            ShellCommand::Save(path) => match self.session.save(&path) {
                Ok(()) => writeln!(out, "Saved {path}")?,
                Err(err) => report_error(out, &anyhow::Error::new(err))?,
            },
            ShellCommand::Word(word) => {
                match &word {
                    Some(w) => writeln!(out, "Word: {w}")?,
                    None => writeln!(out, "Word cleared")?,
                }
                self.request.word = word;
            }
            ShellCommand::Strategy(label) => {
                self.request.kind = label.as_deref().and_then(AnalysisKind::from_label);
                match (self.request.kind, label) {
                    (Some(kind), _) if kind.takes_word() && self.request.word.is_none() => {
                        writeln!(out, "Strategy: {kind} (set a target word with 'word WORD')")?;
                    }
                    (Some(kind), _) => writeln!(out, "Strategy: {kind}")?,
                    (None, Some(label)) => writeln!(
                        out,
                        "Unknown strategy '{label}'; choose one of: {}",
                        strategy_names()
                    )?,
                    (None, None) => writeln!(out, "Strategy cleared")?,
                }
            }
            ShellCommand::Analyze => {
                let outcome = self.session.analyze(&self.request);
                if self.json {
                    let json = serde_json::to_string(&outcome).map_err(io::Error::other)?;
                    writeln!(out, "{json}")?;
                } else {
                    match &outcome {
                        Outcome::Analyzed(report) => writeln!(out, "{}", report.message)?,
                        Outcome::NoStrategy { prompt } => {
                            writeln!(out, "{prompt} ({})", strategy_names())?;
                        }
                    }
                }
            }
            ShellCommand::Text => writeln!(out, "{}", self.session.buffer().current_text())?,
            ShellCommand::Set(text) => {
                self.session.buffer_mut().set_text(text);
                writeln!(out, "Buffer replaced")?;
            }
            ShellCommand::Append(text) => {
                let mut content = self.session.buffer().current_text().to_string();
                if !content.is_empty() {
                    content.push('\n');
                }
                content.push_str(&text);
                self.session.buffer_mut().set_text(content);
                writeln!(out, "Line appended")?;
            }
            ShellCommand::Log => {
                for (i, entry) in self.session.log().entries().iter().enumerate() {
                    writeln!(out, "{:>3}  {entry}", i + 1)?;
                }
            }
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }
}

fn report_error<W: Write>(out: &mut W, err: &anyhow::Error) -> io::Result<()> {
    warn!(error = %err, "shell action failed");
    writeln!(out, "error: {err:#}")
}

fn strategy_names() -> String {
    AnalysisKind::ALL
        .iter()
        .map(AnalysisKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run an interactive session on stdin/stdout.
#[instrument(name = "cmd_shell", skip_all)]
pub fn cmd_shell(args: ShellArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = ?args.file, "executing shell command");

    let request = AnalysisRequest {
        kind: config.default_kind(),
        word: config.default_word.clone(),
    };
    let mut shell = Shell::new(new_session(config), request, global_json);

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    if let Some(file) = args.file {
        shell.dispatch(ShellCommand::Open(file), &mut stdout)?;
    }
    shell.run(stdin, &mut stdout)?;

    debug!(entries = shell.session.log().len(), "shell finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(script: &str) -> (String, Shell) {
        let mut shell = Shell::new(Session::new(), AnalysisRequest::default(), false);
        let mut out = Vec::new();
        shell.run(Cursor::new(script), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), shell)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            ShellCommand::parse("open  my notes.docx "),
            Ok(Some(ShellCommand::Open(Utf8PathBuf::from("my notes.docx"))))
        );
        assert_eq!(ShellCommand::parse("WORD"), Ok(Some(ShellCommand::Word(None))));
        assert_eq!(ShellCommand::parse("   "), Ok(None));
        assert_eq!(ShellCommand::parse("exit"), Ok(Some(ShellCommand::Quit)));
        assert!(ShellCommand::parse("save").is_err());
        assert!(ShellCommand::parse("frobnicate").is_err());
    }

    #[test]
    fn analyze_without_strategy_prompts() {
        let (out, shell) = run_script("set Some text.\nanalyze\nquit\n");
        assert!(out.contains("Choose an analysis strategy"));
        assert!(shell.session.log().is_empty());
    }

    #[test]
    fn full_editing_session() {
        let (out, shell) = run_script(
            "set Hello world.\nappend Hello!\nword Hello\nstrategy word-frequency\nanalyze\n\
             strategy sentence-count\nanalyze\nlog\n",
        );
        assert!(out.contains("Relative frequency of 'hello': 0.6667"));
        assert!(out.contains("Number of sentences: 2"));
        assert!(out.contains("  1  Relative frequency of 'hello': 0.6667"));
        assert_eq!(shell.session.log().len(), 2);
    }

    #[test]
    fn unknown_strategy_clears_selection() {
        let (out, shell) = run_script("strategy sentence-count\nstrategy vowels\nanalyze\n");
        assert!(out.contains("Unknown strategy 'vowels'"));
        assert!(out.contains("Choose an analysis strategy"));
        assert!(shell.request.kind.is_none());
    }

    #[test]
    fn failed_open_keeps_session_usable() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.docx");
        let script = format!(
            "set Hi, there!\nopen {}\nstrategy punctuation-count\nanalyze\n",
            missing.display()
        );
        let (out, shell) = run_script(&script);
        assert!(out.contains("error: failed to read"));
        assert!(out.contains("Number of punctuation marks: 2"));
        assert_eq!(shell.session.log().len(), 1);
    }

    #[test]
    fn save_and_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.docx");
        let script = format!(
            "set First. Second!\nsave {0}\nset replaced\nopen {0}\ntext\n",
            path.display()
        );
        let (out, shell) = run_script(&script);
        assert!(out.contains("Saved "));
        assert!(out.contains("(1 paragraphs)"));
        assert_eq!(shell.session.buffer().current_text(), "First. Second!");
        assert_eq!(shell.session.log().len(), 2);
    }

    #[test]
    fn word_frequency_without_word_hints() {
        let (out, _shell) = run_script("strategy word-frequency\nword cat\nstrategy word-frequency\n");
        assert!(out.contains("Strategy: word-frequency (set a target word with 'word WORD')"));
        assert!(out.contains("Strategy: word-frequency\n"));

        let (out, _shell) = run_script("strategy sentence-count\n");
        assert!(!out.contains("set a target word"));
    }

    #[test]
    fn quit_stops_reading() {
        let (_out, shell) = run_script("quit\nset never\n");
        assert!(shell.session.buffer().is_empty());
    }

    #[test]
    fn json_mode_prints_outcome() {
        let mut shell = Shell::new(
            Session::new(),
            AnalysisRequest::new(AnalysisKind::SentenceCount),
            true,
        );
        let mut out = Vec::new();
        shell
            .run(Cursor::new("set One. Two.\nanalyze\n"), &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(r#""status":"analyzed""#));
        assert!(out.contains(r#""message":"Number of sentences: 2""#));
    }
}
