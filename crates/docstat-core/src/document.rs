//! Document reading and writing.
//!
//! Documents are treated as ordered lists of paragraph texts. Two formats
//! are supported behind the [`DocumentSource`] trait:
//!
//! - [`DocxDocument`]: Office Open XML word-processing files (`.docx`)
//! - [`PlainTextDocument`]: everything else, one paragraph per line
//!
//! Only body paragraph text is extracted. Styles are ignored, tables are
//! skipped along with the paragraphs inside them, and page or column breaks
//! contribute no text. Characters XML 1.0 cannot carry (C0 controls other
//! than tab, newline and carriage return) are dropped on write.

use std::io::{Read, Write};
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;
use zip::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{DocumentError, DocumentResult};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Main document part inside a `.docx` package.
const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#,
);

const PACKAGE_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#,
);

const DOCUMENT_XML_HEAD: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:body>"#,
);

const DOCUMENT_XML_TAIL: &str = "<w:sectPr/></w:body></w:document>";

/// Regex for a paragraph element, empty (`<w:p/>`) or with content.
static PARAGRAPH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:p(?:\s[^>]*?)?(?:/>|>(.*?)</w:p>)").expect("valid regex")
});

/// Regex for paragraph properties, which may contain tab stop definitions.
static PARAGRAPH_PROPS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:pPr(?:\s[^>]*)?>.*?</w:pPr>").expect("valid regex"));

/// Regex for the text-bearing pieces of a run: text, tabs, and breaks.
static RUN_CONTENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:(tab|br|cr)(\s[^>]*)?/>")
        .expect("valid regex")
});

/// Regex for a break's `w:type` attribute.
static BREAK_TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"w:type="([A-Za-z]+)""#).expect("valid regex"));

/// Regex for table open and close tags (not `w:tblPr` and friends).
static TABLE_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)w:tbl(?:\s[^>]*)?>").expect("valid regex"));

/// Regex for XML character and entity references.
static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|[a-z]+);").expect("valid regex"));

/// A document format that can be read as paragraphs and written from lines.
pub trait DocumentSource {
    /// Read the document at `path` as an ordered list of paragraph texts.
    fn open(&self, path: &Utf8Path) -> DocumentResult<Vec<String>>;

    /// Write `lines` to `path`, one paragraph per line.
    fn save(&self, path: &Utf8Path, lines: &[String]) -> DocumentResult<()>;
}

/// Office Open XML word-processing documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxDocument;

/// Plain UTF-8 text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextDocument;

/// Pick the document format for `path` by its extension.
///
/// `.docx` (any case) maps to [`DocxDocument`]; anything else is plain text.
pub fn for_path(path: &Utf8Path) -> &'static dyn DocumentSource {
    let is_docx = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
    if is_docx {
        &DocxDocument as &dyn DocumentSource
    } else {
        &PlainTextDocument
    }
}

/// Reject files larger than `max_bytes` before reading them.
pub fn check_input_size(path: &Utf8Path, max_bytes: Option<usize>) -> DocumentResult<()> {
    let Some(limit) = max_bytes else {
        return Ok(());
    };
    let metadata = std::fs::metadata(path.as_std_path()).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let size = metadata.len();
    if size > limit as u64 {
        return Err(DocumentError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }
    Ok(())
}

impl DocumentSource for DocxDocument {
    #[tracing::instrument(skip_all, fields(path = %path))]
    fn open(&self, path: &Utf8Path) -> DocumentResult<Vec<String>> {
        let file = std::fs::File::open(path.as_std_path()).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut archive = ZipArchive::new(file).map_err(|e| malformed(path, e))?;
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| malformed(path, format!("{DOCUMENT_PART}: {e}")))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| malformed(path, format!("{DOCUMENT_PART}: {e}")))?;

        let paragraphs = extract_paragraphs(&xml);
        tracing::debug!(paragraphs = paragraphs.len(), "read docx document");
        Ok(paragraphs)
    }

    #[tracing::instrument(skip_all, fields(path = %path, lines = lines.len()))]
    fn save(&self, path: &Utf8Path, lines: &[String]) -> DocumentResult<()> {
        let dropped: usize = lines
            .iter()
            .map(|line| line.chars().filter(|&ch| !is_xml_char(ch)).count())
            .sum();
        if dropped > 0 {
            tracing::warn!(dropped, "dropping control characters a .docx cannot hold");
        }
        let write_err = |source: std::io::Error| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::create(path.as_std_path()).map_err(write_err)?;
        let mut zip = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
            (DOCUMENT_PART, render_document_xml(lines)),
        ];
        for (name, body) in parts {
            zip.start_file(name, options)
                .map_err(|e| write_err(std::io::Error::other(e)))?;
            zip.write_all(body.as_bytes()).map_err(write_err)?;
        }
        zip.finish()
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        Ok(())
    }
}

impl DocumentSource for PlainTextDocument {
    #[tracing::instrument(skip_all, fields(path = %path))]
    fn open(&self, path: &Utf8Path) -> DocumentResult<Vec<String>> {
        let bytes = std::fs::read(path.as_std_path()).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|e| malformed(path, e))?;
        Ok(content
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect())
    }

    #[tracing::instrument(skip_all, fields(path = %path, lines = lines.len()))]
    fn save(&self, path: &Utf8Path, lines: &[String]) -> DocumentResult<()> {
        let mut content = lines.join("\n");
        content.push('\n');
        std::fs::write(path.as_std_path(), content).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn malformed(path: &Utf8Path, reason: impl std::fmt::Display) -> DocumentError {
    DocumentError::Malformed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Extract body paragraph texts from a `word/document.xml` body.
pub fn extract_paragraphs(xml: &str) -> Vec<String> {
    let body = strip_tables(xml);
    PARAGRAPH_PATTERN
        .captures_iter(&body)
        .map(|caps| caps.get(1).map_or_else(String::new, |m| paragraph_text(m.as_str())))
        .collect()
}

/// Remove `<w:tbl>` elements, nested tables included.
fn strip_tables(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut depth = 0usize;
    let mut last = 0;
    for caps in TABLE_TAG_PATTERN.captures_iter(xml) {
        let Some(tag) = caps.get(0) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.is_empty());
        if !closing {
            if depth == 0 {
                out.push_str(&xml[last..tag.start()]);
            }
            depth += 1;
        } else if depth > 0 {
            depth -= 1;
            if depth == 0 {
                last = tag.end();
            }
        }
    }
    if depth == 0 {
        out.push_str(&xml[last..]);
    }
    out
}

fn paragraph_text(inner: &str) -> String {
    let inner = PARAGRAPH_PROPS_PATTERN.replace_all(inner, "");
    let mut text = String::new();
    for caps in RUN_CONTENT_PATTERN.captures_iter(&inner) {
        if let Some(run_text) = caps.get(1) {
            text.push_str(&decode_entities(run_text.as_str()));
        } else {
            let attrs = caps.get(3).map_or("", |m| m.as_str());
            match caps.get(2).map(|m| m.as_str()) {
                Some("tab") => text.push('\t'),
                Some("br") if !is_line_break(attrs) => {}
                Some(_) => text.push('\n'),
                None => {}
            }
        }
    }
    text
}

/// Whether a `<w:br>` with these attributes is a line break, as opposed to
/// a page or column break.
fn is_line_break(attrs: &str) -> bool {
    BREAK_TYPE_PATTERN
        .captures(attrs)
        .and_then(|caps| caps.get(1))
        .is_none_or(|kind| kind.as_str() == "textWrapping")
}

fn decode_entities(raw: &str) -> String {
    ENTITY_PATTERN
        .replace_all(raw, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            let decoded = match name {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => name
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| name.strip_prefix('#').map(str::parse::<u32>))
                    .and_then(Result::ok)
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Whether XML 1.0 allows `ch` in character data.
const fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            _ if !is_xml_char(ch) => {}
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render `lines` as a `word/document.xml` body, one paragraph each.
pub fn render_document_xml(lines: &[String]) -> String {
    let mut xml = String::from(DOCUMENT_XML_HEAD);
    for line in lines {
        if line.is_empty() {
            xml.push_str("<w:p/>");
            continue;
        }
        xml.push_str("<w:p><w:r>");
        for (i, segment) in line.split('\t').enumerate() {
            if i > 0 {
                xml.push_str("<w:tab/>");
            }
            if !segment.is_empty() {
                xml.push_str(r#"<w:t xml:space="preserve">"#);
                xml.push_str(&escape_xml(segment));
                xml.push_str("</w:t>");
            }
        }
        xml.push_str("</w:r></w:p>");
    }
    xml.push_str(DOCUMENT_XML_TAIL);
    xml
}
