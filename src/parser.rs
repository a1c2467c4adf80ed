//! `+++`-delimited front matter.
//!
//! A post starts with a block of `key = value` lines between two `+++`
//! lines. Everything after the closing marker is the body and is kept
//! byte-for-byte.

use std::str::FromStr;

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::metadata::{Metadata, Post};

mod error;
mod value;

pub use error::{FormatError, Reason};

pub const DELIMITER: &str = "+++";

static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)\s*=\s*(.*)$").unwrap());
static TABLE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\s*([A-Za-z0-9_.-]+)\s*\]\s*(?:#.*)?$").unwrap());

/// What to do with a line inside the block that is not a valid assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Fail with the offending line number.
    #[default]
    Strict,
    /// Log a warning and skip the line. For repeated keys the first one wins.
    Lenient,
}

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub strictness: Strictness,
}

impl ParseOptions {
    pub fn lenient() -> Self {
        Self {
            strictness: Strictness::Lenient,
        }
    }
}

/// Parses with [`Strictness::Strict`].
pub fn parse(text: &str) -> Result<Post, FormatError> {
    parse_with(text, &ParseOptions::default())
}

pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Post, FormatError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let block = locate(text)?;
    let metadata = parse_block(&text[block.start..block.end], block.first_line, options)?;

    Ok(Post::new(metadata, &text[block.body..]))
}

impl FromStr for Post {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Byte offsets of the metadata block and the body within the document.
#[derive(Debug, PartialEq, Eq)]
struct Block {
    start: usize,
    end: usize,
    body: usize,
    // 1-based line number of the first line inside the block
    first_line: usize,
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn locate(text: &str) -> Result<Block, FormatError> {
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n').enumerate();

    // opening marker: only blank lines may come before it
    let (start, first_line) = loop {
        let Some((i, line)) = lines.next() else {
            return Err(FormatError::MissingFrontMatter);
        };
        offset += line.len();
        if is_delimiter(line) {
            break (offset, i + 2);
        }
        if !line.trim().is_empty() {
            return Err(FormatError::MissingFrontMatter);
        }
    };

    for (_, line) in lines {
        let line_start = offset;
        offset += line.len();
        if is_delimiter(line) {
            return Ok(Block {
                start,
                end: line_start,
                body: offset,
                first_line,
            });
        }
    }

    Err(FormatError::UnterminatedFrontMatter)
}

fn parse_block(
    block: &str,
    first_line: usize,
    options: &ParseOptions,
) -> Result<Metadata, FormatError> {
    let mut metadata = Metadata::new();
    let mut table: Option<String> = None;

    for (i, line) in block.lines().enumerate() {
        let line_no = first_line + i;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(caps) = TABLE_HEADER.captures(line) {
            table = Some(caps[1].to_string());
            continue;
        }

        let parsed = ASSIGNMENT
            .captures(line)
            .and_then(|caps| Some((caps.get(1)?.as_str(), value::parse_value(&caps[2])?)));
        let Some((key, value)) = parsed else {
            let err = FormatError::MalformedAssignment { line: line_no };
            match options.strictness {
                Strictness::Strict => return Err(err),
                Strictness::Lenient => {
                    warn!("{err}: skipping `{line}`");
                    continue;
                }
            }
        };

        let key = match &table {
            Some(table) => format!("{table}.{key}"),
            None => key.to_string(),
        };
        if metadata.contains_key(&key) {
            let err = FormatError::DuplicateKey { key, line: line_no };
            match options.strictness {
                Strictness::Strict => return Err(err),
                Strictness::Lenient => {
                    warn!("{err}: keeping the first value");
                    continue;
                }
            }
        }
        metadata.insert(key, value);
    }

    Ok(metadata)
}
