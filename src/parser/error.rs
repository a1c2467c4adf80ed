use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    MissingFrontMatter,
    UnterminatedFrontMatter,
    MalformedAssignment,
    DuplicateKey,
}

impl Reason {
    /// Stable machine-readable code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::MissingFrontMatter => "missing_front_matter",
            Reason::UnterminatedFrontMatter => "unterminated_front_matter",
            Reason::MalformedAssignment => "malformed_assignment",
            Reason::DuplicateKey => "duplicate_key",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing front matter")]
    MissingFrontMatter,
    #[error("unterminated front matter")]
    UnterminatedFrontMatter,
    #[error("malformed assignment at line {line}")]
    MalformedAssignment { line: usize },
    #[error("duplicate key `{key}` at line {line}")]
    DuplicateKey { key: String, line: usize },
}

impl FormatError {
    pub fn reason(&self) -> Reason {
        match self {
            FormatError::MissingFrontMatter => Reason::MissingFrontMatter,
            FormatError::UnterminatedFrontMatter => Reason::UnterminatedFrontMatter,
            FormatError::MalformedAssignment { .. } => Reason::MalformedAssignment,
            FormatError::DuplicateKey { .. } => Reason::DuplicateKey,
        }
    }

    /// 1-based line in the source document, for line-level errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::MalformedAssignment { line } | FormatError::DuplicateKey { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}
