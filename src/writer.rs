use std::fmt::{self, Write as _};

use chrono::Datelike;

use crate::{
    metadata::{Post, Value},
    parser::DELIMITER,
};

fn write_quoted(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str(r"\\")?,
            '"' => f.write_str("\\\"")?,
            '\n' => f.write_str(r"\n")?,
            '\t' => f.write_str(r"\t")?,
            '\r' => f.write_str(r"\r")?,
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            _ => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write_quoted(f, s),
            // TOML dates have four-digit years
            Value::Date(d) if !(0..=9999).contains(&d.year()) => {
                write_quoted(f, &d.to_string())
            }
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, item)?;
                }
                f.write_char(']')
            }
        }
    }
}

/// Writes the post back as front matter followed by the body.
impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{DELIMITER}")?;
        for (key, value) in self.metadata() {
            writeln!(f, "{key} = {value}")?;
        }
        writeln!(f, "{DELIMITER}")?;
        f.write_str(self.body())
    }
}

impl Post {
    /// Parsing the output gives back an equal post, with one exception: a
    /// date whose year is outside `0..=9999` is written as a quoted string
    /// and so comes back as [`Value::String`].
    pub fn to_front_matter(&self) -> String {
        self.to_string()
    }
}
