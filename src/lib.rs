//! Parser for blog posts that open with a `+++` front-matter block.
//!
//! ```
//! let post = postmatter::parse("+++\ntitle = \"Hello\"\n+++\nBody text\n").unwrap();
//! assert_eq!(post.title(), Some("Hello"));
//! assert_eq!(post.body(), "Body text\n");
//! ```

pub mod index;
pub mod loader;
pub mod metadata;
pub mod parser;
mod writer;

pub use metadata::{Metadata, Post, Value};
pub use parser::{parse, parse_with, FormatError, ParseOptions, Reason, Strictness};
