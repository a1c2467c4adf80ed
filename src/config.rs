use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::ArgMatches;
use postmatter::{
    loader::{LoadOptions, OnError},
    ParseOptions, Strictness,
};

pub(crate) const EXTENSIONS_ENV: &str = "POSTMATTER_EXTENSIONS";

#[derive(Debug)]
pub(crate) struct Config {
    pub post_dir: PathBuf,
    pub index_path: Option<PathBuf>,
    pub load: LoadOptions,
}

impl Config {
    /// `env_extensions` is the value of [`EXTENSIONS_ENV`], used when no `--ext` is given.
    pub fn from_matches(
        matches: &ArgMatches,
        env_extensions: Option<String>,
    ) -> anyhow::Result<Self> {
        let post_dir: &PathBuf = matches
            .get_one("post_dir")
            .context("post_dir is required")?;
        if !post_dir.exists() || !post_dir.is_dir() {
            bail!("post_dir must be a directory.");
        }
        let index_path: Option<&PathBuf> = matches.get_one("index");
        if index_path.map_or(false, |p| p.is_dir()) {
            bail!("index must be a file path, not a directory.");
        }

        let extensions = match matches.get_many::<String>("ext") {
            Some(exts) => parse_extensions(exts.map(String::as_str)),
            None => parse_extensions(env_extensions.as_deref().unwrap_or("md").split(',')),
        };
        if extensions.is_empty() {
            bail!("at least one post extension is required.");
        }

        Ok(Self {
            post_dir: post_dir.to_owned(),
            index_path: index_path.cloned(),
            load: LoadOptions {
                parse: ParseOptions {
                    strictness: if matches.get_flag("lenient") {
                        Strictness::Lenient
                    } else {
                        Strictness::Strict
                    },
                },
                on_error: if matches.get_flag("fail_fast") {
                    OnError::Abort
                } else {
                    OnError::Skip
                },
                extensions,
            },
        })
    }
}

// ".md" and "md" both mean markdown files
fn parse_extensions<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    raw.map(|e| e.trim().trim_start_matches('.'))
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli;

    fn config(args: &[&str], env: Option<&str>) -> anyhow::Result<Config> {
        let dir = std::env::temp_dir();
        let mut argv = vec!["postmatter", dir.to_str().unwrap()];
        argv.extend_from_slice(args);
        let matches = cli().try_get_matches_from(argv)?;
        Config::from_matches(&matches, env.map(str::to_string))
    }

    #[test]
    fn test_defaults() {
        let c = config(&[], None).unwrap();
        assert_eq!(c.load.extensions, ["md"]);
        assert_eq!(c.load.parse.strictness, Strictness::Strict);
        assert_eq!(c.load.on_error, OnError::Skip);
        assert!(c.index_path.is_none());
    }

    #[test]
    fn test_flags() {
        let c = config(
            &["--lenient", "--fail-fast", "--ext", ".markdown", "--ext", "md", "-o", "out.json"],
            Some("txt"),
        )
        .unwrap();
        assert_eq!(c.load.extensions, ["markdown", "md"]);
        assert_eq!(c.load.parse.strictness, Strictness::Lenient);
        assert_eq!(c.load.on_error, OnError::Abort);
        assert_eq!(c.index_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_extensions_from_env() {
        let c = config(&[], Some(" md, .txt ,,")).unwrap();
        assert_eq!(c.load.extensions, ["md", "txt"]);
        assert!(config(&[], Some(",")).is_err());
    }

    #[test]
    fn test_rejects_missing_post_dir() {
        let matches = cli()
            .try_get_matches_from(["postmatter", "/nonexistent/postmatter/posts"])
            .unwrap();
        assert!(Config::from_matches(&matches, None).is_err());
    }
}
