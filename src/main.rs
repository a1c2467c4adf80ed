use anyhow::bail;
use clap::{command, value_parser, Arg, ArgAction, Command};
use config::{Config, EXTENSIONS_ENV};
use log::{error, info};
use postmatter::{index::save_index, loader::load_dir};
use std::path::PathBuf;

mod config;

pub(crate) fn cli() -> Command {
    command!().args(&[
        Arg::new("post_dir")
            .help("Directory path of posts")
            .value_parser(value_parser!(PathBuf))
            .default_value("posts"),
        Arg::new("index")
            .help("Write parsed posts to this JSON file. Existing contents will be replaced.")
            .short('o')
            .long("index")
            .value_parser(value_parser!(PathBuf)),
        Arg::new("ext")
            .help(format!(
                "Extension of post files. Repeatable. Defaults to ${EXTENSIONS_ENV} or md"
            ))
            .long("ext")
            .action(ArgAction::Append),
        Arg::new("lenient")
            .help("Skip malformed front-matter lines instead of rejecting the post")
            .long("lenient")
            .action(ArgAction::SetTrue),
        Arg::new("fail_fast")
            .help("Stop at the first post that fails to parse")
            .long("fail-fast")
            .action(ArgAction::SetTrue),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();
    let config = Config::from_matches(&matches, std::env::var(EXTENSIONS_ENV).ok())?;
    info!("{config:?}");

    let batch = load_dir(&config.post_dir, &config.load)?;

    for doc in batch.documents.iter() {
        let post = &doc.post;
        println!(
            "{}\t{}\t{}\t{}",
            doc.path.display(),
            post.title().unwrap_or("-"),
            post.date().map_or("-".to_string(), |d| d.to_string()),
            post.tags().join(",")
        );
    }
    for failure in batch.failures.iter() {
        error!(
            "{}: {} ({})",
            failure.path.display(),
            failure.error,
            failure.error.reason()
        );
    }

    if let Some(index_path) = &config.index_path {
        save_index(index_path, &batch)?;
    }

    if !batch.failures.is_empty() {
        bail!(
            "{} of {} posts failed to parse.",
            batch.failures.len(),
            batch.failures.len() + batch.documents.len()
        );
    }
    Ok(())
}
