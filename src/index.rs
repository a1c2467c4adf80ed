use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use log::info;

use crate::loader::Batch;

/// Writes the parsed documents as a JSON array for the site generator.
pub fn save_index(index_path: &Path, batch: &Batch) -> anyhow::Result<()> {
    let index_fd = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(index_path)
        .with_context(|| format!("while opening {index_path:?}"))?;
    let mut writer = BufWriter::new(index_fd);
    serde_json::to_writer_pretty(&mut writer, &batch.documents)?;
    writer.flush()?;

    info!(
        "wrote {} documents to {index_path:?}",
        batch.documents.len()
    );
    Ok(())
}
