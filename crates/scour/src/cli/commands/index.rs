//! Implementation of `scour index`.

use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
    process::ExitCode,
};

use scour_index::{ContentDocument, IndexError, IndexWriter, read_documents};
use tracing::info;

use crate::cli::{args::IndexCommand, context::CommandContext};

/// Ingests a JSON-lines document file into a named index.
pub fn run(ctx: &CommandContext, cmd: &IndexCommand) -> ExitCode {
    let registry = match ctx.registry() {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    let name = cmd
        .index
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .map_or_else(|| ctx.config.default_index_name(), str::to_string);

    let documents = match load_documents(&cmd.file) {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", cmd.file.display());
            return ExitCode::FAILURE;
        }
    };

    let mut writer = match registry.writer(&name) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match write_documents(&mut writer, &documents, cmd.rebuild) {
        Ok(total) => {
            info!(index = %name, added = documents.len(), total, "index updated");
            println!(
                "Indexed {} documents into {name} ({total} total)",
                documents.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Err(rollback) = writer.rollback() {
                eprintln!("warning: rollback failed: {rollback}");
            }
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Stages and commits documents, returning the committed document count.
fn write_documents(
    writer: &mut IndexWriter,
    documents: &[ContentDocument],
    rebuild: bool,
) -> Result<u64, IndexError> {
    if rebuild {
        writer.delete_all()?;
    }
    writer.add_documents(documents)?;
    writer.commit()?;
    writer.num_docs()
}

/// Reads documents from a file, or stdin when the path is `-`.
fn load_documents(path: &Path) -> Result<Vec<ContentDocument>, IndexError> {
    if path == Path::new("-") {
        return read_documents(io::stdin().lock());
    }
    let file = File::open(path)?;
    read_documents(BufReader::new(file))
}
