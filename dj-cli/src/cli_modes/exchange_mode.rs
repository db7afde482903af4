use anyhow::{Context, Result};
use chrono::Local;
use dj_core::exchange::{backup_file_name, export_json, import_document};
use dj_core::{FileStore, Journal};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::common::confirm;
use crate::render::Renderer;

pub fn export_mode(
    out: Option<&Path>,
    renderer: &Renderer,
    journal: &Journal<FileStore>,
) -> Result<()> {
    let now = Local::now();
    let json = export_json(&journal.export(Some(now)))?;
    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(backup_file_name(now)));
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    renderer.print_info(&format!(
        "Exported {} entries to {}",
        journal.entries().len(),
        path.display()
    ));
    Ok(())
}

pub fn import_mode(
    file: &Path,
    yes: bool,
    renderer: &Renderer,
    journal: &mut Journal<FileStore>,
) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let incoming = import_document(&text, Local::now())?;

    let question = format!(
        "Import {} entries? This will merge with your current {} entries (same IDs overwrite).",
        incoming.len(),
        journal.entries().len()
    );
    if !yes && !confirm(&question)? {
        renderer.print_info("Import cancelled.");
        return Ok(());
    }

    let summary = journal.merge_import(incoming)?;
    renderer.print_info(&format!(
        "Imported {} entries. The journal now holds {}.",
        summary.imported, summary.total
    ));
    Ok(())
}
