use anyhow::Result;
use dj_core::journal::group_by_date;
use dj_core::{Config, FileStore, Journal};

use super::resolve_day;
use crate::cli::ListArgs;
use crate::render::Renderer;

pub fn list_mode(
    args: &ListArgs,
    config: &Config,
    renderer: &Renderer,
    journal: &Journal<FileStore>,
) -> Result<()> {
    if journal.entries().is_empty() {
        renderer.print_info("No entries yet. Write your first one with `dj new`.");
        return Ok(());
    }
    let date = match args.on.as_deref() {
        Some(on) => Some(resolve_day(Some(on), config)?),
        None => None,
    };

    let matches = journal.filter(args.search.as_deref(), date.as_deref());
    if matches.is_empty() {
        renderer.print_info("No entries match your search/filter.");
        return Ok(());
    }
    let groups = group_by_date(&matches);
    renderer.print_groups(&groups, args.search.as_deref());
    Ok(())
}

pub fn show_mode(id: &str, renderer: &Renderer, journal: &Journal<FileStore>) -> Result<()> {
    let entry = journal.resolve(id)?;
    renderer.print_entry(entry);
    Ok(())
}

pub fn usage_mode(renderer: &Renderer, journal: &Journal<FileStore>) -> Result<()> {
    renderer.print_usage(&journal.usage());
    Ok(())
}
