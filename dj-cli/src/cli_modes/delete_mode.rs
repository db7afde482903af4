use anyhow::Result;
use dj_core::render::display_title;
use dj_core::{FileStore, Journal, JournalError};

use crate::common::confirm;
use crate::render::Renderer;

pub fn delete_mode(
    id: &str,
    yes: bool,
    renderer: &Renderer,
    journal: &mut Journal<FileStore>,
) -> Result<()> {
    let entry = match journal.resolve(id) {
        Ok(entry) => entry.clone(),
        Err(JournalError::NotFound(_)) => {
            renderer.print_info(&format!("No entry matches '{id}', nothing to delete."));
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    let question = format!(
        "Delete \"{}\" from {}?",
        display_title(&entry),
        entry.date_iso
    );
    if !yes && !confirm(&question)? {
        renderer.print_info("Nothing deleted.");
        return Ok(());
    }
    journal.delete(&entry.id)?;
    renderer.print_info("Entry deleted.");
    Ok(())
}
