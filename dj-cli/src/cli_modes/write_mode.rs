use anyhow::{Result, bail};
use dj_core::entry::{MAX_PHOTOS_PER_ENTRY, parse_tags};
use dj_core::photos::{AttachOptions, attach_photos};
use dj_core::render::format_day;
use dj_core::{
    Config, Entry, EntryDraft, FileStore, Journal, KeyValueStore, Photo, PhotoSource,
};
use std::path::PathBuf;

use super::resolve_day;
use crate::cli::{EditArgs, NewArgs};
use crate::codec::ImageCrateCodec;
use crate::common::{
    compose_buffer, create_editor_buffer, keep_on_error, resolve_editor, split_title_body,
};
use crate::render::Renderer;

pub fn new_mode(
    args: &NewArgs,
    config: &Config,
    renderer: &Renderer,
    journal: &mut Journal<FileStore>,
) -> Result<()> {
    let date_iso = resolve_day(args.date.as_deref(), config)?;

    let buffer = if args.body.is_empty() {
        let editor = resolve_editor(&config.editor)?;
        let initial = compose_buffer(args.title.as_deref().unwrap_or_default(), "");
        Some(create_editor_buffer(&editor, &initial)?)
    } else {
        None
    };
    let (title, body) = match &buffer {
        Some(buffer) => split_title_body(buffer.text()),
        None => (args.title.clone().unwrap_or_default(), args.body.join(" ")),
    };
    if buffer.is_some() && body.is_empty() {
        renderer.print_info("No entry to save, because no text was received.");
        return Ok(());
    }

    let draft = EntryDraft {
        date_iso,
        title,
        body,
        tags: args.tags.as_deref().map(parse_tags).unwrap_or_default(),
        photos: Vec::new(),
    };
    let result = save_new(journal, draft, &args.photos, attach_options(config), renderer);
    let entry = keep_on_error(result, buffer)?;

    renderer.print_info(&format!(
        "Added new entry to {}",
        format_day(&entry.date_iso, &config.date_format)
    ));
    renderer.print_entry_line(&entry);
    Ok(())
}

pub fn edit_mode(
    args: &EditArgs,
    config: &Config,
    renderer: &Renderer,
    journal: &mut Journal<FileStore>,
) -> Result<()> {
    let entry = journal.resolve(&args.id)?.clone();
    let mut draft = EntryDraft::from_entry(&entry);
    let mut buffer = None;

    if args.wants_editor() {
        let editor = resolve_editor(&config.editor)?;
        let edited = create_editor_buffer(&editor, &compose_buffer(&draft.title, &draft.body))?;
        (draft.title, draft.body) = split_title_body(edited.text());
        buffer = Some(edited);
    } else {
        if let Some(date) = args.date.as_deref() {
            draft.date_iso = resolve_day(Some(date), config)?;
        }
        if let Some(title) = &args.title {
            draft.title = title.clone();
        }
        if let Some(body) = &args.body {
            draft.body = body.clone();
        }
        if let Some(tags) = args.tags.as_deref() {
            draft.tags = parse_tags(tags);
        }
        if args.clear_photos {
            draft.photos.clear();
        }
        remove_photos(&mut draft.photos, &args.remove_photos)?;
        attach(&args.photos, &mut draft.photos, attach_options(config), renderer)?;
    }

    let result = journal.update(&entry.id, draft, None).map_err(Into::into);
    let updated = keep_on_error(result, buffer)?;
    if updated.date_iso != entry.date_iso {
        renderer.print_info(&format!(
            "Moved entry to {}",
            format_day(&updated.date_iso, &config.date_format)
        ));
    } else {
        renderer.print_info("Entry updated.");
    }
    renderer.print_entry_line(&updated);
    Ok(())
}

fn attach_options(config: &Config) -> AttachOptions {
    AttachOptions {
        max_dim: config.image_max_dim,
        quality: config.jpeg_quality,
    }
}

/// Attaches `photo_paths` to `draft` and creates the entry.
fn save_new<S: KeyValueStore>(
    journal: &mut Journal<S>,
    mut draft: EntryDraft,
    photo_paths: &[PathBuf],
    options: AttachOptions,
    renderer: &Renderer,
) -> Result<Entry> {
    attach(photo_paths, &mut draft.photos, options, renderer)?;
    Ok(journal.create(draft, None)?)
}

/// Compresses the files at `paths` into `pending`, reporting what was left out.
fn attach(
    paths: &[PathBuf],
    pending: &mut Vec<Photo>,
    options: AttachOptions,
    renderer: &Renderer,
) -> Result<()> {
    if paths.is_empty() {
        return Ok(());
    }
    let sources = paths
        .iter()
        .map(|path| PhotoSource::read(path))
        .collect::<Result<Vec<_>>>()?;
    let report = attach_photos(pending, sources, &ImageCrateCodec, options)?;
    if report.skipped > 0 {
        renderer.print_warning(&format!(
            "Skipped {} file(s) that are not images.",
            report.skipped
        ));
    }
    if report.over_limit > 0 {
        renderer.print_warning(&format!(
            "An entry holds up to {MAX_PHOTOS_PER_ENTRY} photos, {} file(s) were not attached.",
            report.over_limit
        ));
    }
    Ok(())
}

/// Removes the photos at the given 1-based positions.
fn remove_photos(photos: &mut Vec<Photo>, positions: &[usize]) -> Result<()> {
    let mut indexes = Vec::with_capacity(positions.len());
    for &position in positions {
        if position == 0 || position > photos.len() {
            bail!(
                "There is no photo {position}; this entry has {} photo(s).",
                photos.len()
            );
        }
        indexes.push(position - 1);
    }
    indexes.sort_unstable();
    indexes.dedup();
    for index in indexes.into_iter().rev() {
        photos.remove(index);
    }
    Ok(())
}
