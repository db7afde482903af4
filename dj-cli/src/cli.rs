use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::render::ColorMode;

/// dj: a local daily journal with photos
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Prints the journal data directory
    #[arg(long, short, exclusive = true)]
    pub path: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a new entry (e.g. `dj new -t "Beach day" We swam all afternoon.`)
    New(NewArgs),
    /// Change an existing entry. Without field options, opens it in your $EDITOR.
    Edit(EditArgs),
    /// Delete an entry
    #[command(alias = "delete")]
    Rm {
        /// Entry id, or a unique prefix of it
        id: String,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
    /// List entries grouped by day, newest first
    #[command(alias = "ls")]
    List(ListArgs),
    /// Print one entry in full
    Show {
        /// Entry id, or a unique prefix of it
        id: String,
    },
    /// Write every entry to a JSON backup file
    Export {
        /// Output file (default: `daily-journal-backup-<today>.json` in the current directory)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Merge a JSON backup into the journal. Entries with the same id are overwritten.
    Import {
        file: PathBuf,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
    /// Show how much of the storage quota is used
    Usage,
}

#[derive(Args, Debug, Default)]
pub struct NewArgs {
    /// Day of the entry: `today`, `yesterday`, `tomorrow` or a date like `2025-08-15` (default: today)
    #[arg(long, short)]
    pub date: Option<String>,
    /// Entry title. When omitted, the first line of the editor buffer is used.
    #[arg(long, short)]
    pub title: Option<String>,
    /// Comma separated tags (e.g. `--tags "work, family"`)
    #[arg(long)]
    pub tags: Option<String>,
    /// Attach a photo. Repeat for more, up to 5 per entry.
    #[arg(long = "photo", short = 'p', value_name = "FILE")]
    pub photos: Vec<PathBuf>,
    /// Entry text. Opens your $EDITOR when omitted.
    pub body: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Entry id, or a unique prefix of it
    pub id: String,
    /// Move the entry to another day
    #[arg(long, short)]
    pub date: Option<String>,
    /// New title
    #[arg(long, short)]
    pub title: Option<String>,
    /// Replace the text
    #[arg(long, short)]
    pub body: Option<String>,
    /// Replace the tags (comma separated, empty to clear)
    #[arg(long)]
    pub tags: Option<String>,
    /// Attach another photo
    #[arg(long = "photo", short = 'p', value_name = "FILE")]
    pub photos: Vec<PathBuf>,
    /// Remove the photo at this position (1 is the first). Repeatable.
    #[arg(long = "remove-photo", value_name = "N")]
    pub remove_photos: Vec<usize>,
    /// Remove every photo before attaching new ones
    #[arg(long, conflicts_with = "remove_photos")]
    pub clear_photos: bool,
}

impl EditArgs {
    /// True when no field was given on the command line, so the editor
    /// should be opened.
    pub fn wants_editor(&self) -> bool {
        self.date.is_none()
            && self.title.is_none()
            && self.body.is_none()
            && self.tags.is_none()
            && self.photos.is_empty()
            && self.remove_photos.is_empty()
            && !self.clear_photos
    }
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only entries whose title or text contains this (case-insensitive)
    #[arg(long, short)]
    pub search: Option<String>,
    /// Only entries on this day (e.g. `--on yesterday`, `--on 2025-08-15`)
    #[arg(long)]
    pub on: Option<String>,
    /// Only shows one line per entry
    #[arg(long, short = 'S')]
    pub short: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dj").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn new_collects_body_words_and_photos() {
        let cli = parse(&[
            "new", "-t", "Beach", "-p", "a.jpg", "--photo", "b.png", "We", "swam",
        ]);
        let Some(Command::New(args)) = cli.command else {
            panic!("expected new");
        };
        assert_eq!(args.title.as_deref(), Some("Beach"));
        assert_eq!(args.body, vec!["We", "swam"]);
        assert_eq!(args.photos, vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")]);
    }

    #[test]
    fn edit_without_fields_wants_editor() {
        let cli = parse(&["edit", "abc"]);
        let Some(Command::Edit(args)) = cli.command else {
            panic!("expected edit");
        };
        assert!(args.wants_editor());

        let cli = parse(&["edit", "abc", "--remove-photo", "2"]);
        let Some(Command::Edit(args)) = cli.command else {
            panic!("expected edit");
        };
        assert!(!args.wants_editor());
        assert_eq!(args.remove_photos, vec![2]);
    }

    #[test]
    fn clear_and_remove_photos_conflict() {
        let result =
            Cli::try_parse_from(["dj", "edit", "x", "--clear-photos", "--remove-photo", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn path_is_exclusive() {
        assert!(parse(&["--path"]).path);
        assert!(Cli::try_parse_from(["dj", "--path", "--color", "never"]).is_err());
    }

    #[test]
    fn aliases_and_color() {
        let cli = parse(&["ls", "--search", "beach", "--color", "never"]);
        assert!(matches!(cli.color, ColorMode::Never));
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.search.as_deref(), Some("beach"));
        assert!(matches!(parse(&["delete", "x"]).command, Some(Command::Rm { .. })));
    }
}
