use super::theme::Paper;
use dj_core::render::{clean_tags, display_title, entry_meta, format_day, format_time};
use dj_core::storage::UsageLevel;
use dj_core::{Entry, StorageUsage};
use regex::Regex;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: Paper::skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%a, %d %b %Y".to_string(),
                    use_color: true,
                    short_mode: false,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_warning(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.with(Paper::WARN));
        } else {
            eprintln!("{message}");
        }
    }

    /// `2024-01-01 1a2b3c4d Title [tag, tag]`
    pub fn print_entry_line(&self, entry: &Entry) {
        let mut date = entry.date_iso.clone();
        let mut id = short_id(&entry.id).to_string();
        let mut title = display_title(entry).to_string();
        let tags = clean_tags(entry);
        let mut tags = if tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", tags.join(", "))
        };
        if self.opts.use_color {
            date = date.with(Color::Cyan).to_string();
            id = id.with(Color::DarkGrey).to_string();
            title = title.with(Color::Yellow).to_string();
            tags = tags.with(Color::Green).to_string();
        }
        println!("{date} {id} {title}{tags}");
    }

    /// Day headers followed by each entry's title and summary.
    pub fn print_groups(&self, groups: &[(&str, Vec<&Entry>)], query: Option<&str>) {
        let pattern = search_pattern(query);
        for (i, (date_iso, entries)) in groups.iter().enumerate() {
            if self.opts.short_mode {
                entries.iter().for_each(|e| self.print_entry_line(e));
                continue;
            }
            if i > 0 {
                println!();
            }
            let mut md = format!("# {}\n", format_day(date_iso, &self.opts.date_format));
            for entry in entries {
                let title = self.emphasize(display_title(entry), pattern.as_ref());
                md.push_str(&format!(
                    "## {title}\n*{}* · `{}`\n",
                    entry_meta(entry),
                    short_id(&entry.id)
                ));
            }
            self.print_md(&md);
        }
    }

    pub fn print_entry(&self, entry: &Entry) {
        let mut md = format!("# {}\n", display_title(entry));
        md.push_str(&format!(
            "*{} • Updated {}*\n\n",
            format_day(&entry.date_iso, &self.opts.date_format),
            format_time(&entry.updated_at)
        ));

        let tags = clean_tags(entry);
        if !tags.is_empty() {
            let chips: Vec<String> = tags.iter().map(|t| format!("`{t}`")).collect();
            md.push_str(&format!("{}\n\n", chips.join(" ")));
        }

        if !entry.body.trim().is_empty() {
            md.push_str(entry.body.trim_end());
            md.push_str("\n\n");
        }

        if !entry.photos.is_empty() {
            md.push_str("### Photos\n");
            for (i, photo) in entry.photos.iter().enumerate() {
                md.push_str(&format!(
                    "* {}. {} ({}, {} KB)\n",
                    i + 1,
                    photo.name,
                    photo.mime_type,
                    data_url_kilobytes(&photo.data_url)
                ));
            }
            md.push('\n');
        }
        md.push_str(&format!("id: `{}`\n", entry.id));
        self.print_md(&md);
    }

    pub fn print_usage(&self, usage: &StorageUsage) {
        let quota_mb = usage.quota_bytes as f64 / (1024.0 * 1024.0);
        let pct = usage.percent();
        let mut bar = usage_bar(pct, 30);
        if self.opts.use_color {
            let color = match usage.level() {
                UsageLevel::Ok => Paper::SAGE,
                UsageLevel::GettingFull => Paper::OCHRE,
                UsageLevel::VeryFull => Paper::WARN,
            };
            bar = bar.with(color).to_string();
        }
        println!(
            "{bar} {:.2} MB of {:.0} MB ({pct:.0}%)",
            usage.megabytes(),
            quota_mb
        );
        if let Some(hint) = usage.level().hint() {
            self.print_warning(hint);
        }
    }

    /// Bolds matches of the current search, only when colors are on.
    fn emphasize(&self, text: &str, pattern: Option<&Regex>) -> String {
        match pattern {
            Some(re) if self.opts.use_color => highlight(text, re),
            _ => text.to_string(),
        }
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn search_pattern(query: Option<&str>) -> Option<Regex> {
    let query = query.map(str::trim).filter(|q| !q.is_empty())?;
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

fn highlight(text: &str, pattern: &Regex) -> String {
    pattern.replace_all(text, "**$0**").to_string()
}

fn usage_bar(pct: f64, width: usize) -> String {
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Decoded size of a base64 data URL payload, rounded up to whole KB.
fn data_url_kilobytes(data_url: &str) -> usize {
    let payload = data_url.split_once(',').map(|(_, p)| p).unwrap_or("");
    let bytes = payload.len() * 3 / 4;
    bytes.div_ceil(1024)
}
