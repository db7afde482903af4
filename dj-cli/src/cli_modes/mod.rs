mod delete_mode;
mod exchange_mode;
mod read_mode;
mod write_mode;

pub use delete_mode::delete_mode;
pub use exchange_mode::{export_mode, import_mode};
pub use read_mode::{list_mode, show_mode, usage_mode};
pub use write_mode::{edit_mode, new_mode};

use anyhow::{Result, bail};
use chrono::Local;
use dj_core::Config;
use dj_core::dates::{DATE_ISO_FORMAT, DayKeyword, parse_date_input};

/// Turns a typed day (`yesterday`, `2025-08-15`, ...) into `YYYY-MM-DD`.
/// No input means today.
fn resolve_day(input: Option<&str>, config: &Config) -> Result<String> {
    let today = Local::now().date_naive();
    let Some(input) = input else {
        return Ok(today.format(DATE_ISO_FORMAT).to_string());
    };
    match parse_date_input(input, today, &config.input_date_formats) {
        Some(date) => Ok(date.format(DATE_ISO_FORMAT).to_string()),
        None => bail!(
            "Could not understand the date '{input}'. Use one of {} or a date like {}.",
            DayKeyword::names().join(", "),
            today.format(DATE_ISO_FORMAT)
        ),
    }
}
