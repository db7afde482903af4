use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::warn;

use crate::photos::{IMAGE_MAX_DIM, JPEG_QUALITY};
use crate::storage::DEFAULT_QUOTA_BYTES;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the journal document.
    pub data_dir: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// Largest journal document accepted, in bytes (two per UTF-16 unit).
    pub quota_bytes: usize,
    /// Attached photos are scaled down to fit in this many pixels per side.
    pub image_max_dim: u32,
    /// JPEG quality for attached photos, 1-100.
    pub jpeg_quality: u8,
    /// How days are shown, e.g. `Mon, 01 Jan 2024`.
    pub date_format: String,
    /// Formats accepted for typed dates, besides `today`/`yesterday`/`tomorrow`.
    pub input_date_formats: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    editor: Option<String>,
    quota_mb: Option<f64>,
    image_max_dim: Option<u32>,
    jpeg_quality: Option<u8>,
    date_format: Option<String>,
    input_date_formats: Option<Vec<String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native)
    /// and apply defaults for anything missing.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|error| {
            warn!("ignoring config file: {error:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let quota_bytes = file_config
            .quota_mb
            .filter(|mb| *mb > 0.0)
            .map(|mb| (mb * 1024.0 * 1024.0) as usize)
            .unwrap_or(DEFAULT_QUOTA_BYTES);

        let input_date_formats = file_config
            .input_date_formats
            .filter(|formats| !formats.is_empty())
            .unwrap_or_else(Self::default_input_date_formats);

        Self {
            data_dir: file_config.data_dir.unwrap_or_else(Self::default_data_dir),
            editor: file_config.editor,
            quota_bytes,
            image_max_dim: file_config
                .image_max_dim
                .filter(|d| *d > 0)
                .unwrap_or(IMAGE_MAX_DIM),
            jpeg_quality: file_config
                .jpeg_quality
                .map(|q| q.clamp(1, 100))
                .unwrap_or(JPEG_QUALITY),
            date_format: file_config
                .date_format
                .unwrap_or_else(|| "%a, %d %b %Y".to_string()),
            input_date_formats,
        }
    }

    fn default_input_date_formats() -> Vec<String> {
        vec!["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()]
    }

    /// Default journal root: `{data_dir}/dj`
    /// - macOS:   `~/Library/Application Support/dj`
    /// - Linux:   `$XDG_DATA_HOME/dj` or `~/.local/share/dj`
    /// - Windows: `%APPDATA%\dj`
    fn default_data_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            base.data_dir().join("dj")
        } else {
            PathBuf::from("./dj")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            v.push(b.home_dir().join(".config").join("dj").join("config.toml"));
            v.push(b.config_dir().join("dj").join("config.toml"));
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
