use anyhow::Result;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};
use tempfile::NamedTempFile;

pub fn resolve_editor(editor: &Option<String>) -> Result<String> {
    let editor = editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into());
    Ok(editor)
}

/// A temporary `.md` file the user edits. Deleted on drop unless
/// [`EditorBuffer::keep`] is called.
pub struct EditorBuffer {
    file: NamedTempFile,
    text: String,
}

impl EditorBuffer {
    pub fn new(initial: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("dj")
            .suffix(".md")
            .tempfile()?;
        file.write_all(initial.as_bytes())?;
        file.flush()?;
        Ok(Self {
            file,
            text: initial.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn reload(&mut self) -> Result<()> {
        self.text = fs::read_to_string(self.file.path())?;
        Ok(())
    }

    /// Leaves the file on disk and returns where it is.
    pub fn keep(self) -> Result<PathBuf> {
        let (_, path) = self.file.keep()?;
        Ok(path)
    }
}

/// Opens `editor_cmd` on a temporary file holding `initial` and returns the
/// buffer with what was saved.
pub fn create_editor_buffer(editor_cmd: &str, initial: &str) -> Result<EditorBuffer> {
    let mut buffer = EditorBuffer::new(initial)?;
    open_file_in_editor(editor_cmd, buffer.path())?;
    buffer.reload()?;
    Ok(buffer)
}

/// Passes `result` through. On failure an editor buffer is kept on disk and
/// its path is added to the error, so the typed text survives.
pub fn keep_on_error<T>(result: Result<T>, buffer: Option<EditorBuffer>) -> Result<T> {
    match (result, buffer) {
        (Err(error), Some(buffer)) => {
            let path = buffer.keep()?;
            Err(error.context(format!("Your text was kept in {}", path.display())))
        }
        (result, _) => result,
    }
}

fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor_cmd).arg(path).status()?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(())
}

/// Editor buffer for an entry: `# Title`, a blank line, then the text.
pub fn compose_buffer(title: &str, body: &str) -> String {
    format!("# {title}\n\n{body}")
}

/// Inverse of [`compose_buffer`]. The first non-blank line is the title
/// (a leading `#` is dropped), the rest is the text.
pub fn split_title_body(buffer: &str) -> (String, String) {
    let trimmed = buffer.trim_start();
    let (first, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    let title = first.trim().trim_start_matches('#').trim().to_string();
    (title, rest.trim().to_string())
}
