mod editor_utils;
mod prompt;

pub use editor_utils::{
    EditorBuffer, compose_buffer, create_editor_buffer, keep_on_error, resolve_editor,
    split_title_body,
};
pub use prompt::confirm;
