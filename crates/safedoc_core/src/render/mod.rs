//! Printable output for stored forms.
//!
//! `view` flattens records into layout-free sections, `text` is the
//! built-in renderer backend and `export` writes rendered files to disk.

pub mod export;
pub mod text;
pub mod view;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Renderer or export failure.
#[derive(Debug)]
pub enum RenderError {
    /// Backend could not lay out the view.
    Backend(String),
    /// Output file could not be written.
    Io(std::io::Error),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "render failed: {message}"),
            Self::Io(err) => write!(f, "export io error: {err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Backend turning a view into file bytes.
pub trait DocumentRenderer {
    /// File extension without the dot, e.g. `txt`.
    fn file_extension(&self) -> &'static str;

    fn render(&self, view: &view::RenderedView) -> Result<Vec<u8>, RenderError>;
}
