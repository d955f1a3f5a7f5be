//! Writes rendered forms to disk.

use crate::model::document::Document;
use crate::render::view::Renderable;
use crate::render::{DocumentRenderer, RenderError};
use log::info;
use std::path::{Path, PathBuf};

/// File name used for an exported document: `<collection>-<id>.<ext>`.
pub fn export_file_name<D: Document>(document: &D, extension: &str) -> String {
    format!("{}-{}.{extension}", D::COLLECTION, document.id())
}

/// Renders `document` and writes it under `dir`, creating `dir` if needed.
///
/// Returns the written path. An existing file with the same name is replaced.
pub fn export_document<D, T>(renderer: &T, document: &D, dir: &Path) -> Result<PathBuf, RenderError>
where
    D: Renderable,
    T: DocumentRenderer + ?Sized,
{
    let bytes = renderer.render(&document.render_view())?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(document, renderer.file_extension()));
    std::fs::write(&path, &bytes)?;
    info!(
        "event=document_export module=render status=ok collection={} id={} size_bytes={}",
        D::COLLECTION,
        document.id(),
        bytes.len()
    );
    Ok(path)
}
