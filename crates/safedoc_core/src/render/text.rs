//! UTF-8 plain-text renderer.

use crate::render::view::{RenderedView, ViewLine};
use crate::render::{DocumentRenderer, RenderError};

/// Renders views as underlined plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    pub fn render_to_string(&self, view: &RenderedView) -> String {
        let mut out = String::new();
        push_heading(&mut out, &view.title, '=');
        if let Some(subtitle) = &view.subtitle {
            out.push_str(subtitle);
            out.push('\n');
        }

        for section in &view.sections {
            out.push('\n');
            push_heading(&mut out, &section.heading, '-');
            for line in &section.lines {
                match line {
                    ViewLine::Field { label, value } => {
                        let mut rows = value.lines();
                        out.push_str(label);
                        out.push_str(": ");
                        out.push_str(rows.next().unwrap_or_default());
                        out.push('\n');
                        // Continuation rows of multi-line values stay under the label.
                        for row in rows {
                            out.push_str("    ");
                            out.push_str(row);
                            out.push('\n');
                        }
                    }
                    ViewLine::Text(text) => {
                        out.push_str(text);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }
}

fn push_heading(out: &mut String, heading: &str, underline: char) {
    out.push_str(heading);
    out.push('\n');
    out.extend(std::iter::repeat(underline).take(heading.chars().count()));
    out.push('\n');
}

impl DocumentRenderer for PlainTextRenderer {
    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, view: &RenderedView) -> Result<Vec<u8>, RenderError> {
        Ok(self.render_to_string(view).into_bytes())
    }
}
