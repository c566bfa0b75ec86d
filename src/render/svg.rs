use super::{Renderer, Style};
use crate::zones::Polygon;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// A `Renderer` that accumulates polygons into an SVG document.
/// Polygons are expected in screen coordinates (already normalized).
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Render the accumulated document
    pub fn finish(&self) -> String {
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" "#,
                r#"viewBox="0 0 {w} {h}">{body}</svg>"#,
            ),
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }

    /// Write the document to a file
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.finish())
    }

    /// Build the SVG `points` attribute for a ring
    fn points_attr(polygon: &Polygon) -> String {
        let mut out = String::new();
        for (i, v) in polygon.vertices.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{:.3},{:.3}", v.x, v.y);
        }
        out
    }
}

impl Renderer for SvgCanvas {
    fn draw(&mut self, polygon: &Polygon, style: &Style) {
        if polygon.vertices.is_empty() {
            return;
        }
        let fill = style.fill.as_deref().unwrap_or("none");
        let stroke = style.stroke.as_deref().unwrap_or("none");
        let _ = write!(
            self.body,
            r#"<polygon points="{}" style="fill:{};stroke:{};stroke-width:{}"/>"#,
            Self::points_attr(polygon),
            fill,
            stroke,
            style.stroke_width,
        );
    }
}
