//! Figure output.
//!
//! [`save_figure`] dispatches on the file extension; SVG is the only
//! supported format.

use std::path::Path;

use crate::error::{Error, Result};
use crate::figure::RenderedFigure;

mod svg;

pub use svg::{figure_to_svg, write_svg};

/// Save a figure to `path`, picking the encoder from the extension.
pub fn save_figure<P: AsRef<Path>>(figure: &RenderedFigure, path: P) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "svg" => write_svg(figure, path),
        _ => Err(Error::UnsupportedFormat { extension }),
    }
}
