//! Chart rendering on top of plotters.

use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};
use serde::{Deserialize, Serialize};

use crate::artifact::{ensure_parent_dir, verify_written};
use crate::error::{HeritageError, Result};

/// Error type of drawing code, independent of the backend.
pub type DrawResult = std::result::Result<(), Box<dyn Error + Send + Sync>>;

// Bundled so that raster output does not depend on system fonts.
static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static FONT_REGISTERED: Lazy<std::result::Result<(), String>> = Lazy::new(|| {
    register_font("sans-serif", FontStyle::Normal, FONT_BYTES)
        .map_err(|_| "failed to load bundled font".to_string())
});

/// Image format of a rendered chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    #[default]
    Png,
    Svg,
}

impl ChartFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ChartFormat {
    type Err = HeritageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ChartFormat::Png),
            "svg" => Ok(ChartFormat::Svg),
            other => Err(HeritageError::Config(format!(
                "unknown chart format '{}' (expected png or svg)",
                other
            ))),
        }
    }
}

/// Something that can draw itself onto a plotters drawing area.
pub trait Figure {
    /// Canvas size in pixels.
    fn size(&self) -> (u32, u32);

    /// Draw onto a white root area. Presenting is left to the caller.
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB::ErrorType: 'static;
}

/// Render a figure to `path`, creating parent directories.
///
/// Returns the size of the written file in bytes.
pub fn render<F: Figure>(figure: &F, path: &Path, format: ChartFormat) -> Result<u64> {
    FONT_REGISTERED
        .as_ref()
        .map_err(|e| HeritageError::Chart(e.clone()))?;
    ensure_parent_dir(path)?;

    let size = figure.size();
    let drawn = match format {
        ChartFormat::Png => paint(figure, BitMapBackend::new(path, size).into_drawing_area()),
        ChartFormat::Svg => paint(figure, SVGBackend::new(path, size).into_drawing_area()),
    };
    drawn.map_err(|e| HeritageError::Chart(format!("{}: {}", path.display(), e)))?;

    verify_written(path)
}

fn paint<F, DB>(figure: &F, root: DrawingArea<DB, Shift>) -> DrawResult
where
    F: Figure,
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    figure.draw(&root)?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl Figure for Blank {
        fn size(&self) -> (u32, u32) {
            (64, 48)
        }

        fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
        where
            DB::ErrorType: 'static,
        {
            root.draw(&Rectangle::new([(4, 4), (20, 20)], BLUE.filled()))?;
            root.draw_text("ok", &("sans-serif", 12).into_font().into(), (24, 24))?;
            Ok(())
        }
    }

    #[test]
    fn test_bundled_font_registers() {
        assert!(FONT_REGISTERED.is_ok());
    }

    #[test]
    fn test_chart_format_parse() {
        assert_eq!("PNG".parse::<ChartFormat>().unwrap(), ChartFormat::Png);
        assert_eq!("svg".parse::<ChartFormat>().unwrap(), ChartFormat::Svg);
        assert!("pdf".parse::<ChartFormat>().is_err());
        assert_eq!(ChartFormat::Svg.to_string(), "svg");
    }

    #[test]
    fn test_render_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();

        let png = dir.path().join("charts/blank.png");
        assert!(render(&Blank, &png, ChartFormat::Png).unwrap() > 0);

        let svg = dir.path().join("charts/blank.svg");
        render(&Blank, &svg, ChartFormat::Svg).unwrap();
        let text = std::fs::read_to_string(&svg).unwrap();
        assert!(text.contains("<svg"));
    }
}
