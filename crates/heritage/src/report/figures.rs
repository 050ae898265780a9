//! Concrete figures: bar, pie, histogram and line charts.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregation, MissingSummary};
use crate::error::{HeritageError, Result};

use super::chart::{DrawResult, Figure};
use super::labels::{normalize, shorten, wrap};

const FONT: &str = "sans-serif";
const LINE_HEIGHT: i32 = 16;

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const MISSING_COLOR: RGBColor = RGBColor(199, 199, 199);
const TEXT_COLOR: RGBColor = RGBColor(33, 33, 33);
const PALETTE: [RGBColor; 4] = [
    BAR_COLOR,
    MISSING_COLOR,
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

/// Longest label drawn next to a horizontal bar.
pub const HORIZONTAL_LABEL_MAX: usize = 70;
/// Line width for wrapped horizontal bar labels.
pub const HORIZONTAL_WRAP_WIDTH: usize = 30;
/// Longest label drawn under a vertical bar.
pub const VERTICAL_LABEL_MAX: usize = 18;
const VERTICAL_WRAP_WIDTH: usize = 12;

const HORIZONTAL_LABEL_AREA: u32 = 260;
const VERTICAL_LABEL_AREA: u32 = 90;

/// Bar direction for category charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
    /// Vertical when every label fits under a bar, horizontal otherwise.
    Auto,
}

impl Orientation {
    /// Pick a concrete orientation for the given labels.
    pub fn resolve<'a, I>(self, labels: I) -> Orientation
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Orientation::Auto => {
                let short = labels
                    .into_iter()
                    .all(|l| normalize(l).chars().count() <= VERTICAL_LABEL_MAX);
                if short {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                }
            }
            fixed => fixed,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
            Orientation::Auto => "auto",
        };
        f.write_str(name)
    }
}

impl FromStr for Orientation {
    type Err = HeritageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "barh" => Ok(Orientation::Horizontal),
            "vertical" | "bar" => Ok(Orientation::Vertical),
            "auto" => Ok(Orientation::Auto),
            other => Err(HeritageError::Config(format!(
                "unknown orientation '{}' (expected horizontal, vertical or auto)",
                other
            ))),
        }
    }
}

fn value_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn text_style(size: i32, pos: Pos) -> TextStyle<'static> {
    TextStyle::from((FONT, size).into_font())
        .color(&TEXT_COLOR)
        .pos(pos)
}

fn draw_no_data<DB>(root: &DrawingArea<DB, Shift>, title: &str) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = root.titled(title, (FONT, 24))?;
    let (w, h) = area.dim_in_pixel();
    area.draw_text(
        "no data",
        &text_style(18, Pos::new(HPos::Center, VPos::Center)),
        (w as i32 / 2, h as i32 / 2),
    )?;
    Ok(())
}

/// Ranked categories as bars, first entry most prominent.
#[derive(Debug, Clone)]
pub struct BarChart {
    title: String,
    value_label: String,
    bars: Vec<(String, f64)>,
    orientation: Orientation,
}

impl BarChart {
    pub fn new(title: impl Into<String>, value_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value_label: value_label.into(),
            bars: Vec::new(),
            orientation: Orientation::Horizontal,
        }
    }

    /// Bars for every entry of an aggregation, in rank order.
    pub fn from_aggregation(
        aggregation: &Aggregation,
        title: impl Into<String>,
        value_label: impl Into<String>,
    ) -> Self {
        aggregation
            .entries
            .iter()
            .fold(Self::new(title, value_label), |chart, e| {
                chart.bar(e.category.as_str(), e.count as f64)
            })
    }

    pub fn bar(mut self, label: impl Into<String>, value: f64) -> Self {
        self.bars.push((label.into(), value));
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The orientation that will be drawn, with `Auto` resolved.
    pub fn orientation(&self) -> Orientation {
        self.orientation
            .resolve(self.bars.iter().map(|(label, _)| label.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    fn value_ceiling(&self) -> f64 {
        let max = self.bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        if max > 0.0 { max * 1.12 } else { 1.0 }
    }

    fn draw_horizontal<DB>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let n = self.bars.len();
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(HORIZONTAL_LABEL_AREA)
            .build_cartesian_2d(0f64..self.value_ceiling(), -0.5f64..n as f64 - 0.5)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_label_formatter(&|_| String::new())
            .x_desc(self.value_label.as_str())
            .label_style((FONT, 14))
            .draw()?;

        // first entry on top
        chart.draw_series(self.bars.iter().enumerate().map(|(i, (_, value))| {
            let y = (n - 1 - i) as f64;
            Rectangle::new([(0.0, y - 0.35), (*value, y + 0.35)], BAR_COLOR.filled())
        }))?;

        let label_style = text_style(13, Pos::new(HPos::Right, VPos::Center));
        let value_style = text_style(12, Pos::new(HPos::Left, VPos::Center));
        for (i, (label, value)) in self.bars.iter().enumerate() {
            let y = (n - 1 - i) as f64;
            let (x0, y0) = chart.backend_coord(&(0.0, y));
            let lines = wrap(
                &shorten(Some(label.as_str()), HORIZONTAL_LABEL_MAX),
                HORIZONTAL_WRAP_WIDTH,
            );
            let top = y0 - (lines.len() as i32 - 1) * LINE_HEIGHT / 2;
            for (k, line) in lines.iter().enumerate() {
                root.draw_text(line, &label_style, (x0 - 8, top + k as i32 * LINE_HEIGHT))?;
            }

            let (x1, _) = chart.backend_coord(&(*value, y));
            root.draw_text(&value_text(*value), &value_style, (x1 + 4, y0))?;
        }
        Ok(())
    }

    fn draw_vertical<DB>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let n = self.bars.len();
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(VERTICAL_LABEL_AREA)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..n as f64 - 0.5, 0f64..self.value_ceiling())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .y_desc(self.value_label.as_str())
            .label_style((FONT, 14))
            .draw()?;

        chart.draw_series(self.bars.iter().enumerate().map(|(i, (_, value))| {
            let x = i as f64;
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, *value)], BAR_COLOR.filled())
        }))?;

        let label_style = text_style(12, Pos::new(HPos::Center, VPos::Top));
        let value_style = text_style(12, Pos::new(HPos::Center, VPos::Bottom));
        for (i, (label, value)) in self.bars.iter().enumerate() {
            let x = i as f64;
            let (x0, y0) = chart.backend_coord(&(x, 0.0));
            let lines = wrap(&shorten(Some(label.as_str()), VERTICAL_LABEL_MAX), VERTICAL_WRAP_WIDTH);
            for (k, line) in lines.iter().enumerate() {
                root.draw_text(line, &label_style, (x0, y0 + 8 + k as i32 * LINE_HEIGHT))?;
            }

            let (_, y1) = chart.backend_coord(&(x, *value));
            root.draw_text(&value_text(*value), &value_style, (x0, y1 - 4))?;
        }
        Ok(())
    }
}

impl Figure for BarChart {
    fn size(&self) -> (u32, u32) {
        match self.orientation() {
            Orientation::Vertical => (1000, 600),
            _ => (1200, (120 + 48 * self.bars.len() as u32).max(700)),
        }
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB::ErrorType: 'static,
    {
        if self.bars.is_empty() {
            return draw_no_data(root, &self.title);
        }
        match self.orientation() {
            Orientation::Vertical => self.draw_vertical(root),
            _ => self.draw_horizontal(root),
        }
    }
}

/// Shares of a whole, drawn clockwise from twelve o'clock.
#[derive(Debug, Clone)]
pub struct PieChart {
    title: String,
    slices: Vec<(String, f64)>,
}

impl PieChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slices: Vec::new(),
        }
    }

    /// Filled versus missing split of one column.
    pub fn from_missing(summary: &MissingSummary, title: impl Into<String>) -> Self {
        Self::new(title)
            .slice("filled", summary.filled as f64)
            .slice("missing / not established", summary.missing as f64)
    }

    pub fn slice(mut self, label: impl Into<String>, value: f64) -> Self {
        self.slices.push((label.into(), value));
        self
    }

    fn total(&self) -> f64 {
        self.slices.iter().map(|(_, v)| v.max(0.0)).sum()
    }
}

fn on_circle(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.sin()).round() as i32,
        center.1 - (radius * angle.cos()).round() as i32,
    )
}

impl Figure for PieChart {
    fn size(&self) -> (u32, u32) {
        (700, 700)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB::ErrorType: 'static,
    {
        let total = self.total();
        if total <= 0.0 {
            return draw_no_data(root, &self.title);
        }

        let area = root.titled(&self.title, (FONT, 24))?;
        let (w, h) = area.dim_in_pixel();
        let legend_height = 28 * self.slices.len() as i32 + 20;
        let pie_height = h as i32 - legend_height;
        let center = (w as i32 / 2, pie_height / 2);
        let radius = (w as i32).min(pie_height) as f64 / 2.0 - 30.0;

        let percent_style = text_style(16, Pos::new(HPos::Center, VPos::Center));
        let mut start = 0.0;
        for (i, (_, value)) in self.slices.iter().enumerate() {
            if *value <= 0.0 {
                continue;
            }
            let share = value / total;
            let sweep = share * 2.0 * PI;
            let steps = ((share * 180.0).ceil() as usize).max(2);

            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for s in 0..=steps {
                points.push(on_circle(center, radius, start + sweep * s as f64 / steps as f64));
            }
            area.draw(&Polygon::new(points, PALETTE[i % PALETTE.len()].filled()))?;

            let anchor = on_circle(center, radius * 0.6, start + sweep / 2.0);
            area.draw_text(&format!("{:.1}%", share * 100.0), &percent_style, anchor)?;
            start += sweep;
        }

        let legend_style = text_style(14, Pos::new(HPos::Left, VPos::Center));
        let legend_x = w as i32 / 2 - 150;
        for (i, (label, value)) in self.slices.iter().enumerate() {
            let y = pie_height + 14 + 28 * i as i32;
            area.draw(&Rectangle::new(
                [(legend_x, y - 8), (legend_x + 16, y + 8)],
                PALETTE[i % PALETTE.len()].filled(),
            ))?;
            area.draw_text(
                &format!("{} ({})", label, value_text(*value)),
                &legend_style,
                (legend_x + 24, y),
            )?;
        }
        Ok(())
    }
}

/// One equal-width histogram bucket. The last bucket includes its end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split the finite `values` into `bins` equal-width buckets over their range.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in finite {
        let index = (((v - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Distribution of a numeric sample.
#[derive(Debug, Clone)]
pub struct Histogram {
    title: String,
    x_label: String,
    bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        values: &[f64],
        bins: usize,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            bins: histogram_bins(values, bins),
        }
    }

    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }
}

impl Figure for Histogram {
    fn size(&self) -> (u32, u32) {
        (1000, 600)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB::ErrorType: 'static,
    {
        let (Some(first), Some(last)) = (self.bins.first(), self.bins.last()) else {
            return draw_no_data(root, &self.title);
        };
        let peak = self.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(first.start..last.end, 0f64..peak * 1.1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc("count")
            .label_style((FONT, 14))
            .draw()?;

        chart.draw_series(self.bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BAR_COLOR.filled())
        }))?;
        chart.draw_series(self.bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], WHITE.stroke_width(1))
        }))?;
        Ok(())
    }
}

/// A single series of points joined by a line, with markers.
#[derive(Debug, Clone)]
pub struct LineChart {
    title: String,
    x_label: String,
    y_label: String,
    points: Vec<(f64, f64)>,
}

impl LineChart {
    /// Points are drawn in ascending x order.
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        mut points: Vec<(f64, f64)>,
    ) -> Self {
        points.retain(|(x, y)| x.is_finite() && y.is_finite());
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            points,
        }
    }

    fn x_range(&self) -> (f64, f64) {
        let min = self.points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max = self.points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        if max > min {
            let pad = (max - min) * 0.05;
            (min - pad, max + pad)
        } else {
            (min - 1.0, max + 1.0)
        }
    }
}

impl Figure for LineChart {
    fn size(&self) -> (u32, u32) {
        (1000, 600)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult
    where
        DB::ErrorType: 'static,
    {
        if self.points.is_empty() {
            return draw_no_data(root, &self.title);
        }
        let (x_min, x_max) = self.x_range();
        let y_max = self.points.iter().map(|p| p.1).fold(0.0, f64::max);
        let y_max = if y_max > 0.0 { y_max * 1.15 } else { 1.0 };

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .x_label_formatter(&|v| format!("{:.0}", v))
            .label_style((FONT, 14))
            .draw()?;

        chart.draw_series(LineSeries::new(
            self.points.iter().copied(),
            BAR_COLOR.stroke_width(2),
        ))?;
        chart.draw_series(
            self.points
                .iter()
                .map(|&p| Circle::new(p, 4, BAR_COLOR.filled())),
        )?;
        Ok(())
    }
}
