//! Report materialization: CSV tables and chart images.

mod chart;
mod figures;
mod labels;
mod materializer;
mod table;

pub use chart::{ChartFormat, DrawResult, Figure, render};
pub use figures::{
    BarChart, HORIZONTAL_LABEL_MAX, HORIZONTAL_WRAP_WIDTH, Histogram, HistogramBin, LineChart,
    Orientation, PieChart, VERTICAL_LABEL_MAX, histogram_bins,
};
pub use labels::{PLACEHOLDER, normalize, shorten, wrap};
pub use materializer::{Artifact, ArtifactKind, ReportConfig, ReportMaterializer, ReportOutcome};
pub use table::{COUNT_HEADER, write_aggregation_csv, write_records};
