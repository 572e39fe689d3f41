//! Declarative chart descriptions.
//!
//! A [`ChartCall`] is everything the caller says about a chart: the kind,
//! the series with their data, titles and labels, a layout hint, style
//! overrides, and figure dimensions. Rendering consumes the call by
//! reference and never mutates it.

use crate::style::palette::Fnv1a;
use crate::style::StyleOverride;

/// Default figure width in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default figure height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Default histogram bin count.
pub const DEFAULT_NUM_BINS: usize = 20;

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartKind {
    /// Connected x/y series.
    Line,
    /// Categorical bars.
    Bar,
    /// Binned sample counts.
    Histogram,
    /// Matrix of colored cells.
    Heatmap,
    /// Unconnected x/y markers.
    Scatter,
    /// Box-and-whisker summaries.
    Box,
    /// Parallel-coordinate record lines.
    ParallelCoords,
}

impl ChartKind {
    /// The kind's display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Histogram => "histogram",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Scatter => "scatter",
            ChartKind::Box => "box",
            ChartKind::ParallelCoords => "parallel_coords",
        }
    }

    /// Whether several series of this kind can share one axes.
    ///
    /// Heatmaps fill the whole panel and parallel-coordinate plots own
    /// their axis layout, so each series needs its own panel.
    #[must_use]
    pub const fn shares_axes(self) -> bool {
        !matches!(self, ChartKind::Heatmap | ChartKind::ParallelCoords)
    }

    /// Whether figures of this kind may participate in an overlay.
    #[must_use]
    pub const fn overlay_compatible(self) -> bool {
        matches!(
            self,
            ChartKind::Line | ChartKind::Bar | ChartKind::Scatter | ChartKind::Histogram
        )
    }
}

/// Per-kind series data shapes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeriesData {
    /// Paired x/y points (line, scatter).
    Xy {
        /// X coordinates.
        x: Vec<f32>,
        /// Y coordinates, same length as `x`.
        y: Vec<f32>,
    },
    /// Labeled category values (bar).
    Categories {
        /// Category labels.
        labels: Vec<String>,
        /// One value per label.
        values: Vec<f32>,
    },
    /// Raw samples (histogram, box).
    Samples(Vec<f32>),
    /// Row-major matrix (heatmap).
    Matrix {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
        /// `rows * cols` values, row-major.
        values: Vec<f32>,
    },
    /// Multi-dimensional records (parallel coordinates).
    Records {
        /// Dimension names, one per axis.
        dims: Vec<String>,
        /// Records, each with one value per dimension.
        rows: Vec<Vec<f32>>,
    },
}

impl SeriesData {
    fn hash_into(&self, h: &mut Fnv1a) {
        match self {
            SeriesData::Xy { x, y } => {
                h.write(b"xy");
                for (&xv, &yv) in x.iter().zip(y) {
                    h.write_f32(xv);
                    h.write_f32(yv);
                }
            }
            SeriesData::Categories { labels, values } => {
                h.write(b"cat");
                for (label, &v) in labels.iter().zip(values) {
                    h.write(label.as_bytes());
                    h.write_f32(v);
                }
            }
            SeriesData::Samples(values) => {
                h.write(b"smp");
                for &v in values {
                    h.write_f32(v);
                }
            }
            SeriesData::Matrix { rows, cols, values } => {
                h.write(b"mat");
                h.write(&(*rows as u64).to_le_bytes());
                h.write(&(*cols as u64).to_le_bytes());
                for &v in values {
                    h.write_f32(v);
                }
            }
            SeriesData::Records { dims, rows } => {
                h.write(b"rec");
                for dim in dims {
                    h.write(dim.as_bytes());
                }
                for row in rows {
                    for &v in row {
                        h.write_f32(v);
                    }
                }
            }
        }
    }
}

/// One data series: data, an optional label, an optional style override.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartSeries {
    /// Series data.
    pub data: SeriesData,
    /// Legend/subtitle label.
    pub label: Option<String>,
    /// Series-level style override.
    pub style: Option<StyleOverride>,
}

impl ChartSeries {
    /// Series from data alone.
    #[must_use]
    pub fn new(data: SeriesData) -> Self {
        Self {
            data,
            label: None,
            style: None,
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Attach a style override.
    #[must_use]
    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = Some(style);
        self
    }

    /// Stable identity fingerprint over the label and data points.
    ///
    /// Style is excluded: cosmetic edits must not move a series to a
    /// different color position. Identical across runs and processes.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a::new();
        if let Some(label) = &self.label {
            h.write(label.as_bytes());
        }
        h.write(&[0x1f]); // separator between label and data
        self.data.hash_into(&mut h);
        h.finish()
    }
}

/// Layout request on a chart call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutHint {
    /// Single axes when the kind allows it, subplots otherwise.
    #[default]
    Auto,
    /// All series on one shared axes.
    SingleAxes,
    /// One panel per series, with an optional explicit (rows, cols) grid.
    Subplots {
        /// Explicit grid; `None` derives a near-square grid.
        grid: Option<(usize, usize)>,
    },
}

/// A complete declarative chart description.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartCall {
    /// Chart kind.
    pub kind: ChartKind,
    /// Data series, at least one.
    pub series: Vec<ChartSeries>,
    /// Figure title.
    pub title: Option<String>,
    /// X axis label.
    pub xlabel: Option<String>,
    /// Y axis label.
    pub ylabel: Option<String>,
    /// Layout request.
    pub layout: LayoutHint,
    /// Chart-level style override.
    pub style: Option<StyleOverride>,
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Draw a legend.
    pub show_legend: bool,
    /// Grid visibility; `None` defers to the resolved style.
    pub show_grid: Option<bool>,
    /// Share the x range across subplots.
    pub share_x: bool,
    /// Share the y range across subplots.
    pub share_y: bool,
    /// Histogram bin count.
    pub num_bins: usize,
    /// Draw a least-squares regression line on scatter charts.
    pub show_regression: bool,
}

impl ChartCall {
    /// Chart call of the given kind.
    #[must_use]
    pub fn new(kind: ChartKind, series: Vec<ChartSeries>) -> Self {
        Self {
            kind,
            series,
            title: None,
            xlabel: None,
            ylabel: None,
            layout: LayoutHint::Auto,
            style: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            show_legend: false,
            show_grid: None,
            share_x: false,
            share_y: false,
            num_bins: DEFAULT_NUM_BINS,
            show_regression: false,
        }
    }

    /// Line chart over x/y series.
    #[must_use]
    pub fn line(series: Vec<ChartSeries>) -> Self {
        Self::new(ChartKind::Line, series)
    }

    /// Bar chart over category series.
    #[must_use]
    pub fn bar(series: Vec<ChartSeries>) -> Self {
        Self::new(ChartKind::Bar, series)
    }

    /// Histogram over sample series.
    #[must_use]
    pub fn histogram(series: Vec<ChartSeries>) -> Self {
        Self::new(ChartKind::Histogram, series)
    }

    /// Heatmap over matrix series.
    #[must_use]
    pub fn heatmap(series: Vec<ChartSeries>) -> Self {
        Self::new(ChartKind::Heatmap, series)
    }

    /// Scatter chart over x/y series.
    #[must_use]
    pub fn scatter(series: Vec<ChartSeries>) -> Self {
        Self::new(ChartKind::Scatter, series)
    }

    /// Box plot over sample series.
    #[must_use]
    pub fn box_plot(series: Vec<ChartSeries>) -> Self {
        Self::new(ChartKind::Box, series)
    }

    /// Parallel-coordinates chart over record series.
    #[must_use]
    pub fn parallel_coords(series: Vec<ChartSeries>) -> Self {
        Self::new(ChartKind::ParallelCoords, series)
    }

    /// Set the figure title.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the x axis label.
    #[must_use]
    pub fn with_xlabel(mut self, label: &str) -> Self {
        self.xlabel = Some(label.to_string());
        self
    }

    /// Set the y axis label.
    #[must_use]
    pub fn with_ylabel(mut self, label: &str) -> Self {
        self.ylabel = Some(label.to_string());
        self
    }

    /// Set the layout hint.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutHint) -> Self {
        self.layout = layout;
        self
    }

    /// Set the chart-level style override.
    #[must_use]
    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = Some(style);
        self
    }

    /// Set figure dimensions in pixels.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enable the legend.
    #[must_use]
    pub fn with_legend(mut self) -> Self {
        self.show_legend = true;
        self
    }

    /// Force grid visibility on or off.
    #[must_use]
    pub fn with_grid(mut self, visible: bool) -> Self {
        self.show_grid = Some(visible);
        self
    }

    /// Share axis ranges across subplots.
    #[must_use]
    pub fn with_shared_axes(mut self, share_x: bool, share_y: bool) -> Self {
        self.share_x = share_x;
        self.share_y = share_y;
        self
    }

    /// Set the histogram bin count.
    #[must_use]
    pub fn with_num_bins(mut self, bins: usize) -> Self {
        self.num_bins = bins.max(1);
        self
    }

    /// Draw a regression line on scatter charts.
    #[must_use]
    pub fn with_regression(mut self) -> Self {
        self.show_regression = true;
        self
    }
}

impl batuta_common::display::WithDimensions for ChartCall {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
