//! Retained figure model.
//!
//! Rendering produces a [`RenderedFigure`]: a grid of cells holding drawn
//! artists plus the chrome resolved at render time. Figures are plain
//! values; the composition engine clones artists between them and the
//! output backend walks them without re-resolving any style.

use crate::chart::ChartKind;
use crate::color::Rgba;
use crate::layout::LayoutPlan;
use crate::style::{StyleSheet, ThemeId};

/// Box-and-whisker summary statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxStats {
    /// Lower whisker end (smallest sample inside the fence).
    pub whisker_low: f32,
    /// First quartile.
    pub q1: f32,
    /// Median.
    pub median: f32,
    /// Third quartile.
    pub q3: f32,
    /// Upper whisker end (largest sample inside the fence).
    pub whisker_high: f32,
    /// Samples beyond the 1.5 IQR fences.
    pub outliers: Vec<f32>,
}

/// One drawn element with its resolved style baked in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Artist {
    /// Connected polyline.
    Line {
        /// X/y points in data space.
        points: Vec<(f32, f32)>,
        /// Stroke color.
        color: Rgba,
        /// Stroke width.
        width: f32,
        /// Opacity in [0, 1].
        alpha: f32,
        /// Legend label.
        label: Option<String>,
    },
    /// Categorical bars.
    Bars {
        /// Category labels.
        labels: Vec<String>,
        /// One height per category.
        values: Vec<f32>,
        /// Fill color.
        color: Rgba,
        /// Edge color.
        edge_color: Rgba,
        /// Edge width.
        edge_width: f32,
        /// Bar width as a fraction of the category slot.
        width: f32,
        /// Opacity in [0, 1].
        alpha: f32,
        /// Legend label.
        label: Option<String>,
    },
    /// Binned histogram columns.
    Hist {
        /// Bin edges, `counts.len() + 1` entries.
        edges: Vec<f32>,
        /// Count per bin.
        counts: Vec<f32>,
        /// Fill color.
        color: Rgba,
        /// Edge color.
        edge_color: Rgba,
        /// Edge width.
        edge_width: f32,
        /// Opacity in [0, 1].
        alpha: f32,
        /// Legend label.
        label: Option<String>,
    },
    /// Colored matrix cells.
    HeatGrid {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
        /// Cell values, row-major.
        values: Vec<f32>,
        /// One resolved color per cell, row-major.
        colors: Vec<Rgba>,
        /// Normalization minimum.
        vmin: f32,
        /// Normalization maximum.
        vmax: f32,
        /// Annotation font size.
        font_size: f32,
        /// Annotation font color.
        font_color: Rgba,
    },
    /// Unconnected markers.
    Scatter {
        /// X/y points in data space.
        points: Vec<(f32, f32)>,
        /// Marker color.
        color: Rgba,
        /// Marker radius.
        size: f32,
        /// Opacity in [0, 1].
        alpha: f32,
        /// Legend label.
        label: Option<String>,
    },
    /// One box-and-whisker glyph.
    BoxGlyph {
        /// Summary statistics.
        stats: BoxStats,
        /// Horizontal slot index on the shared axes.
        slot: usize,
        /// Box width as a fraction of the slot.
        width: f32,
        /// Box color.
        color: Rgba,
        /// Median line color.
        median_color: Rgba,
        /// Whisker stroke width.
        whisker_width: f32,
        /// Legend label.
        label: Option<String>,
    },
    /// Parallel-coordinate record lines.
    ParallelLines {
        /// Dimension names, one per vertical axis.
        dims: Vec<String>,
        /// Normalized records: per row, one value in [0, 1] per dimension.
        rows: Vec<Vec<f32>>,
        /// Line color.
        color: Rgba,
        /// Line width.
        width: f32,
        /// Opacity in [0, 1].
        alpha: f32,
        /// Axis stroke color.
        axis_color: Rgba,
        /// Legend label.
        label: Option<String>,
    },
}

impl Artist {
    /// The artist's legend label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Artist::Line { label, .. }
            | Artist::Bars { label, .. }
            | Artist::Hist { label, .. }
            | Artist::Scatter { label, .. }
            | Artist::BoxGlyph { label, .. }
            | Artist::ParallelLines { label, .. } => label.as_deref(),
            Artist::HeatGrid { .. } => None,
        }
    }

    /// The artist's primary color, if it has a single one.
    #[must_use]
    pub fn color(&self) -> Option<Rgba> {
        match self {
            Artist::Line { color, .. }
            | Artist::Bars { color, .. }
            | Artist::Hist { color, .. }
            | Artist::Scatter { color, .. }
            | Artist::BoxGlyph { color, .. }
            | Artist::ParallelLines { color, .. } => Some(*color),
            Artist::HeatGrid { .. } => None,
        }
    }

    /// Min/max of the artist's y values, `None` when it has no y scale.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f32, f32)> {
        let minmax = |it: &mut dyn Iterator<Item = f32>| -> Option<(f32, f32)> {
            it.fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
        };
        match self {
            Artist::Line { points, .. } | Artist::Scatter { points, .. } => {
                minmax(&mut points.iter().map(|&(_, y)| y))
            }
            Artist::Bars { values, .. } => {
                minmax(&mut values.iter().copied().chain(std::iter::once(0.0)))
            }
            Artist::Hist { counts, .. } => {
                minmax(&mut counts.iter().copied().chain(std::iter::once(0.0)))
            }
            Artist::BoxGlyph { stats, .. } => {
                let mut vals = vec![stats.whisker_low, stats.whisker_high];
                vals.extend_from_slice(&stats.outliers);
                minmax(&mut vals.into_iter())
            }
            Artist::HeatGrid { .. } | Artist::ParallelLines { .. } => None,
        }
    }

    /// Min/max of the artist's x values, `None` when it has no x scale.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f32, f32)> {
        match self {
            Artist::Line { points, .. } | Artist::Scatter { points, .. } => points
                .iter()
                .map(|&(x, _)| x)
                .fold(None, |acc, v| match acc {
                    None => Some((v, v)),
                    Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                }),
            Artist::Hist { edges, .. } => match (edges.first(), edges.last()) {
                (Some(&lo), Some(&hi)) => Some((lo, hi)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// One legend entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendEntry {
    /// Display label.
    pub label: String,
    /// Swatch color.
    pub color: Rgba,
}

/// One axes panel.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxesView {
    /// Artists on the primary (left) y axis.
    pub artists: Vec<Artist>,
    /// Artists on the secondary (right) y axis; empty unless overlaid
    /// with dual axes.
    pub secondary: Vec<Artist>,
    /// Panel subtitle.
    pub subtitle: Option<String>,
    /// Panel x label.
    pub xlabel: Option<String>,
    /// Panel y label (left).
    pub ylabel: Option<String>,
    /// Right y label, set only with a secondary axis.
    pub ylabel_right: Option<String>,
}

/// One grid cell of a figure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FigureCell {
    /// An axes panel.
    Axes(AxesView),
    /// A nested source figure (grid combination).
    Figure(Box<RenderedFigure>),
    /// An unoccupied trailing cell.
    Empty,
}

/// Figure-level chrome resolved at render time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FigureChrome {
    /// Figure background color.
    pub figure_background: Rgba,
    /// Panel background color.
    pub panel_background: Rgba,
    /// Spine visibility: top, right, bottom, left.
    pub spines: [bool; 4],
    /// Spine stroke width.
    pub spine_width: f32,
    /// Spine stroke color.
    pub spine_color: Rgba,
    /// Grid visibility.
    pub grid_visible: bool,
    /// Grid line color.
    pub grid_color: Rgba,
    /// Grid line width.
    pub grid_line_width: f32,
    /// Grid opacity.
    pub grid_alpha: f32,
    /// Font family.
    pub font_family: String,
    /// Font size for in-panel annotations (category and dimension labels).
    pub general_size: f32,
    /// Font color for in-panel annotations.
    pub general_color: Rgba,
    /// Title font size.
    pub title_size: f32,
    /// Title font color.
    pub title_color: Rgba,
    /// Subtitle font size.
    pub subtitle_size: f32,
    /// Subtitle font color.
    pub subtitle_color: Rgba,
    /// Axis label font size.
    pub axis_label_size: f32,
    /// Axis label font color.
    pub axis_label_color: Rgba,
    /// Tick mark length in pixels.
    pub tick_length: f32,
    /// Tick label font size.
    pub tick_label_size: f32,
    /// Legend font size.
    pub legend_font_size: f32,
    /// Draw a frame around the legend.
    pub legend_frame: bool,
    /// Show the legend.
    pub show_legend: bool,
}

/// Per-series render record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesRecord {
    /// Series label, if any.
    pub label: Option<String>,
    /// Stable identity fingerprint.
    pub fingerprint: u64,
    /// Assigned color.
    pub color: Rgba,
}

/// Read-only record of how a figure was produced.
///
/// Composite figures (overlay, grid combination) carry none and cannot be
/// composed further.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartMetadata {
    /// Chart kind.
    pub kind: ChartKind,
    /// Theme active at render time.
    pub theme: ThemeId,
    /// Frozen style sheet the render resolved against.
    pub style: StyleSheet,
    /// Per-series records in call order.
    pub series: Vec<SeriesRecord>,
    /// The layout plan used.
    pub plan: LayoutPlan,
}

/// A fully rendered figure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedFigure {
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Cells, row-major, `rows * cols` entries.
    pub cells: Vec<FigureCell>,
    /// Figure title.
    pub title: Option<String>,
    /// Figure-level x label.
    pub xlabel: Option<String>,
    /// Figure-level y label.
    pub ylabel: Option<String>,
    /// Legend entries, deduplicated by label.
    pub legend: Vec<LegendEntry>,
    /// Resolved chrome.
    pub chrome: FigureChrome,
    /// Render record; `None` on composite figures.
    pub metadata: Option<ChartMetadata>,
}

impl RenderedFigure {
    /// Iterate the figure's axes panels in row-major order.
    pub fn axes(&self) -> impl Iterator<Item = &AxesView> {
        self.cells.iter().filter_map(|cell| match cell {
            FigureCell::Axes(view) => Some(view),
            _ => None,
        })
    }

    /// All artists across this figure's own axes (not nested figures).
    pub fn artists(&self) -> impl Iterator<Item = &Artist> {
        self.axes()
            .flat_map(|view| view.artists.iter().chain(view.secondary.iter()))
    }
}
