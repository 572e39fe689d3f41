//! Per-kind artist construction.
//!
//! Each chart kind maps a validated series plus its resolved style onto
//! one or two [`Artist`]s. All numeric work happens here; the render
//! pipeline only dispatches and places the results.

use crate::chart::{ChartKind, ChartSeries, SeriesData};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::{Artist, BoxStats};
use crate::stats;
use crate::style::{StyleAttr, StyleResolver};

/// Per-series drawing context supplied by the render pipeline.
#[derive(Debug, Clone, Default)]
pub struct DrawContext {
    /// Histogram bin count.
    pub num_bins: usize,
    /// Pre-computed bin edges shared across series on one axes.
    pub shared_edges: Option<Vec<f32>>,
    /// Horizontal slot on the shared axes (box plots).
    pub slot: usize,
    /// Add a least-squares regression line (scatter).
    pub show_regression: bool,
}

/// Build the artists for one series.
pub fn draw_series(
    kind: ChartKind,
    series: &ChartSeries,
    resolver: &StyleResolver<'_>,
    color: Rgba,
    ctx: &DrawContext,
) -> Result<Vec<Artist>> {
    match (kind, &series.data) {
        (ChartKind::Line, SeriesData::Xy { x, y }) => Ok(vec![Artist::Line {
            points: x.iter().copied().zip(y.iter().copied()).collect(),
            color,
            width: resolver.f32(StyleAttr::LineWidth),
            alpha: resolver.f32(StyleAttr::LineAlpha),
            label: series.label.clone(),
        }]),

        (ChartKind::Scatter, SeriesData::Xy { x, y }) => {
            let mut artists = vec![Artist::Scatter {
                points: x.iter().copied().zip(y.iter().copied()).collect(),
                color,
                size: resolver.f32(StyleAttr::MarkerSize),
                alpha: resolver.f32(StyleAttr::MarkerAlpha),
                label: series.label.clone(),
            }];
            if ctx.show_regression {
                if let Some(line) = regression_line(x, y, color, resolver) {
                    artists.push(line);
                }
            }
            Ok(artists)
        }

        (ChartKind::Bar, SeriesData::Categories { labels, values }) => Ok(vec![Artist::Bars {
            labels: labels.clone(),
            values: values.clone(),
            color,
            edge_color: resolver.color(StyleAttr::BarEdgeColor),
            edge_width: resolver.f32(StyleAttr::BarEdgeWidth),
            width: resolver.f32(StyleAttr::BarWidth),
            alpha: resolver.f32(StyleAttr::BarAlpha),
            label: series.label.clone(),
        }]),

        (ChartKind::Histogram, SeriesData::Samples(values)) => {
            let edges = match &ctx.shared_edges {
                Some(edges) => edges.clone(),
                None => bin_edges(values, ctx.num_bins),
            };
            let counts = bin_counts(values, &edges);
            Ok(vec![Artist::Hist {
                edges,
                counts,
                color,
                edge_color: resolver.color(StyleAttr::HistEdgeColor),
                edge_width: resolver.f32(StyleAttr::HistEdgeWidth),
                alpha: resolver.f32(StyleAttr::HistAlpha),
                label: series.label.clone(),
            }])
        }

        (ChartKind::Box, SeriesData::Samples(values)) => Ok(vec![Artist::BoxGlyph {
            stats: box_stats(values),
            slot: ctx.slot,
            width: resolver.f32(StyleAttr::BoxWidth),
            color,
            median_color: resolver.color(StyleAttr::BoxMedianColor),
            whisker_width: resolver.f32(StyleAttr::BoxWhiskerWidth),
            label: series.label.clone(),
        }]),

        (ChartKind::Heatmap, SeriesData::Matrix { rows, cols, values }) => {
            let vmin = stats::minimum(values).unwrap_or(0.0);
            let vmax = stats::maximum(values).unwrap_or(1.0);
            let span = if vmax > vmin { vmax - vmin } else { 1.0 };
            let palette = resolver.palette(StyleAttr::HeatmapPalette);
            let alpha = (resolver.f32(StyleAttr::HeatmapAlpha).clamp(0.0, 1.0) * 255.0) as u8;
            let colors = values
                .iter()
                .map(|&v| palette.sample((v - vmin) / span).with_alpha(alpha))
                .collect();
            Ok(vec![Artist::HeatGrid {
                rows: *rows,
                cols: *cols,
                values: values.clone(),
                colors,
                vmin,
                vmax,
                font_size: resolver.f32(StyleAttr::HeatmapFontSize),
                font_color: resolver.color(StyleAttr::HeatmapFontColor),
            }])
        }

        (ChartKind::ParallelCoords, SeriesData::Records { dims, rows }) => {
            Ok(vec![Artist::ParallelLines {
                dims: dims.clone(),
                rows: normalize_records(dims.len(), rows),
                color,
                width: resolver.f32(StyleAttr::ParallelLineWidth),
                alpha: resolver.f32(StyleAttr::ParallelLineAlpha),
                axis_color: resolver.color(StyleAttr::ParallelAxisColor),
                label: series.label.clone(),
            }])
        }

        (kind, _) => Err(Error::InvalidChartCall {
            reason: format!("series data does not match {} chart", kind.name()),
        }),
    }
}

/// Evenly spaced bin edges spanning the samples. `bins + 1` entries.
pub(crate) fn bin_edges(values: &[f32], bins: usize) -> Vec<f32> {
    let bins = bins.max(1);
    let lo = stats::minimum(values).unwrap_or(0.0);
    let hi = stats::maximum(values).unwrap_or(1.0);
    let hi = if hi > lo { hi } else { lo + 1.0 };
    let step = (hi - lo) / bins as f32;
    (0..=bins).map(|i| lo + step * i as f32).collect()
}

fn bin_counts(values: &[f32], edges: &[f32]) -> Vec<f32> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0.0; bins];
    if bins == 0 {
        return counts;
    }
    let lo = edges[0];
    let hi = edges[bins];
    let span = hi - lo;
    for &v in values {
        if v < lo || v > hi || span <= 0.0 {
            continue;
        }
        let bin = (((v - lo) / span) * bins as f32) as usize;
        counts[bin.min(bins - 1)] += 1.0;
    }
    counts
}

/// Quartiles plus 1.5 IQR whisker fences.
pub(crate) fn box_stats(values: &[f32]) -> BoxStats {
    if values.is_empty() {
        return BoxStats {
            whisker_low: 0.0,
            q1: 0.0,
            median: 0.0,
            q3: 0.0,
            whisker_high: 0.0,
            outliers: Vec::new(),
        };
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = stats::percentile_sorted(&sorted, 0.25);
    let median = stats::percentile_sorted(&sorted, 0.5);
    let q3 = stats::percentile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let inside: Vec<f32> = sorted
        .iter()
        .copied()
        .filter(|&v| v >= lower_fence && v <= upper_fence)
        .collect();
    let whisker_low = inside.first().copied().unwrap_or(q1);
    let whisker_high = inside.last().copied().unwrap_or(q3);
    let outliers = sorted
        .into_iter()
        .filter(|&v| v < lower_fence || v > upper_fence)
        .collect();

    BoxStats {
        whisker_low,
        q1,
        median,
        q3,
        whisker_high,
        outliers,
    }
}

/// Per-dimension min/max normalization of records into [0, 1].
fn normalize_records(dims: usize, rows: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let mut lo = vec![f32::INFINITY; dims];
    let mut hi = vec![f32::NEG_INFINITY; dims];
    for row in rows {
        for (d, &v) in row.iter().enumerate().take(dims) {
            lo[d] = lo[d].min(v);
            hi[d] = hi[d].max(v);
        }
    }
    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .take(dims)
                .map(|(d, &v)| {
                    let span = hi[d] - lo[d];
                    if span > 0.0 {
                        (v - lo[d]) / span
                    } else {
                        0.5
                    }
                })
                .collect()
        })
        .collect()
}

fn regression_line(
    x: &[f32],
    y: &[f32],
    color: Rgba,
    resolver: &StyleResolver<'_>,
) -> Option<Artist> {
    let (slope, intercept) = stats::linear_fit(x, y)?;
    let lo = stats::minimum(x)?;
    let hi = stats::maximum(x)?;
    Some(Artist::Line {
        points: vec![(lo, slope * lo + intercept), (hi, slope * hi + intercept)],
        color,
        width: resolver.f32(StyleAttr::LineWidth),
        alpha: 0.8,
        label: None,
    })
}
