//! The render pipeline.
//!
//! `render_chart` is the one road from a declarative [`ChartCall`] to a
//! [`RenderedFigure`]: validate, plan the layout, resolve styles, assign
//! colors, draw each series, then apply the shared post-processing every
//! kind gets (titles, subtitles, legend, chrome). Every failure happens
//! before the figure exists; no partial figures escape.

use crate::chart::{ChartCall, ChartKind, SeriesData};
use crate::draw::{self, DrawContext};
use crate::error::{Error, Result};
use crate::figure::{
    AxesView, ChartMetadata, FigureCell, FigureChrome, LegendEntry, RenderedFigure, SeriesRecord,
};
use crate::layout;
use crate::style::{ColorCycle, StyleAttr, StyleConfig, StyleResolver};

/// Render a chart call against a style store.
pub fn render_chart(store: &StyleConfig, call: &ChartCall) -> Result<RenderedFigure> {
    validate(call)?;
    let plan = layout::plan(call)?;

    let chart_resolver = StyleResolver::new(store).with_chart(call.style.as_ref());
    let cycle = if plan.per_series_axes {
        ColorCycle::singular(chart_resolver.palette(StyleAttr::PaletteSingular))
    } else {
        ColorCycle::multiple(chart_resolver.palette(StyleAttr::PaletteMultiple))
    };

    // Single-axes histograms share one set of bin edges so the columns of
    // every series line up.
    let shared_edges = if call.kind == ChartKind::Histogram && !plan.per_series_axes {
        let all: Vec<f32> = call
            .series
            .iter()
            .flat_map(|s| match &s.data {
                SeriesData::Samples(v) => v.clone(),
                _ => Vec::new(),
            })
            .collect();
        Some(draw::bin_edges(&all, call.num_bins))
    } else {
        None
    };

    let mut records = Vec::with_capacity(call.series.len());
    let mut drawn = Vec::with_capacity(call.series.len());
    for (i, series) in call.series.iter().enumerate() {
        let resolver = chart_resolver.with_series(series.style.as_ref());
        let fingerprint = series.fingerprint();
        let color = cycle.color_for(fingerprint);
        let ctx = DrawContext {
            num_bins: call.num_bins,
            shared_edges: shared_edges.clone(),
            slot: i,
            show_regression: call.show_regression,
        };
        let artists = draw::draw_series(call.kind, series, &resolver, color, &ctx)?;
        records.push(SeriesRecord {
            label: series.label.clone(),
            fingerprint,
            color,
        });
        drawn.push(artists);
    }

    let cells = if plan.per_series_axes {
        let mut cells = Vec::with_capacity(plan.rows * plan.cols);
        for (series, artists) in call.series.iter().zip(drawn) {
            cells.push(FigureCell::Axes(AxesView {
                artists,
                subtitle: series.label.clone(),
                ..AxesView::default()
            }));
        }
        cells.resize(plan.rows * plan.cols, FigureCell::Empty);
        cells
    } else {
        vec![FigureCell::Axes(AxesView {
            artists: drawn.into_iter().flatten().collect(),
            ..AxesView::default()
        })]
    };

    let mut figure = RenderedFigure {
        width: call.width,
        height: call.height,
        rows: plan.rows,
        cols: plan.cols,
        cells,
        title: call.title.clone(),
        xlabel: call.xlabel.clone(),
        ylabel: call.ylabel.clone(),
        legend: Vec::new(),
        chrome: resolve_chrome(&chart_resolver, call),
        metadata: Some(ChartMetadata {
            kind: call.kind,
            theme: store.theme(),
            style: store.sheet().clone(),
            series: records,
            plan,
        }),
    };
    let legend = collect_legend(&figure);
    figure.legend = legend;
    Ok(figure)
}

/// Figure chrome from the chart-level resolver plus call flags.
pub(crate) fn resolve_chrome(resolver: &StyleResolver<'_>, call: &ChartCall) -> FigureChrome {
    FigureChrome {
        figure_background: resolver.color(StyleAttr::FigureBackground),
        panel_background: resolver.color(StyleAttr::PanelBackground),
        spines: [
            resolver.bool(StyleAttr::SpineTopVisible),
            resolver.bool(StyleAttr::SpineRightVisible),
            resolver.bool(StyleAttr::SpineBottomVisible),
            resolver.bool(StyleAttr::SpineLeftVisible),
        ],
        spine_width: resolver.f32(StyleAttr::SpineWidth),
        spine_color: resolver.color(StyleAttr::SpineColor),
        grid_visible: call
            .show_grid
            .unwrap_or_else(|| resolver.bool(StyleAttr::GridVisible)),
        grid_color: resolver.color(StyleAttr::GridColor),
        grid_line_width: resolver.f32(StyleAttr::GridLineWidth),
        grid_alpha: resolver.f32(StyleAttr::GridAlpha),
        font_family: resolver.text(StyleAttr::FontFamily).to_string(),
        general_size: resolver.f32(StyleAttr::FontGeneralSize),
        general_color: resolver.color(StyleAttr::FontGeneralColor),
        title_size: resolver.f32(StyleAttr::FontTitleSize),
        title_color: resolver.color(StyleAttr::FontTitleColor),
        subtitle_size: resolver.f32(StyleAttr::FontSubtitleSize),
        subtitle_color: resolver.color(StyleAttr::FontSubtitleColor),
        axis_label_size: resolver.f32(StyleAttr::FontAxisLabelSize),
        axis_label_color: resolver.color(StyleAttr::FontAxisLabelColor),
        tick_length: resolver.f32(StyleAttr::TickLength),
        tick_label_size: resolver.f32(StyleAttr::TickLabelSize),
        legend_font_size: resolver.f32(StyleAttr::LegendFontSize),
        legend_frame: resolver.bool(StyleAttr::LegendFrame),
        show_legend: call.show_legend,
    }
}

/// Legend entries across the figure, deduplicated by label (first wins).
pub(crate) fn collect_legend(figure: &RenderedFigure) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = Vec::new();
    for artist in figure.artists() {
        let (Some(label), Some(color)) = (artist.label(), artist.color()) else {
            continue;
        };
        if entries.iter().any(|e| e.label == label) {
            continue;
        }
        entries.push(LegendEntry {
            label: label.to_string(),
            color,
        });
    }
    entries
}

fn validate(call: &ChartCall) -> Result<()> {
    if call.series.is_empty() {
        return Err(Error::InvalidChartCall {
            reason: "chart call has no series".to_string(),
        });
    }
    for (i, series) in call.series.iter().enumerate() {
        validate_series(call.kind, &series.data)
            .map_err(|reason| Error::InvalidChartCall {
                reason: format!("series {i}: {reason}"),
            })?;
    }
    Ok(())
}

fn validate_series(kind: ChartKind, data: &SeriesData) -> std::result::Result<(), String> {
    match (kind, data) {
        (ChartKind::Line | ChartKind::Scatter, SeriesData::Xy { x, y }) => {
            if x.len() != y.len() {
                return Err(format!(
                    "x has {} points but y has {}",
                    x.len(),
                    y.len()
                ));
            }
            if x.is_empty() {
                return Err("no data points".to_string());
            }
            Ok(())
        }
        (ChartKind::Bar, SeriesData::Categories { labels, values }) => {
            if labels.len() != values.len() {
                return Err(format!(
                    "{} labels but {} values",
                    labels.len(),
                    values.len()
                ));
            }
            if labels.is_empty() {
                return Err("no categories".to_string());
            }
            Ok(())
        }
        (ChartKind::Histogram | ChartKind::Box, SeriesData::Samples(values)) => {
            if values.is_empty() {
                return Err("no samples".to_string());
            }
            Ok(())
        }
        (ChartKind::Heatmap, SeriesData::Matrix { rows, cols, values }) => {
            if *rows == 0 || *cols == 0 {
                return Err("empty matrix".to_string());
            }
            if rows * cols != values.len() {
                return Err(format!(
                    "{rows}x{cols} matrix needs {} values, got {}",
                    rows * cols,
                    values.len()
                ));
            }
            Ok(())
        }
        (ChartKind::ParallelCoords, SeriesData::Records { dims, rows }) => {
            if dims.len() < 2 {
                return Err("parallel coordinates need at least two dimensions".to_string());
            }
            if rows.is_empty() {
                return Err("no records".to_string());
            }
            if let Some(bad) = rows.iter().position(|r| r.len() != dims.len()) {
                return Err(format!(
                    "record {bad} has {} values for {} dimensions",
                    rows[bad].len(),
                    dims.len()
                ));
            }
            Ok(())
        }
        (kind, _) => Err(format!("series data does not match {} chart", kind.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartSeries, LayoutHint};
    use crate::style::ThemeId;

    fn xy(label: &str, y: &[f32]) -> ChartSeries {
        let x: Vec<f32> = (0..y.len()).map(|i| i as f32).collect();
        ChartSeries::new(SeriesData::Xy { x, y: y.to_vec() }).with_label(label)
    }

    #[test]
    fn test_render_line_chart() {
        let store = StyleConfig::new();
        let call = ChartCall::line(vec![xy("loss", &[1.0, 0.5, 0.25])])
            .with_title("training")
            .with_legend();
        let figure = render_chart(&store, &call).unwrap();

        assert_eq!((figure.rows, figure.cols), (1, 1));
        assert_eq!(figure.artists().count(), 1);
        assert_eq!(figure.title.as_deref(), Some("training"));
        assert_eq!(figure.legend.len(), 1);
        assert_eq!(figure.legend[0].label, "loss");

        let meta = figure.metadata.as_ref().unwrap();
        assert_eq!(meta.kind, ChartKind::Line);
        assert_eq!(meta.theme, ThemeId::Default);
        assert_eq!(meta.series.len(), 1);
        assert_eq!(meta.series[0].color, figure.legend[0].color);
    }

    #[test]
    fn test_color_stable_across_series_order() {
        let store = StyleConfig::new();
        let a = xy("alpha", &[1.0, 2.0]);
        let b = xy("beta", &[3.0, 4.0]);

        let fig1 = render_chart(&store, &ChartCall::line(vec![a.clone(), b.clone()])).unwrap();
        let fig2 = render_chart(&store, &ChartCall::line(vec![b, a])).unwrap();

        let color_of = |fig: &RenderedFigure, label: &str| {
            fig.metadata
                .as_ref()
                .unwrap()
                .series
                .iter()
                .find(|r| r.label.as_deref() == Some(label))
                .unwrap()
                .color
        };
        assert_eq!(color_of(&fig1, "alpha"), color_of(&fig2, "alpha"));
        assert_eq!(color_of(&fig1, "beta"), color_of(&fig2, "beta"));
    }

    #[test]
    fn test_theme_changes_colors_not_positions() {
        let series = xy("loss", &[1.0, 0.5]);
        let fp = series.fingerprint();

        let default_store = StyleConfig::new();
        let grey_store = StyleConfig::with_theme(ThemeId::Greyscale);
        let call = ChartCall::line(vec![series]);

        let fig_default = render_chart(&default_store, &call).unwrap();
        let fig_grey = render_chart(&grey_store, &call).unwrap();

        // same fingerprint recorded, different palette color
        assert_eq!(
            fig_default.metadata.as_ref().unwrap().series[0].fingerprint,
            fp
        );
        assert_eq!(fig_grey.metadata.as_ref().unwrap().series[0].fingerprint, fp);
        assert_ne!(
            fig_default.metadata.as_ref().unwrap().series[0].color,
            fig_grey.metadata.as_ref().unwrap().series[0].color
        );
    }

    #[test]
    fn test_subplot_layout_and_subtitles() {
        let store = StyleConfig::new();
        let series: Vec<ChartSeries> = (0..4)
            .map(|i| {
                ChartSeries::new(SeriesData::Samples(vec![i as f32, 1.0, 2.0, 3.0]))
                    .with_label(&format!("run {i}"))
            })
            .collect();
        let call = ChartCall::histogram(series)
            .with_layout(LayoutHint::Subplots { grid: None });
        let figure = render_chart(&store, &call).unwrap();

        assert_eq!((figure.rows, figure.cols), (2, 2));
        let subtitles: Vec<_> = figure.axes().filter_map(|a| a.subtitle.clone()).collect();
        assert_eq!(subtitles, vec!["run 0", "run 1", "run 2", "run 3"]);

        // singular cycle: every panel draws the same color
        let meta = figure.metadata.as_ref().unwrap();
        assert!(meta.series.windows(2).all(|w| w[0].color == w[1].color));
    }

    #[test]
    fn test_trailing_cells_empty() {
        let store = StyleConfig::new();
        let series: Vec<ChartSeries> = (0..3)
            .map(|i| ChartSeries::new(SeriesData::Samples(vec![i as f32, 1.0])))
            .collect();
        let call = ChartCall::histogram(series)
            .with_layout(LayoutHint::Subplots { grid: None });
        let figure = render_chart(&store, &call).unwrap();

        assert_eq!((figure.rows, figure.cols), (2, 2));
        assert_eq!(figure.cells.len(), 4);
        assert!(matches!(figure.cells[3], FigureCell::Empty));
    }

    #[test]
    fn test_shared_histogram_edges() {
        let store = StyleConfig::new();
        let call = ChartCall::histogram(vec![
            ChartSeries::new(SeriesData::Samples(vec![0.0, 1.0, 2.0])),
            ChartSeries::new(SeriesData::Samples(vec![5.0, 6.0, 10.0])),
        ])
        .with_layout(LayoutHint::SingleAxes);
        let figure = render_chart(&store, &call).unwrap();

        let edge_sets: Vec<Vec<f32>> = figure
            .artists()
            .filter_map(|a| match a {
                crate::figure::Artist::Hist { edges, .. } => Some(edges.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(edge_sets.len(), 2);
        assert_eq!(edge_sets[0], edge_sets[1]);
    }

    #[test]
    fn test_validation_reports_series_index() {
        let store = StyleConfig::new();
        let call = ChartCall::line(vec![
            xy("good", &[1.0, 2.0]),
            ChartSeries::new(SeriesData::Xy {
                x: vec![0.0, 1.0],
                y: vec![1.0],
            }),
        ]);
        let err = render_chart(&store, &call).unwrap_err();
        match err {
            Error::InvalidChartCall { reason } => assert!(reason.contains("series 1")),
            other => panic!("expected InvalidChartCall, got {other}"),
        }
    }

    #[test]
    fn test_empty_call_rejected() {
        let store = StyleConfig::new();
        let err = render_chart(&store, &ChartCall::line(vec![])).unwrap_err();
        assert!(matches!(err, Error::InvalidChartCall { .. }));
    }

    #[test]
    fn test_legend_dedup() {
        let store = StyleConfig::new();
        let call = ChartCall::line(vec![xy("same", &[1.0, 2.0]), xy("same", &[1.0, 2.0])])
            .with_legend();
        let figure = render_chart(&store, &call).unwrap();
        assert_eq!(figure.legend.len(), 1);
    }

    #[test]
    fn test_grid_flag_overrides_style() {
        let store = StyleConfig::new();
        let call = ChartCall::line(vec![xy("a", &[1.0, 2.0])]).with_grid(true);
        let figure = render_chart(&store, &call).unwrap();
        assert!(figure.chrome.grid_visible);
    }

    #[test]
    fn test_chrome_resolves_annotation_attrs() {
        use crate::color::Rgba;
        use crate::style::StyleValue;

        let mut store = StyleConfig::new();
        store
            .update([
                (
                    "font_subtitle_color",
                    StyleValue::Color(Rgba::from_hex("#112233").unwrap()),
                ),
                ("tick_length", StyleValue::F32(4.0)),
                ("font_general_size", StyleValue::F32(13.0)),
                (
                    "font_general_color",
                    StyleValue::Color(Rgba::from_hex("#445566").unwrap()),
                ),
            ])
            .unwrap();
        let figure = render_chart(&store, &ChartCall::line(vec![xy("a", &[1.0, 2.0])])).unwrap();

        assert_eq!(
            figure.chrome.subtitle_color,
            Rgba::from_hex("#112233").unwrap()
        );
        assert!((figure.chrome.tick_length - 4.0).abs() < f32::EPSILON);
        assert!((figure.chrome.general_size - 13.0).abs() < f32::EPSILON);
        assert_eq!(
            figure.chrome.general_color,
            Rgba::from_hex("#445566").unwrap()
        );
    }

    #[test]
    fn test_render_does_not_mutate_store() {
        let store = StyleConfig::new();
        let before = store.clone();
        let _ = render_chart(&store, &ChartCall::line(vec![xy("a", &[1.0, 2.0])])).unwrap();
        assert_eq!(store, before);
    }
}
