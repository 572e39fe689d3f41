//! End-to-end chart rendering tests.
//!
//! One section per chart kind, plus layout planning, deterministic color
//! assignment, validation, and file output.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use trueno_chart::chart::{ChartCall, ChartKind, ChartSeries, LayoutHint, SeriesData};
use trueno_chart::error::Error;
use trueno_chart::figure::{Artist, FigureCell};
use trueno_chart::layout::{auto_grid, plan};
use trueno_chart::output::{figure_to_svg, save_figure};
use trueno_chart::render::render_chart;
use trueno_chart::style::{StyleConfig, ThemeId};

fn xy(label: &str, y: &[f32]) -> ChartSeries {
    let x: Vec<f32> = (0..y.len()).map(|i| i as f32).collect();
    ChartSeries::new(SeriesData::Xy { x, y: y.to_vec() }).with_label(label)
}

fn samples(label: &str, values: &[f32]) -> ChartSeries {
    ChartSeries::new(SeriesData::Samples(values.to_vec())).with_label(label)
}

// ============================================================================
// Chart kinds
// ============================================================================

#[test]
fn line_chart_renders_one_polyline_per_series() {
    let store = StyleConfig::new();
    let call = ChartCall::line(vec![xy("a", &[1.0, 2.0, 3.0]), xy("b", &[3.0, 2.0, 1.0])]);
    let figure = render_chart(&store, &call).unwrap();

    assert_eq!((figure.rows, figure.cols), (1, 1));
    let lines: Vec<_> = figure
        .artists()
        .filter(|a| matches!(a, Artist::Line { .. }))
        .collect();
    assert_eq!(lines.len(), 2);
}

#[test]
fn bar_chart_keeps_category_labels() {
    let store = StyleConfig::new();
    let call = ChartCall::bar(vec![ChartSeries::new(SeriesData::Categories {
        labels: vec!["mon".into(), "tue".into(), "wed".into()],
        values: vec![3.0, 1.0, 4.0],
    })]);
    let figure = render_chart(&store, &call).unwrap();

    match figure.artists().next().unwrap() {
        Artist::Bars { labels, values, .. } => {
            assert_eq!(labels, &["mon", "tue", "wed"]);
            assert_eq!(values, &[3.0, 1.0, 4.0]);
        }
        other => panic!("expected bars, got {other:?}"),
    };
}

#[test]
fn histogram_series_share_bin_edges() {
    let store = StyleConfig::new();
    let call = ChartCall::histogram(vec![
        samples("a", &[0.0, 1.0, 2.0, 3.0]),
        samples("b", &[10.0, 11.0, 12.0]),
    ])
    .with_num_bins(8);
    let figure = render_chart(&store, &call).unwrap();

    let edge_sets: Vec<&Vec<f32>> = figure
        .artists()
        .map(|artist| match artist {
            Artist::Hist { edges, counts, .. } => {
                assert_eq!(edges.len(), counts.len() + 1);
                edges
            }
            other => panic!("expected histogram, got {other:?}"),
        })
        .collect();
    assert_eq!(edge_sets[0], edge_sets[1]);
    // edges span the union of both sample sets
    assert!((edge_sets[0][0] - 0.0).abs() < 1e-5);
    assert!((edge_sets[0].last().unwrap() - 12.0).abs() < 1e-5);
}

#[test]
fn histogram_counts_sum_to_sample_count() {
    let store = StyleConfig::new();
    let data: Vec<f32> = (0..97).map(|i| (i as f32 * 0.37).sin()).collect();
    let call = ChartCall::histogram(vec![samples("s", &data)]).with_num_bins(12);
    let figure = render_chart(&store, &call).unwrap();

    match figure.artists().next().unwrap() {
        Artist::Hist { counts, .. } => {
            let total: f32 = counts.iter().sum();
            assert!((total - 97.0).abs() < 1e-3);
        }
        other => panic!("expected histogram, got {other:?}"),
    };
}

#[test]
fn heatmap_cells_carry_normalization_range() {
    let store = StyleConfig::new();
    let call = ChartCall::heatmap(vec![ChartSeries::new(SeriesData::Matrix {
        rows: 2,
        cols: 3,
        values: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
    })]);
    let figure = render_chart(&store, &call).unwrap();

    match figure.artists().next().unwrap() {
        Artist::HeatGrid {
            rows,
            cols,
            values,
            colors,
            vmin,
            vmax,
            ..
        } => {
            assert_eq!((*rows, *cols), (2, 3));
            assert_eq!(values.len(), 6);
            assert_eq!(colors.len(), 6);
            assert!((vmin - 0.0).abs() < 1e-6);
            assert!((vmax - 5.0).abs() < 1e-6);
        }
        other => panic!("expected heat grid, got {other:?}"),
    };
}

#[test]
fn scatter_with_regression_adds_a_fit_line() {
    let store = StyleConfig::new();
    let call = ChartCall::scatter(vec![xy("pts", &[2.0, 4.0, 6.0, 8.0])]).with_regression();
    let figure = render_chart(&store, &call).unwrap();

    let artists: Vec<_> = figure.artists().collect();
    assert!(artists.iter().any(|a| matches!(a, Artist::Scatter { .. })));
    let fit = artists
        .iter()
        .find_map(|a| match a {
            Artist::Line { points, .. } => Some(points),
            _ => None,
        })
        .expect("regression line present");
    // y = 2x + 2 over x in [0, 3]
    assert!((fit[0].1 - 2.0).abs() < 1e-3);
    assert!((fit[1].1 - 8.0).abs() < 1e-3);
}

#[test]
fn box_plot_computes_quartiles() {
    let store = StyleConfig::new();
    let data: Vec<f32> = (1..=9).map(|i| i as f32).collect();
    let call = ChartCall::box_plot(vec![samples("s", &data)]);
    let figure = render_chart(&store, &call).unwrap();

    match figure.artists().next().unwrap() {
        Artist::BoxGlyph { stats, .. } => {
            assert!((stats.median - 5.0).abs() < 1e-5);
            assert!((stats.q1 - 3.0).abs() < 1e-5);
            assert!((stats.q3 - 7.0).abs() < 1e-5);
            assert!(stats.outliers.is_empty());
        }
        other => panic!("expected box glyph, got {other:?}"),
    };
}

#[test]
fn box_plot_flags_outliers_beyond_the_fences() {
    let store = StyleConfig::new();
    let mut data: Vec<f32> = (1..=20).map(|i| i as f32).collect();
    data.push(500.0);
    let call = ChartCall::box_plot(vec![samples("s", &data)]);
    let figure = render_chart(&store, &call).unwrap();

    match figure.artists().next().unwrap() {
        Artist::BoxGlyph { stats, .. } => {
            assert_eq!(stats.outliers, vec![500.0]);
            assert!(stats.whisker_high <= 20.0);
        }
        other => panic!("expected box glyph, got {other:?}"),
    };
}

#[test]
fn box_series_occupy_consecutive_slots() {
    let store = StyleConfig::new();
    let call = ChartCall::box_plot(vec![
        samples("a", &[1.0, 2.0, 3.0]),
        samples("b", &[4.0, 5.0, 6.0]),
    ]);
    let figure = render_chart(&store, &call).unwrap();

    let slots: Vec<usize> = figure
        .artists()
        .map(|artist| match artist {
            Artist::BoxGlyph { slot, .. } => *slot,
            other => panic!("expected box glyph, got {other:?}"),
        })
        .collect();
    assert_eq!(slots, vec![0, 1]);
}

#[test]
fn parallel_coords_normalizes_each_dimension() {
    let store = StyleConfig::new();
    let call = ChartCall::parallel_coords(vec![ChartSeries::new(SeriesData::Records {
        dims: vec!["lr".into(), "loss".into()],
        rows: vec![vec![0.001, 10.0], vec![0.1, 20.0]],
    })]);
    let figure = render_chart(&store, &call).unwrap();

    match figure.artists().next().unwrap() {
        Artist::ParallelLines { rows, .. } => {
            assert_eq!(rows[0], vec![0.0, 0.0]);
            assert_eq!(rows[1], vec![1.0, 1.0]);
        }
        other => panic!("expected parallel lines, got {other:?}"),
    };
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn auto_grid_prefers_square_shapes() {
    assert_eq!(auto_grid(1), (1, 1));
    assert_eq!(auto_grid(2), (1, 2));
    assert_eq!(auto_grid(3), (2, 2));
    assert_eq!(auto_grid(4), (2, 2));
    assert_eq!(auto_grid(5), (2, 3));
    assert_eq!(auto_grid(6), (2, 3));
    assert_eq!(auto_grid(9), (3, 3));
}

#[test]
fn heatmaps_get_one_panel_per_series() {
    let store = StyleConfig::new();
    let matrix = |base: f32| {
        ChartSeries::new(SeriesData::Matrix {
            rows: 2,
            cols: 2,
            values: vec![base, base + 1.0, base + 2.0, base + 3.0],
        })
        .with_label(&format!("m{base}"))
    };
    let call = ChartCall::heatmap(vec![matrix(0.0), matrix(10.0), matrix(20.0)]);
    let figure = render_chart(&store, &call).unwrap();

    assert_eq!((figure.rows, figure.cols), (2, 2));
    assert_eq!(figure.axes().count(), 3);
    assert!(matches!(figure.cells[3], FigureCell::Empty));
    let subtitles: Vec<_> = figure
        .axes()
        .map(|view| view.subtitle.as_deref().unwrap())
        .collect();
    assert_eq!(subtitles, vec!["m0", "m10", "m20"]);
}

#[test]
fn single_axes_hint_rejected_for_heatmaps() {
    let store = StyleConfig::new();
    let matrix = ChartSeries::new(SeriesData::Matrix {
        rows: 1,
        cols: 1,
        values: vec![1.0],
    });
    let call = ChartCall::heatmap(vec![matrix.clone(), matrix])
        .with_layout(LayoutHint::SingleAxes);
    let err = render_chart(&store, &call).unwrap_err();
    assert!(matches!(err, Error::InvalidChartCall { .. }));
}

#[test]
fn explicit_grid_too_small_is_rejected() {
    let store = StyleConfig::new();
    let call = ChartCall::line(vec![
        xy("a", &[1.0]),
        xy("b", &[2.0]),
        xy("c", &[3.0]),
    ])
    .with_layout(LayoutHint::Subplots {
        grid: Some((1, 2)),
    });
    let err = render_chart(&store, &call).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidGrid { rows: 1, cols: 2, count: 3 }
    ));
}

#[test]
fn subplots_hint_gives_each_line_its_own_panel() {
    let store = StyleConfig::new();
    let call = ChartCall::line(vec![xy("a", &[1.0, 2.0]), xy("b", &[3.0, 4.0])])
        .with_layout(LayoutHint::Subplots { grid: None });
    let figure = render_chart(&store, &call).unwrap();
    assert_eq!(figure.axes().count(), 2);
    for view in figure.axes() {
        assert_eq!(view.artists.len(), 1);
    }
}

#[test]
fn plan_records_shared_axis_flags() {
    let call = ChartCall::line(vec![xy("a", &[1.0]), xy("b", &[2.0])])
        .with_layout(LayoutHint::Subplots { grid: None })
        .with_shared_axes(true, false);
    let plan = plan(&call).unwrap();
    assert!(plan.per_series_axes);
    assert!(plan.share_x);
    assert!(!plan.share_y);
}

// ============================================================================
// Color assignment
// ============================================================================

#[test]
fn series_color_survives_reordering() {
    let store = StyleConfig::new();
    let a = xy("loss", &[1.0, 0.5]);
    let b = xy("accuracy", &[0.5, 0.9]);

    let fig1 = render_chart(&store, &ChartCall::line(vec![a.clone(), b.clone()])).unwrap();
    let fig2 = render_chart(&store, &ChartCall::line(vec![b, a])).unwrap();

    let color_of = |fig: &trueno_chart::RenderedFigure, label: &str| {
        fig.metadata
            .as_ref()
            .unwrap()
            .series
            .iter()
            .find(|s| s.label.as_deref() == Some(label))
            .unwrap()
            .color
    };
    assert_eq!(color_of(&fig1, "loss"), color_of(&fig2, "loss"));
    assert_eq!(color_of(&fig1, "accuracy"), color_of(&fig2, "accuracy"));
}

#[test]
fn theme_change_recolors_without_moving_positions() {
    let series = vec![xy("loss", &[1.0, 0.5]), xy("accuracy", &[0.5, 0.9])];
    let call = ChartCall::line(series);

    let default_fig = render_chart(&StyleConfig::new(), &call).unwrap();
    let grey_fig =
        render_chart(&StyleConfig::with_theme(ThemeId::Greyscale), &call).unwrap();

    let default_meta = default_fig.metadata.unwrap();
    let grey_meta = grey_fig.metadata.unwrap();
    for (d, g) in default_meta.series.iter().zip(&grey_meta.series) {
        assert_eq!(d.fingerprint, g.fingerprint);
        assert_ne!(d.color, g.color);
    }
}

#[test]
fn subplot_panels_share_the_singular_color() {
    let store = StyleConfig::new();
    let call = ChartCall::line(vec![xy("a", &[1.0, 2.0]), xy("b", &[3.0, 4.0])])
        .with_layout(LayoutHint::Subplots { grid: None });
    let figure = render_chart(&store, &call).unwrap();

    let colors: Vec<_> = figure
        .artists()
        .map(|a| a.color().unwrap())
        .collect();
    assert_eq!(colors.len(), 2);
    assert_eq!(colors[0], colors[1]);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn empty_series_list_is_rejected() {
    let store = StyleConfig::new();
    let err = render_chart(&store, &ChartCall::line(vec![])).unwrap_err();
    assert!(matches!(err, Error::InvalidChartCall { .. }));
}

#[test]
fn mismatched_xy_lengths_name_the_series() {
    let store = StyleConfig::new();
    let call = ChartCall::line(vec![
        xy("ok", &[1.0, 2.0]),
        ChartSeries::new(SeriesData::Xy {
            x: vec![0.0, 1.0],
            y: vec![1.0],
        }),
    ]);
    let err = render_chart(&store, &call).unwrap_err();
    match err {
        Error::InvalidChartCall { reason } => assert!(reason.contains("series 1")),
        other => panic!("expected invalid chart call, got {other}"),
    }
}

#[test]
fn wrong_data_shape_for_kind_is_rejected() {
    let store = StyleConfig::new();
    let call = ChartCall::bar(vec![samples("s", &[1.0, 2.0])]);
    let err = render_chart(&store, &call).unwrap_err();
    assert!(matches!(err, Error::InvalidChartCall { .. }));
}

#[test]
fn matrix_shape_must_match_value_count() {
    let store = StyleConfig::new();
    let call = ChartCall::heatmap(vec![ChartSeries::new(SeriesData::Matrix {
        rows: 2,
        cols: 2,
        values: vec![1.0, 2.0, 3.0],
    })]);
    let err = render_chart(&store, &call).unwrap_err();
    assert!(matches!(err, Error::InvalidChartCall { .. }));
}

// ============================================================================
// File output
// ============================================================================

#[test]
fn save_figure_writes_svg_to_disk() {
    let store = StyleConfig::new();
    let call = ChartCall::line(vec![xy("loss", &[1.0, 0.5, 0.25])])
        .with_title("Training")
        .with_legend();
    let figure = render_chart(&store, &call).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("training.svg");
    save_figure(&figure, &path).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert_eq!(svg, figure_to_svg(&figure));
    assert_eq!(svg.matches("<svg").count(), 1);
    assert!(svg.contains("<rect"));
    let color = figure.metadata.as_ref().unwrap().series[0].color;
    assert!(svg.contains(&color.to_css()));
    assert!(svg.contains("Training"));
    assert!(svg.contains("loss"));
}

#[test]
fn save_figure_rejects_unknown_formats() {
    let store = StyleConfig::new();
    let figure = render_chart(&store, &ChartCall::line(vec![xy("a", &[1.0])])).unwrap();
    for path in ["chart.pdf", "chart.png", "chart"] {
        let err = save_figure(&figure, path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }), "{path}");
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn auto_grid_always_fits_and_stays_square(n in 1usize..500) {
        let (rows, cols) = auto_grid(n);
        prop_assert!(rows * cols >= n);
        prop_assert!(cols >= rows);
        prop_assert!(cols - rows <= 1);
    }

    #[test]
    fn fingerprints_are_stable_and_label_sensitive(
        label in "[a-z]{1,12}",
        y in proptest::collection::vec(-1e6f32..1e6, 1..40),
    ) {
        let x: Vec<f32> = (0..y.len()).map(|i| i as f32).collect();
        let series = ChartSeries::new(SeriesData::Xy { x: x.clone(), y: y.clone() })
            .with_label(&label);
        let again = ChartSeries::new(SeriesData::Xy { x: x.clone(), y: y.clone() })
            .with_label(&label);
        prop_assert_eq!(series.fingerprint(), again.fingerprint());

        let relabeled = ChartSeries::new(SeriesData::Xy { x, y })
            .with_label(&format!("{label}!"));
        prop_assert_ne!(series.fingerprint(), relabeled.fingerprint());
    }

    #[test]
    fn every_rendered_series_gets_a_cycle_color(
        n in 1usize..12,
    ) {
        let store = StyleConfig::new();
        let series: Vec<ChartSeries> = (0..n)
            .map(|i| xy(&format!("s{i}"), &[i as f32, i as f32 + 1.0]))
            .collect();
        let figure = render_chart(&store, &ChartCall::line(series)).unwrap();
        let meta = figure.metadata.unwrap();
        prop_assert_eq!(meta.series.len(), n);
        prop_assert_eq!(meta.kind, ChartKind::Line);
    }
}
