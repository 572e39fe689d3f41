//! Figure composition integration tests.
//!
//! Overlay and grid combination over real rendered figures, through to
//! SVG output of the composites.

#![allow(clippy::unwrap_used)]

use trueno_chart::chart::{ChartCall, ChartSeries, SeriesData};
use trueno_chart::compose::{combine_figures, overlay, OverlayOptions};
use trueno_chart::error::Error;
use trueno_chart::figure::{FigureCell, RenderedFigure};
use trueno_chart::output::{figure_to_svg, save_figure};
use trueno_chart::render::render_chart;
use trueno_chart::style::{StyleConfig, ThemeId};

fn line(store: &StyleConfig, label: &str, y: &[f32]) -> RenderedFigure {
    let x: Vec<f32> = (0..y.len()).map(|i| i as f32).collect();
    let call = ChartCall::line(vec![
        ChartSeries::new(SeriesData::Xy { x, y: y.to_vec() }).with_label(label),
    ]);
    render_chart(store, &call).unwrap()
}

fn bars(store: &StyleConfig, label: &str, values: &[f32]) -> RenderedFigure {
    let labels: Vec<String> = (0..values.len()).map(|i| format!("c{i}")).collect();
    let call = ChartCall::bar(vec![ChartSeries::new(SeriesData::Categories {
        labels,
        values: values.to_vec(),
    })
    .with_label(label)]);
    render_chart(store, &call).unwrap()
}

// ============================================================================
// Overlay
// ============================================================================

#[test]
fn overlay_mixes_chart_kinds() {
    let store = StyleConfig::new();
    let a = line(&store, "throughput", &[5.0, 6.0, 7.0]);
    let b = bars(&store, "errors", &[1.0, 0.0, 2.0]);

    let combined = overlay(
        &[a, b],
        &OverlayOptions::new()
            .with_title("service health")
            .with_legend(),
    )
    .unwrap();

    assert_eq!(combined.title.as_deref(), Some("service health"));
    assert_eq!(combined.artists().count(), 2);
    assert_eq!(combined.legend.len(), 2);
}

#[test]
fn overlay_keeps_each_figures_rendered_colors() {
    let store = StyleConfig::new();
    let a = line(&store, "a", &[1.0, 2.0]);
    let b = line(&store, "b", &[2.0, 1.0]);
    let color_a = a.metadata.as_ref().unwrap().series[0].color;
    let color_b = b.metadata.as_ref().unwrap().series[0].color;

    let combined = overlay(&[a, b], &OverlayOptions::new()).unwrap();
    let colors: Vec<_> = combined
        .artists()
        .map(|artist| artist.color().unwrap())
        .collect();
    assert_eq!(colors, vec![color_a, color_b]);
}

#[test]
fn overlay_dedups_repeated_labels() {
    let store = StyleConfig::new();
    let a = line(&store, "loss", &[1.0, 0.5]);
    let b = line(&store, "loss", &[0.9, 0.4]);
    let combined = overlay(&[a, b], &OverlayOptions::new().with_legend()).unwrap();
    assert_eq!(combined.legend.len(), 1);
}

#[test]
fn overlay_chrome_comes_from_the_first_figure() {
    let grey = StyleConfig::with_theme(ThemeId::Greyscale);
    let plain = StyleConfig::new();
    let a = line(&grey, "a", &[1.0, 2.0]);
    let expected = a.chrome.figure_background;
    let b = line(&plain, "b", &[2.0, 1.0]);

    let combined = overlay(&[a, b], &OverlayOptions::new()).unwrap();
    assert_eq!(combined.chrome.figure_background, expected);
    assert!(!combined.chrome.show_legend);
}

#[test]
fn dual_axis_labels_both_sides() {
    let store = StyleConfig::new();
    let small = line(&store, "latency", &[0.1, 0.2]);
    let large = line(&store, "requests", &[0.0, 9000.0]);

    let combined = overlay(
        &[small, large],
        &OverlayOptions::new()
            .with_dual_axis()
            .with_ylabel("latency (s)")
            .with_ylabel_right("requests"),
    )
    .unwrap();

    let view = combined.axes().next().unwrap();
    assert_eq!(view.ylabel.as_deref(), Some("latency (s)"));
    assert_eq!(view.ylabel_right.as_deref(), Some("requests"));
    assert_eq!(view.artists.len(), 1);
    assert_eq!(view.secondary.len(), 1);
}

#[test]
fn single_axis_overlay_drops_the_right_label() {
    let store = StyleConfig::new();
    let a = line(&store, "a", &[1.0, 2.0]);
    let b = line(&store, "b", &[2.0, 3.0]);
    let combined = overlay(
        &[a, b],
        &OverlayOptions::new()
            .with_dual_axis()
            .with_ylabel_right("unused"),
    )
    .unwrap();
    // compatible scales collapse to the left axis
    let view = combined.axes().next().unwrap();
    assert_eq!(view.ylabel_right, None);
}

#[test]
fn overlay_of_box_figures_is_rejected() {
    let store = StyleConfig::new();
    let call = ChartCall::box_plot(vec![ChartSeries::new(SeriesData::Samples(vec![
        1.0, 2.0, 3.0,
    ]))]);
    let boxes = render_chart(&store, &call).unwrap();
    let other = line(&store, "a", &[1.0, 2.0]);

    let err = overlay(&[other, boxes], &OverlayOptions::new()).unwrap_err();
    match err {
        Error::IncompatibleOverlay { reason } => assert!(reason.contains("box")),
        other => panic!("expected incompatible overlay, got {other}"),
    }
}

// ============================================================================
// Grid combination
// ============================================================================

#[test]
fn combined_grid_preserves_source_figures() {
    let store = StyleConfig::new();
    let sources: Vec<RenderedFigure> = (0..3)
        .map(|i| line(&store, &format!("run {i}"), &[i as f32, i as f32 + 1.0]))
        .collect();

    let combined = combine_figures(&sources, None).unwrap();
    assert_eq!((combined.rows, combined.cols), (2, 2));

    for (cell, source) in combined.cells.iter().zip(&sources) {
        match cell {
            FigureCell::Figure(nested) => {
                assert_eq!(nested.as_ref(), source);
                assert!(nested.metadata.is_some());
            }
            other => panic!("expected nested figure, got {other:?}"),
        }
    }
    assert!(matches!(combined.cells[3], FigureCell::Empty));
}

#[test]
fn combined_grid_of_mixed_kinds() {
    let store = StyleConfig::new();
    let a = line(&store, "trend", &[1.0, 2.0, 3.0]);
    let b = bars(&store, "counts", &[4.0, 5.0]);
    let hist = render_chart(
        &store,
        &ChartCall::histogram(vec![ChartSeries::new(SeriesData::Samples(vec![
            1.0, 1.5, 2.0, 2.5,
        ]))]),
    )
    .unwrap();

    let combined = combine_figures(&[a, b, hist], Some((1, 3))).unwrap();
    assert_eq!((combined.rows, combined.cols), (1, 3));
    assert_eq!(combined.width, 800 * 3);
    assert_eq!(combined.height, 600);
}

// ============================================================================
// Composite output
// ============================================================================

#[test]
fn composite_figures_render_to_svg() {
    let store = StyleConfig::new();
    let a = line(&store, "a", &[1.0, 2.0]);
    let b = line(&store, "b", &[2.0, 1.0]);

    let overlaid = overlay(
        &[a.clone(), b.clone()],
        &OverlayOptions::new().with_title("both").with_legend(),
    )
    .unwrap();
    let svg = figure_to_svg(&overlaid);
    assert!(svg.contains("both"));
    assert!(svg.matches("<polyline").count() >= 2);

    let grid = combine_figures(&[a, b], None).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.svg");
    save_figure(&grid, &path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.matches("<g transform=").count(), 2);
}
