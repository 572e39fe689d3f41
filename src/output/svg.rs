//! SVG vector output.
//!
//! Walks a [`RenderedFigure`] and emits scalable vector markup: panel
//! chrome, grid, spines, every artist, labels, and the legend. Nested
//! figures (grid combination) render into transformed groups so each
//! source figure keeps its own coordinate system.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::color::Rgba;
use crate::error::Result;
use crate::figure::{Artist, AxesView, FigureCell, FigureChrome, RenderedFigure};

const PANEL_PAD_LEFT: f32 = 45.0;
const PANEL_PAD_RIGHT: f32 = 15.0;
const PANEL_PAD_TOP: f32 = 24.0;
const PANEL_PAD_BOTTOM: f32 = 35.0;
const TITLE_BAND: f32 = 28.0;
const LEGEND_ROW: f32 = 16.0;

/// One SVG element.
#[derive(Debug, Clone)]
enum SvgElement {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<(Rgba, f32)>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    Polyline {
        points: Vec<(f32, f32)>,
        stroke: Rgba,
        stroke_width: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: &'static str,
        font_family: String,
        rotate: bool,
    },
    Group {
        transform: String,
        children: Vec<SvgElement>,
    },
}

/// Render a figure to an SVG document string.
#[must_use]
pub fn figure_to_svg(figure: &RenderedFigure) -> String {
    let elements = figure_elements(figure);

    let mut svg = String::with_capacity(4096);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        figure.width, figure.height, figure.width, figure.height
    );
    for element in &elements {
        write_element(&mut svg, element, 1);
    }
    svg.push_str("</svg>\n");
    svg
}

/// Render a figure to an SVG file.
pub fn write_svg<P: AsRef<Path>>(figure: &RenderedFigure, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(figure_to_svg(figure).as_bytes())?;
    Ok(())
}

fn figure_elements(figure: &RenderedFigure) -> Vec<SvgElement> {
    let mut out = Vec::new();
    let width = figure.width as f32;
    let height = figure.height as f32;

    out.push(SvgElement::Rect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        fill: figure.chrome.figure_background,
        stroke: None,
    });

    let mut top = 4.0;
    if let Some(title) = &figure.title {
        out.push(text(
            width / 2.0,
            top + figure.chrome.title_size,
            title,
            figure.chrome.title_size,
            figure.chrome.title_color,
            "middle",
            &figure.chrome.font_family,
        ));
        top += TITLE_BAND;
    }

    let mut bottom = height - 4.0;
    if let Some(xlabel) = &figure.xlabel {
        out.push(text(
            width / 2.0,
            bottom,
            xlabel,
            figure.chrome.axis_label_size,
            figure.chrome.axis_label_color,
            "middle",
            &figure.chrome.font_family,
        ));
        bottom -= 18.0;
    }
    let mut left = 2.0;
    if let Some(ylabel) = &figure.ylabel {
        let cy = (top + bottom) / 2.0;
        out.push(SvgElement::Text {
            x: left + figure.chrome.axis_label_size,
            y: cy,
            text: ylabel.clone(),
            font_size: figure.chrome.axis_label_size,
            fill: figure.chrome.axis_label_color,
            anchor: "middle",
            font_family: figure.chrome.font_family.clone(),
            rotate: true,
        });
        left += 18.0;
    }

    let grid_width = (width - left - 2.0) / figure.cols.max(1) as f32;
    let grid_height = (bottom - top) / figure.rows.max(1) as f32;

    // With shared subplot axes, every panel maps the same data range.
    let plan = figure.metadata.as_ref().map(|m| m.plan);
    let shared_x = plan.filter(|p| p.per_series_axes && p.share_x).and_then(|_| {
        figure
            .artists()
            .map(panel_x_extent)
            .fold(None, union)
    });
    let shared_y = plan.filter(|p| p.per_series_axes && p.share_y).and_then(|_| {
        figure
            .artists()
            .map(Artist::y_extent)
            .fold(None, union)
    });

    for (i, cell) in figure.cells.iter().enumerate() {
        let row = i / figure.cols.max(1);
        let col = i % figure.cols.max(1);
        let cx = left + col as f32 * grid_width;
        let cy = top + row as f32 * grid_height;
        match cell {
            FigureCell::Axes(view) => {
                let panel = PanelRect {
                    x: cx,
                    y: cy,
                    width: grid_width,
                    height: grid_height,
                };
                axes_elements(&mut out, view, &figure.chrome, panel, shared_x, shared_y);
            }
            FigureCell::Figure(nested) => {
                let sx = grid_width / nested.width.max(1) as f32;
                let sy = grid_height / nested.height.max(1) as f32;
                out.push(SvgElement::Group {
                    transform: format!("translate({cx} {cy}) scale({sx} {sy})"),
                    children: figure_elements(nested),
                });
            }
            FigureCell::Empty => {}
        }
    }

    if figure.chrome.show_legend && !figure.legend.is_empty() {
        legend_elements(&mut out, figure, width);
    }

    out
}

fn legend_elements(out: &mut Vec<SvgElement>, figure: &RenderedFigure, width: f32) {
    let chrome = &figure.chrome;
    let longest = figure
        .legend
        .iter()
        .map(|e| e.label.len())
        .max()
        .unwrap_or(0) as f32;
    let box_width = 26.0 + longest * chrome.legend_font_size * 0.62;
    let box_height = figure.legend.len() as f32 * LEGEND_ROW + 8.0;
    let x0 = width - box_width - 10.0;
    let y0 = 10.0;

    if chrome.legend_frame {
        out.push(SvgElement::Rect {
            x: x0,
            y: y0,
            width: box_width,
            height: box_height,
            fill: chrome.figure_background,
            stroke: Some((chrome.spine_color, chrome.spine_width)),
        });
    }
    for (i, entry) in figure.legend.iter().enumerate() {
        let row_y = y0 + 6.0 + i as f32 * LEGEND_ROW;
        out.push(SvgElement::Rect {
            x: x0 + 5.0,
            y: row_y,
            width: 10.0,
            height: 8.0,
            fill: entry.color,
            stroke: None,
        });
        out.push(text(
            x0 + 20.0,
            row_y + 8.0,
            &entry.label,
            chrome.legend_font_size,
            chrome.axis_label_color,
            "start",
            &chrome.font_family,
        ));
    }
}

/// Linear data-to-pixel mapping.
#[derive(Debug, Clone, Copy)]
struct LinearScale {
    d0: f32,
    d1: f32,
    r0: f32,
    r1: f32,
}

impl LinearScale {
    fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        let (d0, d1) = if domain.1 > domain.0 {
            domain
        } else {
            (domain.0 - 0.5, domain.0 + 0.5)
        };
        Self {
            d0,
            d1,
            r0: range.0,
            r1: range.1,
        }
    }

    fn map(&self, v: f32) -> f32 {
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }
}

fn union(acc: Option<(f32, f32)>, ext: Option<(f32, f32)>) -> Option<(f32, f32)> {
    match (acc, ext) {
        (None, e) => e,
        (a, None) => a,
        (Some((alo, ahi)), Some((lo, hi))) => Some((alo.min(lo), ahi.max(hi))),
    }
}

/// X extent an artist occupies on the panel; bars and boxes sit on slots.
fn panel_x_extent(artist: &Artist) -> Option<(f32, f32)> {
    match artist {
        Artist::Bars { values, .. } => Some((-0.5, values.len() as f32 - 0.5)),
        Artist::BoxGlyph { slot, .. } => Some((*slot as f32 - 0.5, *slot as f32 + 0.5)),
        other => other.x_extent(),
    }
}

fn pad_extent((lo, hi): (f32, f32)) -> (f32, f32) {
    let span = if hi > lo { hi - lo } else { 1.0 };
    (lo - span * 0.05, hi + span * 0.05)
}

/// A cell's outer region in figure pixels.
#[derive(Debug, Clone, Copy)]
struct PanelRect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

fn axes_elements(
    out: &mut Vec<SvgElement>,
    view: &AxesView,
    chrome: &FigureChrome,
    panel: PanelRect,
    shared_x: Option<(f32, f32)>,
    shared_y: Option<(f32, f32)>,
) {
    let (x, y) = (panel.x, panel.y);
    let px = x + PANEL_PAD_LEFT;
    let py = y + PANEL_PAD_TOP;
    let pw = (panel.width - PANEL_PAD_LEFT - PANEL_PAD_RIGHT).max(1.0);
    let ph = (panel.height - PANEL_PAD_TOP - PANEL_PAD_BOTTOM).max(1.0);

    out.push(SvgElement::Rect {
        x: px,
        y: py,
        width: pw,
        height: ph,
        fill: chrome.panel_background,
        stroke: None,
    });

    if chrome.grid_visible {
        let color = chrome
            .grid_color
            .with_alpha((chrome.grid_alpha.clamp(0.0, 1.0) * 255.0) as u8);
        for i in 1..5 {
            let gy = py + ph * i as f32 / 5.0;
            out.push(SvgElement::Line {
                x1: px,
                y1: gy,
                x2: px + pw,
                y2: gy,
                stroke: color,
                stroke_width: chrome.grid_line_width,
            });
        }
    }

    // One x scale per panel; primary and secondary get their own y scale.
    let x_domain = shared_x
        .or_else(|| {
            view.artists
                .iter()
                .chain(&view.secondary)
                .map(panel_x_extent)
                .fold(None, union)
        })
        .unwrap_or((0.0, 1.0));
    let x_scale = LinearScale::new(pad_extent(x_domain), (px, px + pw));

    // Primary and secondary artists share the panel geometry; each side
    // gets its own y scale.
    for (artists, secondary) in [(&view.artists, false), (&view.secondary, true)] {
        if artists.is_empty() {
            continue;
        }
        let side_shared = if secondary { None } else { shared_y };
        let y_domain = side_shared
            .or_else(|| artists.iter().map(Artist::y_extent).fold(None, union))
            .unwrap_or((0.0, 1.0));
        let y_scale = LinearScale::new(pad_extent(y_domain), (py + ph, py));
        for artist in artists {
            artist_elements(out, artist, &x_scale, &y_scale, px, py, pw, ph, chrome);
        }

        // min/max ticks beside the axis the side owns; panel-filling kinds
        // have no y scale to annotate
        if matches!(
            artists.first(),
            Some(Artist::HeatGrid { .. } | Artist::ParallelLines { .. })
        ) {
            continue;
        }
        let axis_x = if secondary { px + pw } else { px };
        let tick_dir = if secondary { 1.0 } else { -1.0 };
        let (label_x, anchor) = if secondary {
            (px + pw + chrome.tick_length + 2.0, "start")
        } else {
            (px - chrome.tick_length - 2.0, "end")
        };
        for value in [y_domain.0, y_domain.1] {
            let ty = y_scale.map(value);
            out.push(SvgElement::Line {
                x1: axis_x,
                y1: ty,
                x2: axis_x + tick_dir * chrome.tick_length,
                y2: ty,
                stroke: chrome.spine_color,
                stroke_width: chrome.spine_width,
            });
            out.push(text(
                label_x,
                ty + chrome.tick_label_size / 3.0,
                &format_tick(value),
                chrome.tick_label_size,
                chrome.axis_label_color,
                anchor,
                &chrome.font_family,
            ));
        }
    }

    // spines: top, right, bottom, left
    let corners = [
        ((px, py), (px + pw, py)),
        ((px + pw, py), (px + pw, py + ph)),
        ((px, py + ph), (px + pw, py + ph)),
        ((px, py), (px, py + ph)),
    ];
    for (visible, ((x1, y1), (x2, y2))) in chrome.spines.into_iter().zip(corners) {
        if !visible {
            continue;
        }
        out.push(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: chrome.spine_color,
            stroke_width: chrome.spine_width,
        });
    }

    if let Some(subtitle) = &view.subtitle {
        out.push(text(
            px + pw / 2.0,
            y + chrome.subtitle_size + 4.0,
            subtitle,
            chrome.subtitle_size,
            chrome.subtitle_color,
            "middle",
            &chrome.font_family,
        ));
    }
    if let Some(xlabel) = &view.xlabel {
        out.push(text(
            px + pw / 2.0,
            py + ph + 28.0,
            xlabel,
            chrome.axis_label_size,
            chrome.axis_label_color,
            "middle",
            &chrome.font_family,
        ));
    }
    if let Some(ylabel) = &view.ylabel {
        out.push(SvgElement::Text {
            x: px - 32.0,
            y: py + ph / 2.0,
            text: ylabel.clone(),
            font_size: chrome.axis_label_size,
            fill: chrome.axis_label_color,
            anchor: "middle",
            font_family: chrome.font_family.clone(),
            rotate: true,
        });
    }
    if let Some(ylabel_right) = &view.ylabel_right {
        out.push(SvgElement::Text {
            x: px + pw + 12.0,
            y: py + ph / 2.0,
            text: ylabel_right.clone(),
            font_size: chrome.axis_label_size,
            fill: chrome.axis_label_color,
            anchor: "middle",
            font_family: chrome.font_family.clone(),
            rotate: true,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn artist_elements(
    out: &mut Vec<SvgElement>,
    artist: &Artist,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
    px: f32,
    py: f32,
    pw: f32,
    ph: f32,
    chrome: &FigureChrome,
) {
    match artist {
        Artist::Line {
            points,
            color,
            width,
            alpha,
            ..
        } => {
            out.push(SvgElement::Polyline {
                points: points
                    .iter()
                    .map(|&(x, y)| (x_scale.map(x), y_scale.map(y)))
                    .collect(),
                stroke: with_opacity(*color, *alpha),
                stroke_width: *width,
            });
        }

        Artist::Scatter {
            points,
            color,
            size,
            alpha,
            ..
        } => {
            let fill = with_opacity(*color, *alpha);
            for &(x, y) in points {
                out.push(SvgElement::Circle {
                    cx: x_scale.map(x),
                    cy: y_scale.map(y),
                    r: *size,
                    fill,
                });
            }
        }

        Artist::Bars {
            labels,
            values,
            color,
            edge_color,
            edge_width,
            width,
            alpha,
            ..
        } => {
            let baseline = y_scale.map(0.0);
            let slot = x_scale.map(1.0) - x_scale.map(0.0);
            let bar_w = slot * width;
            for (i, (&v, label)) in values.iter().zip(labels).enumerate() {
                let cx = x_scale.map(i as f32);
                let top = y_scale.map(v);
                let (ry, rh) = if top <= baseline {
                    (top, baseline - top)
                } else {
                    (baseline, top - baseline)
                };
                out.push(SvgElement::Rect {
                    x: cx - bar_w / 2.0,
                    y: ry,
                    width: bar_w,
                    height: rh,
                    fill: with_opacity(*color, *alpha),
                    stroke: Some((*edge_color, *edge_width)),
                });
                out.push(text(
                    cx,
                    py + ph + 12.0,
                    label,
                    chrome.general_size,
                    chrome.general_color,
                    "middle",
                    &chrome.font_family,
                ));
            }
        }

        Artist::Hist {
            edges,
            counts,
            color,
            edge_color,
            edge_width,
            alpha,
            ..
        } => {
            debug_assert_eq!(
                edges.len(),
                counts.len() + 1,
                "histogram needs one more bin edge than counts"
            );
            let baseline = y_scale.map(0.0);
            for (i, &count) in counts.iter().enumerate() {
                let x0 = x_scale.map(edges[i]);
                let x1 = x_scale.map(edges[i + 1]);
                let top = y_scale.map(count);
                out.push(SvgElement::Rect {
                    x: x0,
                    y: top,
                    width: (x1 - x0).max(0.0),
                    height: (baseline - top).max(0.0),
                    fill: with_opacity(*color, *alpha),
                    stroke: Some((*edge_color, *edge_width)),
                });
            }
        }

        Artist::BoxGlyph {
            stats,
            slot,
            width,
            color,
            median_color,
            whisker_width,
            ..
        } => {
            let cx = x_scale.map(*slot as f32);
            let slot_w = x_scale.map(1.0) - x_scale.map(0.0);
            let box_w = slot_w.abs().max(20.0) * width;
            let y_q1 = y_scale.map(stats.q1);
            let y_q3 = y_scale.map(stats.q3);
            out.push(SvgElement::Rect {
                x: cx - box_w / 2.0,
                y: y_q3.min(y_q1),
                width: box_w,
                height: (y_q1 - y_q3).abs(),
                fill: color.with_alpha(90),
                stroke: Some((*color, *whisker_width)),
            });
            let y_med = y_scale.map(stats.median);
            out.push(SvgElement::Line {
                x1: cx - box_w / 2.0,
                y1: y_med,
                x2: cx + box_w / 2.0,
                y2: y_med,
                stroke: *median_color,
                stroke_width: *whisker_width,
            });
            for (from, to) in [
                (stats.q3, stats.whisker_high),
                (stats.q1, stats.whisker_low),
            ] {
                out.push(SvgElement::Line {
                    x1: cx,
                    y1: y_scale.map(from),
                    x2: cx,
                    y2: y_scale.map(to),
                    stroke: *color,
                    stroke_width: *whisker_width,
                });
            }
            for &outlier in &stats.outliers {
                out.push(SvgElement::Circle {
                    cx,
                    cy: y_scale.map(outlier),
                    r: 2.0,
                    fill: *color,
                });
            }
        }

        Artist::HeatGrid {
            rows,
            cols,
            values,
            colors,
            font_size,
            font_color,
            ..
        } => {
            let cell_w = pw / *cols as f32;
            let cell_h = ph / *rows as f32;
            for r in 0..*rows {
                for c in 0..*cols {
                    let idx = r * cols + c;
                    let cx = px + c as f32 * cell_w;
                    let cy = py + r as f32 * cell_h;
                    out.push(SvgElement::Rect {
                        x: cx,
                        y: cy,
                        width: cell_w,
                        height: cell_h,
                        fill: colors[idx],
                        stroke: None,
                    });
                    out.push(text(
                        cx + cell_w / 2.0,
                        cy + cell_h / 2.0 + font_size / 3.0,
                        &format!("{:.2}", values[idx]),
                        *font_size,
                        *font_color,
                        "middle",
                        &chrome.font_family,
                    ));
                }
            }
        }

        Artist::ParallelLines {
            dims,
            rows,
            color,
            width,
            alpha,
            axis_color,
            ..
        } => {
            let n = dims.len().max(2);
            let step = pw / (n - 1) as f32;
            for (d, dim) in dims.iter().enumerate() {
                let ax = px + d as f32 * step;
                out.push(SvgElement::Line {
                    x1: ax,
                    y1: py,
                    x2: ax,
                    y2: py + ph,
                    stroke: *axis_color,
                    stroke_width: 1.0,
                });
                out.push(text(
                    ax,
                    py + ph + 12.0,
                    dim,
                    chrome.general_size,
                    chrome.general_color,
                    "middle",
                    &chrome.font_family,
                ));
            }
            let stroke = with_opacity(*color, *alpha);
            for row in rows {
                out.push(SvgElement::Polyline {
                    points: row
                        .iter()
                        .enumerate()
                        .map(|(d, &v)| (px + d as f32 * step, py + ph * (1.0 - v)))
                        .collect(),
                    stroke,
                    stroke_width: *width,
                });
            }
        }
    }
}

fn format_tick(value: f32) -> String {
    if value.abs() >= 100.0 {
        format!("{value:.0}")
    } else if value.abs() >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

fn with_opacity(color: Rgba, alpha: f32) -> Rgba {
    let a = (f32::from(color.a) * alpha.clamp(0.0, 1.0)) as u8;
    color.with_alpha(a)
}

fn text(
    x: f32,
    y: f32,
    content: &str,
    font_size: f32,
    fill: Rgba,
    anchor: &'static str,
    font_family: &str,
) -> SvgElement {
    SvgElement::Text {
        x,
        y,
        text: content.to_string(),
        font_size,
        fill,
        anchor,
        font_family: font_family.to_string(),
        rotate: false,
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_element(svg: &mut String, element: &SvgElement, depth: usize) {
    let indent = "  ".repeat(depth);
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let stroke_attr = stroke
                .map(|(color, w)| {
                    format!(r#" stroke="{}" stroke-width="{w}""#, color.to_css())
                })
                .unwrap_or_default();
            let _ = writeln!(
                svg,
                r#"{indent}<rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{}"{stroke_attr}/>"#,
                fill.to_css()
            );
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => {
            let _ = writeln!(
                svg,
                r#"{indent}<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            );
        }
        SvgElement::Polyline {
            points,
            stroke,
            stroke_width,
        } => {
            let points_str: String = points
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(
                svg,
                r#"{indent}<polyline points="{points_str}" fill="none" stroke="{}" stroke-width="{stroke_width}"/>"#,
                stroke.to_css()
            );
        }
        SvgElement::Circle { cx, cy, r, fill } => {
            let _ = writeln!(
                svg,
                r#"{indent}<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{}"/>"#,
                fill.to_css()
            );
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            font_family,
            rotate,
        } => {
            let transform = if *rotate {
                format!(r#" transform="rotate(-90 {x:.2} {y:.2})""#)
            } else {
                String::new()
            };
            let _ = writeln!(
                svg,
                r#"{indent}<text x="{x:.2}" y="{y:.2}" font-size="{font_size}" fill="{}" text-anchor="{anchor}" font-family="{}"{transform}>{}</text>"#,
                fill.to_css(),
                xml_escape(font_family),
                xml_escape(text)
            );
        }
        SvgElement::Group {
            transform,
            children,
        } => {
            let _ = writeln!(svg, r#"{indent}<g transform="{transform}">"#);
            for child in children {
                write_element(svg, child, depth + 1);
            }
            let _ = writeln!(svg, "{indent}</g>");
        }
    }
}
