//! Post-hoc figure composition.
//!
//! Rendered figures can be overlaid onto one shared panel (optionally with
//! a secondary y axis for scale-incompatible inputs) or reproduced into a
//! grid. Composition clones artists from the inputs; nothing is re-drawn
//! and no color is re-assigned. Composite figures carry no metadata and
//! cannot be composed again.

use crate::error::{Error, Result};
use crate::figure::{
    Artist, AxesView, FigureCell, LegendEntry, RenderedFigure,
};
use crate::layout::auto_grid;

/// Span ratio above which two y ranges cannot share an axis.
const SCALE_RATIO_THRESHOLD: f32 = 3.0;

/// Options for [`overlay`].
#[derive(Debug, Clone, Default)]
pub struct OverlayOptions {
    /// Route scale-incompatible figures to a secondary right y axis.
    pub dual_axis: bool,
    /// Composite title.
    pub title: Option<String>,
    /// X axis label.
    pub xlabel: Option<String>,
    /// Left y axis label.
    pub ylabel: Option<String>,
    /// Right y axis label (dual axis only).
    pub ylabel_right: Option<String>,
    /// Show the merged legend.
    pub show_legend: bool,
}

impl OverlayOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the secondary y axis.
    #[must_use]
    pub fn with_dual_axis(mut self) -> Self {
        self.dual_axis = true;
        self
    }

    /// Set the composite title.
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

    /// Set the left y axis label.
    #[must_use]
    pub fn with_ylabel(mut self, label: &str) -> Self {
        self.ylabel = Some(label.to_string());
        self
    }

    /// Set the right y axis label.
    #[must_use]
    pub fn with_ylabel_right(mut self, label: &str) -> Self {
        self.ylabel_right = Some(label.to_string());
        self
    }

    /// Show the merged legend.
    #[must_use]
    pub fn with_legend(mut self) -> Self {
        self.show_legend = true;
        self
    }
}

/// Overlay rendered figures onto one shared panel.
///
/// Only line, bar, scatter, and histogram figures may share an axis. With
/// `dual_axis`, inputs are clustered by y-range scale compatibility (span
/// ratio below 3.0); the largest cluster keeps the left axis and the
/// second largest moves to the right. Three or more mutually incompatible
/// clusters cannot fit two axes and fail with
/// [`Error::IncompatibleOverlay`].
pub fn overlay(figures: &[RenderedFigure], options: &OverlayOptions) -> Result<RenderedFigure> {
    if figures.is_empty() {
        return Err(Error::InvalidChartCall {
            reason: "overlay requires at least one figure".to_string(),
        });
    }

    for (i, figure) in figures.iter().enumerate() {
        let meta = figure.metadata.as_ref().ok_or(Error::MissingMetadata)?;
        if !meta.kind.overlay_compatible() {
            return Err(Error::IncompatibleOverlay {
                reason: format!(
                    "figure {i} is a {} chart, which cannot share an axis",
                    meta.kind.name()
                ),
            });
        }
    }

    let assignments = if options.dual_axis {
        assign_axes(figures)?
    } else {
        vec![Axis::Left; figures.len()]
    };

    let mut view = AxesView {
        xlabel: options.xlabel.clone(),
        ylabel: options.ylabel.clone(),
        ..AxesView::default()
    };
    let mut legend = Vec::new();
    let dual = assignments.contains(&Axis::Right);
    if dual {
        view.ylabel_right = options.ylabel_right.clone();
    }

    for (figure, &axis) in figures.iter().zip(&assignments) {
        for artist in figure.artists() {
            push_legend_entry(&mut legend, artist, if dual { Some(axis) } else { None });
            match axis {
                Axis::Left => view.artists.push(artist.clone()),
                Axis::Right => view.secondary.push(artist.clone()),
            }
        }
    }

    let mut chrome = figures[0].chrome.clone();
    chrome.show_legend = options.show_legend;

    Ok(RenderedFigure {
        width: figures[0].width,
        height: figures[0].height,
        rows: 1,
        cols: 1,
        cells: vec![FigureCell::Axes(view)],
        title: options.title.clone(),
        xlabel: options.xlabel.clone(),
        ylabel: options.ylabel.clone(),
        legend,
        chrome,
        metadata: None,
    })
}

/// Reproduce rendered figures into a grid.
///
/// With `grid = None` the near-square auto grid is used; an explicit grid
/// smaller than the figure count fails with [`Error::InvalidGrid`]. Cells
/// fill row-major; trailing cells stay empty.
pub fn combine_figures(
    figures: &[RenderedFigure],
    grid: Option<(usize, usize)>,
) -> Result<RenderedFigure> {
    if figures.is_empty() {
        return Err(Error::InvalidChartCall {
            reason: "grid combination requires at least one figure".to_string(),
        });
    }
    for figure in figures {
        if figure.metadata.is_none() {
            return Err(Error::MissingMetadata);
        }
    }

    let n = figures.len();
    let (rows, cols) = match grid {
        Some((rows, cols)) => {
            if rows * cols < n {
                return Err(Error::InvalidGrid { rows, cols, count: n });
            }
            (rows, cols)
        }
        None => auto_grid(n),
    };

    let mut cells: Vec<FigureCell> = figures
        .iter()
        .map(|figure| FigureCell::Figure(Box::new(figure.clone())))
        .collect();
    cells.resize(rows * cols, FigureCell::Empty);

    let cell_width = figures.iter().map(|f| f.width).max().unwrap_or(0);
    let cell_height = figures.iter().map(|f| f.height).max().unwrap_or(0);

    Ok(RenderedFigure {
        width: cell_width * cols as u32,
        height: cell_height * rows as u32,
        rows,
        cols,
        cells,
        title: None,
        xlabel: None,
        ylabel: None,
        legend: Vec::new(),
        chrome: figures[0].chrome.clone(),
        metadata: None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Left,
    Right,
}

/// Union of the y extents of a figure's artists.
fn y_range(figure: &RenderedFigure) -> (f32, f32) {
    figure
        .artists()
        .filter_map(Artist::y_extent)
        .fold(None, |acc, (lo, hi)| match acc {
            None => Some((lo, hi)),
            Some((alo, ahi)) => Some((alo.min(lo), ahi.max(hi))),
        })
        .unwrap_or((0.0, 1.0))
}

/// Two ranges can share an axis when their span ratio stays below the
/// threshold. Zero spans are compatible with anything.
fn scale_compatible(a: (f32, f32), b: (f32, f32)) -> bool {
    let span_a = a.1 - a.0;
    let span_b = b.1 - b.0;
    if span_a == 0.0 || span_b == 0.0 {
        return true;
    }
    span_a.max(span_b) / span_a.min(span_b) < SCALE_RATIO_THRESHOLD
}

/// Cluster figures by mutual scale compatibility and map the clusters to
/// the two available axes.
fn assign_axes(figures: &[RenderedFigure]) -> Result<Vec<Axis>> {
    let ranges: Vec<(f32, f32)> = figures.iter().map(y_range).collect();
    let n = ranges.len();

    // Greedy clustering: each figure joins the first group it is
    // compatible with every member of.
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for i in 0..n {
        let joined = groups.iter_mut().find(|group| {
            group
                .iter()
                .all(|&j| scale_compatible(ranges[i], ranges[j]))
        });
        match joined {
            Some(group) => group.push(i),
            None => groups.push(vec![i]),
        }
    }

    if groups.len() > 2 {
        return Err(Error::IncompatibleOverlay {
            reason: format!(
                "{} scale-incompatible groups but only two axes available",
                groups.len()
            ),
        });
    }

    groups.sort_by_key(|group| std::cmp::Reverse(group.len()));
    let mut assignments = vec![Axis::Left; n];
    if let Some(right_group) = groups.get(1) {
        for &idx in right_group {
            assignments[idx] = Axis::Right;
        }
    }
    Ok(assignments)
}

fn push_legend_entry(legend: &mut Vec<LegendEntry>, artist: &Artist, axis: Option<Axis>) {
    let (Some(label), Some(color)) = (artist.label(), artist.color()) else {
        return;
    };
    let label = match axis {
        Some(Axis::Left) => format!("{label} (L)"),
        Some(Axis::Right) => format!("{label} (R)"),
        None => label.to_string(),
    };
    if legend.iter().any(|e| e.label == label) {
        return;
    }
    legend.push(LegendEntry { label, color });
}
