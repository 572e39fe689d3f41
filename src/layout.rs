//! Subplot layout planning.

use crate::chart::{ChartCall, LayoutHint};
use crate::error::{Error, Result};

/// The layout a chart call resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPlan {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Number of occupied panels.
    pub axes_count: usize,
    /// True when every series gets its own panel.
    pub per_series_axes: bool,
    /// Share the x range across panels.
    pub share_x: bool,
    /// Share the y range across panels.
    pub share_y: bool,
}

impl LayoutPlan {
    fn single() -> Self {
        Self {
            rows: 1,
            cols: 1,
            axes_count: 1,
            per_series_axes: false,
            share_x: false,
            share_y: false,
        }
    }
}

/// Near-square grid for `n` panels.
///
/// `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`; ties prefer more
/// columns than rows, so `auto_grid(6) == (2, 3)`. Always satisfies
/// `rows * cols >= n`.
#[must_use]
pub fn auto_grid(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let cols = (n as f64).sqrt().ceil() as usize;
    let rows = n.div_ceil(cols);
    (rows, cols)
}

/// Derive the layout for a chart call.
///
/// Fails with [`Error::InvalidGrid`] when an explicit grid cannot hold
/// every series, and with [`Error::InvalidChartCall`] when a single-axes
/// layout is forced onto a kind that cannot share one.
pub fn plan(call: &ChartCall) -> Result<LayoutPlan> {
    let n = call.series.len();

    let subplots = match call.layout {
        LayoutHint::SingleAxes => {
            if n > 1 && !call.kind.shares_axes() {
                return Err(Error::InvalidChartCall {
                    reason: format!(
                        "{} charts cannot place {n} series on a single axes",
                        call.kind.name()
                    ),
                });
            }
            false
        }
        LayoutHint::Subplots { .. } => true,
        LayoutHint::Auto => n > 1 && !call.kind.shares_axes(),
    };

    if !subplots {
        return Ok(LayoutPlan::single());
    }

    let (rows, cols) = match call.layout {
        LayoutHint::Subplots { grid: Some((rows, cols)) } => {
            if rows * cols < n {
                return Err(Error::InvalidGrid { rows, cols, count: n });
            }
            (rows, cols)
        }
        _ => auto_grid(n),
    };

    Ok(LayoutPlan {
        rows,
        cols,
        axes_count: n,
        per_series_axes: true,
        share_x: call.share_x,
        share_y: call.share_y,
    })
}
