//! # Trueno-Chart
//!
//! Declarative charting layer built on the [trueno](https://crates.io/crates/trueno)
//! core library.
//!
//! Charts are described as plain values ([`ChartCall`]), rendered against a
//! style store ([`StyleConfig`]) into retained figures ([`RenderedFigure`]),
//! and composed or saved afterwards. Style resolves through three tiers
//! (series override, chart override, store) and every series gets a
//! deterministic color from a fingerprint of its label and data, so the
//! same series keeps its color across runs, reorderings, and theme changes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trueno_chart::prelude::*;
//!
//! let store = StyleConfig::new();
//! let call = ChartCall::line(vec![
//!     ChartSeries::new(SeriesData::Xy {
//!         x: vec![0.0, 1.0, 2.0],
//!         y: vec![1.0, 0.5, 0.25],
//!     })
//!     .with_label("loss"),
//! ])
//! .with_title("Training")
//! .with_legend();
//!
//! let figure = render_chart(&store, &call)?;
//! save_figure(&figure, "training.svg")?;
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/Deserialize for style and figure types

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color type and hex parsing.
pub mod color;

/// Reductions and fits over sample slices.
pub mod stats;

/// Themes, style attributes, overrides, and the resolution chain.
pub mod style;

// ============================================================================
// Chart Modules
// ============================================================================

/// Declarative chart descriptions.
pub mod chart;

/// Subplot grid planning.
pub mod layout;

/// Per-series artist construction.
pub mod draw;

/// Retained figure model.
pub mod figure;

/// Render orchestration.
pub mod render;

/// Post-hoc figure composition (overlay, grid combination).
pub mod compose;

// ============================================================================
// Output Modules
// ============================================================================

/// Figure output encoders.
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-chart operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust,ignore
/// use trueno_chart::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::{ChartCall, ChartKind, ChartSeries, LayoutHint, SeriesData};
    pub use crate::color::Rgba;
    pub use crate::compose::{combine_figures, overlay, OverlayOptions};
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Artist, AxesView, FigureCell, RenderedFigure};
    pub use crate::layout::{auto_grid, LayoutPlan};
    pub use crate::output::{figure_to_svg, save_figure};
    pub use crate::render::render_chart;
    pub use crate::style::{
        Palette, PaletteSpec, StyleAttr, StyleConfig, StyleOverride, StyleResolver, StyleValue,
        ThemeId,
    };
    pub use batuta_common::display::WithDimensions;
}

#[doc(inline)]
pub use chart::{ChartCall, ChartSeries, SeriesData};
#[doc(inline)]
pub use figure::RenderedFigure;
#[doc(inline)]
pub use output::save_figure;
#[doc(inline)]
pub use render::render_chart;
#[doc(inline)]
pub use style::StyleConfig;

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
