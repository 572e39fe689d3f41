//! Style resolution engine.
//!
//! Every visual decision a chart makes flows through this module: a
//! [`StyleConfig`] store holds one complete attribute sheet (seeded from a
//! theme), chart- and series-level [`StyleOverride`]s layer on top, and a
//! [`StyleResolver`] answers typed lookups with series > chart > store
//! precedence. Color assignment lives in [`palette`].

pub mod attr;
pub mod config;
pub mod palette;
pub mod resolve;
pub mod theme;

pub use attr::{StyleAttr, StyleOverride, StyleSheet, StyleValue, ValueKind};
pub use config::StyleConfig;
pub use palette::{ColorCycle, Palette, PaletteSpec};
pub use resolve::StyleResolver;
pub use theme::ThemeId;
