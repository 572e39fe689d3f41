//! Style attributes, typed values, and the sheet/override maps.

use std::collections::BTreeMap;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::style::palette::PaletteSpec;

/// The kind of value a style attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// Numeric value (sizes, widths, alphas).
    F32,
    /// Boolean flag.
    Bool,
    /// RGBA color.
    Color,
    /// Free-form text (font family).
    Text,
    /// Color palette reference.
    Palette,
}

impl ValueKind {
    /// Human-readable kind name for error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ValueKind::F32 => "number",
            ValueKind::Bool => "boolean",
            ValueKind::Color => "color",
            ValueKind::Text => "text",
            ValueKind::Palette => "palette",
        }
    }
}

/// A typed style value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleValue {
    /// Numeric value.
    F32(f32),
    /// Boolean flag.
    Bool(bool),
    /// RGBA color.
    Color(Rgba),
    /// Free-form text.
    Text(String),
    /// Palette reference.
    Palette(PaletteSpec),
}

impl StyleValue {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            StyleValue::F32(_) => ValueKind::F32,
            StyleValue::Bool(_) => ValueKind::Bool,
            StyleValue::Color(_) => ValueKind::Color,
            StyleValue::Text(_) => ValueKind::Text,
            StyleValue::Palette(_) => ValueKind::Palette,
        }
    }

    /// Numeric value, if this is one.
    #[must_use]
    pub const fn as_f32(&self) -> Option<f32> {
        match self {
            StyleValue::F32(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean value, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Color value, if this is one.
    #[must_use]
    pub const fn as_color(&self) -> Option<Rgba> {
        match self {
            StyleValue::Color(v) => Some(*v),
            _ => None,
        }
    }

    /// Text value, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Palette value, if this is one.
    #[must_use]
    pub const fn as_palette(&self) -> Option<&PaletteSpec> {
        match self {
            StyleValue::Palette(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! style_attrs {
    ($( $variant:ident => ($name:literal, $kind:ident) ),+ $(,)?) => {
        /// Enumerated style attribute names.
        ///
        /// Every attribute has a fixed [`ValueKind`]; a complete
        /// [`StyleSheet`] holds a value for each variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[allow(missing_docs)]
        pub enum StyleAttr {
            $( $variant, )+
        }

        impl StyleAttr {
            /// Every attribute, in declaration order.
            pub const ALL: &'static [StyleAttr] = &[
                $( StyleAttr::$variant, )+
            ];

            /// The attribute's string name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( StyleAttr::$variant => $name, )+
                }
            }

            /// Look up an attribute by string name.
            pub fn from_name(name: &str) -> Result<Self> {
                match name {
                    $( $name => Ok(StyleAttr::$variant), )+
                    _ => Err(Error::UnknownAttribute {
                        name: name.to_string(),
                    }),
                }
            }

            /// The value kind this attribute holds.
            #[must_use]
            pub const fn kind(self) -> ValueKind {
                match self {
                    $( StyleAttr::$variant => ValueKind::$kind, )+
                }
            }
        }
    };
}

style_attrs! {
    // color cycles
    PaletteMultiple => ("palette_multiple", Palette),
    PaletteSingular => ("palette_singular", Palette),
    // fonts
    FontFamily => ("font_family", Text),
    FontGeneralSize => ("font_general_size", F32),
    FontGeneralColor => ("font_general_color", Color),
    FontTitleSize => ("font_title_size", F32),
    FontTitleColor => ("font_title_color", Color),
    FontSubtitleSize => ("font_subtitle_size", F32),
    FontSubtitleColor => ("font_subtitle_color", Color),
    FontAxisLabelSize => ("font_axis_label_size", F32),
    FontAxisLabelColor => ("font_axis_label_color", Color),
    // backgrounds
    FigureBackground => ("figure_background", Color),
    PanelBackground => ("panel_background", Color),
    // spines
    SpineTopVisible => ("spine_top_visible", Bool),
    SpineRightVisible => ("spine_right_visible", Bool),
    SpineBottomVisible => ("spine_bottom_visible", Bool),
    SpineLeftVisible => ("spine_left_visible", Bool),
    SpineWidth => ("spine_width", F32),
    SpineColor => ("spine_color", Color),
    // ticks
    TickLength => ("tick_length", F32),
    TickLabelSize => ("tick_label_size", F32),
    // grid
    GridVisible => ("grid_visible", Bool),
    GridColor => ("grid_color", Color),
    GridLineWidth => ("grid_line_width", F32),
    GridAlpha => ("grid_alpha", F32),
    // legend
    LegendFontSize => ("legend_font_size", F32),
    LegendFrame => ("legend_frame", Bool),
    // line charts
    LineWidth => ("line_width", F32),
    LineAlpha => ("line_alpha", F32),
    // bar charts
    BarWidth => ("bar_width", F32),
    BarAlpha => ("bar_alpha", F32),
    BarEdgeWidth => ("bar_edge_width", F32),
    BarEdgeColor => ("bar_edge_color", Color),
    // histograms
    HistAlpha => ("hist_alpha", F32),
    HistEdgeWidth => ("hist_edge_width", F32),
    HistEdgeColor => ("hist_edge_color", Color),
    // scatter markers
    MarkerSize => ("marker_size", F32),
    MarkerAlpha => ("marker_alpha", F32),
    // box plots
    BoxWidth => ("box_width", F32),
    BoxMedianColor => ("box_median_color", Color),
    BoxWhiskerWidth => ("box_whisker_width", F32),
    // heatmaps
    HeatmapPalette => ("heatmap_palette", Palette),
    HeatmapAlpha => ("heatmap_alpha", F32),
    HeatmapFontSize => ("heatmap_font_size", F32),
    HeatmapFontColor => ("heatmap_font_color", Color),
    // parallel coordinates
    ParallelLineWidth => ("parallel_line_width", F32),
    ParallelLineAlpha => ("parallel_line_alpha", F32),
    ParallelAxisColor => ("parallel_axis_color", Color),
}

/// A complete attribute-to-value map.
///
/// Invariant: every [`StyleAttr`] variant is present with a value of the
/// attribute's kind. Sheets are only built through the theme registry, so
/// the invariant holds by construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleSheet {
    values: BTreeMap<StyleAttr, StyleValue>,
}

impl StyleSheet {
    /// Build a sheet from a per-attribute value function.
    ///
    /// Completeness is guaranteed by iterating [`StyleAttr::ALL`].
    pub(crate) fn from_fn(value_of: impl Fn(StyleAttr) -> StyleValue) -> Self {
        let values = StyleAttr::ALL
            .iter()
            .map(|&attr| (attr, value_of(attr)))
            .collect();
        Self { values }
    }

    /// Get the value of an attribute.
    #[must_use]
    pub fn get(&self, attr: StyleAttr) -> &StyleValue {
        self.values
            .get(&attr)
            .expect("style sheet is complete by construction")
    }

    /// Replace an attribute's value. Kind must already be checked.
    pub(crate) fn set(&mut self, attr: StyleAttr, value: StyleValue) {
        debug_assert_eq!(value.kind(), attr.kind());
        self.values.insert(attr, value);
    }

    /// Apply every entry of an override on top of this sheet.
    pub(crate) fn apply(&mut self, over: &StyleOverride) {
        for (&attr, value) in &over.values {
            self.set(attr, value.clone());
        }
    }

    /// Iterate entries in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleAttr, &StyleValue)> {
        self.values.iter().map(|(&a, v)| (a, v))
    }
}

/// A validated partial attribute map layered over a sheet.
///
/// Values are kind-checked when inserted, so an override can never put a
/// sheet into an invalid state.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleOverride {
    values: BTreeMap<StyleAttr, StyleValue>,
}

impl StyleOverride {
    /// Empty override.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, rejecting kind mismatches.
    pub fn set(&mut self, attr: StyleAttr, value: StyleValue) -> Result<()> {
        if value.kind() != attr.kind() {
            return Err(Error::InvalidStyleValue {
                attr: attr.name().to_string(),
                expected: attr.kind().label(),
            });
        }
        self.values.insert(attr, value);
        Ok(())
    }

    /// Consuming variant of [`set`](Self::set) for builder chains.
    pub fn with(mut self, attr: StyleAttr, value: StyleValue) -> Result<Self> {
        self.set(attr, value)?;
        Ok(self)
    }

    /// Build an override from string-named pairs, rejecting unknown names
    /// and kind mismatches before anything is kept.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, StyleValue)>,
    {
        let mut over = Self::new();
        for (name, value) in pairs {
            over.set(StyleAttr::from_name(name)?, value)?;
        }
        Ok(over)
    }

    /// Look up an attribute in this override.
    #[must_use]
    pub fn get(&self, attr: StyleAttr) -> Option<&StyleValue> {
        self.values.get(&attr)
    }

    /// True if no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
