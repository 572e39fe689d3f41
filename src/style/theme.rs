//! Built-in themes.
//!
//! A theme is a complete, immutable [`StyleSheet`] snapshot. Activating a
//! theme clones the snapshot into the store, so later store edits never
//! leak back into the registry.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::style::attr::{StyleAttr, StyleSheet, StyleValue};
use crate::style::palette::Palette;

/// Built-in theme identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThemeId {
    /// Spectral multi-series palette on white, all spines visible.
    #[default]
    Default,
    /// Grey scales everywhere, for print without color.
    Greyscale,
    /// Serif fonts, open top/right spines, frameless legend.
    Publication,
    /// Light grey figure background with visible panel grid.
    Background,
}

impl ThemeId {
    /// Every built-in theme.
    pub const ALL: &'static [ThemeId] = &[
        ThemeId::Default,
        ThemeId::Greyscale,
        ThemeId::Publication,
        ThemeId::Background,
    ];

    /// The theme's registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ThemeId::Default => "default",
            ThemeId::Greyscale => "greyscale",
            ThemeId::Publication => "publication",
            ThemeId::Background => "background",
        }
    }

    /// Look up a theme by registry name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "default" => Ok(ThemeId::Default),
            "greyscale" => Ok(ThemeId::Greyscale),
            "publication" => Ok(ThemeId::Publication),
            "background" => Ok(ThemeId::Background),
            _ => Err(Error::UnknownTheme {
                name: name.to_string(),
            }),
        }
    }

    /// The theme's complete style sheet.
    #[must_use]
    pub fn snapshot(self) -> StyleSheet {
        let mut sheet = StyleSheet::from_fn(default_value);
        match self {
            ThemeId::Default => {}
            ThemeId::Greyscale => {
                sheet.set(
                    StyleAttr::PaletteMultiple,
                    StyleValue::Palette(Palette::Grey.into()),
                );
                sheet.set(
                    StyleAttr::PaletteSingular,
                    StyleValue::Palette(Palette::Grey.into()),
                );
                sheet.set(
                    StyleAttr::HeatmapPalette,
                    StyleValue::Palette(Palette::Grey.into()),
                );
            }
            ThemeId::Publication => {
                sheet.set(StyleAttr::FontFamily, StyleValue::Text("serif".into()));
                sheet.set(StyleAttr::FontTitleSize, StyleValue::F32(13.0));
                sheet.set(StyleAttr::SpineTopVisible, StyleValue::Bool(false));
                sheet.set(StyleAttr::SpineRightVisible, StyleValue::Bool(false));
                sheet.set(StyleAttr::LegendFrame, StyleValue::Bool(false));
                sheet.set(StyleAttr::TickLabelSize, StyleValue::F32(10.0));
            }
            ThemeId::Background => {
                sheet.set(
                    StyleAttr::FigureBackground,
                    StyleValue::Color(Rgba::rgb(0xf7, 0xf7, 0xf7)),
                );
                sheet.set(StyleAttr::GridVisible, StyleValue::Bool(true));
            }
        }
        sheet
    }
}

/// The default theme's value for each attribute.
fn default_value(attr: StyleAttr) -> StyleValue {
    use StyleAttr as A;
    use StyleValue as V;

    let black = Rgba::BLACK;
    match attr {
        A::PaletteMultiple => V::Palette(Palette::Spectral.into()),
        A::PaletteSingular => V::Palette(Palette::Blue.into()),
        A::FontFamily => V::Text("sans-serif".into()),
        A::FontGeneralSize => V::F32(11.0),
        A::FontGeneralColor => V::Color(black),
        A::FontTitleSize => V::F32(12.0),
        A::FontTitleColor => V::Color(black),
        A::FontSubtitleSize => V::F32(11.0),
        A::FontSubtitleColor => V::Color(black),
        A::FontAxisLabelSize => V::F32(10.0),
        A::FontAxisLabelColor => V::Color(black),
        A::FigureBackground => V::Color(Rgba::WHITE),
        A::PanelBackground => V::Color(Rgba::WHITE),
        A::SpineTopVisible => V::Bool(true),
        A::SpineRightVisible => V::Bool(true),
        A::SpineBottomVisible => V::Bool(true),
        A::SpineLeftVisible => V::Bool(true),
        A::SpineWidth => V::F32(0.5),
        A::SpineColor => V::Color(black),
        A::TickLength => V::F32(2.0),
        A::TickLabelSize => V::F32(9.0),
        A::GridVisible => V::Bool(false),
        A::GridColor => V::Color(Rgba::rgb(0xe6, 0xe6, 0xe6)),
        A::GridLineWidth => V::F32(0.5),
        A::GridAlpha => V::F32(1.0),
        A::LegendFontSize => V::F32(9.0),
        A::LegendFrame => V::Bool(true),
        A::LineWidth => V::F32(1.0),
        A::LineAlpha => V::F32(1.0),
        A::BarWidth => V::F32(0.8),
        A::BarAlpha => V::F32(1.0),
        A::BarEdgeWidth => V::F32(0.5),
        A::BarEdgeColor => V::Color(black),
        A::HistAlpha => V::F32(1.0),
        A::HistEdgeWidth => V::F32(0.5),
        A::HistEdgeColor => V::Color(black),
        A::MarkerSize => V::F32(3.0),
        A::MarkerAlpha => V::F32(1.0),
        A::BoxWidth => V::F32(0.5),
        A::BoxMedianColor => V::Color(black),
        A::BoxWhiskerWidth => V::F32(1.0),
        A::HeatmapPalette => V::Palette(Palette::Blue.into()),
        A::HeatmapAlpha => V::F32(1.0),
        A::HeatmapFontSize => V::F32(9.0),
        A::HeatmapFontColor => V::Color(black),
        A::ParallelLineWidth => V::F32(1.0),
        A::ParallelLineAlpha => V::F32(0.7),
        A::ParallelAxisColor => V::Color(Rgba::rgb(0x63, 0x63, 0x63)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_name_round_trip() {
        for &theme in ThemeId::ALL {
            assert_eq!(ThemeId::from_name(theme.name()).unwrap(), theme);
        }
    }

    #[test]
    fn test_unknown_theme() {
        let err = ThemeId::from_name("neon").unwrap_err();
        assert!(matches!(err, Error::UnknownTheme { name } if name == "neon"));
    }

    #[test]
    fn test_snapshots_are_complete() {
        for &theme in ThemeId::ALL {
            let sheet = theme.snapshot();
            for &attr in StyleAttr::ALL {
                assert_eq!(sheet.get(attr).kind(), attr.kind(), "{}", attr.name());
            }
        }
    }

    #[test]
    fn test_greyscale_uses_grey_palettes() {
        let sheet = ThemeId::Greyscale.snapshot();
        let spec = sheet
            .get(StyleAttr::PaletteMultiple)
            .as_palette()
            .unwrap()
            .clone();
        assert_eq!(spec.darkest(), Rgba::rgb(0x25, 0x25, 0x25));
    }

    #[test]
    fn test_publication_drops_top_right_spines() {
        let sheet = ThemeId::Publication.snapshot();
        assert_eq!(sheet.get(StyleAttr::SpineTopVisible).as_bool(), Some(false));
        assert_eq!(sheet.get(StyleAttr::SpineRightVisible).as_bool(), Some(false));
        assert_eq!(sheet.get(StyleAttr::SpineBottomVisible).as_bool(), Some(true));
    }

    #[test]
    fn test_snapshot_is_value_copy() {
        let mut a = ThemeId::Default.snapshot();
        a.set(StyleAttr::LineWidth, StyleValue::F32(9.0));
        let b = ThemeId::Default.snapshot();
        assert_eq!(b.get(StyleAttr::LineWidth).as_f32(), Some(1.0));
    }
}
