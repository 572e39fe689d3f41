//! The style store.

use crate::error::Result;
use crate::style::attr::{StyleAttr, StyleOverride, StyleSheet, StyleValue};
use crate::style::theme::ThemeId;

/// Mutable store holding the active theme's sheet plus accumulated edits.
///
/// The store is an explicit value passed by reference into rendering; there
/// is no process-wide instance. Activating a theme replaces the whole sheet
/// with a copy of the theme's snapshot, discarding prior edits.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    theme: ThemeId,
    sheet: StyleSheet,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleConfig {
    /// Store seeded from the default theme.
    #[must_use]
    pub fn new() -> Self {
        Self::with_theme(ThemeId::Default)
    }

    /// Store seeded from the given theme.
    #[must_use]
    pub fn with_theme(theme: ThemeId) -> Self {
        Self {
            theme,
            sheet: theme.snapshot(),
        }
    }

    /// The currently active theme.
    #[must_use]
    pub const fn theme(&self) -> ThemeId {
        self.theme
    }

    /// The current sheet.
    #[must_use]
    pub const fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    /// Look up an attribute by string name.
    pub fn get(&self, name: &str) -> Result<&StyleValue> {
        Ok(self.sheet.get(StyleAttr::from_name(name)?))
    }

    /// Look up an attribute by typed key.
    #[must_use]
    pub fn value(&self, attr: StyleAttr) -> &StyleValue {
        self.sheet.get(attr)
    }

    /// Activate a theme, replacing the sheet with the theme's snapshot.
    pub fn set_theme(&mut self, theme: ThemeId) {
        self.theme = theme;
        self.sheet = theme.snapshot();
    }

    /// Activate a theme by registry name.
    pub fn set_theme_by_name(&mut self, name: &str) -> Result<()> {
        self.set_theme(ThemeId::from_name(name)?);
        Ok(())
    }

    /// Apply a batch of string-named edits atomically.
    ///
    /// The whole batch is validated into an override first; an unknown
    /// name or kind mismatch rejects the batch and the store is unchanged.
    pub fn update<'a, I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, StyleValue)>,
    {
        let over = StyleOverride::from_pairs(pairs)?;
        self.sheet.apply(&over);
        Ok(())
    }

    /// Apply an already-validated override.
    pub fn apply(&mut self, over: &StyleOverride) {
        self.sheet.apply(over);
    }

    /// Restore the default theme, discarding all edits.
    pub fn reset(&mut self) {
        self.set_theme(ThemeId::Default);
    }
}
