//! Three-tier style resolution.

use crate::color::Rgba;
use crate::style::attr::{StyleAttr, StyleOverride, StyleValue};
use crate::style::config::StyleConfig;
use crate::style::palette::PaletteSpec;

/// Resolves attribute lookups with series > chart > store precedence.
///
/// Overrides are validated at construction, so a resolved value always has
/// the attribute's kind; the typed getters rely on that.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    store: &'a StyleConfig,
    chart: Option<&'a StyleOverride>,
    series: Option<&'a StyleOverride>,
}

impl<'a> StyleResolver<'a> {
    /// Resolver over the store alone.
    #[must_use]
    pub fn new(store: &'a StyleConfig) -> Self {
        Self {
            store,
            chart: None,
            series: None,
        }
    }

    /// Add the chart-level override tier.
    #[must_use]
    pub fn with_chart(mut self, over: Option<&'a StyleOverride>) -> Self {
        self.chart = over;
        self
    }

    /// Add the series-level override tier.
    #[must_use]
    pub fn with_series(mut self, over: Option<&'a StyleOverride>) -> Self {
        self.series = over;
        self
    }

    /// Resolve an attribute through the tiers.
    #[must_use]
    pub fn value(&self, attr: StyleAttr) -> &'a StyleValue {
        if let Some(v) = self.series.and_then(|o| o.get(attr)) {
            return v;
        }
        if let Some(v) = self.chart.and_then(|o| o.get(attr)) {
            return v;
        }
        self.store.sheet().get(attr)
    }

    /// Resolve a numeric attribute.
    #[must_use]
    pub fn f32(&self, attr: StyleAttr) -> f32 {
        self.value(attr)
            .as_f32()
            .expect("value kind enforced at insertion")
    }

    /// Resolve a boolean attribute.
    #[must_use]
    pub fn bool(&self, attr: StyleAttr) -> bool {
        self.value(attr)
            .as_bool()
            .expect("value kind enforced at insertion")
    }

    /// Resolve a color attribute.
    #[must_use]
    pub fn color(&self, attr: StyleAttr) -> Rgba {
        self.value(attr)
            .as_color()
            .expect("value kind enforced at insertion")
    }

    /// Resolve a text attribute.
    #[must_use]
    pub fn text(&self, attr: StyleAttr) -> &'a str {
        self.value(attr)
            .as_text()
            .expect("value kind enforced at insertion")
    }

    /// Resolve a palette attribute.
    #[must_use]
    pub fn palette(&self, attr: StyleAttr) -> &'a PaletteSpec {
        self.value(attr)
            .as_palette()
            .expect("value kind enforced at insertion")
    }
}
