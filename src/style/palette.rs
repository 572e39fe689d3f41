//! Color palettes and deterministic series color assignment.
//!
//! Palettes are ColorBrewer scales ordered light to dark. A [`ColorCycle`]
//! samples a fixed number of positions from the active palette, and a
//! series' stable fingerprint selects a position by modulo. Because the
//! cycle length never changes, switching the theme or palette changes the
//! colors at each position but never which series maps to which position.

use crate::color::Rgba;

/// Number of positions in a discrete color cycle.
///
/// Fixed so that `fingerprint % CYCLE_LEN` is independent of the palette
/// in use.
pub const CYCLE_LEN: usize = 8;

const fn hex(r: u8, g: u8, b: u8) -> Rgba {
    Rgba::rgb(r, g, b)
}

const SCALE_BLUE: [Rgba; 5] = [
    hex(0xef, 0xf3, 0xff),
    hex(0xbd, 0xd7, 0xe7),
    hex(0x6b, 0xae, 0xd6),
    hex(0x31, 0x82, 0xbd),
    hex(0x08, 0x51, 0x9c),
];

const SCALE_GREEN: [Rgba; 5] = [
    hex(0xed, 0xf8, 0xe9),
    hex(0xba, 0xe4, 0xb3),
    hex(0x74, 0xc4, 0x76),
    hex(0x31, 0xa3, 0x54),
    hex(0x00, 0x6d, 0x2c),
];

const SCALE_ORANGE: [Rgba; 5] = [
    hex(0xfe, 0xed, 0xde),
    hex(0xfd, 0xbe, 0x85),
    hex(0xfd, 0x8d, 0x3c),
    hex(0xe6, 0x55, 0x0d),
    hex(0xa6, 0x36, 0x03),
];

const SCALE_PURPLE: [Rgba; 5] = [
    hex(0xf2, 0xf0, 0xf7),
    hex(0xcb, 0xc9, 0xe2),
    hex(0x9e, 0x9a, 0xc8),
    hex(0x75, 0x6b, 0xb1),
    hex(0x54, 0x27, 0x8f),
];

const SCALE_GREY: [Rgba; 5] = [
    hex(0xf7, 0xf7, 0xf7),
    hex(0xcc, 0xcc, 0xcc),
    hex(0x96, 0x96, 0x96),
    hex(0x63, 0x63, 0x63),
    hex(0x25, 0x25, 0x25),
];

const SCALE_YLGNBU: [Rgba; 5] = [
    hex(0xff, 0xff, 0xcc),
    hex(0xa1, 0xda, 0xb4),
    hex(0x41, 0xb6, 0xc4),
    hex(0x2c, 0x7f, 0xb8),
    hex(0x25, 0x34, 0x94),
];

const SCALE_PUBU: [Rgba; 5] = [
    hex(0xf1, 0xee, 0xf6),
    hex(0xbd, 0xc9, 0xe1),
    hex(0x74, 0xa9, 0xcf),
    hex(0x2b, 0x8c, 0xbe),
    hex(0x04, 0x5a, 0x8d),
];

const SCALE_RDYLBU: [Rgba; 5] = [
    hex(0xd7, 0x19, 0x1c),
    hex(0xfd, 0xae, 0x61),
    hex(0xff, 0xff, 0xbf),
    hex(0xab, 0xd9, 0xe9),
    hex(0x2c, 0x7b, 0xb6),
];

const SCALE_SPECTRAL: [Rgba; 5] = [
    hex(0xd7, 0x19, 0x1c),
    hex(0xfd, 0xae, 0x61),
    hex(0xff, 0xff, 0xbf),
    hex(0xab, 0xdd, 0xa4),
    hex(0x2b, 0x83, 0xba),
];

const SCALE_MIXED_LIGHT: [Rgba; 10] = [
    hex(0xa6, 0xce, 0xe3),
    hex(0x1f, 0x78, 0xb4),
    hex(0xb2, 0xdf, 0x8a),
    hex(0x33, 0xa0, 0x2c),
    hex(0xfb, 0x9a, 0x99),
    hex(0xe3, 0x1a, 0x1c),
    hex(0xfd, 0xbf, 0x6f),
    hex(0xff, 0x7f, 0x00),
    hex(0xca, 0xb2, 0xd6),
    hex(0x6a, 0x3d, 0x9a),
];

const SCALE_MIXED_DARK: [Rgba; 9] = [
    hex(0xe4, 0x1a, 0x1c),
    hex(0x37, 0x7e, 0xb8),
    hex(0x4d, 0xaf, 0x4a),
    hex(0x98, 0x4e, 0xa3),
    hex(0xff, 0x7f, 0x00),
    hex(0xff, 0xff, 0x33),
    hex(0xa6, 0x56, 0x28),
    hex(0xf7, 0x81, 0xbf),
    hex(0x99, 0x99, 0x99),
];

/// Named ColorBrewer palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Palette {
    /// Sequential single-hue blues.
    Blue,
    /// Sequential single-hue greens.
    Green,
    /// Sequential single-hue oranges.
    Orange,
    /// Sequential single-hue purples.
    Purple,
    /// Sequential greys.
    Grey,
    /// Sequential yellow-green-blue.
    YlGnBu,
    /// Sequential purple-blue.
    PuBu,
    /// Diverging red-yellow-blue.
    RdYlBu,
    /// Diverging spectral.
    Spectral,
    /// Qualitative light mix.
    MixedLight,
    /// Qualitative dark mix.
    MixedDark,
}

impl Palette {
    /// The palette's color scale, ordered light to dark (qualitative
    /// palettes keep their published ordering).
    #[must_use]
    pub const fn scale(self) -> &'static [Rgba] {
        match self {
            Palette::Blue => &SCALE_BLUE,
            Palette::Green => &SCALE_GREEN,
            Palette::Orange => &SCALE_ORANGE,
            Palette::Purple => &SCALE_PURPLE,
            Palette::Grey => &SCALE_GREY,
            Palette::YlGnBu => &SCALE_YLGNBU,
            Palette::PuBu => &SCALE_PUBU,
            Palette::RdYlBu => &SCALE_RDYLBU,
            Palette::Spectral => &SCALE_SPECTRAL,
            Palette::MixedLight => &SCALE_MIXED_LIGHT,
            Palette::MixedDark => &SCALE_MIXED_DARK,
        }
    }
}

/// A palette reference in a style value: named scale or custom color list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaletteSpec {
    /// One of the built-in scales.
    Named(Palette),
    /// Caller-provided colors, used in order.
    Custom(Vec<Rgba>),
}

impl PaletteSpec {
    /// The underlying color list.
    #[must_use]
    pub fn scale(&self) -> &[Rgba] {
        match self {
            PaletteSpec::Named(p) => p.scale(),
            PaletteSpec::Custom(colors) => colors,
        }
    }

    /// Sample a color at `t` in [0, 1] along the scale, interpolating
    /// between adjacent entries.
    #[must_use]
    pub fn sample(&self, t: f32) -> Rgba {
        let scale = self.scale();
        match scale.len() {
            0 => Rgba::BLACK,
            1 => scale[0],
            n => {
                let pos = t.clamp(0.0, 1.0) * (n - 1) as f32;
                let lo = pos.floor() as usize;
                let hi = pos.ceil() as usize;
                scale[lo].lerp(scale[hi], pos - lo as f32)
            }
        }
    }

    /// The scale's darkest color (last entry).
    #[must_use]
    pub fn darkest(&self) -> Rgba {
        self.scale().last().copied().unwrap_or(Rgba::BLACK)
    }
}

impl From<Palette> for PaletteSpec {
    fn from(p: Palette) -> Self {
        PaletteSpec::Named(p)
    }
}

/// A fixed set of discrete colors indexed by series fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCycle {
    colors: Vec<Rgba>,
}

impl ColorCycle {
    /// Cycle of [`CYCLE_LEN`] colors sampled evenly from the palette.
    ///
    /// Custom palettes with at least [`CYCLE_LEN`] entries keep their
    /// first [`CYCLE_LEN`] colors verbatim; shorter ones are interpolated
    /// like a scale.
    #[must_use]
    pub fn multiple(spec: &PaletteSpec) -> Self {
        let colors = if spec.scale().len() >= CYCLE_LEN {
            spec.scale()[..CYCLE_LEN].to_vec()
        } else {
            (0..CYCLE_LEN)
                .map(|i| spec.sample(i as f32 / (CYCLE_LEN - 1) as f32))
                .collect()
        };
        Self { colors }
    }

    /// Cycle of one color: the scale's darkest. Used when every series
    /// gets its own panel and hue no longer distinguishes anything.
    #[must_use]
    pub fn singular(spec: &PaletteSpec) -> Self {
        Self {
            colors: vec![spec.darkest()],
        }
    }

    /// The color at a fingerprint's fixed position.
    #[must_use]
    pub fn color_for(&self, fingerprint: u64) -> Rgba {
        self.colors[(fingerprint % self.colors.len() as u64) as usize]
    }

    /// Number of positions in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if the cycle has no colors (never constructed this way).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// FNV-1a 64-bit hasher.
///
/// Series fingerprints must be identical across processes and runs, which
/// rules out `std`'s randomly seeded hasher.
#[derive(Debug, Clone)]
pub(crate) struct Fnv1a(u64);

impl Fnv1a {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    pub(crate) fn new() -> Self {
        Self(Self::OFFSET)
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= u64::from(b);
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
    }

    pub(crate) fn write_f32(&mut self, v: f32) {
        self.write(&v.to_bits().to_le_bytes());
    }

    pub(crate) fn finish(&self) -> u64 {
        self.0
    }
}
