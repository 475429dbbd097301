//! Color and intensity mapping for metric overlays.
//!
//! A value is first placed within the active [`Bounds`] as a ratio, then
//! turned into a green (low) to red (high) color and a glow stroke width.
//! Label text uses black or white depending on the perceived brightness of
//! the label fill.
//!
//! The layout constants of the overlay live in [`OverlayStyle`], which can be
//! loaded from JSON so hosts can tune opacity, glow range and label geometry.

use crate::models::{Bounds, StatValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color with a separate opacity channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f64,
}

impl Rgba {
    /// Create a new RGBA color.
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Perceived brightness `(299R + 587G + 114B) / 1000`, in `0..=255`.
    pub fn brightness(&self) -> f64 {
        (299.0 * f64::from(self.r) + 587.0 * f64::from(self.g) + 114.0 * f64::from(self.b))
            / 1000.0
    }
}

/// CSS form understood by SVG renderers: `rgb(r,g,b)` when opaque, else `rgba(r,g,b,a)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({},{},{})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a.max(0.0))
        }
    }
}

/// Which text color keeps a label legible on a given fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTone {
    Light,
    Dark,
}

/// Dark text on bright fills, light text otherwise.
pub fn contrasting_text_color(color: Rgba) -> TextTone {
    if color.brightness() > 128.0 {
        TextTone::Dark
    } else {
        TextTone::Light
    }
}

/// Tunable overlay geometry and colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub fill_opacity: f64,
    pub glow_opacity: f64,
    pub glow_min_width: f64,
    pub glow_max_width: f64,
    /// Estimated width of one label character, in px.
    pub label_char_width: f64,
    pub label_padding: f64,
    pub label_height: f64,
    /// Shape labels sit this far above the element origin.
    pub label_offset_y: f64,
    pub font_size: String,
    pub label_stroke: String,
    pub light_text: String,
    pub dark_text: String,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            fill_opacity: 0.5,
            glow_opacity: 0.5,
            glow_min_width: 10.0,
            glow_max_width: 40.0,
            label_char_width: 8.0,
            label_padding: 10.0,
            label_height: 13.0,
            label_offset_y: -10.0,
            font_size: "10px".into(),
            label_stroke: "black".into(),
            light_text: "white".into(),
            dark_text: "black".into(),
        }
    }
}

impl OverlayStyle {
    pub fn text_color(&self, tone: TextTone) -> &str {
        match tone {
            TextTone::Light => &self.light_text,
            TextTone::Dark => &self.dark_text,
        }
    }

    /// Label box width for `text`: per-character estimate plus padding.
    pub fn label_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.label_char_width + self.label_padding
    }
}

/// Maps metric values to colors and glow widths for fixed bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
    bounds: Bounds,
    glow_range: (f64, f64),
}

impl ColorScale {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            glow_range: (10.0, 40.0),
        }
    }

    pub fn with_glow_range(mut self, min: f64, max: f64) -> Self {
        self.glow_range = (min, max);
        self
    }

    pub fn for_style(bounds: Bounds, style: &OverlayStyle) -> Self {
        Self::new(bounds).with_glow_range(style.glow_min_width, style.glow_max_width)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// `(value - min) / (max - min)`, with a unit denominator when `max == min`.
    pub fn ratio(&self, value: impl Into<StatValue>) -> f64 {
        self.bounds.ratio(value.into().magnitude())
    }

    /// Green at the low end, red at the high end, blue always zero.
    pub fn color_for(&self, value: impl Into<StatValue>, opacity: f64) -> Rgba {
        let ratio = self.ratio(value);
        Rgba::new(channel(255.0 * ratio), channel(255.0 * (1.0 - ratio)), 0, opacity)
    }

    /// Stroke width linearly interpolated over the glow range.
    pub fn glow_thickness(&self, value: impl Into<StatValue>) -> f64 {
        let (lo, hi) = self.glow_range;
        lo + self.ratio(value) * (hi - lo)
    }
}

// Out-of-bounds ratios saturate instead of wrapping.
fn channel(x: f64) -> u8 {
    x.floor().clamp(0.0, 255.0) as u8
}
