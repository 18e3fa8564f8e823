use crate::presenter::PresentationHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA colour, serialized as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        let a = if digits.len() == 8 { channel(6)? } else { 0xFF };
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid colour: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Colours pushed to a presentation in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarColors {
    pub background: Color,
    pub message: Color,
    pub action: Color,
    pub progress: Color,
}

impl Default for BarColors {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x32, 0x32, 0x32),
            message: Color::WHITE,
            action: Color::rgb(0xFF, 0x40, 0x81),
            progress: Color::rgb(0x3F, 0x51, 0xB5),
        }
    }
}

/// Style state shared by every bar the manager shows.
///
/// Setters update this struct and push to the active presentation right away;
/// `play_queue` applies it again to every new presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingStyle {
    pub overlay_color: Color,
    pub overlay_alpha: f32,
    pub colors: BarColors,
}

impl Default for PendingStyle {
    fn default() -> Self {
        Self {
            overlay_color: Color::WHITE,
            overlay_alpha: 0.8,
            colors: BarColors::default(),
        }
    }
}

impl PendingStyle {
    pub fn set_overlay_alpha(&mut self, alpha: f32) {
        self.overlay_alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    }

    /// Push the full style to a presentation.
    pub fn apply_to<H: PresentationHandle + ?Sized>(&self, handle: &H) {
        self.apply_overlay(handle);
        self.apply_colors(handle);
    }

    pub fn apply_overlay<H: PresentationHandle + ?Sized>(&self, handle: &H) {
        handle.set_overlay(self.overlay_color, self.overlay_alpha);
    }

    pub fn apply_colors<H: PresentationHandle + ?Sized>(&self, handle: &H) {
        handle.set_colors(&self.colors);
    }
}
