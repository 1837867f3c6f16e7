//! Normalized RGB colors.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([1.0, 1.0, 1.0]);

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    /// Decode a `#rrggbb` hex triplet. The leading `#` is optional.
    pub fn from_hex(value: &str) -> Result<Self, GeometryError> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        let invalid = || GeometryError::InvalidColor {
            value: value.to_string(),
        };

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let packed = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        Ok(Self::from_packed(packed))
    }

    /// Decode a packed `0xRRGGBB` integer. Bits above the low 24 are ignored.
    pub fn from_packed(packed: u32) -> Self {
        let channel = |shift: u32| ((packed >> shift) & 0xff) as f32 / 255.0;
        Self([channel(16), channel(8), channel(0)])
    }

    /// Accept an explicit component triple if every channel lies in `[0, 1]`.
    pub fn from_components(components: [f32; 3]) -> Result<Self, GeometryError> {
        if components
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
        {
            Ok(Self(components))
        } else {
            Err(GeometryError::InvalidColor {
                value: format!("{:?}", components),
            })
        }
    }

    pub fn r(&self) -> f32 {
        self.0[0]
    }

    pub fn g(&self) -> f32 {
        self.0[1]
    }

    pub fn b(&self) -> f32 {
        self.0[2]
    }

    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.0[0], self.0[1], self.0[2], alpha]
    }

    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.0[0]),
            byte(self.0[1]),
            byte(self.0[2])
        )
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Color as it appears on the wire
///
/// Slicers emit group colors either as hex strings, packed integers,
/// or already-normalized component triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Hex(String),
    Packed(u32),
    Components([f32; 3]),
}

impl ColorSpec {
    pub fn resolve(&self) -> Result<Rgb, GeometryError> {
        match self {
            ColorSpec::Hex(s) => Rgb::from_hex(s),
            ColorSpec::Packed(v) => Ok(Rgb::from_packed(*v)),
            ColorSpec::Components(c) => Rgb::from_components(*c),
        }
    }
}

impl From<Rgb> for ColorSpec {
    fn from(rgb: Rgb) -> Self {
        ColorSpec::Components(rgb.0)
    }
}
