// Banner style module
// Per-instance colors for the indicator strip and arrows

use crate::error::BannerError;
use std::str::FromStr;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pixel value in the canvas byte order (BGRA)
    pub fn to_bgra(self, alpha: u8) -> [u8; 4] {
        [self.b, self.g, self.r, alpha]
    }
}

impl FromStr for Color {
    type Err = BannerError;

    /// Parse `#rrggbb` or `rrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BannerError::InvalidColor(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| BannerError::InvalidColor(s.to_string()))
        };

        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Colors used to paint one banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerStyle {
    /// Color of the selected indicator marker
    pub indicator_front: Color,
    /// Color of the unselected indicator markers
    pub indicator_back: Color,
    /// Arrow stroke while the pointer is over it
    pub arrow_hover: Color,
    /// Arrow stroke otherwise
    pub arrow_idle: Color,
    /// Alpha of the black overlay drawn over the side pages
    pub dim_alpha: u8,
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            indicator_front: Color::rgb(220, 0, 0),
            indicator_back: Color::rgb(200, 200, 200),
            arrow_hover: Color::rgb(255, 255, 255),
            arrow_idle: Color::rgb(150, 150, 150),
            dim_alpha: 150,
        }
    }
}

impl BannerStyle {
    pub fn set_indicator_front_color(&mut self, color: Color) {
        self.indicator_front = color;
    }

    pub fn set_indicator_back_color(&mut self, color: Color) {
        self.indicator_back = color;
    }

    pub fn marker_color(&self, selected: bool) -> Color {
        if selected {
            self.indicator_front
        } else {
            self.indicator_back
        }
    }

    pub fn arrow_color(&self, hovered: bool) -> Color {
        if hovered {
            self.arrow_hover
        } else {
            self.arrow_idle
        }
    }
}
