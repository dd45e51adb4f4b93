//! Visual theme for the painted resume surface.
//!
//! Dimensions are in CSS-reference pixels at scale 1.0; the rasterizer
//! multiplies by the configured supersampling factor. Keeping every size and
//! color here keeps the section builders purely structural.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Total surface width, including margins.
    pub content_width: f32,
    pub margin: f32,

    pub name_size: f32,
    pub heading_size: f32,
    pub title_size: f32,
    pub lead_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    pub line_height: f32,

    pub section_gap: f32,
    pub item_gap: f32,
    pub badge_pad_x: f32,
    pub badge_pad_y: f32,
    pub badge_gap: f32,

    pub paper: Color,
    pub ink: Color,
    pub muted: Color,
    pub accent: Color,
    pub link: Color,
    pub rule: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            content_width: 896.0,
            margin: 48.0,
            name_size: 36.0,
            heading_size: 24.0,
            title_size: 20.0,
            lead_size: 18.0,
            body_size: 16.0,
            small_size: 14.0,
            line_height: 1.5,
            section_gap: 24.0,
            item_gap: 16.0,
            badge_pad_x: 14.0,
            badge_pad_y: 8.0,
            badge_gap: 8.0,
            paper: Color::rgb(255, 255, 255),
            ink: Color::rgb(31, 41, 55),
            muted: Color::rgb(107, 114, 128),
            accent: Color::rgb(79, 70, 229),
            link: Color::rgb(59, 130, 246),
            rule: Color::rgb(229, 231, 235),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_sanity() {
        let theme = Theme::default();
        assert!(theme.content_width > 2.0 * theme.margin);
        assert!(theme.name_size > theme.heading_size);
        assert!(theme.heading_size > theme.body_size);
        assert!(theme.line_height >= 1.0);
    }
}
