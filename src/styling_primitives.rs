/*
 * This module provides platform-agnostic styling primitives consumed by the
 * control layer. These definitions are free of any Win32 or OS-specific details
 * so they can be compiled on any target. Controls never hold raw colors; they
 * ask the theme for a semantic role and the context turns that role into a
 * shared native brush or font.
 */
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /*
     * Linear blend towards `other`. `weight` is clamped to [0, 1]; 0 returns
     * self and 1 returns other.
     */
    pub fn blend(self, other: Color, weight: f32) -> Color {
        let w = weight.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 { (a as f32 + (b as f32 - a as f32) * w).round() as u8 };
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    pub fn lighten(self, amount: f32) -> Color {
        self.blend(Color::rgb(255, 255, 255), amount)
    }

    pub fn darken(self, amount: f32) -> Color {
        self.blend(Color::rgb(0, 0, 0), amount)
    }
}

/*
 * Defines the weight (e.g., boldness) of a font.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/*
 * Describes the properties of a font in a platform-agnostic way. All fields
 * are optional so a control override can change only specific aspects of the
 * theme font.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FontDescription {
    pub name: Option<String>,
    pub size: Option<i32>,
    pub weight: Option<FontWeight>,
}

impl FontDescription {
    pub fn new(name: &str, size: i32, weight: FontWeight) -> Self {
        Self {
            name: Some(name.to_string()),
            size: Some(size),
            weight: Some(weight),
        }
    }

    /* Fields set on `overlay` win; everything else comes from self. */
    pub fn merged_with(&self, overlay: &FontDescription) -> FontDescription {
        FontDescription {
            name: overlay.name.clone().or_else(|| self.name.clone()),
            size: overlay.size.or(self.size),
            weight: overlay.weight.or(self.weight),
        }
    }
}

/*
 * Semantic color slots. Every owner-drawn layer is described in terms of these
 * roles, so a theme switch only has to rebuild one brush per distinct color.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorRole {
    WindowBackground,
    ButtonBackground,
    ButtonHover,
    ButtonPressed,
    ButtonText,
    CaptionHover,
    CaptionPressed,
    BorderStandard,
    BorderHover,
    BorderActive,
    ComboBackground,
    ComboHover,
    ComboText,
    ScrollTrack,
    ScrollThumb,
    ScrollThumbHover,
    ScrollThumbPressed,
    RadioHover,
    RadioSelected,
    RadioText,
    StaticText,
}

impl ColorRole {
    pub const ALL: [ColorRole; 21] = [
        ColorRole::WindowBackground,
        ColorRole::ButtonBackground,
        ColorRole::ButtonHover,
        ColorRole::ButtonPressed,
        ColorRole::ButtonText,
        ColorRole::CaptionHover,
        ColorRole::CaptionPressed,
        ColorRole::BorderStandard,
        ColorRole::BorderHover,
        ColorRole::BorderActive,
        ColorRole::ComboBackground,
        ColorRole::ComboHover,
        ColorRole::ComboText,
        ColorRole::ScrollTrack,
        ColorRole::ScrollThumb,
        ColorRole::ScrollThumbHover,
        ColorRole::ScrollThumbPressed,
        ColorRole::RadioHover,
        ColorRole::RadioSelected,
        ColorRole::RadioText,
        ColorRole::StaticText,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontRole {
    Default,
    Caption,
    Small,
}

impl FontRole {
    pub const ALL: [FontRole; 3] = [FontRole::Default, FontRole::Caption, FontRole::Small];
}

/*
 * A complete color and font table. Lookups never fail: a role missing from
 * the table falls back to the built-in dark palette.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    colors: HashMap<ColorRole, Color>,
    fonts: HashMap<FontRole, FontDescription>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        let colors = ColorRole::ALL
            .iter()
            .map(|role| (*role, dark_palette(*role)))
            .collect();
        let fonts = FontRole::ALL
            .iter()
            .map(|role| (*role, default_font(*role)))
            .collect();
        Theme { colors, fonts }
    }

    pub fn light() -> Self {
        let mut theme = Theme::dark();
        for role in ColorRole::ALL {
            let c = dark_palette(role);
            // Invert luminance while keeping the accent hue.
            theme
                .colors
                .insert(role, Color::rgb(255 - c.r, 255 - c.g, 255 - c.b));
        }
        theme
    }

    pub fn with_color(mut self, role: ColorRole, color: Color) -> Self {
        self.colors.insert(role, color);
        self
    }

    pub fn with_font(mut self, role: FontRole, font: FontDescription) -> Self {
        self.fonts.insert(role, font);
        self
    }

    pub fn color(&self, role: ColorRole) -> Color {
        self.colors
            .get(&role)
            .copied()
            .unwrap_or_else(|| dark_palette(role))
    }

    pub fn font(&self, role: FontRole) -> FontDescription {
        self.fonts
            .get(&role)
            .cloned()
            .unwrap_or_else(|| default_font(role))
    }
}

fn dark_palette(role: ColorRole) -> Color {
    let background = Color::rgb(0x1E, 0x1F, 0x22);
    let surface = Color::rgb(0x2B, 0x2D, 0x30);
    let accent = Color::rgb(0x35, 0x74, 0xF0);
    let text = Color::rgb(0xDF, 0xE1, 0xE5);
    match role {
        ColorRole::WindowBackground => background,
        ColorRole::ButtonBackground => surface,
        ColorRole::ButtonHover => surface.lighten(0.08),
        ColorRole::ButtonPressed => surface.darken(0.25),
        ColorRole::ButtonText => text,
        ColorRole::CaptionHover => background.lighten(0.12),
        ColorRole::CaptionPressed => background.lighten(0.2),
        ColorRole::BorderStandard => Color::rgb(0x43, 0x45, 0x4A),
        ColorRole::BorderHover => Color::rgb(0x5A, 0x5D, 0x63),
        ColorRole::BorderActive => accent,
        ColorRole::ComboBackground => surface,
        ColorRole::ComboHover => surface.lighten(0.08),
        ColorRole::ComboText => text,
        ColorRole::ScrollTrack => background,
        ColorRole::ScrollThumb => Color::rgb(0x4E, 0x51, 0x57),
        ColorRole::ScrollThumbHover => Color::rgb(0x5E, 0x61, 0x68),
        ColorRole::ScrollThumbPressed => Color::rgb(0x6F, 0x73, 0x7A),
        ColorRole::RadioHover => surface,
        ColorRole::RadioSelected => accent,
        ColorRole::RadioText => text,
        ColorRole::StaticText => text.darken(0.1),
    }
}

fn default_font(role: FontRole) -> FontDescription {
    match role {
        FontRole::Default => FontDescription::new("Segoe UI", 9, FontWeight::Normal),
        FontRole::Caption => FontDescription::new("Segoe UI", 10, FontWeight::Bold),
        FontRole::Small => FontDescription::new("Segoe UI", 8, FontWeight::Normal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints_are_exact() {
        let a = Color::rgb(10, 20, 30);
        let b = Color::rgb(200, 100, 0);
        assert_eq!(a.blend(b, 0.0), a);
        assert_eq!(a.blend(b, 1.0), b);
        assert_eq!(a.blend(b, 7.0), b);
    }

    #[test]
    fn lighten_moves_towards_white() {
        let c = Color::rgb(100, 100, 100).lighten(0.5);
        assert_eq!(c, Color::rgb(178, 178, 178));
    }

    #[test]
    fn theme_override_replaces_only_that_role() {
        let red = Color::rgb(255, 0, 0);
        let theme = Theme::dark().with_color(ColorRole::ButtonHover, red);
        assert_eq!(theme.color(ColorRole::ButtonHover), red);
        assert_eq!(
            theme.color(ColorRole::ButtonText),
            Theme::dark().color(ColorRole::ButtonText)
        );
    }

    #[test]
    fn font_overlay_keeps_unset_fields() {
        let base = FontDescription::new("Segoe UI", 9, FontWeight::Normal);
        let overlay = FontDescription {
            weight: Some(FontWeight::Bold),
            ..Default::default()
        };
        let merged = base.merged_with(&overlay);
        assert_eq!(merged.name.as_deref(), Some("Segoe UI"));
        assert_eq!(merged.size, Some(9));
        assert_eq!(merged.weight, Some(FontWeight::Bold));
    }
}
