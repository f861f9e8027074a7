//! Colour themes for the clock.
//!
//! A theme is a plain record of colours looked up by name at render time.

use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Builds a colour from `0xRRGGBB`.
    pub const fn hex(value: u32) -> Self {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Rgb,
    pub fg: Rgb,
    pub border: Rgb,
    pub button_bg: Rgb,
    pub button_fg: Rgb,
}

pub const DEFAULT_THEME: &str = "Default";

pub const THEMES: [Theme; 5] = [
    Theme {
        name: "Default",
        bg: Rgb::hex(0xE0E0E0),
        fg: Rgb::hex(0x555555),
        border: Rgb::hex(0xD0D0D0),
        button_bg: Rgb::hex(0xA8D8AD),
        button_fg: Rgb::hex(0x333333),
    },
    Theme {
        name: "Purple Harmony",
        bg: Rgb::hex(0xCDB4DB),
        fg: Rgb::hex(0xBDECB6),
        border: Rgb::hex(0xA2D2FF),
        button_bg: Rgb::hex(0xBDECB6),
        button_fg: Rgb::hex(0xCDB4DB),
    },
    Theme {
        name: "Simple",
        bg: Rgb::hex(0x2C2C2C),
        fg: Rgb::hex(0xF0F0F0),
        border: Rgb::hex(0xF0F0F0),
        button_bg: Rgb::hex(0xF0F0F0),
        button_fg: Rgb::hex(0x2C2C2C),
    },
    Theme {
        name: "Sunset",
        bg: Rgb::hex(0xFFFACD),
        fg: Rgb::hex(0xA569BD),
        border: Rgb::hex(0xB0E0E6),
        button_bg: Rgb::hex(0xA569BD),
        button_fg: Rgb::hex(0xFFFACD),
    },
    Theme {
        name: "Ocean",
        bg: Rgb::hex(0xADD8E6),
        fg: Rgb::hex(0x98FB98),
        border: Rgb::hex(0xFFB6C1),
        button_bg: Rgb::hex(0x98FB98),
        button_fg: Rgb::hex(0xADD8E6),
    },
];

impl Theme {
    /// Case-insensitive lookup.
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        THEMES
            .iter()
            .find(|theme| theme.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn default_theme() -> &'static Theme {
        &THEMES[0]
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        THEMES.iter().map(|theme| theme.name)
    }

    pub fn body(&self, text: &str) -> ColoredString {
        paint(text, self.fg, self.bg)
    }

    pub fn frame(&self, text: &str) -> ColoredString {
        paint(text, self.border, self.bg)
    }

    pub fn label(&self, text: &str) -> ColoredString {
        paint(text, self.button_fg, self.button_bg).bold()
    }
}

fn paint(text: &str, fg: Rgb, bg: Rgb) -> ColoredString {
    text.truecolor(fg.0, fg.1, fg.2).on_truecolor(bg.0, bg.1, bg.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colour() {
        assert_eq!(Rgb::hex(0xA8D8AD), Rgb(0xA8, 0xD8, 0xAD));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let theme = Theme::by_name("ocean").unwrap();
        assert_eq!(theme.name, "Ocean");
        assert_eq!(theme.bg, Rgb::hex(0xADD8E6));
        assert_eq!(Theme::by_name("  purple harmony ").unwrap().name, "Purple Harmony");
        assert!(Theme::by_name("Neon").is_none());
    }

    #[test]
    fn test_default_theme_is_first() {
        assert_eq!(Theme::default_theme().name, DEFAULT_THEME);
        assert_eq!(Theme::names().count(), 5);
    }
}
