//! Colour type and the named palette handed to the toolkit at start-up.

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Central theme — set once at initialisation, read every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub primary: Color,
    pub primary_hover: Color,
    pub secondary: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
    pub scrollbar_thumb_hover: Color,
}

impl Theme {
    /// Dark blue-black background with cyan accents.
    pub const fn naox() -> Self {
        Self {
            background: Color::rgb(12, 12, 20),
            primary: Color::rgb(0, 255, 255),
            primary_hover: Color::rgb(0, 200, 200),
            secondary: Color::rgb(20, 24, 36),
            text: Color::rgb(180, 180, 190),
            text_secondary: Color::rgb(140, 140, 150),
            border: Color::rgb(0, 180, 180),
            scrollbar_track: Color::rgba(20, 24, 36, 200),
            scrollbar_thumb: Color::rgb(0, 180, 180),
            scrollbar_thumb_hover: Color::rgb(0, 200, 200),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::naox()
    }
}
