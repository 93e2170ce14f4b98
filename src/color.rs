//! Color type and a few named constants for ribbon materials.
//!
//! Colors are RGBA with `f32` components in the range [0.0, 1.0].
//!
//! # Example
//! ```
//! use meshline::color::{self, Color, ColorExt};
//!
//! let teal = Color::from_hex(0x5ca4a9);
//! assert_eq!(color::WHITE.a, 1.0);
//! assert!((teal.r - 0x5c as f32 / 255.0).abs() < 1.0e-6);
//! ```

pub use rgb::Rgba;

/// The color type used by ribbon materials. RGBA with f32 components in [0.0, 1.0].
pub type Color = Rgba<f32>;

/// Black (0, 0, 0)
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// White (255, 255, 255)
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Red (255, 0, 0)
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Lime (0, 255, 0)
pub const LIME: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// Blue (0, 0, 255)
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// Yellow (255, 255, 0)
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Cyan (0, 255, 255)
pub const CYAN: Color = Color::new(0.0, 1.0, 1.0, 1.0);

/// Magenta (255, 0, 255)
pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0, 1.0);

/// Fully transparent black.
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

/// Conversions between packed integer colors and [`Color`].
pub trait ColorExt {
    /// Builds an opaque color from a `0xRRGGBB` literal.
    fn from_hex(hex: u32) -> Self;

    /// The color as a `[r, g, b, a]` array, e.g. for uniform upload.
    fn to_array(&self) -> [f32; 4];
}

impl ColorExt for Color {
    #[inline]
    fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
        Color::new(channel(16), channel(8), channel(0), 1.0)
    }

    #[inline]
    fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
