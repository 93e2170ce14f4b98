//! Shading parameters of a ribbon.
//!
//! The material only carries values: compiling and running the ribbon shader is the host
//! renderer's business. [`RibbonUniforms`] is the layout the shader expects.

use crate::color::{Color, ColorExt, WHITE};
use crate::picking::PickingConfig;
use bytemuck::{Pod, Zeroable};
use glamx::Vec2;

/// Uniforms of the ribbon shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RibbonUniforms {
    /// RGB color, with the opacity folded into alpha.
    pub color: [f32; 4],
    /// Viewport size in pixels.
    pub resolution: [f32; 2],
    /// Texture repetition along u and v.
    pub repeat: [f32; 2],
    /// Base line width.
    pub line_width: f32,
    /// `1.0` if the width shrinks with distance, `0.0` for a constant screen-space width.
    pub size_attenuation: f32,
    /// `1.0` if dashes are enabled.
    pub use_dash: f32,
    /// Length of a dash period, in counter units.
    pub dash_array: f32,
    /// Offset of the dash pattern, in counter units.
    pub dash_offset: f32,
    /// Fraction of a dash period left blank.
    pub dash_ratio: f32,
    /// Counter value past which the ribbon is hidden.
    pub visibility: f32,
    /// Fragments with a lower alpha are discarded.
    pub alpha_test: f32,
    /// `1.0` if a color texture is bound.
    pub use_map: f32,
    /// `1.0` if an alpha texture is bound.
    pub use_alpha_map: f32,
    _padding: [f32; 2],
}

/// Shading parameters of a ribbon.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RibbonMaterial {
    /// Base line width, multiplied by the per-vertex width.
    pub line_width: f32,
    /// The ribbon color.
    pub color: Color,
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Viewport size in pixels, needed to convert widths to screen space.
    pub resolution: Vec2,
    /// Whether the width shrinks with the distance to the camera.
    pub size_attenuation: bool,
    /// Length of a dash period. `0` disables dashes.
    pub dash_array: f32,
    /// Offset of the dash pattern.
    pub dash_offset: f32,
    /// Fraction of a dash period left blank.
    pub dash_ratio: f32,
    /// Whether dashes are drawn.
    pub use_dash: bool,
    /// Counter value past which the ribbon is hidden, for progressive reveal.
    pub visibility: f32,
    /// Fragments with a lower alpha are discarded.
    pub alpha_test: f32,
    /// Texture repetition along u and v.
    pub repeat: Vec2,
    /// Whether the host binds a color texture.
    pub use_map: bool,
    /// Whether the host binds an alpha texture.
    pub use_alpha_map: bool,
}

impl Default for RibbonMaterial {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            color: WHITE,
            opacity: 1.0,
            resolution: Vec2::ONE,
            size_attenuation: true,
            dash_array: 0.0,
            dash_offset: 0.0,
            dash_ratio: 0.5,
            use_dash: false,
            visibility: 1.0,
            alpha_test: 0.0,
            repeat: Vec2::ONE,
            use_map: false,
            use_alpha_map: false,
        }
    }
}

impl RibbonMaterial {
    /// Creates a material with the given color and line width.
    pub fn new(color: Color, line_width: f32) -> Self {
        Self {
            color,
            line_width,
            ..Default::default()
        }
    }

    /// Sets the line width.
    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Sets the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the viewport resolution.
    pub fn with_resolution(mut self, resolution: Vec2) -> Self {
        self.resolution = resolution;
        self
    }

    /// Enables or disables size attenuation.
    pub fn with_size_attenuation(mut self, size_attenuation: bool) -> Self {
        self.size_attenuation = size_attenuation;
        self
    }

    /// Sets the dash period, enabling dashes if it is non-zero.
    pub fn with_dash_array(mut self, dash_array: f32) -> Self {
        self.set_dash_array(dash_array);
        self
    }

    /// Sets the dash offset.
    pub fn with_dash_offset(mut self, dash_offset: f32) -> Self {
        self.dash_offset = dash_offset;
        self
    }

    /// Sets the dash ratio.
    pub fn with_dash_ratio(mut self, dash_ratio: f32) -> Self {
        self.dash_ratio = dash_ratio;
        self
    }

    /// Sets the visibility threshold.
    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the alpha test threshold.
    pub fn with_alpha_test(mut self, alpha_test: f32) -> Self {
        self.alpha_test = alpha_test;
        self
    }

    /// Sets the texture repetition.
    pub fn with_repeat(mut self, repeat: Vec2) -> Self {
        self.repeat = repeat;
        self
    }

    /// Sets the dash period. Dashes are enabled iff `dash_array != 0`.
    pub fn set_dash_array(&mut self, dash_array: f32) {
        self.dash_array = dash_array;
        self.use_dash = dash_array != 0.0;
    }

    /// The uniform block matching this material.
    pub fn uniforms(&self) -> RibbonUniforms {
        let mut color = self.color.to_array();
        color[3] *= self.opacity;

        let flag = |b: bool| if b { 1.0 } else { 0.0 };

        RibbonUniforms {
            color,
            resolution: self.resolution.into(),
            repeat: self.repeat.into(),
            line_width: self.line_width,
            size_attenuation: flag(self.size_attenuation),
            use_dash: flag(self.use_dash),
            dash_array: self.dash_array,
            dash_offset: self.dash_offset,
            dash_ratio: self.dash_ratio,
            visibility: self.visibility,
            alpha_test: self.alpha_test,
            use_map: flag(self.use_map),
            use_alpha_map: flag(self.use_alpha_map),
            _padding: [0.0; 2],
        }
    }

    /// A picking configuration whose width scalar mirrors this material's line width.
    pub fn picking_config(&self) -> PickingConfig {
        PickingConfig::default().with_line_width_scalar(self.line_width)
    }
}
