//! Built-in materials.

pub use self::ribbon_material::{RibbonMaterial, RibbonUniforms};

mod ribbon_material;
