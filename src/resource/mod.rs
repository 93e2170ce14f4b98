//! Ribbon buffers and the formats used to hand them to a renderer.

pub use crate::resource::attribute::Attribute;
pub use crate::resource::ribbon_geometry::RibbonGeometry;
pub use crate::resource::vertex::{RibbonVertex, VertexAttributeLayout, VertexIndex};

mod attribute;
mod ribbon_geometry;
pub mod vertex;
