//! Procedural generation of ribbon geometry from centerline polylines.

pub use self::points::PointSequence;
pub use self::width::WidthProfile;

mod points;
pub mod utils;
mod width;
