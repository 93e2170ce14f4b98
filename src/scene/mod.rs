//! Ribbons placed in a scene.

pub use self::ribbon3d::Ribbon3d;

mod ribbon3d;
