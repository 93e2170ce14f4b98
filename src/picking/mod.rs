//! Ray picking against ribbons.

pub use self::bounding::{Aabb, BoundingSphere};
pub use self::ray::{Ray3d, SegmentApproach};
pub use self::ribbon_pick::{
    intersect, intersect_with_stats, PickStats, PickingConfig, RibbonIntersection, RibbonPicker,
    RibbonView, SegmentMode,
};

mod bounding;
mod ray;
mod ribbon_pick;
