/*!
# MeshLine

Thick, variable-width lines for GPU rasterizers that only know how to draw hairlines.

A polyline is expanded into a triangulated *ribbon*: every centerline point is duplicated into
a left and a right vertex, and each pair of consecutive points is joined by two triangles. The
vertices keep the centerline position and carry the neighboring points, a side sign and a
width, so that a vertex shader can push them apart in screen space. The crate produces these
buffers and lets you pick the resulting ribbon with a ray; drawing them is up to the host
renderer.

## Features

* build a ribbon from a list of points, with an optional width profile along its length.
* closed loops (first point equal to the last one) get wrap-around neighbors.
* slide a fixed-size ribbon forward one point at a time, for trails and streaming data.
* ray picking, with a tolerance that grows with the line width.
* a plain-old-data interleaved vertex format and uniform block for GPU upload.

## Example

```
use meshline::prelude::*;

let points = vec![
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(10.0, 0.0, 0.0),
    Vec3::new(20.0, 0.0, 0.0),
];
let mut ribbon = Ribbon3d::new(points).unwrap();

// Pick it with a ray going down the Y axis.
let ray = Ray3d::new(Vec3::new(5.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
let config = PickingConfig::default().with_threshold(0.5);
let hit = ribbon.raycast(&ray, &config).unwrap().unwrap();
assert!((hit.distance - 5.0).abs() < 1.0e-5);

// Push a new point; the oldest one is dropped.
ribbon.advance(Vec3::new(30.0, 0.0, 0.0));
assert_eq!(ribbon.geometry.point_count(), 3);
```
*/
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]

#[cfg(feature = "serde")]
extern crate serde;

pub use glamx;

pub mod builtin;
pub mod color;
pub mod error;
pub mod picking;
pub mod procedural;
pub mod resource;
pub mod scene;

pub use crate::error::{Result, RibbonError};

pub mod prelude {
    pub use crate::builtin::*;
    pub use crate::color::{Color, ColorExt};
    pub use crate::error::{Result, RibbonError};
    pub use crate::picking::*;
    pub use crate::procedural::{PointSequence, WidthProfile};
    pub use crate::resource::*;
    pub use crate::scene::*;
    pub use glamx::{Pose3, Quat, Vec2, Vec3};
}
