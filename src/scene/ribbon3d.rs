//! A ribbon placed in a scene.

use crate::builtin::RibbonMaterial;
use crate::error::Result;
use crate::picking::{self, PickingConfig, Ray3d, RibbonIntersection};
use crate::procedural::{PointSequence, WidthProfile};
use crate::resource::RibbonGeometry;
use glamx::{Pose3, Vec3};

/// A ribbon geometry, the material it is drawn with, and its placement in the world.
#[derive(Clone, Debug)]
pub struct Ribbon3d {
    /// The ribbon buffers.
    pub geometry: RibbonGeometry,
    /// The shading parameters.
    pub material: RibbonMaterial,
    /// The local-to-world transform of this ribbon.
    pub transform: Pose3,
}

impl Default for Ribbon3d {
    fn default() -> Self {
        Self {
            geometry: RibbonGeometry::new(),
            material: RibbonMaterial::default(),
            transform: Pose3::IDENTITY,
        }
    }
}

impl Ribbon3d {
    /// Creates a ribbon along the given centerline.
    pub fn new<P: Into<PointSequence>>(points: P) -> Result<Self> {
        Ok(Self {
            geometry: RibbonGeometry::from_points(points, None)?,
            ..Default::default()
        })
    }

    /// Creates a ribbon from an existing geometry.
    pub fn from_geometry(geometry: RibbonGeometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    /// Sets the material.
    pub fn with_material(mut self, material: RibbonMaterial) -> Self {
        self.material = material;
        self
    }

    /// Sets the local-to-world transform.
    pub fn with_transform(mut self, transform: Pose3) -> Self {
        self.transform = transform;
        self
    }

    /// Rebuilds the geometry from a new centerline.
    pub fn set_points<P: Into<PointSequence>>(
        &mut self,
        points: P,
        width_profile: Option<WidthProfile>,
    ) -> Result<()> {
        self.geometry.set_points(points, width_profile)
    }

    /// Slides the ribbon forward by one point, given in local coordinates.
    pub fn advance(&mut self, point: Vec3) {
        self.geometry.advance(point)
    }

    /// Picks this ribbon with a world-space ray.
    ///
    /// The ray is brought to the ribbon's local frame before testing. The width scalar and
    /// transform of `config` are replaced by this ribbon's material line width and transform.
    pub fn raycast(
        &self,
        world_ray: &Ray3d,
        config: &PickingConfig,
    ) -> Result<Option<RibbonIntersection>> {
        let config = config
            .with_line_width_scalar(self.material.line_width)
            .with_transform(self.transform);
        let local_ray = world_ray.transformed(&self.transform.inverse());

        picking::intersect(&self.geometry.view(), &local_ray, &config)
    }
}
