use glamx::{Pose3, Vec3};

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// The corner with the smallest coordinates.
    pub mins: Vec3,
    /// The corner with the largest coordinates.
    pub maxs: Vec3,
}

impl Aabb {
    /// Creates a new box from its two extreme corners.
    #[inline]
    pub fn new(mins: Vec3, maxs: Vec3) -> Aabb {
        Aabb { mins, maxs }
    }

    /// The smallest box containing all the given points, or `None` if there are no points.
    pub fn from_points(points: &[Vec3]) -> Option<Aabb> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Aabb::new(*first, *first);

        for p in rest {
            aabb.mins = aabb.mins.min(*p);
            aabb.maxs = aabb.maxs.max(*p);
        }

        Some(aabb)
    }

    /// The center of this box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.mins + self.maxs) * 0.5
    }

    /// Half the size of this box along each axis.
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.maxs - self.mins) * 0.5
    }

    /// Does this box contain `point`, boundary included?
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.mins).all() && point.cmple(self.maxs).all()
    }
}

/// A bounding sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingSphere {
    /// The sphere center.
    pub center: Vec3,
    /// The sphere radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new sphere.
    #[inline]
    pub fn new(center: Vec3, radius: f32) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// A sphere enclosing all the given points, or `None` if there are no points.
    ///
    /// The center is the center of the points' bounding box, and the radius the distance
    /// from that center to the farthest point.
    pub fn from_points(points: &[Vec3]) -> Option<BoundingSphere> {
        let center = Aabb::from_points(points)?.center();
        let max_dist_sq = points
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0f32, f32::max);

        Some(BoundingSphere::new(center, max_dist_sq.sqrt()))
    }

    /// Does this sphere contain `point`, boundary included?
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }

    /// Applies a rigid transformation to this sphere.
    #[inline]
    pub fn transformed(&self, pose: &Pose3) -> BoundingSphere {
        BoundingSphere::new(*pose * self.center, self.radius)
    }
}
