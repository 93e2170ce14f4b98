use crate::picking::BoundingSphere;
use glamx::{Pose3, Vec3};

/// A half-line starting at `origin` and going towards `dir`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray3d {
    /// Starting point of the ray.
    pub origin: Vec3,
    /// Unit direction of the ray.
    pub dir: Vec3,
}

/// Closest approach between a ray and a segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentApproach {
    /// Squared distance between the two closest points.
    pub distance_sq: f32,
    /// The closest point on the ray.
    pub point_on_ray: Vec3,
    /// The closest point on the segment.
    pub point_on_segment: Vec3,
}

impl Ray3d {
    /// Creates a ray. `dir` is normalized; a zero direction stays zero.
    #[inline]
    pub fn new(origin: Vec3, dir: Vec3) -> Ray3d {
        Ray3d {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    /// The point at parameter `t` along this ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Applies a rigid transformation to this ray.
    #[inline]
    pub fn transformed(&self, pose: &Pose3) -> Ray3d {
        Ray3d {
            origin: *pose * self.origin,
            dir: pose.rotation * self.dir,
        }
    }

    /// Squared distance between `point` and the closest point of this ray.
    #[inline]
    pub fn distance_sq_to_point(&self, point: Vec3) -> f32 {
        let t = (point - self.origin).dot(self.dir);

        if t < 0.0 {
            self.origin.distance_squared(point)
        } else {
            self.at(t).distance_squared(point)
        }
    }

    /// Does this ray pass through the given sphere?
    #[inline]
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.distance_sq_to_point(sphere.center) <= sphere.radius * sphere.radius
    }

    /// Computes the closest approach between this ray and the segment `[a, b]`.
    ///
    /// A degenerate segment (`a == b`) behaves like the single point `a`.
    pub fn distance_sq_to_segment(&self, a: Vec3, b: Vec3) -> SegmentApproach {
        // Segment parametrized by its center and half-length: center + s1 * seg_dir,
        // s1 ∈ [-extent, extent]. Ray parametrized by s0 ≥ 0.
        let seg_center = (a + b) * 0.5;
        let seg_dir = (b - a).normalize_or_zero();
        let extent = a.distance(b) * 0.5;
        let diff = self.origin - seg_center;

        let a01 = -self.dir.dot(seg_dir);
        let b0 = diff.dot(self.dir);
        let b1 = -diff.dot(seg_dir);
        let c = diff.length_squared();
        let det = (1.0 - a01 * a01).abs();

        let (s0, s1, distance_sq);

        if det > 0.0 {
            let mut t0 = a01 * b1 - b0;
            let mut t1 = a01 * b0 - b1;
            let ext_det = extent * det;

            if t0 >= 0.0 {
                if t1 >= -ext_det {
                    if t1 <= ext_det {
                        // Interior of both the ray and the segment.
                        let inv_det = 1.0 / det;
                        t0 *= inv_det;
                        t1 *= inv_det;
                        s0 = t0;
                        s1 = t1;
                        distance_sq =
                            t0 * (t0 + a01 * t1 + 2.0 * b0) + t1 * (a01 * t0 + t1 + 2.0 * b1) + c;
                    } else {
                        s1 = extent;
                        s0 = (-(a01 * s1 + b0)).max(0.0);
                        distance_sq = -s0 * s0 + s1 * (s1 + 2.0 * b1) + c;
                    }
                } else {
                    s1 = -extent;
                    s0 = (-(a01 * s1 + b0)).max(0.0);
                    distance_sq = -s0 * s0 + s1 * (s1 + 2.0 * b1) + c;
                }
            } else if t1 <= -ext_det {
                s0 = (-(-a01 * extent + b0)).max(0.0);
                s1 = if s0 > 0.0 {
                    -extent
                } else {
                    (-b1).max(-extent).min(extent)
                };
                distance_sq = -s0 * s0 + s1 * (s1 + 2.0 * b1) + c;
            } else if t1 <= ext_det {
                s0 = 0.0;
                s1 = (-b1).max(-extent).min(extent);
                distance_sq = s1 * (s1 + 2.0 * b1) + c;
            } else {
                s0 = (-(a01 * extent + b0)).max(0.0);
                s1 = if s0 > 0.0 {
                    extent
                } else {
                    (-b1).max(-extent).min(extent)
                };
                distance_sq = -s0 * s0 + s1 * (s1 + 2.0 * b1) + c;
            }
        } else {
            // Ray and segment are parallel.
            s1 = if a01 > 0.0 { -extent } else { extent };
            s0 = (-(a01 * s1 + b0)).max(0.0);
            distance_sq = -s0 * s0 + s1 * (s1 + 2.0 * b1) + c;
        }

        SegmentApproach {
            // Rounding may push the closed form slightly below zero.
            distance_sq: distance_sq.max(0.0),
            point_on_ray: self.at(s0),
            point_on_segment: seg_center + seg_dir * s1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1.0e-5
    }

    #[test]
    fn test_ray_new_normalizes() {
        let ray = Ray3d::new(Vec3::ZERO, Vec3::new(0.0, -3.0, 0.0));
        assert_eq!(ray.dir, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(ray.at(2.0), Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn test_ray_crossing_segment() {
        let ray = Ray3d::new(Vec3::new(5.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let res = ray.distance_sq_to_segment(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));

        assert!(res.distance_sq < 1.0e-6);
        assert!(approx(res.point_on_ray, Vec3::new(5.0, 0.0, 0.0)));
        assert!(approx(res.point_on_segment, Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_ray_passing_beside_segment() {
        let ray = Ray3d::new(Vec3::new(5.0, 0.0, 3.0), Vec3::new(0.0, 1.0, 0.0));
        let res = ray.distance_sq_to_segment(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));

        assert!((res.distance_sq - 9.0).abs() < 1.0e-4);
        assert!(approx(res.point_on_ray, Vec3::new(5.0, 0.0, 3.0)));
        assert!(approx(res.point_on_segment, Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_ray_pointing_away_from_segment() {
        let ray = Ray3d::new(Vec3::new(5.0, 10.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let res = ray.distance_sq_to_segment(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));

        assert!((res.distance_sq - 100.0).abs() < 1.0e-3);
        assert!(approx(res.point_on_ray, ray.origin));
    }

    #[test]
    fn test_segment_endpoint_is_closest() {
        let ray = Ray3d::new(Vec3::new(15.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let res = ray.distance_sq_to_segment(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));

        assert!((res.distance_sq - 25.0).abs() < 1.0e-3);
        assert!(approx(res.point_on_segment, Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_parallel_segment() {
        let ray = Ray3d::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::X);
        let res = ray.distance_sq_to_segment(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        assert!((res.distance_sq - 4.0).abs() < 1.0e-4);
    }

    #[test]
    fn test_degenerate_segment() {
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let p = Vec3::new(3.0, 0.0, 0.0);
        let res = ray.distance_sq_to_segment(p, p);

        assert!((res.distance_sq - 9.0).abs() < 1.0e-4);
        assert!(approx(res.point_on_segment, p));
        assert!(approx(res.point_on_ray, Vec3::ZERO));
    }

    #[test]
    fn test_sphere_intersection() {
        let ray = Ray3d::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(ray.intersects_sphere(&BoundingSphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0)));
        assert!(!ray.intersects_sphere(&BoundingSphere::new(Vec3::new(10.0, 0.0, -5.0), 1.0)));
        // Behind the origin.
        assert!(!ray.intersects_sphere(&BoundingSphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0)));
    }

    #[test]
    fn test_transformed_ray() {
        let ray = Ray3d::new(Vec3::ZERO, Vec3::X);
        let moved = ray.transformed(&Pose3::from_translation(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(moved.origin, Vec3::new(0.0, 1.0, 0.0));
        assert!(approx(moved.dir, Vec3::X));
    }
}
