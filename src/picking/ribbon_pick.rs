//! Ray picking against ribbon buffers.
//!
//! The ribbon is approximated by its centerline: a ray hits the ribbon if it passes close
//! enough to one of the segments joining consecutive index-buffer entries. "Close enough"
//! grows with the line width, so thick lines are easier to pick.

use crate::error::{Result, RibbonError};
use crate::picking::{BoundingSphere, Ray3d};
use crate::resource::VertexIndex;
use glamx::{Pose3, Vec3};

/// How consecutive index-buffer entries are paired into centerline segments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentMode {
    /// The ribbon is one connected strip: every pair of consecutive entries is a segment.
    #[default]
    Strip,
    /// The ribbon is a set of disjoint segments: entries are paired two by two.
    Pairs,
}

impl SegmentMode {
    /// The step between two tested index-buffer positions.
    #[inline]
    pub fn stride(self) -> usize {
        match self {
            SegmentMode::Strip => 1,
            SegmentMode::Pairs => 2,
        }
    }
}

/// Parameters of a picking query.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickingConfig {
    /// Minimum tolerance, in local units, added to half the line width.
    pub threshold: f32,
    /// Hits closer than this to the ray origin are ignored.
    pub near: f32,
    /// Hits farther than this from the ray origin are ignored.
    pub far: f32,
    /// Global width multiplier, mirrored from the material line width.
    pub line_width_scalar: f32,
    /// How index-buffer entries are paired into segments.
    pub mode: SegmentMode,
    /// The ribbon's local-to-world transform, used to report hits in world space.
    pub transform: Pose3,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            near: 0.0,
            far: f32::INFINITY,
            line_width_scalar: 1.0,
            mode: SegmentMode::Strip,
            transform: Pose3::IDENTITY,
        }
    }
}

impl PickingConfig {
    /// Sets the base picking tolerance.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the valid range of hit distances.
    pub fn with_range(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Sets the global width multiplier.
    pub fn with_line_width_scalar(mut self, line_width_scalar: f32) -> Self {
        self.line_width_scalar = line_width_scalar;
        self
    }

    /// Sets the segment pairing mode.
    pub fn with_mode(mut self, mode: SegmentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the ribbon's local-to-world transform.
    pub fn with_transform(mut self, transform: Pose3) -> Self {
        self.transform = transform;
        self
    }
}

/// A read-only view of the buffers needed for picking.
///
/// Produced by [`RibbonGeometry::view`](crate::resource::RibbonGeometry::view), or assembled
/// by hand from buffers owned elsewhere.
#[derive(Copy, Clone, Debug)]
pub struct RibbonView<'a> {
    /// Vertex positions.
    pub positions: &'a [Vec3],
    /// Per-vertex width multipliers.
    pub widths: Option<&'a [f32]>,
    /// Flat index buffer, three entries per triangle.
    pub indices: Option<&'a [VertexIndex]>,
    /// Bounding sphere of `positions`. Computed on the fly if absent.
    pub bounding_sphere: Option<BoundingSphere>,
}

impl<'a> RibbonView<'a> {
    /// A view with positions only.
    pub fn new(positions: &'a [Vec3]) -> Self {
        Self {
            positions,
            widths: None,
            indices: None,
            bounding_sphere: None,
        }
    }

    /// Sets the per-vertex widths.
    pub fn with_widths(mut self, widths: &'a [f32]) -> Self {
        self.widths = Some(widths);
        self
    }

    /// Sets the flat index buffer.
    pub fn with_indices(mut self, indices: &'a [VertexIndex]) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Sets a precomputed bounding sphere.
    pub fn with_bounding_sphere(mut self, sphere: BoundingSphere) -> Self {
        self.bounding_sphere = Some(sphere);
        self
    }
}

/// A successful pick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RibbonIntersection {
    /// Distance from the ray origin to `point_on_ray`, in world units.
    pub distance: f32,
    /// World-space point of the centerline closest to the ray.
    pub point: Vec3,
    /// World-space point of the ray closest to the centerline.
    pub point_on_ray: Vec3,
    /// Position in the index buffer of the segment that was hit.
    pub index: usize,
}

/// Counters describing the work done by the last picking query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PickStats {
    /// Whether the ray missed the bounding sphere.
    pub broad_phase_rejected: bool,
    /// Number of centerline segments tested against the ray.
    pub segments_tested: usize,
}

/// Finds the first centerline segment of `view` that passes within the picking tolerance of
/// `local_ray`.
///
/// `local_ray` must be expressed in the ribbon's local frame. Segments are visited in
/// index-buffer order and the scan stops at the first one within tolerance and within the
/// `[near, far]` range: this is the first hit, not necessarily the nearest.
///
/// Returns `Ok(None)` if nothing is hit, or if the view has no index buffer.
pub fn intersect(
    view: &RibbonView<'_>,
    local_ray: &Ray3d,
    config: &PickingConfig,
) -> Result<Option<RibbonIntersection>> {
    let mut stats = PickStats::default();
    intersect_with_stats(view, local_ray, config, &mut stats)
}

/// Same as [`intersect`], also recording how much work was done into `stats`.
pub fn intersect_with_stats(
    view: &RibbonView<'_>,
    local_ray: &Ray3d,
    config: &PickingConfig,
    stats: &mut PickStats,
) -> Result<Option<RibbonIntersection>> {
    *stats = PickStats::default();

    let sphere = match view
        .bounding_sphere
        .or_else(|| BoundingSphere::from_points(view.positions))
    {
        Some(sphere) => sphere,
        None => return Ok(None),
    };

    if !local_ray.intersects_sphere(&sphere) {
        log::trace!("Ray misses the ribbon bounding sphere.");
        stats.broad_phase_rejected = true;
        return Ok(None);
    }

    let indices = match view.indices {
        Some(indices) => indices,
        None => return Ok(None),
    };
    let widths = view.widths.ok_or(RibbonError::MissingAttribute("width"))?;

    let world_origin = config.transform * local_ray.origin;
    let stride = config.mode.stride();
    let mut i = 0;

    while i + 1 < indices.len() {
        let start = vertex_position(view.positions, indices[i])?;
        let end = vertex_position(view.positions, indices[i + 1])?;

        // Sampled per triangle rather than per vertex, matching the layout of the shader inputs.
        let width = widths.get(i / 3).copied().unwrap_or(1.0);
        let precision = config.threshold + (config.line_width_scalar * width) / 2.0;

        stats.segments_tested += 1;
        let approach = local_ray.distance_sq_to_segment(start, end);

        if approach.distance_sq <= precision * precision {
            let point_on_ray = config.transform * approach.point_on_ray;
            let distance = world_origin.distance(point_on_ray);

            if distance >= config.near && distance <= config.far {
                return Ok(Some(RibbonIntersection {
                    distance,
                    point: config.transform * approach.point_on_segment,
                    point_on_ray,
                    index: i,
                }));
            }
        }

        i += stride;
    }

    Ok(None)
}

#[inline]
fn vertex_position(positions: &[Vec3], index: VertexIndex) -> Result<Vec3> {
    positions
        .get(index as usize)
        .copied()
        .ok_or(RibbonError::MissingAttribute("position"))
}

/// Ray picker remembering its configuration and the statistics of its last query.
#[derive(Clone, Debug, Default)]
pub struct RibbonPicker {
    config: PickingConfig,
    last_stats: PickStats,
}

impl RibbonPicker {
    /// Creates a picker with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a picker with a custom configuration.
    pub fn with_config(config: PickingConfig) -> Self {
        Self {
            config,
            last_stats: PickStats::default(),
        }
    }

    /// The current configuration.
    pub fn config(&self) -> &PickingConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: PickingConfig) {
        self.config = config;
    }

    /// Statistics of the last call to [`pick`](Self::pick).
    pub fn last_stats(&self) -> PickStats {
        self.last_stats
    }

    /// Picks `view` with a ray expressed in the ribbon's local frame.
    pub fn pick(
        &mut self,
        view: &RibbonView<'_>,
        local_ray: &Ray3d,
    ) -> Result<Option<RibbonIntersection>> {
        intersect_with_stats(view, local_ray, &self.config, &mut self.last_stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Flat indices of a 3-point ribbon, as produced by the ribbon builder.
    const INDICES: [VertexIndex; 12] = [0, 1, 2, 2, 1, 3, 2, 3, 4, 4, 3, 5];

    fn straight_positions() -> Vec<Vec3> {
        [0.0, 10.0, 20.0]
            .iter()
            .flat_map(|x| vec![Vec3::new(*x, 0.0, 0.0); 2])
            .collect()
    }

    #[test]
    fn test_pick_straight_ribbon() {
        let positions = straight_positions();
        let widths = [1.0; 6];
        let view = RibbonView::new(&positions)
            .with_widths(&widths)
            .with_indices(&INDICES);
        let config = PickingConfig::default().with_threshold(0.5);
        let ray = Ray3d::new(Vec3::new(5.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let hit = intersect(&view, &ray, &config).unwrap().unwrap();
        assert!(hit.point.distance(Vec3::new(5.0, 0.0, 0.0)) < 1.0e-5);
        assert!((hit.distance - 5.0).abs() < 1.0e-5);
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn test_pick_too_far_from_centerline() {
        let positions = straight_positions();
        let widths = [1.0; 6];
        let view = RibbonView::new(&positions)
            .with_widths(&widths)
            .with_indices(&INDICES);
        let config = PickingConfig::default().with_threshold(0.5);
        let ray = Ray3d::new(Vec3::new(5.0, 3.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        let mut stats = PickStats::default();
        let hit = intersect_with_stats(&view, &ray, &config, &mut stats).unwrap();
        assert!(hit.is_none());
        assert!(!stats.broad_phase_rejected);
        assert_eq!(stats.segments_tested, INDICES.len() - 1);
    }

    #[test]
    fn test_broad_phase_skips_segments() {
        let positions = straight_positions();
        let widths = [1.0; 6];
        let view = RibbonView::new(&positions)
            .with_widths(&widths)
            .with_indices(&INDICES);
        let ray = Ray3d::new(Vec3::new(5.0, 10.0, 0.0), Vec3::new(0.0, 1.0, 0.0));

        let mut picker = RibbonPicker::with_config(PickingConfig::default().with_threshold(0.5));
        assert!(picker.pick(&view, &ray).unwrap().is_none());
        assert!(picker.last_stats().broad_phase_rejected);
        assert_eq!(picker.last_stats().segments_tested, 0);
    }

    #[test]
    fn test_wide_lines_are_easier_to_pick() {
        let positions = straight_positions();
        let widths = [1.0; 6];
        let view = RibbonView::new(&positions)
            .with_widths(&widths)
            .with_indices(&INDICES);
        let ray = Ray3d::new(Vec3::new(5.0, 3.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        let thin = PickingConfig::default().with_threshold(0.5);
        let thick = thin.with_line_width_scalar(6.0);
        assert!(intersect(&view, &ray, &thin).unwrap().is_none());
        assert!(intersect(&view, &ray, &thick).unwrap().is_some());
    }

    #[test]
    fn test_out_of_range_hits_are_skipped() {
        let positions = straight_positions();
        let widths = [1.0; 6];
        let view = RibbonView::new(&positions)
            .with_widths(&widths)
            .with_indices(&INDICES);
        let ray = Ray3d::new(Vec3::new(5.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let config = PickingConfig::default()
            .with_threshold(0.5)
            .with_range(0.0, 4.0);
        assert!(intersect(&view, &ray, &config).unwrap().is_none());
    }

    #[test]
    fn test_pairs_mode_stride() {
        let positions = straight_positions();
        let widths = [1.0; 6];
        let view = RibbonView::new(&positions)
            .with_widths(&widths)
            .with_indices(&INDICES);
        let ray = Ray3d::new(Vec3::new(5.0, 3.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let config = PickingConfig::default().with_mode(SegmentMode::Pairs);

        let mut stats = PickStats::default();
        let _ = intersect_with_stats(&view, &ray, &config, &mut stats).unwrap();
        assert_eq!(stats.segments_tested, INDICES.len() / 2);
    }

    #[test]
    fn test_hit_reported_in_world_space() {
        let positions = straight_positions();
        let widths = [1.0; 6];
        let view = RibbonView::new(&positions)
            .with_widths(&widths)
            .with_indices(&INDICES);
        let pose = Pose3::from_translation(Vec3::new(0.0, 0.0, 7.0));
        let config = PickingConfig::default()
            .with_threshold(0.5)
            .with_transform(pose);
        let ray = Ray3d::new(Vec3::new(5.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let hit = intersect(&view, &ray, &config).unwrap().unwrap();
        assert!(hit.point.distance(Vec3::new(5.0, 0.0, 7.0)) < 1.0e-5);
        assert!((hit.distance - 5.0).abs() < 1.0e-5);
    }

    #[test]
    fn test_missing_index_is_not_an_error() {
        let positions = straight_positions();
        let view = RibbonView::new(&positions);
        let ray = Ray3d::new(Vec3::new(5.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        assert_eq!(intersect(&view, &ray, &PickingConfig::default()), Ok(None));
    }

    #[test]
    fn test_missing_attributes() {
        let positions = straight_positions();
        let ray = Ray3d::new(Vec3::new(5.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let config = PickingConfig::default();

        let no_widths = RibbonView::new(&positions).with_indices(&INDICES);
        assert_eq!(
            intersect(&no_widths, &ray, &config),
            Err(RibbonError::MissingAttribute("width"))
        );

        let widths = [1.0; 6];
        let bad_indices = [0, 9, 1];
        let dangling = RibbonView::new(&positions)
            .with_widths(&widths)
            .with_indices(&bad_indices);
        assert_eq!(
            intersect(&dangling, &ray, &config),
            Err(RibbonError::MissingAttribute("position"))
        );
    }

    #[test]
    fn test_width_sampled_per_triangle() {
        // Only the first triangle's width is large enough to reach a ray 3 units away.
        let positions = straight_positions();
        let widths = [10.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let view = RibbonView::new(&positions)
            .with_widths(&widths)
            .with_indices(&INDICES);
        let config = PickingConfig::default().with_threshold(0.0);
        let ray = Ray3d::new(Vec3::new(5.0, 3.0, -10.0), Vec3::new(0.0, 0.0, 1.0));

        let hit = intersect(&view, &ray, &config).unwrap().unwrap();
        assert_eq!(hit.index, 1);
        assert!(hit.point.distance(Vec3::new(5.0, 0.0, 0.0)) < 1.0e-5);
        assert!((hit.distance - 10.0).abs() < 1.0e-5);

        // Segments past the first triangle read widths[1], which is zero.
        let shifted = [0.0, 10.0, 0.0, 0.0, 0.0, 0.0];
        let view = RibbonView::new(&positions)
            .with_widths(&shifted)
            .with_indices(&INDICES);
        let hit = intersect(&view, &ray, &config).unwrap().unwrap();
        assert_eq!(hit.index, 3);
    }

    #[test]
    fn test_empty_view() {
        let view = RibbonView::new(&[]);
        let ray = Ray3d::new(Vec3::ZERO, Vec3::X);
        assert_eq!(intersect(&view, &ray, &PickingConfig::default()), Ok(None));
    }
}
