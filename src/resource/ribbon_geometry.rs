//! The vertex and index buffers of a ribbon.

use std::cell::OnceCell;

use crate::error::Result;
use crate::picking::{Aabb, BoundingSphere, RibbonView};
use crate::procedural::{utils, PointSequence, WidthProfile};
use crate::resource::attribute::Attribute;
use crate::resource::vertex::{RibbonVertex, VertexIndex};
use glamx::{Vec2, Vec3};

/// Vertex and index buffers describing a thick line as a triangulated ribbon.
///
/// Every centerline point is duplicated into a left (`side = +1`) and a right (`side = -1`)
/// vertex. Both copies share the centerline position: the lateral offset is computed by the
/// vertex shader from `previous`, `next`, `side` and `width`. Consecutive points are joined by
/// two triangles.
///
/// # Example
/// ```
/// use meshline::prelude::*;
///
/// let points = vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)];
/// let mut geometry = RibbonGeometry::from_points(points, Some(WidthProfile::taper())).unwrap();
/// assert_eq!(geometry.vertex_count(), 6);
/// assert_eq!(geometry.num_triangles(), 4);
///
/// // Slide the line forward: the oldest point is dropped.
/// geometry.advance(Vec3::new(3.0, 1.0, 0.0));
/// assert_eq!(geometry.vertex_count(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct RibbonGeometry {
    points: PointSequence,
    width_profile: Option<WidthProfile>,
    built: bool,
    position: Attribute<Vec3>,
    previous: Attribute<Vec3>,
    next: Attribute<Vec3>,
    side: Attribute<f32>,
    width: Attribute<f32>,
    uv: Attribute<Vec2>,
    counters: Attribute<f32>,
    index: Attribute<[VertexIndex; 3]>,
    bounding_sphere: OnceCell<Option<BoundingSphere>>,
    bounding_box: OnceCell<Option<Aabb>>,
}

impl Default for RibbonGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl RibbonGeometry {
    /// Creates an empty ribbon.
    pub fn new() -> RibbonGeometry {
        RibbonGeometry {
            points: PointSequence::default(),
            width_profile: None,
            built: false,
            position: Attribute::new("position", 3),
            previous: Attribute::new("previous", 3),
            next: Attribute::new("next", 3),
            side: Attribute::new("side", 1),
            width: Attribute::new("width", 1),
            uv: Attribute::new("uv", 2),
            counters: Attribute::new("counters", 1),
            index: Attribute::new("index", 3),
            bounding_sphere: OnceCell::new(),
            bounding_box: OnceCell::new(),
        }
    }

    /// Builds a ribbon from a centerline and an optional width profile.
    ///
    /// Without a profile, the width multiplier is 1 everywhere.
    pub fn from_points<P: Into<PointSequence>>(
        points: P,
        width_profile: Option<WidthProfile>,
    ) -> Result<RibbonGeometry> {
        let mut geometry = RibbonGeometry::new();
        geometry.set_points(points, width_profile)?;
        Ok(geometry)
    }

    /// Rebuilds every buffer of this ribbon from a new centerline.
    ///
    /// If the point count is unchanged, the existing attribute storage is overwritten in place.
    /// On error, the ribbon is left untouched.
    pub fn set_points<P: Into<PointSequence>>(
        &mut self,
        points: P,
        width_profile: Option<WidthProfile>,
    ) -> Result<()> {
        let points = points.into();
        let coords = points.to_points()?;

        self.points = points;
        self.width_profile = width_profile;
        self.process(&coords);
        Ok(())
    }

    /// Changes the width profile and rebuilds the ribbon from its current centerline.
    pub fn set_width_profile(&mut self, width_profile: Option<WidthProfile>) {
        let coords = self.centerline();
        self.width_profile = width_profile;
        self.process(&coords);
    }

    /// The point sequence last given to [`set_points`](Self::set_points).
    ///
    /// This does not reflect the points added by [`advance`](Self::advance); see
    /// [`centerline`](Self::centerline) for that.
    #[inline]
    pub fn points(&self) -> &PointSequence {
        &self.points
    }

    /// The width profile used by the last build.
    #[inline]
    pub fn width_profile(&self) -> Option<&WidthProfile> {
        self.width_profile.as_ref()
    }

    /// The current centerline, read back from the position buffer.
    pub fn centerline(&self) -> Vec<Vec3> {
        self.position.data().iter().step_by(2).copied().collect()
    }

    fn process(&mut self, points: &[Vec3]) {
        let npts = points.len();
        let nverts = npts * 2;

        let mut position = Vec::with_capacity(nverts);
        let mut previous = Vec::with_capacity(nverts);
        let mut next = Vec::with_capacity(nverts);
        let mut side = Vec::with_capacity(nverts);
        let mut width = Vec::with_capacity(nverts);
        let mut uv = Vec::with_capacity(nverts);
        let mut counters = Vec::with_capacity(nverts);
        let mut index = Vec::with_capacity(npts.saturating_sub(1) * 2);

        if npts < 2 {
            log::warn!(
                "Building a ribbon from {} point(s): no triangle will be generated.",
                npts
            );
        }

        if npts > 0 {
            let closed = utils::is_closed_loop(points);

            let first_previous = if closed { points[npts - 2] } else { points[0] };
            previous.extend_from_slice(&[first_previous; 2]);

            for (j, pt) in points.iter().enumerate() {
                let t = utils::normalized_parameter(j, npts);
                let w = self.width_profile.as_ref().map_or(1.0, |p| p.eval(t));

                position.extend_from_slice(&[*pt; 2]);
                side.extend_from_slice(&[1.0, -1.0]);
                width.extend_from_slice(&[w; 2]);
                uv.push(Vec2::new(t, 0.0));
                uv.push(Vec2::new(t, 1.0));
                counters.extend_from_slice(&[t; 2]);

                if j < npts - 1 {
                    previous.extend_from_slice(&[*pt; 2]);
                    utils::push_ribbon_quad_indices(j as VertexIndex, &mut index);
                }

                if j > 0 {
                    next.extend_from_slice(&[*pt; 2]);
                }
            }

            let last_next = if closed { points[1] } else { points[npts - 1] };
            next.extend_from_slice(&[last_next; 2]);
        }

        let reuse = self.built && self.position.len() == nverts;

        if reuse {
            log::debug!(
                "Overwriting ribbon buffers of {} vertices in place.",
                nverts
            );
        } else {
            log::debug!("Allocating ribbon buffers for {} vertices.", nverts);
        }

        let _ = self.position.overwrite(position, reuse);
        let _ = self.previous.overwrite(previous, reuse);
        let _ = self.next.overwrite(next, reuse);
        let _ = self.side.overwrite(side, reuse);
        let _ = self.width.overwrite(width, reuse);
        let _ = self.uv.overwrite(uv, reuse);
        let _ = self.counters.overwrite(counters, reuse);
        let _ = self.index.overwrite(index, reuse);
        self.built = true;

        self.bounding_sphere = OnceCell::from(BoundingSphere::from_points(self.position.data()));
        self.bounding_box = OnceCell::from(Aabb::from_points(self.position.data()));
    }

    /// Slides the ribbon forward by one point, dropping the oldest one.
    ///
    /// Only `position`, `previous` and `next` change: the topology, widths, uvs and counters
    /// are kept as-is, so the point count stays constant. The width profile is not evaluated.
    pub fn advance(&mut self, point: Vec3) {
        let len = self.position.len();

        if len == 0 {
            log::warn!("Cannot advance an empty ribbon: call `set_points` first.");
            return;
        }

        self.previous
            .data_mut()
            .copy_from_slice(self.position.data());

        let positions = self.position.data_mut();
        positions.copy_within(2.., 0);
        positions[len - 2] = point;
        positions[len - 1] = point;

        let next = self.next.data_mut();
        next[..len - 2].copy_from_slice(&self.position.data()[2..]);
        next[len - 2] = point;
        next[len - 1] = point;

        self.invalidate_bounds();
    }

    fn invalidate_bounds(&mut self) {
        self.bounding_sphere = OnceCell::new();
        self.bounding_box = OnceCell::new();
    }

    /// Whether `set_points` was called at least once.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// The number of centerline points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.position.len() / 2
    }

    /// The number of vertices, always twice the number of points.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.position.len()
    }

    /// The number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.index.len()
    }

    /// Vertex positions.
    #[inline]
    pub fn position(&self) -> &Attribute<Vec3> {
        &self.position
    }

    /// Position of the preceding centerline point, per vertex.
    #[inline]
    pub fn previous(&self) -> &Attribute<Vec3> {
        &self.previous
    }

    /// Position of the following centerline point, per vertex.
    #[inline]
    pub fn next(&self) -> &Attribute<Vec3> {
        &self.next
    }

    /// `+1` on left copies, `-1` on right copies.
    #[inline]
    pub fn side(&self) -> &Attribute<f32> {
        &self.side
    }

    /// Width multipliers.
    #[inline]
    pub fn width(&self) -> &Attribute<f32> {
        &self.width
    }

    /// Texture coordinates.
    #[inline]
    pub fn uv(&self) -> &Attribute<Vec2> {
        &self.uv
    }

    /// Normalized position along the ribbon, per vertex.
    #[inline]
    pub fn counters(&self) -> &Attribute<f32> {
        &self.counters
    }

    /// Triangles.
    #[inline]
    pub fn index(&self) -> &Attribute<[VertexIndex; 3]> {
        &self.index
    }

    /// The index buffer as a flat list, three entries per triangle.
    #[inline]
    pub fn flat_indices(&self) -> &[VertexIndex] {
        bytemuck::cast_slice(self.index.data())
    }

    /// Tells every attribute that the host renderer uploaded its current content.
    pub fn mark_uploaded(&mut self) {
        self.position.mark_uploaded();
        self.previous.mark_uploaded();
        self.next.mark_uploaded();
        self.side.mark_uploaded();
        self.width.mark_uploaded();
        self.uv.mark_uploaded();
        self.counters.mark_uploaded();
        self.index.mark_uploaded();
    }

    /// All the vertex attributes interleaved, one [`RibbonVertex`] per vertex.
    pub fn interleaved(&self) -> Vec<RibbonVertex> {
        (0..self.vertex_count())
            .map(|i| RibbonVertex {
                position: self.position.data()[i].into(),
                previous: self.previous.data()[i].into(),
                next: self.next.data()[i].into(),
                side: self.side.data()[i],
                width: self.width.data()[i],
                counter: self.counters.data()[i],
                uv: self.uv.data()[i].into(),
            })
            .collect()
    }

    /// A bounding sphere of the vertex positions, or `None` if the ribbon is empty.
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        *self
            .bounding_sphere
            .get_or_init(|| BoundingSphere::from_points(self.position.data()))
    }

    /// The bounding box of the vertex positions, or `None` if the ribbon is empty.
    pub fn bounding_box(&self) -> Option<Aabb> {
        *self
            .bounding_box
            .get_or_init(|| Aabb::from_points(self.position.data()))
    }

    /// A read-only view of the buffers needed for picking.
    pub fn view(&self) -> RibbonView<'_> {
        let mut view = RibbonView::new(self.position.data())
            .with_widths(self.width.data())
            .with_indices(self.flat_indices());
        view.bounding_sphere = self.bounding_sphere();
        view
    }
}
