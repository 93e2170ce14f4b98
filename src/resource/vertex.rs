//! Vertex and index formats shared with the host renderer.

use bytemuck::{Pod, Zeroable};

/// The type used for vertex indices.
pub type VertexIndex = u32;

/// All the attributes of a single ribbon vertex, interleaved for single-buffer upload.
///
/// `position` is the centerline point itself: the lateral offset is applied by the vertex
/// shader from `previous`, `next`, `side` and `width`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RibbonVertex {
    /// The centerline point this vertex is a copy of.
    pub position: [f32; 3],
    /// The preceding centerline point.
    pub previous: [f32; 3],
    /// The following centerline point.
    pub next: [f32; 3],
    /// `+1` for the left copy, `-1` for the right copy.
    pub side: f32,
    /// Width multiplier from the width profile.
    pub width: f32,
    /// Normalized position along the ribbon, used for dashes and visibility.
    pub counter: f32,
    /// `(t, 0)` on the left copy, `(t, 1)` on the right copy.
    pub uv: [f32; 2],
}

/// Describes where one named attribute lives inside a [`RibbonVertex`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttributeLayout {
    /// Attribute name, as consumed by the ribbon shader.
    pub name: &'static str,
    /// Byte offset from the start of the vertex.
    pub offset: usize,
    /// Number of `f32` components.
    pub components: usize,
}

impl RibbonVertex {
    /// The byte stride between two consecutive vertices.
    pub const STRIDE: usize = std::mem::size_of::<RibbonVertex>();

    /// Layout of every attribute of the interleaved vertex.
    pub const LAYOUT: [VertexAttributeLayout; 7] = [
        VertexAttributeLayout {
            name: "position",
            offset: 0,
            components: 3,
        },
        VertexAttributeLayout {
            name: "previous",
            offset: 12,
            components: 3,
        },
        VertexAttributeLayout {
            name: "next",
            offset: 24,
            components: 3,
        },
        VertexAttributeLayout {
            name: "side",
            offset: 36,
            components: 1,
        },
        VertexAttributeLayout {
            name: "width",
            offset: 40,
            components: 1,
        },
        VertexAttributeLayout {
            name: "counters",
            offset: 44,
            components: 1,
        },
        VertexAttributeLayout {
            name: "uv",
            offset: 48,
            components: 2,
        },
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        assert_eq!(RibbonVertex::STRIDE, 56);

        let last = RibbonVertex::LAYOUT[RibbonVertex::LAYOUT.len() - 1];
        assert_eq!(last.offset + last.components * 4, RibbonVertex::STRIDE);

        for pair in RibbonVertex::LAYOUT.windows(2) {
            assert_eq!(pair[0].offset + pair[0].components * 4, pair[1].offset);
        }
    }

    #[test]
    fn test_vertex_is_castable() {
        let v = RibbonVertex {
            side: -1.0,
            ..Default::default()
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats.len(), 14);
        assert_eq!(floats[9], -1.0);
    }
}
