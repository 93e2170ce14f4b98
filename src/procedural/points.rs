use crate::error::{Result, RibbonError};
use glamx::Vec3;

/// The centerline of a ribbon, as supplied by the caller.
///
/// Both forms describe the same thing: an ordered list of 3D points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointSequence {
    /// One `Vec3` per point.
    Points(Vec<Vec3>),
    /// Packed `x, y, z` triples.
    Flat(Vec<f32>),
}

impl Default for PointSequence {
    fn default() -> Self {
        PointSequence::Points(Vec::new())
    }
}

impl PointSequence {
    /// The number of points described by this sequence.
    ///
    /// For a malformed flat sequence this counts only the complete triples.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            PointSequence::Points(pts) => pts.len(),
            PointSequence::Flat(coords) => coords.len() / 3,
        }
    }

    /// Is this sequence empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates the sequence and converts it to one `Vec3` per point.
    ///
    /// Fails with [`RibbonError::InvalidInput`] if a flat sequence does not contain a whole
    /// number of `x, y, z` triples.
    pub fn to_points(&self) -> Result<Vec<Vec3>> {
        match self {
            PointSequence::Points(pts) => Ok(pts.clone()),
            PointSequence::Flat(coords) => {
                if coords.len() % 3 != 0 {
                    return Err(RibbonError::InvalidInput(format!(
                        "flat coordinate list has {} values, which is not a multiple of 3",
                        coords.len()
                    )));
                }

                Ok(coords
                    .chunks_exact(3)
                    .map(|c| Vec3::new(c[0], c[1], c[2]))
                    .collect())
            }
        }
    }
}

impl From<Vec<Vec3>> for PointSequence {
    fn from(points: Vec<Vec3>) -> Self {
        PointSequence::Points(points)
    }
}

impl From<&[Vec3]> for PointSequence {
    fn from(points: &[Vec3]) -> Self {
        PointSequence::Points(points.to_vec())
    }
}

impl From<Vec<[f32; 3]>> for PointSequence {
    fn from(points: Vec<[f32; 3]>) -> Self {
        PointSequence::Points(points.into_iter().map(Vec3::from).collect())
    }
}

impl From<Vec<f32>> for PointSequence {
    fn from(coords: Vec<f32>) -> Self {
        PointSequence::Flat(coords)
    }
}

impl From<&[f32]> for PointSequence {
    fn from(coords: &[f32]) -> Self {
        PointSequence::Flat(coords.to_vec())
    }
}
