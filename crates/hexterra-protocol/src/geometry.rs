use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A point in pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Exact bit pattern of both components, with `-0.0` folded into `0.0`.
    #[inline]
    pub fn bits(self) -> (u32, u32) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

/// One side of a hex tile in pixel space.
///
/// Equality and hashing are undirected and exact: `(a, b) == (b, a)`, and two
/// endpoints match only if their float bit patterns match. All border geometry
/// is derived from the same tile-dimension arithmetic, so shared walls land on
/// identical values.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub start: PixelPoint,
    pub end: PixelPoint,
}

/// Direction-independent identity of a [`Segment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentKey([u32; 4]);

impl Segment {
    #[inline]
    pub const fn new(start: PixelPoint, end: PixelPoint) -> Self {
        Self { start, end }
    }

    pub fn key(&self) -> SegmentKey {
        let a = self.start.bits();
        let b = self.end.bits();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        SegmentKey([lo.0, lo.1, hi.0, hi.1])
    }

    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Segment {}

impl Hash for Segment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
