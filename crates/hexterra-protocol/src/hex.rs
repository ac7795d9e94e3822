use serde::{Deserialize, Serialize};

/// Cube coordinates for a hex grid, stored as axial (q, r). The third component is
/// `s = -q - r`, so `q + r + s == 0` holds by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex { q: 0, r: 0 };

    /// Unit offsets in fixed order: NE, E, SE, SW, W, NW.
    pub const DIRECTIONS: [Hex; 6] = [
        Hex { q: 1, r: -1 }, // Northeast
        Hex { q: 1, r: 0 },  // East
        Hex { q: 0, r: 1 },  // Southeast
        Hex { q: -1, r: 1 }, // Southwest
        Hex { q: -1, r: 0 }, // West
        Hex { q: 0, r: -1 }, // Northwest
    ];

    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Builds a hex from all three cube components, rejecting `q + r + s != 0`.
    pub fn from_cube(q: i32, r: i32, s: i32) -> Option<Self> {
        if i64::from(q) + i64::from(r) + i64::from(s) != 0 {
            return None;
        }
        Some(Self { q, r })
    }

    /// Wraps when `q + r` falls outside `i32`.
    #[inline]
    pub const fn s(self) -> i32 {
        self.q.wrapping_add(self.r).wrapping_neg()
    }

    #[inline]
    pub const fn cube(self) -> (i32, i32, i32) {
        (self.q, self.r, self.s())
    }

    pub fn neighbors(self) -> impl Iterator<Item = Hex> {
        Self::DIRECTIONS.into_iter().map(move |d| self + d)
    }

    /// True iff `other - self` is one of the six unit directions.
    pub fn is_neighbor(self, other: Hex) -> bool {
        let (Some(q), Some(r)) = (other.q.checked_sub(self.q), other.r.checked_sub(self.r)) else {
            return false;
        };
        Self::DIRECTIONS.contains(&Hex { q, r })
    }

    /// Hex distance, saturating at `i32::MAX` for coordinates far apart.
    #[inline]
    pub fn distance(self, other: Hex) -> i32 {
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        let ds = -dq - dr;
        i32::try_from((dq.abs() + dr.abs() + ds.abs()) / 2).unwrap_or(i32::MAX)
    }
}

impl std::ops::Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex {
            q: self.q + other.q,
            r: self.r + other.r,
        }
    }
}

impl std::ops::Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex {
            q: self.q - other.q,
            r: self.r - other.r,
        }
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = -i64::from(self.q) - i64::from(self.r);
        write!(f, "({}, {}, {})", self.q, self.r, s)
    }
}
