//! Grid geometry: flat tile maps, offset/cube conversion, pixel layout and the
//! occupancy grid of city centers.
//!
//! Maps use pointy-top hexes in odd-r offset layout: odd rows are shoved right by
//! half a tile. Cell `(col, row)` is cube `(col - (row - (row & 1)) / 2, row)`.

use hexterra_protocol::{CityId, Hex, PixelPoint, TileTypeId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("tile map has {actual} entries, expected {rows} x {columns}")]
    SizeMismatch {
        rows: u32,
        columns: u32,
        actual: usize,
    },
}

/// Column/row address of a cell in the 2D tile map.
///
/// Components are `i64` so converting any `Hex` cannot overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OffsetCoord {
    pub col: i64,
    pub row: i64,
}

impl OffsetCoord {
    #[inline]
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    pub fn from_hex(hex: Hex) -> Self {
        let (q, r) = (i64::from(hex.q), i64::from(hex.r));
        Self {
            col: q + (r - (r & 1)) / 2,
            row: r,
        }
    }

    /// `None` if the cube coordinate does not fit in `i32`.
    pub fn to_hex(self) -> Option<Hex> {
        let q = self.col - (self.row - (self.row & 1)) / 2;
        Some(Hex::new(i32::try_from(q).ok()?, i32::try_from(self.row).ok()?))
    }
}

/// Splits a row-major flat map into rows.
pub fn to_rows<T: Clone>(flat: &[T], rows: u32, columns: u32) -> Result<Vec<Vec<T>>, GridError> {
    let expected = rows as usize * columns as usize;
    if flat.len() != expected {
        return Err(GridError::SizeMismatch {
            rows,
            columns,
            actual: flat.len(),
        });
    }
    if columns == 0 {
        return Ok(vec![Vec::new(); rows as usize]);
    }
    Ok(flat
        .chunks(columns as usize)
        .map(|row| row.to_vec())
        .collect())
}

/// Pixel dimensions of one tile; maps cube coordinates to tile centers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexLayout {
    pub tile_width: f32,
    pub tile_height: f32,
}

impl HexLayout {
    pub const fn new(tile_width: f32, tile_height: f32) -> Self {
        Self {
            tile_width,
            tile_height,
        }
    }

    /// Pixel center of `hex`, relative to the center of cell (0, 0).
    ///
    /// Rows are `3/4` of a tile height apart so neighboring hexes share exact edges.
    pub fn to_pixel(&self, hex: Hex) -> PixelPoint {
        let offset = OffsetCoord::from_hex(hex);
        let shove = if offset.row & 1 == 1 {
            self.tile_width / 2.0
        } else {
            0.0
        };
        PixelPoint::new(
            offset.col as f32 * self.tile_width + shove,
            offset.row as f32 * (self.tile_height * 3.0 / 4.0),
        )
    }
}

/// One cell of the occupancy grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OccupancyCell {
    Empty,
    Unbuildable,
    City(CityId),
}

impl OccupancyCell {
    pub fn is_empty(self) -> bool {
        matches!(self, OccupancyCell::Empty)
    }
}

impl std::fmt::Display for OccupancyCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OccupancyCell::Empty => write!(f, "0"),
            OccupancyCell::Unbuildable => write!(f, "-1"),
            OccupancyCell::City(id) => write!(f, "{id}"),
        }
    }
}

/// Occupancy of city centers, one row per map row.
///
/// Unbuildable cells are fixed at construction. Only city centers are ever
/// written; grown tiles live on the city itself.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    rows: u32,
    columns: u32,
    cells: Vec<Vec<OccupancyCell>>,
}

impl OccupancyGrid {
    pub fn new(
        map: &[TileTypeId],
        rows: u32,
        columns: u32,
        impassable: &[TileTypeId],
    ) -> Result<Self, GridError> {
        let classified: Vec<OccupancyCell> = map
            .iter()
            .map(|tile| {
                if impassable.contains(tile) {
                    OccupancyCell::Unbuildable
                } else {
                    OccupancyCell::Empty
                }
            })
            .collect();
        Ok(Self {
            rows,
            columns,
            cells: to_rows(&classified, rows, columns)?,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// `(row, col)` of `hex`, or `None` off-grid.
    fn cell_of(&self, hex: Hex) -> Option<(usize, usize)> {
        let OffsetCoord { col, row } = OffsetCoord::from_hex(hex);
        if row < 0 || row >= i64::from(self.rows) || col < 0 || col >= i64::from(self.columns) {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// Row-major index of `hex` in the flat tile map.
    pub fn index_of(&self, hex: Hex) -> Option<usize> {
        let (row, col) = self.cell_of(hex)?;
        Some(row * self.columns as usize + col)
    }

    pub fn hex_at_index(&self, index: usize) -> Option<Hex> {
        if index >= self.rows as usize * self.columns as usize {
            return None;
        }
        let col = (index % self.columns as usize) as i64;
        let row = (index / self.columns as usize) as i64;
        OffsetCoord::new(col, row).to_hex()
    }

    pub fn get(&self, hex: Hex) -> Option<OccupancyCell> {
        let (row, col) = self.cell_of(hex)?;
        Some(self.cells[row][col])
    }

    /// Writes `cell` at `hex`, returning the previous value, or `None` off-grid.
    pub fn set(&mut self, hex: Hex, cell: OccupancyCell) -> Option<OccupancyCell> {
        let (row, col) = self.cell_of(hex)?;
        Some(std::mem::replace(&mut self.cells[row][col], cell))
    }

    pub fn cell_rows(&self) -> &[Vec<OccupancyCell>] {
        &self.cells
    }

    /// Whitespace-joined rows, newline-separated, no trailing newline.
    pub fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_and_cube_conversion_agree() {
        for row in -3..4 {
            for col in -3..4 {
                let offset = OffsetCoord::new(col, row);
                assert_eq!(OffsetCoord::from_hex(offset.to_hex().unwrap()), offset);
            }
        }
        assert_eq!(OffsetCoord::new(0, 1).to_hex(), Some(Hex::new(0, 1)));
        assert_eq!(OffsetCoord::new(1, 1).to_hex(), Some(Hex::new(1, 1)));
        assert_eq!(OffsetCoord::new(0, 2).to_hex(), Some(Hex::new(-1, 2)));
    }

    #[test]
    fn extreme_hexes_convert_without_overflow() {
        let far = Hex::new(i32::MAX, i32::MAX);
        let offset = OffsetCoord::from_hex(far);
        assert_eq!(offset.row, i64::from(i32::MAX));
        assert_eq!(offset.to_hex(), Some(far));
        assert_eq!(OffsetCoord::new(i64::MAX / 2, 0).to_hex(), None);

        let grid = OccupancyGrid::new(&[0; 4], 2, 2, &[]).unwrap();
        assert_eq!(grid.get(far), None);
        assert_eq!(grid.get(Hex::new(i32::MIN, i32::MIN)), None);
    }

    #[test]
    fn grid_stores_one_row_per_map_row() {
        let grid = OccupancyGrid::new(&[0, 0, 0, 3, 3, 3], 2, 3, &[3]).unwrap();
        assert_eq!(grid.cell_rows().len(), 2);
        assert_eq!(grid.cell_rows()[1], vec![OccupancyCell::Unbuildable; 3]);
        assert!(matches!(
            OccupancyGrid::new(&[0; 5], 2, 3, &[]),
            Err(GridError::SizeMismatch { actual: 5, .. })
        ));
    }

    #[test]
    fn to_rows_splits_row_major() {
        let rows = to_rows(&[1, 2, 3, 4, 5, 6], 2, 3).unwrap();
        assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert!(matches!(
            to_rows(&[1, 2, 3], 2, 2),
            Err(GridError::SizeMismatch { actual: 3, .. })
        ));
    }

    #[test]
    fn layout_places_neighbors_on_shared_edges() {
        let layout = HexLayout::new(34.0, 32.0);
        assert_eq!(layout.to_pixel(Hex::new(0, 0)), PixelPoint::new(0.0, 0.0));
        assert_eq!(layout.to_pixel(Hex::new(1, 0)), PixelPoint::new(34.0, 0.0));
        assert_eq!(layout.to_pixel(Hex::new(0, 1)), PixelPoint::new(17.0, 24.0));
        assert_eq!(layout.to_pixel(Hex::new(1, 1)), PixelPoint::new(51.0, 24.0));
    }

    #[test]
    fn impassable_tiles_become_unbuildable() {
        let grid = OccupancyGrid::new(&[0, 7, 0, 7], 2, 2, &[7]).unwrap();
        assert_eq!(grid.get(Hex::new(0, 0)), Some(OccupancyCell::Empty));
        assert_eq!(grid.get(Hex::new(1, 0)), Some(OccupancyCell::Unbuildable));
        assert_eq!(grid.render(), "0 -1\n0 -1");
    }

    #[test]
    fn off_grid_positions_are_rejected() {
        let mut grid = OccupancyGrid::new(&[0; 6], 2, 3, &[]).unwrap();
        assert_eq!(grid.get(Hex::new(-1, 0)), None);
        assert_eq!(grid.get(Hex::new(0, 2)), None);
        assert_eq!(grid.set(Hex::new(3, 0), OccupancyCell::City(CityId(1))), None);
        assert_eq!(grid.hex_at_index(6), None);
    }

    #[test]
    fn set_writes_one_cell_and_returns_previous() {
        let mut grid = OccupancyGrid::new(&[0; 16], 4, 4, &[]).unwrap();
        let hex = grid.hex_at_index(6).unwrap();
        assert_eq!(grid.index_of(hex), Some(6));
        assert_eq!(
            grid.set(hex, OccupancyCell::City(CityId(2))),
            Some(OccupancyCell::Empty)
        );
        assert_eq!(grid.render(), "0 0 0 0\n0 0 2 0\n0 0 0 0\n0 0 0 0");
    }
}
