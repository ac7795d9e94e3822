//! City territories on a hex tile grid: founding, tile-by-tile growth, and the
//! pixel-space border of each city's claimed area.

#![forbid(unsafe_code)]

pub mod border;
mod city;
mod config;
pub mod grid;
mod manager;

pub use crate::border::{aggregate, deduplicate, edges_of_tile};
pub use crate::city::*;
pub use crate::config::*;
pub use crate::grid::{GridError, HexLayout, OccupancyCell, OccupancyGrid, OffsetCoord};
pub use crate::manager::*;
pub use hexterra_protocol::{
    CityId, CitySnapshot, Hex, PixelPoint, PlayerId, Segment, SegmentKey, TileTypeId,
};
