use serde::{Deserialize, Serialize};

use crate::{CityId, Hex, PixelPoint, PlayerId, Segment};

/// Plain-data view of one city, for persistence or transport collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CitySnapshot {
    pub id: CityId,
    pub player: PlayerId,
    pub name: String,
    pub position: Hex,
    pub position_pixel: PixelPoint,
    /// Owned tiles excluding the center, in insertion order.
    pub tiles: Vec<Hex>,
    /// Pixel centers, index-aligned with `tiles`.
    pub tiles_pixel: Vec<PixelPoint>,
    pub borders: Vec<Segment>,
}
