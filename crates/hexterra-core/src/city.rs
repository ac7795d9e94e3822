use hexterra_protocol::{CityId, CitySnapshot, Hex, PixelPoint, PlayerId, Segment};

/// A founding request: everything a city needs except its id.
#[derive(Clone, Debug)]
pub struct CitySeed {
    pub name: String,
    pub player: PlayerId,
    pub position: Hex,
    pub position_pixel: PixelPoint,
    /// Initial tiles, validated in order with the growth rules when founded.
    pub tiles: Vec<(Hex, PixelPoint)>,
}

impl CitySeed {
    pub fn new(
        name: impl Into<String>,
        player: PlayerId,
        position: Hex,
        position_pixel: PixelPoint,
    ) -> Self {
        Self {
            name: name.into(),
            player,
            position,
            position_pixel,
            tiles: Vec::new(),
        }
    }

    pub fn with_tile(mut self, tile: Hex, tile_pixel: PixelPoint) -> Self {
        self.tiles.push((tile, tile_pixel));
        self
    }
}

/// A registered city. Only the [`CityManager`](crate::CityManager) creates and
/// mutates these, which keeps `tiles` and `tiles_pixel` index-aligned.
#[derive(Clone, Debug)]
pub struct City {
    id: CityId,
    player: PlayerId,
    name: String,
    position: Hex,
    position_pixel: PixelPoint,
    tiles: Vec<Hex>,
    tiles_pixel: Vec<PixelPoint>,
    borders: Vec<Segment>,
}

impl City {
    /// Registers the center of `seed` under `id`. Initial tiles are not copied;
    /// the store replays them through growth validation.
    pub(crate) fn from_seed(id: CityId, seed: &CitySeed) -> Self {
        Self {
            id,
            player: seed.player,
            name: seed.name.clone(),
            position: seed.position,
            position_pixel: seed.position_pixel,
            tiles: Vec::with_capacity(seed.tiles.len()),
            tiles_pixel: Vec::with_capacity(seed.tiles.len()),
            borders: Vec::new(),
        }
    }

    pub fn id(&self) -> CityId {
        self.id
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Hex {
        self.position
    }

    pub fn position_pixel(&self) -> &PixelPoint {
        &self.position_pixel
    }

    /// Owned tiles excluding the center, in insertion order.
    pub fn tiles(&self) -> &[Hex] {
        &self.tiles
    }

    pub fn tiles_pixel(&self) -> &[PixelPoint] {
        &self.tiles_pixel
    }

    /// Border as of the last refresh; stale after any growth.
    pub fn borders(&self) -> &[Segment] {
        &self.borders
    }

    pub fn owns_tile(&self, tile: Hex) -> bool {
        self.position == tile || self.tiles.contains(&tile)
    }

    /// Center followed by every grown tile.
    pub fn all_tiles(&self) -> impl Iterator<Item = Hex> + '_ {
        std::iter::once(self.position).chain(self.tiles.iter().copied())
    }

    /// True if `tile` shares an edge with the center or any grown tile.
    pub fn touches(&self, tile: Hex) -> bool {
        self.all_tiles().any(|owned| owned.is_neighbor(tile))
    }

    pub fn snapshot(&self) -> CitySnapshot {
        CitySnapshot {
            id: self.id,
            player: self.player,
            name: self.name.clone(),
            position: self.position,
            position_pixel: self.position_pixel,
            tiles: self.tiles.clone(),
            tiles_pixel: self.tiles_pixel.clone(),
            borders: self.borders.clone(),
        }
    }

    pub(crate) fn push_tile(&mut self, tile: Hex, tile_pixel: PixelPoint) {
        self.tiles.push(tile);
        self.tiles_pixel.push(tile_pixel);
    }

    pub(crate) fn set_borders(&mut self, borders: Vec<Segment>) {
        self.borders = borders;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> City {
        let seed = CitySeed::new("Oldport", PlayerId(2), Hex::new(0, 0), PixelPoint::new(0.0, 0.0));
        let mut city = City::from_seed(CityId(4), &seed);
        city.push_tile(Hex::new(1, 0), PixelPoint::new(34.0, 0.0));
        city
    }

    #[test]
    fn from_seed_leaves_tiles_for_validation() {
        let seed = CitySeed::new("Oldport", PlayerId(2), Hex::new(0, 0), PixelPoint::new(0.0, 0.0))
            .with_tile(Hex::new(1, 0), PixelPoint::new(34.0, 0.0));
        let city = City::from_seed(CityId(4), &seed);
        assert_eq!(city.id(), CityId(4));
        assert_eq!(city.name(), "Oldport");
        assert!(city.tiles().is_empty());
        assert!(city.tiles_pixel().is_empty());
    }

    #[test]
    fn ownership_and_adjacency_include_center() {
        let city = city();
        assert!(city.owns_tile(Hex::new(0, 0)));
        assert!(city.owns_tile(Hex::new(1, 0)));
        assert!(!city.owns_tile(Hex::new(2, 0)));
        assert!(city.touches(Hex::new(2, 0)));
        assert!(city.touches(Hex::new(-1, 0)));
        assert!(!city.touches(Hex::new(3, 0)));
    }

    #[test]
    fn snapshot_copies_parallel_sequences() {
        let snapshot = city().snapshot();
        assert_eq!(snapshot.tiles.len(), snapshot.tiles_pixel.len());
        assert_eq!(snapshot.tiles_pixel[0], PixelPoint::new(34.0, 0.0));
        assert!(snapshot.borders.is_empty());
    }
}
