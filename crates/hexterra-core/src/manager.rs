//! City store: founding, growth validation, lookups and border refresh.
//!
//! The store is the single writer of city ids, borders and the occupancy grid.
//! It is owned by one game session and mutated from one thread.

use std::collections::BTreeMap;

use hexterra_protocol::{CityId, Hex, PixelPoint, PlayerId, TileTypeId};
use thiserror::Error;
use tracing::{debug, trace};

use crate::border;
use crate::city::{City, CitySeed};
use crate::config::{ConfigError, TerritoryConfig};
use crate::grid::{GridError, HexLayout, OccupancyCell, OccupancyGrid};

/// Errors when founding or growing a city
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CityError {
    #[error("city {0} does not exist")]
    UnknownCity(CityId),
    #[error("position {position} is outside the map")]
    OutOfBounds { position: Hex },
    #[error("position {position} is unbuildable")]
    Unbuildable { position: Hex },
    #[error("position {position} is already occupied by city {occupant}")]
    Occupied { position: Hex, occupant: CityId },
    #[error("tile {tile} is the center of city {city}")]
    CityCenter { city: CityId, tile: Hex },
    #[error("tile {tile} is already part of city {city}")]
    AlreadyOwned { city: CityId, tile: Hex },
    #[error("tile {tile} is not a neighbor of city {city}")]
    NotAdjacent { city: CityId, tile: Hex },
    #[error("tile {tile} is already part of city {other}")]
    ClaimedBySibling { tile: Hex, other: CityId },
}

/// Owns every city of one game session plus the occupancy grid of city centers.
#[derive(Clone, Debug)]
pub struct CityManager {
    cities: BTreeMap<CityId, City>,
    last_city_id: u32,
    grid: OccupancyGrid,
    layout: HexLayout,
}

impl CityManager {
    /// Builds a store over a row-major tile map. Cells whose tile type is listed in
    /// `impassable` are classified unbuildable once, here.
    pub fn new(
        map: &[TileTypeId],
        rows: u32,
        columns: u32,
        impassable: &[TileTypeId],
    ) -> Result<Self, GridError> {
        let config = TerritoryConfig::default();
        Ok(Self {
            cities: BTreeMap::new(),
            last_city_id: 0,
            grid: OccupancyGrid::new(map, rows, columns, impassable)?,
            layout: config.layout(),
        })
    }

    pub fn from_config(
        map: &[TileTypeId],
        rows: u32,
        columns: u32,
        config: &TerritoryConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut manager = Self::new(map, rows, columns, &config.impassable_tiles)?;
        manager.layout = config.layout();
        Ok(manager)
    }

    pub fn layout(&self) -> HexLayout {
        self.layout
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Founds a city on an empty cell and returns its new id.
    ///
    /// Initial tiles in `seed` go through the same checks as [`Self::add_city_tile`],
    /// in order. Any rejection leaves the store untouched.
    pub fn create_city(&mut self, seed: CitySeed) -> Result<CityId, CityError> {
        let position = seed.position;
        match self.grid.get(position) {
            None => {
                debug!("City {:?} rejected: {} is off the map", seed.name, position);
                return Err(CityError::OutOfBounds { position });
            }
            Some(OccupancyCell::Unbuildable) => {
                debug!("City {:?} rejected: {} is unbuildable", seed.name, position);
                return Err(CityError::Unbuildable { position });
            }
            Some(OccupancyCell::City(occupant)) => {
                debug!(
                    "City {:?} rejected: {} is occupied by city {}",
                    seed.name, position, occupant
                );
                return Err(CityError::Occupied { position, occupant });
            }
            Some(OccupancyCell::Empty) => {}
        }

        let id = CityId(self.last_city_id + 1);
        let mut city = City::from_seed(id, &seed);
        if let Some(other) = self.sibling_claiming(&city, position) {
            debug!(
                "City {:?} rejected: {} is already part of city {}",
                seed.name, position, other
            );
            return Err(CityError::ClaimedBySibling {
                tile: position,
                other,
            });
        }
        for &(tile, tile_pixel) in &seed.tiles {
            self.validate_growth(&city, tile)?;
            city.push_tile(tile, tile_pixel);
        }

        self.last_city_id = id.0;
        self.grid.set(position, OccupancyCell::City(id));
        debug!(
            "Founded city {} {:?} for {:?} at {} with {} tiles",
            id,
            city.name(),
            city.player(),
            position,
            city.tiles().len()
        );
        self.cities.insert(id, city);
        Ok(id)
    }

    /// Grows a city by one tile. Borders are not refreshed; call
    /// [`Self::create_city_borders`] afterwards.
    pub fn add_city_tile(
        &mut self,
        city_id: CityId,
        tile: Hex,
        tile_pixel: PixelPoint,
    ) -> Result<(), CityError> {
        let Some(city) = self.cities.get(&city_id) else {
            debug!("Tile {} rejected: city {} does not exist", tile, city_id);
            return Err(CityError::UnknownCity(city_id));
        };
        self.validate_growth(city, tile)?;
        self.cities
            .get_mut(&city_id)
            .ok_or(CityError::UnknownCity(city_id))?
            .push_tile(tile, tile_pixel);
        Ok(())
    }

    /// Like [`Self::add_city_tile`], with the pixel center taken from the store's layout.
    pub fn add_city_tile_at(&mut self, city_id: CityId, tile: Hex) -> Result<(), CityError> {
        let tile_pixel = self.layout.to_pixel(tile);
        self.add_city_tile(city_id, tile, tile_pixel)
    }

    pub fn get_city_by_id(&self, city_id: CityId) -> Option<&City> {
        self.cities.get(&city_id)
    }

    /// Cities of `player` in ascending id order.
    pub fn get_cities_of_player(&self, player: PlayerId) -> Vec<&City> {
        self.cities
            .values()
            .filter(|city| city.player() == player)
            .collect()
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// City whose center sits on `hex`.
    pub fn city_id_at(&self, hex: Hex) -> Option<CityId> {
        match self.grid.get(hex)? {
            OccupancyCell::City(id) => Some(id),
            _ => None,
        }
    }

    /// Every city claiming `hex`, as center or grown tile, in ascending id order.
    ///
    /// More than one entry means cities of different players overlap.
    pub fn owners_of_tile(&self, hex: Hex) -> Vec<CityId> {
        self.cities
            .values()
            .filter(|city| city.owns_tile(hex))
            .map(City::id)
            .collect()
    }

    /// Recomputes the border of every city of `player`, then cancels walls shared
    /// between those cities.
    pub fn create_city_borders(&mut self, player: PlayerId, tile_width: f32, tile_height: f32) {
        let mut cities: Vec<&mut City> = self
            .cities
            .values_mut()
            .filter(|city| city.player() == player)
            .collect();
        for city in cities.iter_mut() {
            border::aggregate(city, tile_width, tile_height);
        }
        border::deduplicate(&mut cities);
        trace!(
            "Refreshed borders for {:?}: {} cities, {} edges",
            player,
            cities.len(),
            cities.iter().map(|c| c.borders().len()).sum::<usize>()
        );
    }

    /// [`Self::create_city_borders`] with the store's configured tile size.
    pub fn refresh_borders(&mut self, player: PlayerId) {
        let HexLayout {
            tile_width,
            tile_height,
        } = self.layout;
        self.create_city_borders(player, tile_width, tile_height);
    }

    /// Occupancy grid rendered row by row.
    pub fn print(&self) -> String {
        self.grid.render()
    }

    fn validate_growth(&self, city: &City, tile: Hex) -> Result<(), CityError> {
        let id = city.id();
        if tile == city.position() {
            debug!("Tile {} rejected: center of city {}", tile, id);
            return Err(CityError::CityCenter { city: id, tile });
        }
        if city.tiles().contains(&tile) {
            debug!("Tile {} rejected: already part of city {}", tile, id);
            return Err(CityError::AlreadyOwned { city: id, tile });
        }
        if !city.touches(tile) {
            debug!("Tile {} rejected: not a neighbor of city {}", tile, id);
            return Err(CityError::NotAdjacent { city: id, tile });
        }
        // Only cities of the same player are checked; other players may overlap.
        if let Some(other) = self.sibling_claiming(city, tile) {
            debug!("Tile {} rejected: already part of city {}", tile, other);
            return Err(CityError::ClaimedBySibling { tile, other });
        }
        Ok(())
    }

    fn sibling_claiming(&self, city: &City, tile: Hex) -> Option<CityId> {
        self.cities
            .values()
            .filter(|other| other.player() == city.player() && other.id() != city.id())
            .find(|other| other.owns_tile(tile))
            .map(City::id)
    }
}
