//! Border derivation: per-tile hex edges, per-city aggregation, and cancellation
//! of walls shared between cities of the same player.

use std::collections::{HashMap, HashSet};

use hexterra_protocol::{PixelPoint, Segment, SegmentKey};

use crate::city::City;

/// The six sides of the pointy-top hex centered at `center`.
///
/// Sides run clockwise starting from the north-west side: NW, NE, E, SE, SW, W.
/// Each side ends where the next one starts.
pub fn edges_of_tile(center: PixelPoint, width: f32, height: f32) -> [Segment; 6] {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let quarter_h = height / 4.0;
    let corners = [
        PixelPoint::new(center.x - half_w, center.y - quarter_h),
        PixelPoint::new(center.x, center.y - half_h),
        PixelPoint::new(center.x + half_w, center.y - quarter_h),
        PixelPoint::new(center.x + half_w, center.y + quarter_h),
        PixelPoint::new(center.x, center.y + half_h),
        PixelPoint::new(center.x - half_w, center.y + quarter_h),
    ];
    std::array::from_fn(|i| Segment::new(corners[i], corners[(i + 1) % 6]))
}

/// Symmetric difference over undirected segments.
///
/// A segment seen an even number of times cancels out; survivors keep the order
/// in which they first appeared.
pub fn cancel_pairs<I>(segments: I) -> Vec<Segment>
where
    I: IntoIterator<Item = Segment>,
{
    let mut first_seen = Vec::new();
    let mut counts: HashMap<SegmentKey, u32> = HashMap::new();
    for segment in segments {
        let count = counts.entry(segment.key()).or_insert(0);
        if *count == 0 {
            first_seen.push(segment);
        }
        *count += 1;
    }
    first_seen
        .into_iter()
        .filter(|segment| counts.get(&segment.key()).is_some_and(|c| c % 2 == 1))
        .collect()
}

/// Outer boundary of one city's owned region (center first, then grown tiles).
pub fn aggregate_tiles<'a, I>(tiles: I, width: f32, height: f32) -> Vec<Segment>
where
    I: IntoIterator<Item = &'a PixelPoint>,
{
    cancel_pairs(
        tiles
            .into_iter()
            .flat_map(|center| edges_of_tile(*center, width, height)),
    )
}

/// Recomputes `city.borders` from scratch and returns the new border.
pub fn aggregate(city: &mut City, width: f32, height: f32) -> &[Segment] {
    let borders = aggregate_tiles(
        std::iter::once(city.position_pixel()).chain(city.tiles_pixel()),
        width,
        height,
    );
    city.set_borders(borders);
    city.borders()
}

/// Cancels every edge shared by two cities of the set, removing it from both.
///
/// Pairs are visited in slice order; each pass rebuilds the two border lists
/// instead of removing in place. Cancellation is symmetric, so the visiting
/// order does not change the result.
pub fn deduplicate(cities: &mut [&mut City]) {
    for i in 0..cities.len() {
        let (head, tail) = cities.split_at_mut(i + 1);
        let current = &mut head[i];
        for other in tail.iter_mut() {
            let shared: HashSet<SegmentKey> = {
                let mine: HashSet<SegmentKey> =
                    current.borders().iter().map(Segment::key).collect();
                other
                    .borders()
                    .iter()
                    .map(Segment::key)
                    .filter(|key| mine.contains(key))
                    .collect()
            };
            if shared.is_empty() {
                continue;
            }
            let keep = |borders: &[Segment]| -> Vec<Segment> {
                borders
                    .iter()
                    .filter(|segment| !shared.contains(&segment.key()))
                    .copied()
                    .collect()
            };
            let current_kept = keep(current.borders());
            let other_kept = keep(other.borders());
            current.set_borders(current_kept);
            other.set_borders(other_kept);
        }
    }
}
