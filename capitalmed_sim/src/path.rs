// Path planning from the main gate to a building entrance.
//
// The campus has no general road graph. Every route follows the fixed trunk
// road from its first point, then turns perpendicular onto a spur that ends
// at the building's entrance. Planning is therefore a lookup, not a search:
//
//   1. entrance = footprint centre `(x + w/2, z + d/2)`.
//   2. turn-off = the trunk point whose Z is closest to the entrance Z. Ties
//      go to the first such point (lowest index), matching what the map has
//      always done.
//   3. path = trunk[0..=turn-off], then `(entrance.x, trunk[turn-off].z)`,
//      then the entrance.
//
// The result always has at least 3 points. When the entrance lies on the
// trunk axis the turn point duplicates the last trunk point; the walk
// simulator treats the zero-length segment as instantly complete.
//
// See also: `walk.rs` which consumes the waypoint list, `config.rs` for the
// trunk road skeleton.

use crate::catalog::Building;
use crate::types::Point2;

/// The fixed trunk road every route branches from.
#[derive(Clone, Debug, PartialEq)]
pub struct TrunkRoad<'a> {
    points: &'a [Point2],
}

impl<'a> TrunkRoad<'a> {
    /// Wrap a road skeleton. Returns `None` for an empty list, which cannot
    /// anchor any route.
    pub fn new(points: &'a [Point2]) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn points(&self) -> &'a [Point2] {
        self.points
    }

    /// Index of the trunk point whose Z is closest to `z`. First-found wins
    /// on ties.
    pub fn closest_index_by_z(&self, z: f32) -> usize {
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (i, p) in self.points.iter().enumerate() {
            let dist = (p.z - z).abs();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }
}

/// Where a route to `building` ends.
pub fn entrance_point(building: &Building) -> Point2 {
    building.center()
}

/// Plan the waypoint list from the trunk road's first point to the entrance
/// of `building`.
pub fn find_path_to(building: &Building, road: &TrunkRoad<'_>) -> Vec<Point2> {
    let entrance = entrance_point(building);
    let turnoff = road.closest_index_by_z(entrance.z);
    let trunk = &road.points()[..=turnoff];

    let mut path = Vec::with_capacity(trunk.len() + 2);
    path.extend_from_slice(trunk);
    path.push(Point2::new(entrance.x, trunk[turnoff].z));
    path.push(entrance);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::CampusConfig;
    use crate::types::BuildingId;

    fn default_road(config: &CampusConfig) -> TrunkRoad<'_> {
        TrunkRoad::new(&config.trunk_road).unwrap()
    }

    #[test]
    fn every_building_path_ends_at_entrance() {
        let config = CampusConfig::default();
        let road = default_road(&config);
        for b in Catalog::capitalmed().list_buildings() {
            let path = find_path_to(b, &road);
            assert!(path.len() >= 3, "{} has a short path", b.id);
            assert_eq!(*path.last().unwrap(), entrance_point(b));
            assert_eq!(path[0], config.trunk_road[0]);
        }
    }

    #[test]
    fn u_shaped_phase_one_route() {
        let config = CampusConfig::default();
        let road = default_road(&config);
        let catalog = Catalog::capitalmed();
        let b = catalog.find_building(BuildingId(2)).unwrap();
        assert_eq!((b.width, b.depth, b.floors), (22.0, 16.0, 5));

        let path = find_path_to(b, &road);
        // Entrance (-19, 12) sits exactly on trunk point 4 (z = 12).
        assert_eq!(path[0], Point2::new(0.0, 42.0));
        assert_eq!(path.len(), 7);
        assert_eq!(path[4], Point2::new(0.0, 12.0));
        assert_eq!(path[5], Point2::new(-19.0, 12.0));
        assert_eq!(path[6], Point2::new(b.origin.x + 11.0, b.origin.z + 8.0));
    }

    #[test]
    fn intermediate_points_stay_on_trunk_axis() {
        let config = CampusConfig::default();
        let road = default_road(&config);
        for b in Catalog::capitalmed().list_buildings() {
            let path = find_path_to(b, &road);
            for p in &path[..path.len() - 2] {
                assert_eq!(p.x, 0.0);
            }
            // The turn point shares Z with the last trunk point.
            let n = path.len();
            assert_eq!(path[n - 2].z, path[n - 3].z);
            assert_eq!(path[n - 2].x, path[n - 1].x);
        }
    }

    #[test]
    fn ties_go_to_first_found() {
        let points = [
            Point2::new(0.0, 10.0),
            Point2::new(0.0, 0.0),
            Point2::new(0.0, -10.0),
        ];
        let road = TrunkRoad::new(&points).unwrap();
        // z = 5 is equidistant from 10 and 0.
        assert_eq!(road.closest_index_by_z(5.0), 0);
        assert_eq!(road.closest_index_by_z(-5.0), 1);
    }

    #[test]
    fn single_point_road_still_plans() {
        let points = [Point2::new(0.0, 0.0)];
        let road = TrunkRoad::new(&points).unwrap();
        let catalog = Catalog::capitalmed();
        let b = catalog.find_building(BuildingId(11)).unwrap();
        let path = find_path_to(b, &road);
        assert_eq!(path, vec![
            Point2::new(0.0, 0.0),
            Point2::new(22.0, 0.0),
            Point2::new(22.0, 4.0),
        ]);
    }

    #[test]
    fn empty_road_is_rejected() {
        assert!(TrunkRoad::new(&[]).is_none());
    }
}
