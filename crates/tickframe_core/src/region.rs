//! # Region Map
//!
//! The map is partitioned into convex polygonal regions. Each boundary edge
//! either touches a neighbouring region or is solid wall.
//!
//! ```text
//!        v3 ──────── v2
//!        │    e2     │
//!     e3 │  region   │ e1        vertices wind counter-clockwise,
//!        │    e0     │           edge i runs v[i] -> v[i+1]
//!        v0 ──────── v1
//! ```
//!
//! Besides geometry, every region carries the head of its object list and
//! the renderer's "visible this frame" flag.

use crate::ids::{EdgeIndex, ObjectSlotId, RegionId};
use crate::units::{WorldDistance, WorldPoint2d};

/// One convex region.
#[derive(Clone, Debug)]
pub struct Region {
    /// Boundary vertices, counter-clockwise.
    vertices: Vec<WorldPoint2d>,
    /// Neighbour across each edge. `None` is solid wall.
    adjacent: Vec<Option<RegionId>>,
    /// Head of this region's object list.
    pub first_object: Option<ObjectSlotId>,
    /// Set by the renderer for regions it drew this frame.
    pub visible: bool,
}

impl Region {
    /// Boundary vertices, counter-clockwise.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[WorldPoint2d] {
        &self.vertices
    }

    /// Number of boundary edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.vertices.len()
    }

    /// Endpoints of edge `edge`.
    fn edge(&self, edge: usize) -> (WorldPoint2d, WorldPoint2d) {
        let next = (edge + 1) % self.vertices.len();
        (self.vertices[edge], self.vertices[next])
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: WorldPoint2d) -> bool {
        (0..self.edge_count()).all(|edge| {
            let (a, b) = self.edge(edge);
            side_of(a, b, point) >= 0
        })
    }
}

/// Twice the signed area of `(a, b, p)`.
///
/// Positive when `p` is left of `a -> b`, i.e. inside a counter-clockwise
/// region.
#[inline]
fn side_of(a: WorldPoint2d, b: WorldPoint2d, p: WorldPoint2d) -> i64 {
    let (ax, ay) = (i64::from(a.x), i64::from(a.y));
    let (bx, by) = (i64::from(b.x), i64::from(b.y));
    let (px, py) = (i64::from(p.x), i64::from(p.y));
    (bx - ax) * (py - ay) - (by - ay) * (px - ax)
}

/// The region table of a loaded map.
#[derive(Clone, Debug, Default)]
pub struct RegionMap {
    regions: Vec<Region>,
}

impl RegionMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a `columns` x `rows` grid of square regions, all connected to
    /// their orthogonal neighbours. Region `(c, r)` has id `r * columns + c`
    /// and spans `[c * cell, (c + 1) * cell] x [r * cell, (r + 1) * cell]`.
    ///
    /// # Panics
    ///
    /// Panics if the grid is empty, does not fit in world coordinates, or has
    /// more cells than a [`RegionId`] can address.
    #[must_use]
    pub fn grid(columns: u16, rows: u16, cell: WorldDistance) -> Self {
        assert!(columns > 0 && rows > 0, "Grid must have at least one cell");
        assert!(cell > 0, "Cell size must be positive");
        let limit = i32::from(i16::MAX);
        assert!(
            i32::from(columns) * i32::from(cell) <= limit && i32::from(rows) * i32::from(cell) <= limit,
            "Grid does not fit in world coordinates"
        );

        let cells = usize::from(columns) * usize::from(rows);
        assert!(cells <= usize::from(u16::MAX), "Too many regions");

        let id = |c: u16, r: u16| {
            let index = usize::from(r) * usize::from(columns) + usize::from(c);
            match u16::try_from(index) {
                Ok(index) => RegionId::new(index),
                Err(_) => panic!("Too many regions"),
            }
        };
        let mut map = Self::new();

        for r in 0..rows {
            for c in 0..columns {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let (x0, y0) = (c as i16 * cell, r as i16 * cell);
                let (x1, y1) = (x0 + cell, y0 + cell);

                let region = map.add_region(vec![
                    WorldPoint2d::new(x0, y0),
                    WorldPoint2d::new(x1, y0),
                    WorldPoint2d::new(x1, y1),
                    WorldPoint2d::new(x0, y1),
                ]);
                debug_assert_eq!(region, id(c, r));

                let neighbours = [
                    (r > 0).then(|| id(c, r - 1)),
                    (c + 1 < columns).then(|| id(c + 1, r)),
                    (r + 1 < rows).then(|| id(c, r + 1)),
                    (c > 0).then(|| id(c - 1, r)),
                ];
                map.regions[region.index()].adjacent = neighbours.to_vec();
            }
        }

        map
    }

    /// Adds a region with the given counter-clockwise boundary.
    /// All edges start out as solid wall.
    ///
    /// # Panics
    ///
    /// Panics if fewer than three vertices are given.
    pub fn add_region(&mut self, vertices: Vec<WorldPoint2d>) -> RegionId {
        assert!(vertices.len() >= 3, "A region needs at least three vertices");
        assert!(self.regions.len() < usize::from(u16::MAX), "Too many regions");

        #[allow(clippy::cast_possible_truncation)]
        let id = RegionId::new(self.regions.len() as u16);
        let edges = vertices.len();
        self.regions.push(Region {
            vertices,
            adjacent: vec![None; edges],
            first_object: None,
            visible: false,
        });
        id
    }

    /// Makes `a` and `b` neighbours across the given edges.
    ///
    /// # Panics
    ///
    /// Panics if either region or edge does not exist.
    pub fn connect(&mut self, a: RegionId, edge_a: EdgeIndex, b: RegionId, edge_b: EdgeIndex) {
        self.regions[a.index()].adjacent[edge_a.index()] = Some(b);
        self.regions[b.index()].adjacent[edge_b.index()] = Some(a);
    }

    /// Number of regions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the map has no regions.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Gets a region.
    #[inline]
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    /// Gets a region mutably.
    #[inline]
    pub fn region_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(id.index())
    }

    /// Sets the visibility flag of every region.
    pub fn set_all_visible(&mut self, visible: bool) {
        for region in &mut self.regions {
            region.visible = visible;
        }
    }

    /// Finds the edge of `region` that the segment `p0 -> p1` crosses on its
    /// way out, if any.
    ///
    /// An edge counts when `p0` is on or inside it, `p1` is strictly outside
    /// it, and the crossing point lies within the edge's extent.
    #[must_use]
    pub fn find_edge_crossed_leaving(
        &self,
        region: RegionId,
        p0: WorldPoint2d,
        p1: WorldPoint2d,
    ) -> Option<EdgeIndex> {
        let region = self.region(region)?;

        (0..region.edge_count())
            .find(|&edge| {
                let (a, b) = region.edge(edge);
                if side_of(a, b, p0) < 0 || side_of(a, b, p1) >= 0 {
                    return false;
                }
                let sa = side_of(p0, p1, a);
                let sb = side_of(p0, p1, b);
                (sa <= 0 && sb >= 0) || (sa >= 0 && sb <= 0)
            })
            .map(|edge| {
                #[allow(clippy::cast_possible_truncation)]
                let edge = edge as u16;
                EdgeIndex::new(edge)
            })
    }

    /// The region across `edge` of `region`. `None` for solid wall.
    #[must_use]
    pub fn adjacent_region(&self, region: RegionId, edge: EdgeIndex) -> Option<RegionId> {
        *self.region(region)?.adjacent.get(edge.index())?
    }

    /// Finds the first region containing `point`.
    #[must_use]
    pub fn region_containing(&self, point: WorldPoint2d) -> Option<RegionId> {
        self.regions.iter().position(|region| region.contains(point)).map(|index| {
            #[allow(clippy::cast_possible_truncation)]
            let index = index as u16;
            RegionId::new(index)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i16, y: i16) -> WorldPoint2d {
        WorldPoint2d::new(x, y)
    }

    #[test]
    #[should_panic(expected = "Too many regions")]
    fn test_grid_rejects_more_cells_than_region_ids() {
        // 300 * 300 cells overflows a u16 index part way through the grid.
        let _ = RegionMap::grid(300, 300, 1);
    }

    #[test]
    fn test_grid_layout() {
        let map = RegionMap::grid(3, 2, 100);
        assert_eq!(map.len(), 6);

        assert_eq!(map.region_containing(p(50, 50)), Some(RegionId::new(0)));
        assert_eq!(map.region_containing(p(250, 150)), Some(RegionId::new(5)));
        assert_eq!(map.region_containing(p(301, 50)), None);
        assert_eq!(map.region_containing(p(-1, 50)), None);
    }

    #[test]
    fn test_grid_adjacency() {
        let map = RegionMap::grid(3, 2, 100);
        let r0 = RegionId::new(0);

        assert_eq!(map.adjacent_region(r0, EdgeIndex::new(0)), None);
        assert_eq!(map.adjacent_region(r0, EdgeIndex::new(1)), Some(RegionId::new(1)));
        assert_eq!(map.adjacent_region(r0, EdgeIndex::new(2)), Some(RegionId::new(3)));
        assert_eq!(map.adjacent_region(r0, EdgeIndex::new(3)), None);

        let r4 = RegionId::new(4);
        assert_eq!(map.adjacent_region(r4, EdgeIndex::new(0)), Some(RegionId::new(1)));
        assert_eq!(map.adjacent_region(r4, EdgeIndex::new(3)), Some(RegionId::new(3)));
    }

    #[test]
    fn test_edge_crossed_leaving() {
        let map = RegionMap::grid(2, 1, 100);
        let r0 = RegionId::new(0);

        // Heading east through the right edge.
        assert_eq!(
            map.find_edge_crossed_leaving(r0, p(50, 50), p(150, 50)),
            Some(EdgeIndex::new(1))
        );
        // Heading south through the bottom edge (wall).
        assert_eq!(
            map.find_edge_crossed_leaving(r0, p(50, 50), p(50, -10)),
            Some(EdgeIndex::new(0))
        );
        // Staying inside.
        assert_eq!(map.find_edge_crossed_leaving(r0, p(10, 10), p(90, 90)), None);
        // Ending exactly on the boundary is not leaving.
        assert_eq!(map.find_edge_crossed_leaving(r0, p(50, 50), p(100, 50)), None);
    }

    #[test]
    fn test_entering_is_not_leaving() {
        let map = RegionMap::grid(2, 1, 100);
        let r1 = RegionId::new(1);

        // From region 0 into region 1: no edge of region 1 is left.
        assert_eq!(map.find_edge_crossed_leaving(r1, p(50, 50), p(150, 50)), None);
    }

    #[test]
    fn test_custom_regions_connect() {
        let mut map = RegionMap::new();
        let a = map.add_region(vec![p(0, 0), p(10, 0), p(0, 10)]);
        let b = map.add_region(vec![p(10, 0), p(10, 10), p(0, 10)]);
        map.connect(a, EdgeIndex::new(1), b, EdgeIndex::new(2));

        assert_eq!(map.adjacent_region(a, EdgeIndex::new(1)), Some(b));
        assert_eq!(map.adjacent_region(b, EdgeIndex::new(2)), Some(a));
        assert_eq!(map.adjacent_region(b, EdgeIndex::new(1)), None);
        assert_eq!(map.find_edge_crossed_leaving(a, p(2, 2), p(9, 9)), Some(EdgeIndex::new(1)));
    }

    #[test]
    fn test_visibility_flags() {
        let mut map = RegionMap::grid(2, 2, 10);
        assert!(!map.region(RegionId::new(3)).unwrap().visible);

        map.set_all_visible(true);
        assert!(map.region(RegionId::new(3)).unwrap().visible);

        map.region_mut(RegionId::new(3)).unwrap().visible = false;
        assert!(!map.region(RegionId::new(3)).unwrap().visible);
    }

    #[test]
    #[should_panic(expected = "at least three vertices")]
    fn test_degenerate_region_panics() {
        let mut map = RegionMap::new();
        let _ = map.add_region(vec![p(0, 0), p(1, 1)]);
    }
}
