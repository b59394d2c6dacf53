mod builder;
mod cell;
mod lattice;
mod surface;
mod transformation;
mod universe;
mod vector;

pub use builder::{build_geometry, setup_materials, GeometryIndex};
pub use cell::Cell;
pub use lattice::{expand_lattice, LatticeExpansion, LatticeOrientation};
pub use surface::{Surface, SurfaceFlag, SurfaceKind};
pub use transformation::Transformation;
pub use universe::Universe;
pub use vector::Vec3;

use crate::particle::Particle;

const EPSILON: f64 = 1e-10;

//=====================================================================
// The flattened CSG model: three arenas (surfaces, cells, universes),
// indexed by `usize`. Nothing here owns a parent pointer - cells point
// up to their universe's filling cell only through `parent_universe`,
// which the containing Geometry resolves by a second lookup. This
// keeps the whole model free of reference cycles at the cost of one
// indirection per parent walk.
//=====================================================================
#[derive(Debug, Clone)]
pub struct Geometry {
    pub surfaces: Vec<Surface>,
    pub cells: Vec<Cell>,
    pub universes: Vec<Universe>,
    pub base_universe: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossOutcome {
    Reflected,
    Dead,
    Entered(usize),
}

impl Geometry {
    pub fn new(surfaces: Vec<Surface>, cells: Vec<Cell>, universes: Vec<Universe>, base_universe: usize) -> Self {
        Self { surfaces, cells, universes, base_universe }
    }

    // Locate the cell containing `p` within `universe_id`, ignoring
    // `skip` (the surface the particle just crossed, so sense checks
    // there are not re-evaluated at the boundary itself).
    pub fn find_cell(&self, universe_id: usize, p: Vec3, skip: Option<usize>) -> Option<usize> {
        for &cell_id in &self.universes[universe_id].cells {
            if let Some(found) = self.cell_find(cell_id, p, skip) {
                return Some(found);
            }
        }
        None
    }

    // A cell matches `p` when every one of its (surface, sense) pairs
    // agrees with `p`'s actual sense there - except `skip`, which is
    // assumed to agree. A negated cell is the complement of that
    // conjunction: it matches when at least one non-skip surface
    // disagrees. Either way, a match that fills another universe
    // recurses into it; otherwise the cell itself is the answer.
    pub fn cell_find(&self, cell_id: usize, p: Vec3, skip: Option<usize>) -> Option<usize> {
        let cell = &self.cells[cell_id];
        let matches = if cell.negated {
            cell.surfaces
                .iter()
                .any(|&(surface_id, expected)| Some(surface_id) != skip && self.surfaces[surface_id].kind.sense(p) != expected)
        } else {
            cell.surfaces
                .iter()
                .all(|&(surface_id, expected)| Some(surface_id) == skip || self.surfaces[surface_id].kind.sense(p) == expected)
        };
        if !matches {
            return None;
        }
        match cell.fill {
            Some(universe_id) => self.find_cell(universe_id, p, None),
            None => Some(cell_id),
        }
    }

    // Distance to the nearest forward surface crossing bounding
    // `cell_id`, checking the parent cell (through the universe that
    // fills it, if any) before this cell's own surfaces, since a
    // particle can exit an inner cell through its enclosing one's
    // boundary without the inner cell owning that surface at all.
    pub fn cell_intersect(&self, cell_id: usize, p: Vec3, d: Vec3) -> Option<(usize, bool, f64)> {
        let cell = &self.cells[cell_id];
        let mut best = cell.parent_universe.and_then(|universe_id| {
            self.universes[universe_id]
                .parent_cell
                .and_then(|parent_cell_id| self.cell_intersect(parent_cell_id, p, d))
        });

        for &(surface_id, sense) in &cell.surfaces {
            if let Some(distance) = self.surfaces[surface_id].kind.intersect(p, d) {
                if best.is_none_or(|(_, _, best_distance)| distance < best_distance) {
                    best = Some((surface_id, sense, distance));
                }
            }
        }
        best
    }

    // Apply the effect of crossing `surface_id` (whose agreeing sense
    // was `sense`) on `particle`, which has already been advanced to
    // the crossing point.
    pub fn cross_surface(&self, surface_id: usize, sense: bool, particle: &mut Particle) -> CrossOutcome {
        let surface = &self.surfaces[surface_id];
        match surface.flag {
            SurfaceFlag::Vacuum => {
                particle.kill();
                CrossOutcome::Dead
            }
            SurfaceFlag::Reflecting => {
                let mut normal = surface.kind.normal(particle.position);
                if !sense {
                    normal = normal * -1.0;
                }
                let d = particle.direction;
                particle.direction = d - normal * (2.0 * d.dot(&normal));
                CrossOutcome::Reflected
            }
            SurfaceFlag::None => {
                let neighbors = if sense { &surface.negative_neighbors } else { &surface.positive_neighbors };
                for &universe_id in neighbors {
                    if let Some(cell_id) = self.find_cell(universe_id, particle.position, Some(surface_id)) {
                        if self.cells[cell_id].dead {
                            particle.kill();
                            return CrossOutcome::Dead;
                        }
                        particle.cell = Some(cell_id);
                        return CrossOutcome::Entered(cell_id);
                    }
                }
                particle.kill();
                CrossOutcome::Dead
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A single infinite slab, 0 < x < 1, vacuum on both sides.
    fn slab_geometry() -> Geometry {
        let mut lo = Surface::new(0, "lo".into(), SurfaceKind::PlaneX { x: 0.0 }, SurfaceFlag::Vacuum);
        let mut hi = Surface::new(1, "hi".into(), SurfaceKind::PlaneX { x: 1.0 }, SurfaceFlag::Vacuum);
        let cell = Cell::new(0, "inside".into(), "0".into(), vec![(0, true), (1, false)]);
        lo.register_neighbor(true, 0);
        hi.register_neighbor(false, 0);
        let universe = Universe::new(0, "0".into(), None);
        let mut universe = universe;
        universe.cells.push(0);
        Geometry::new(vec![lo, hi], vec![cell], vec![universe], 0)
    }

    #[test]
    fn test_find_cell_inside_slab() {
        let geometry = slab_geometry();
        let found = geometry.find_cell(0, Vec3::new(0.5, 0.0, 0.0), None);
        assert_eq!(found, Some(0));
    }

    #[test]
    fn test_find_cell_outside_slab_is_none() {
        let geometry = slab_geometry();
        assert!(geometry.find_cell(0, Vec3::new(2.0, 0.0, 0.0), None).is_none());
    }

    #[test]
    fn test_cell_intersect_finds_nearest_exit() {
        let geometry = slab_geometry();
        let (surface_id, _, distance) = geometry.cell_intersect(0, Vec3::new(0.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(surface_id, 1);
        assert!((distance - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_cross_surface_into_vacuum_kills_particle() {
        let geometry = slab_geometry();
        let mut particle = Particle::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0);
        let outcome = geometry.cross_surface(1, false, &mut particle);
        assert_eq!(outcome, CrossOutcome::Dead);
        assert!(!particle.is_alive());
    }
}
