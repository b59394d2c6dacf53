use crate::geometry::{SurfaceKind, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeOrientation {
    Xy,
    Yz,
    Xz,
}

impl LatticeOrientation {
    fn axes(self) -> (usize, usize) {
        match self {
            LatticeOrientation::Xy => (0, 1),
            LatticeOrientation::Yz => (1, 2),
            LatticeOrientation::Xz => (0, 2),
        }
    }
}

fn plane_on_axis(axis: usize, coordinate: f64) -> SurfaceKind {
    match axis {
        0 => SurfaceKind::PlaneX { x: coordinate },
        1 => SurfaceKind::PlaneY { y: coordinate },
        2 => SurfaceKind::PlaneZ { z: coordinate },
        _ => panic!("axis index out of range: {axis}"),
    }
}

fn set_axis(v: &mut Vec3, axis: usize, value: f64) {
    match axis {
        0 => v.x = value,
        1 => v.y = value,
        2 => v.z = value,
        _ => panic!("axis index out of range: {axis}"),
    }
}

//=====================================================================
// The planes and per-cell descriptors produced by expanding one
// lattice. `cell_surfaces` indexes into `surfaces` (locally, 0-based);
// the caller is responsible for registering both into the shared
// Geometry arenas (applying dedup against already-known surfaces).
//=====================================================================
pub struct LatticeExpansion {
    pub surfaces: Vec<SurfaceKind>,
    pub cell_surfaces: Vec<Vec<(usize, bool)>>,
    pub cell_centers: Vec<Vec3>,
}

// Expand a rectilinear nx*ny lattice with pitch (dx, dy), centered on
// the origin, in row-major order (row index varies slowest), matching
// the fill-universe list ordering the spec describes.
pub fn expand_lattice(orientation: LatticeOrientation, nx: usize, ny: usize, dx: f64, dy: f64) -> LatticeExpansion {
    assert!(nx > 0 && ny > 0, "lattice dimensions must be positive");
    let (axis_a, axis_b) = orientation.axes();

    let mut surfaces = Vec::with_capacity(nx + 1 + ny + 1);
    let mut a_planes = Vec::with_capacity(nx + 1);
    for i in 0..=nx {
        let coordinate = -(nx as f64 * dx) / 2.0 + i as f64 * dx;
        a_planes.push(surfaces.len());
        surfaces.push(plane_on_axis(axis_a, coordinate));
    }
    let mut b_planes = Vec::with_capacity(ny + 1);
    for j in 0..=ny {
        let coordinate = -(ny as f64 * dy) / 2.0 + j as f64 * dy;
        b_planes.push(surfaces.len());
        surfaces.push(plane_on_axis(axis_b, coordinate));
    }

    let mut cell_surfaces = Vec::with_capacity(nx * ny);
    let mut cell_centers = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            cell_surfaces.push(vec![
                (a_planes[i], true),
                (a_planes[i + 1], false),
                (b_planes[j], true),
                (b_planes[j + 1], false),
            ]);

            let center_a = -(nx as f64 * dx) / 2.0 + (i as f64 + 0.5) * dx;
            let center_b = -(ny as f64 * dy) / 2.0 + (j as f64 + 0.5) * dy;
            let mut center = Vec3::default();
            set_axis(&mut center, axis_a, center_a);
            set_axis(&mut center, axis_b, center_b);
            cell_centers.push(center);
        }
    }

    LatticeExpansion { surfaces, cell_surfaces, cell_centers }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_3x3_lattice_cell_count_and_planes() {
        let expansion = expand_lattice(LatticeOrientation::Xy, 3, 3, 1.26, 1.26);
        assert_eq!(expansion.cell_surfaces.len(), 9);
        assert_eq!(expansion.surfaces.len(), 8);
    }

    #[test]
    fn test_center_cell_is_at_origin() {
        let expansion = expand_lattice(LatticeOrientation::Xy, 3, 3, 1.26, 1.26);
        // Row-major, row 1 (middle), column 1 (middle) -> index 4
        let center = expansion.cell_centers[4];
        assert!(center.x.abs() < 1e-12 && center.y.abs() < 1e-12);
    }

    #[test]
    fn test_neighbor_cell_offset_by_pitch() {
        let expansion = expand_lattice(LatticeOrientation::Xy, 3, 3, 1.26, 1.26);
        let right_of_center = expansion.cell_centers[5];
        assert!((right_of_center.x - 1.26).abs() < 1e-9);
    }
}
