use crate::geometry::{Transformation, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFlag {
    None,
    Reflecting,
    Vacuum,
}

//=====================================================================
// The quadric primitives the engine supports. A generic on/off-axis
// cylinder is a single variant parameterized by its two transverse
// offsets, so a translation never needs to change a surface's variant
// - only its coefficients.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceKind {
    PlaneX { x: f64 },
    PlaneY { y: f64 },
    PlaneZ { z: f64 },
    CylinderX { y: f64, z: f64, r: f64 },
    CylinderY { x: f64, z: f64, r: f64 },
    CylinderZ { x: f64, y: f64, r: f64 },
    Sphere { x: f64, y: f64, z: f64, r: f64 },
}

impl SurfaceKind {
    pub fn evaluate(&self, p: Vec3) -> f64 {
        match *self {
            SurfaceKind::PlaneX { x } => p.x - x,
            SurfaceKind::PlaneY { y } => p.y - y,
            SurfaceKind::PlaneZ { z } => p.z - z,
            SurfaceKind::CylinderX { y, z, r } => (p.y - y).powi(2) + (p.z - z).powi(2) - r * r,
            SurfaceKind::CylinderY { x, z, r } => (p.x - x).powi(2) + (p.z - z).powi(2) - r * r,
            SurfaceKind::CylinderZ { x, y, r } => (p.x - x).powi(2) + (p.y - y).powi(2) - r * r,
            SurfaceKind::Sphere { x, y, z, r } => {
                (p.x - x).powi(2) + (p.y - y).powi(2) + (p.z - z).powi(2) - r * r
            }
        }
    }

    pub fn sense(&self, p: Vec3) -> bool {
        self.evaluate(p) >= 0.0
    }

    // Distance along `d` from `p` to the nearest forward crossing of
    // this surface, or `None` if the ray never crosses it (planes:
    // moving away or parallel; quadrics: no real, positive root).
    pub fn intersect(&self, p: Vec3, d: Vec3) -> Option<f64> {
        match *self {
            SurfaceKind::PlaneX { x } => plane_intersect(p.x, d.x, x),
            SurfaceKind::PlaneY { y } => plane_intersect(p.y, d.y, y),
            SurfaceKind::PlaneZ { z } => plane_intersect(p.z, d.z, z),
            SurfaceKind::CylinderX { y, z, r } => {
                let (dp, dd) = ((p.y - y, p.z - z), (d.y, d.z));
                quadric_intersect(dd.0, dd.1, dp.0, dp.1, r)
            }
            SurfaceKind::CylinderY { x, z, r } => {
                let (dp, dd) = ((p.x - x, p.z - z), (d.x, d.z));
                quadric_intersect(dd.0, dd.1, dp.0, dp.1, r)
            }
            SurfaceKind::CylinderZ { x, y, r } => {
                let (dp, dd) = ((p.x - x, p.y - y), (d.x, d.y));
                quadric_intersect(dd.0, dd.1, dp.0, dp.1, r)
            }
            SurfaceKind::Sphere { x, y, z, r } => {
                let rel = p - Vec3::new(x, y, z);
                let a = d.dot(&d);
                let k = d.dot(&rel);
                let c = rel.dot(&rel) - r * r;
                smallest_positive_root(a, k, c)
            }
        }
    }

    pub fn normal(&self, p: Vec3) -> Vec3 {
        match *self {
            SurfaceKind::PlaneX { .. } => Vec3::new(1.0, 0.0, 0.0),
            SurfaceKind::PlaneY { .. } => Vec3::new(0.0, 1.0, 0.0),
            SurfaceKind::PlaneZ { .. } => Vec3::new(0.0, 0.0, 1.0),
            SurfaceKind::CylinderX { y, z, .. } => Vec3::new(0.0, p.y - y, p.z - z).normalized(),
            SurfaceKind::CylinderY { x, z, .. } => Vec3::new(p.x - x, 0.0, p.z - z).normalized(),
            SurfaceKind::CylinderZ { x, y, .. } => Vec3::new(p.x - x, p.y - y, 0.0).normalized(),
            SurfaceKind::Sphere { x, y, z, .. } => (p - Vec3::new(x, y, z)).normalized(),
        }
    }

    // Applying a transformation yields a new surface instance; only
    // the translation component moves a primitive's coefficients.
    pub fn transformed(&self, transformation: &Transformation) -> SurfaceKind {
        let t = transformation.translation;
        match *self {
            SurfaceKind::PlaneX { x } => SurfaceKind::PlaneX { x: x + t.x },
            SurfaceKind::PlaneY { y } => SurfaceKind::PlaneY { y: y + t.y },
            SurfaceKind::PlaneZ { z } => SurfaceKind::PlaneZ { z: z + t.z },
            SurfaceKind::CylinderX { y, z, r } => SurfaceKind::CylinderX { y: y + t.y, z: z + t.z, r },
            SurfaceKind::CylinderY { x, z, r } => SurfaceKind::CylinderY { x: x + t.x, z: z + t.z, r },
            SurfaceKind::CylinderZ { x, y, r } => SurfaceKind::CylinderZ { x: x + t.x, y: y + t.y, r },
            SurfaceKind::Sphere { x, y, z, r } => {
                SurfaceKind::Sphere { x: x + t.x, y: y + t.y, z: z + t.z, r }
            }
        }
    }

    pub fn almost_equal(&self, other: &SurfaceKind) -> bool {
        const EPS: f64 = 1e-9;
        let close = |a: f64, b: f64| (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0);
        match (self, other) {
            (SurfaceKind::PlaneX { x: a }, SurfaceKind::PlaneX { x: b }) => close(*a, *b),
            (SurfaceKind::PlaneY { y: a }, SurfaceKind::PlaneY { y: b }) => close(*a, *b),
            (SurfaceKind::PlaneZ { z: a }, SurfaceKind::PlaneZ { z: b }) => close(*a, *b),
            (SurfaceKind::CylinderX { y: y1, z: z1, r: r1 }, SurfaceKind::CylinderX { y: y2, z: z2, r: r2 }) => {
                close(*y1, *y2) && close(*z1, *z2) && close(*r1, *r2)
            }
            (SurfaceKind::CylinderY { x: x1, z: z1, r: r1 }, SurfaceKind::CylinderY { x: x2, z: z2, r: r2 }) => {
                close(*x1, *x2) && close(*z1, *z2) && close(*r1, *r2)
            }
            (SurfaceKind::CylinderZ { x: x1, y: y1, r: r1 }, SurfaceKind::CylinderZ { x: x2, y: y2, r: r2 }) => {
                close(*x1, *x2) && close(*y1, *y2) && close(*r1, *r2)
            }
            (
                SurfaceKind::Sphere { x: x1, y: y1, z: z1, r: r1 },
                SurfaceKind::Sphere { x: x2, y: y2, z: z2, r: r2 },
            ) => close(*x1, *x2) && close(*y1, *y2) && close(*z1, *z2) && close(*r1, *r2),
            _ => false,
        }
    }
}

fn plane_intersect(p: f64, d: f64, c: f64) -> Option<f64> {
    if d == 0.0 {
        return None;
    }
    let distance = (c - p) / d;
    (distance > 0.0).then_some(distance)
}

fn quadric_intersect(dx: f64, dy: f64, px: f64, py: f64, r: f64) -> Option<f64> {
    let a = dx * dx + dy * dy;
    let k = dx * px + dy * py;
    let c = px * px + py * py - r * r;
    smallest_positive_root(a, k, c)
}

// Nearest forward root of `a*t^2 + 2*k*t + c = 0`.
fn smallest_positive_root(a: f64, k: f64, c: f64) -> Option<f64> {
    if a.abs() < 1e-300 {
        return None;
    }
    let discriminant = k * k - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let (t1, t2) = ((-k - sqrt_d) / a, (-k + sqrt_d) / a);
    let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
    if lo > 1e-10 {
        Some(lo)
    } else if hi > 1e-10 {
        Some(hi)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct Surface {
    pub internal_id: usize,
    pub user_id: String,
    pub kind: SurfaceKind,
    pub flag: SurfaceFlag,
    // Cells found on the `f(p) >= 0` side and the `f(p) < 0` side,
    // populated as cells register themselves during construction.
    pub positive_neighbors: Vec<usize>,
    pub negative_neighbors: Vec<usize>,
}

impl Surface {
    pub fn new(internal_id: usize, user_id: String, kind: SurfaceKind, flag: SurfaceFlag) -> Self {
        Self { internal_id, user_id, kind, flag, positive_neighbors: Vec::new(), negative_neighbors: Vec::new() }
    }

    pub fn register_neighbor(&mut self, sense: bool, cell_id: usize) {
        if sense {
            self.positive_neighbors.push(cell_id);
        } else {
            self.negative_neighbors.push(cell_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_sense_and_intersect() {
        let plane = SurfaceKind::PlaneX { x: 1.0 };
        assert!(!plane.sense(Vec3::new(0.0, 0.0, 0.0)));
        assert!(plane.sense(Vec3::new(2.0, 0.0, 0.0)));
        let d = plane.intersect(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!((d - 1.0).abs() < 1e-12);
        assert!(plane.intersect(Vec3::new(0.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_sphere_intersect_from_center() {
        let sphere = SurfaceKind::Sphere { x: 0.0, y: 0.0, z: 0.0, r: 1.0 };
        let d = sphere.intersect(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cylinder_reintersect_is_near_zero() {
        let cyl = SurfaceKind::CylinderZ { x: 0.0, y: 0.0, r: 2.0 };
        let p0 = Vec3::new(0.0, 0.0, 0.0);
        let d = Vec3::new(1.0, 0.0, 0.0);
        let dist = cyl.intersect(p0, d).unwrap();
        let p1 = p0 + d * dist;
        let again = cyl.intersect(p1, d);
        assert!(again.is_none() || again.unwrap() < 1e-6);
    }

    #[test]
    fn test_transformed_moves_cylinder_off_axis() {
        let cyl = SurfaceKind::CylinderZ { x: 0.0, y: 0.0, r: 1.0 };
        let t = Transformation::new(Vec3::new(5.0, 0.0, 0.0), Vec3::default());
        let moved = cyl.transformed(&t);
        assert_eq!(moved, SurfaceKind::CylinderZ { x: 5.0, y: 0.0, r: 1.0 });
    }

    #[test]
    fn test_almost_equal() {
        let a = SurfaceKind::Sphere { x: 0.0, y: 0.0, z: 0.0, r: 1.0 };
        let b = SurfaceKind::Sphere { x: 1e-12, y: 0.0, z: 0.0, r: 1.0 };
        assert!(a.almost_equal(&b));
        let c = SurfaceKind::Sphere { x: 0.1, y: 0.0, z: 0.0, r: 1.0 };
        assert!(!a.almost_equal(&c));
    }
}
