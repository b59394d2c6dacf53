use crate::geometry::Vec3;

//=====================================================================
// Translation + per-axis rotation (degrees). Rotation composes by
// addition in this model; only translation is actually applied to
// surface coefficients (surfaces are axis-aligned/on-axis primitives,
// so a pure rotation has no effect on their implicit form).
//=====================================================================
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transformation {
    pub translation: Vec3,
    pub rotation_degrees: Vec3,
}

impl Transformation {
    pub fn new(translation: Vec3, rotation_degrees: Vec3) -> Self {
        Self { translation, rotation_degrees }
    }

    pub fn compose(&self, other: &Transformation) -> Transformation {
        Transformation {
            translation: self.translation + other.translation,
            rotation_degrees: self.rotation_degrees + other.rotation_degrees,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_sums_components() {
        let a = Transformation::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 90.0, 0.0));
        let b = Transformation::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, 45.0));
        let c = a.compose(&b);
        assert_eq!(c.translation, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(c.rotation_degrees, Vec3::new(0.0, 90.0, 45.0));
    }
}
