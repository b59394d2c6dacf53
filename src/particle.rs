use crate::geometry::Vec3;
use crate::grids::EnergyHint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleState {
    Alive,
    Dead,
    Banked,
}

//=====================================================================
// A single neutron history's mutable state. Created per-history from
// the Source or the fission bank, mutated in place through the
// transport loop, and discarded on termination.
//=====================================================================
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec3,
    pub direction: Vec3,
    pub energy: f64,
    pub weight: f64,
    pub state: ParticleState,
    pub master_hint: EnergyHint,
    pub cell: Option<usize>,
}

impl Particle {
    pub fn new(position: Vec3, direction: Vec3, energy: f64, weight: f64) -> Self {
        Self {
            position,
            direction: direction.normalized(),
            energy,
            weight,
            state: ParticleState::Alive,
            master_hint: EnergyHint::default(),
            cell: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state == ParticleState::Alive
    }

    pub fn kill(&mut self) {
        self.state = ParticleState::Dead;
    }

    pub fn bank(&mut self) {
        self.state = ParticleState::Banked;
    }

    pub fn advance(&mut self, distance: f64) {
        self.position = self.position + self.direction * distance;
    }
}
