use crate::grids::{EnergyHint, MasterGrid};

//=====================================================================
// ChildGrid: a single isotope's own energy grid, plus a pointer into
// the MasterGrid built once `MasterGrid::setup()` has run.
//
// `master_pointers[i]` is the largest child index whose energy is
// `<=` `MasterGrid::energies()[i]`, enabling O(1) lookup of "where in
// my grid does this master-grid energy land" given a master hint.
//=====================================================================
#[derive(Debug, Clone, Default)]
pub struct ChildGrid {
    pub energies: Vec<f64>,
    pub master_pointers: Vec<usize>,
}

impl ChildGrid {
    pub fn new(energies: Vec<f64>) -> Self {
        Self { energies, master_pointers: Vec::new() }
    }

    pub fn build_master_pointers(&mut self, master: &MasterGrid) {
        let mut pointers = Vec::with_capacity(master.len());
        let mut c = 0usize;
        for &e in master.energies() {
            while c + 1 < self.energies.len() && self.energies[c + 1] <= e {
                c += 1;
            }
            pointers.push(c);
        }
        self.master_pointers = pointers;
    }

    // Locate the bracketing pair in this isotope's own grid for
    // `energy`, given a hint already resolved against the MasterGrid.
    pub fn index(&self, energy: f64, hint: &EnergyHint) -> (usize, f64) {
        let n = self.energies.len();
        if n < 2 {
            return (0, 0.0);
        }

        let mut i = self.master_pointers.get(hint.index).copied().unwrap_or(0).min(n - 2);
        while i + 1 < n - 1 && self.energies[i + 1] < energy {
            i += 1;
        }
        while i > 0 && self.energies[i] > energy {
            i -= 1;
        }

        let (e0, e1) = (self.energies[i], self.energies[i + 1]);
        let frac = if e1 > e0 { ((energy - e0) / (e1 - e0)).clamp(0.0, 1.0) } else { 0.0 };
        (i, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_pointers_track_largest_le_energy() {
        let mut child = ChildGrid::new(vec![1.0, 3.0, 5.0]);
        let mut master = MasterGrid::new();
        master.register(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        master.setup();
        child.build_master_pointers(&master);

        assert_eq!(child.master_pointers, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_index_matches_cold_lookup() {
        let mut child = ChildGrid::new(vec![1.0, 2.0, 4.0, 8.0]);
        let mut master = MasterGrid::new();
        master.register(&[1.0, 2.0, 4.0, 8.0]);
        master.setup();
        child.build_master_pointers(&master);

        let mut master_hint = EnergyHint::default();
        master.interpolate(3.0, &mut master_hint);
        let (idx, frac) = child.index(3.0, &master_hint);
        assert_eq!(idx, 1);
        assert_eq!(frac, 0.5);
    }
}
