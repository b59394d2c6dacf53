mod child_grid;
mod master_grid;

pub use child_grid::ChildGrid;
pub use master_grid::{EnergyHint, MasterGrid};
