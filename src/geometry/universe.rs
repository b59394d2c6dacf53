//=====================================================================
// An ordered set of cells tiling a region of space. Universe #0 is
// the base universe. A universe filling multiple cells is cloned once
// per filling cell's accumulated transformation - each clone is a
// distinct entry in the Geometry arena.
//=====================================================================
#[derive(Debug, Clone)]
pub struct Universe {
    pub internal_id: usize,
    pub user_id: String,
    pub cells: Vec<usize>,
    pub parent_cell: Option<usize>,
}

impl Universe {
    pub fn new(internal_id: usize, user_id: String, parent_cell: Option<usize>) -> Self {
        Self { internal_id, user_id, cells: Vec::new(), parent_cell }
    }
}
