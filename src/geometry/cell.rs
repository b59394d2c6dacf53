//=====================================================================
// A cell is a conjunction of (surface, expected-sense) pairs,
// optionally negated (complement of the conjunction) and optionally
// marked dead (particle termination on entry). Cells reference
// surfaces by arena index; they own nothing.
//=====================================================================
#[derive(Debug, Clone)]
pub struct Cell {
    pub internal_id: usize,
    pub user_id: String,
    pub path: String,
    pub surfaces: Vec<(usize, bool)>,
    pub negated: bool,
    pub dead: bool,
    pub fill: Option<usize>,
    pub parent_universe: Option<usize>,
    pub material: Option<usize>,
}

impl Cell {
    pub fn new(internal_id: usize, user_id: String, path: String, surfaces: Vec<(usize, bool)>) -> Self {
        Self {
            internal_id,
            user_id,
            path,
            surfaces,
            negated: false,
            dead: false,
            fill: None,
            parent_universe: None,
            material: None,
        }
    }
}
