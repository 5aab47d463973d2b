#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub values: Vec<f64>,
    pub note: Option<String>,
}

/// Fully derived ranking row, recomputed from the dataset on every run.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub name: String,
    pub raw: Vec<f64>,
    pub normalized: Vec<f64>,
    pub score: f64,
    pub rank: u32,
    pub note: Option<String>,
}
