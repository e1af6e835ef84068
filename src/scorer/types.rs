use serde::{Deserialize, Serialize};

/// Per-layer parts of a dynamic score. Their sum is the dynamic score.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicBreakdown {
    // Position tables
    pub position: f64,

    // Diversity
    pub balance: f64,

    // Repetition
    pub family: f64,
    pub weekly: f64,
    pub overlap: f64,
}

impl DynamicBreakdown {
    pub fn total(&self) -> f64 {
        self.position + self.balance + self.family + self.weekly + self.overlap
    }

    pub fn penalties(&self) -> f64 {
        self.balance + self.family + self.weekly + self.overlap
    }
}
