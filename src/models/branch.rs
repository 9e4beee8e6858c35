//! Branch reference data.
//!
//! Branches are a static list for now; they are not persisted or mutated at
//! runtime.

use serde::{Deserialize, Serialize};

/// A regional operating unit with its truck fleet and volume goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    pub truck_count: u32,
    /// Monthly volume goal per truck, in cubic meters.
    pub goal_per_truck: u32,
}

/// The fixed set of operating branches.
pub fn all_branches() -> Vec<Branch> {
    vec![
        Branch {
            name: "PIRACICABA".to_string(),
            truck_count: 15,
            goal_per_truck: 30,
        },
        Branch {
            name: "SANTA BARBARA".to_string(),
            truck_count: 10,
            goal_per_truck: 30,
        },
        Branch {
            name: "RIO CLARO".to_string(),
            truck_count: 7,
            goal_per_truck: 30,
        },
    ]
}
