// src/data.rs

use crate::model::Plan;

/// Loads the pricing plans embedded at build time.
pub fn read_plans_embedded() -> Result<Vec<Plan>, serde_yaml::Error> {
    let file_content = include_str!("data/plans.yaml");
    serde_yaml::from_str(file_content)
}
