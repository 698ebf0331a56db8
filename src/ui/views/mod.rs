pub mod loading;
pub mod pricing;
pub mod quiz;
pub mod results;
pub mod topic;
