pub mod assistant;
pub mod dashboard;
