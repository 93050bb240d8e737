pub mod assistant;
pub mod dashboard;
pub mod orders;
