pub mod assistant_service;
pub mod dashboard_service;
pub mod metrics;
pub mod order_parser;
