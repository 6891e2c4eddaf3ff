pub mod anneal;
pub mod enumerate;
pub mod metrics;
pub mod walker;

pub use metrics::Metrics;
