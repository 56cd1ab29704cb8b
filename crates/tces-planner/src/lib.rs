//! Pure planning stages of an orchestration request: turning a description
//! into per-trade requests, and turning trade results into a schedule and
//! aggregate totals. Nothing in this crate performs I/O.

pub mod aggregator;
pub mod analyzer;
pub mod error;
pub mod request_builder;
pub mod scheduler;

pub use aggregator::{aggregate, Aggregate};
pub use analyzer::analyze;
pub use error::PlannerError;
pub use request_builder::build_requests;
pub use scheduler::{DependencyScheduler, PhaseDependency};
