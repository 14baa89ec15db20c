//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (WordSource) but are themselves
//! concrete structs, not traits.

mod benchmark;

pub use benchmark::{linear_scan, BenchmarkReport, BenchmarkService, Measurement, Scenario};
