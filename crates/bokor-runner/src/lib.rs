//! Multithreaded pipeline runner.
//!
//! Work items from any iterator are fanned out over a bounded queue to a
//! fixed-size pool of worker threads, each applying an [`Executor`] task.
//! Results funnel back to the calling thread, which hands every (input,
//! output, elapsed) triple to a [`Consumer`] exactly once, and a
//! [`RunStatistics`] summarises the run.
//!
//! ```
//! use bokor_runner::{AccumulatingConsumer, Runner};
//!
//! let mut consumer = AccumulatingConsumer::new();
//! let stats = Runner::new(4).run(1..=100u32, &|n: &u32| n * 2, &mut consumer);
//! assert_eq!(stats.completed, 100);
//! assert_eq!(consumer.records().len(), 100);
//! ```

pub mod consumer;
pub mod executor;
pub mod runner;
pub mod stats;

pub use consumer::{AccumulatingConsumer, Consumer, ExecutionRecord};
pub use executor::Executor;
pub use runner::Runner;
pub use stats::RunStatistics;
