//! Dispatch Dashboard - синтетические метрики и оповещения

pub mod api;
pub mod config;
pub mod error;
pub mod formatters;
pub mod generators;
pub mod kpi;
pub mod random;
pub mod state;
pub mod storage;
pub mod types;

pub use types::*;
pub use generators::*;

// Re-export для удобства
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult, StorageError};
pub use random::{BoxedSource, ConstantSource, RandomSource, RngSource, SequenceSource};
pub use state::{DashboardState, DashboardView, StateOptions};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
