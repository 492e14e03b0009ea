/// Генераторы синтетических данных

pub mod alerts;
pub mod forecast;
pub mod metrics;

pub use alerts::AlertGenerator;
pub use forecast::build_forecast;
pub use metrics::MetricsGenerator;
