//! Training and evaluation pipelines.

pub mod evaluation;
pub mod observers;
pub mod opponents;
pub mod training;

pub use evaluation::{EvaluationConfig, evaluate};
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use opponents::RandomPolicy;
pub use training::{TrainingConfig, TrainingLoop, TrainingMode, TrainingResult};
