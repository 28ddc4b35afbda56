pub mod crossover;
pub mod mutation;
pub mod selection;
pub mod runner;

pub use self::runner::{GaResult, NoProgress, Optimizer, ProgressCallback};
