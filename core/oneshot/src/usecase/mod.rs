//! ユースケース層

pub mod complete;

pub use complete::{CompleteInput, CompleteUseCase};
