//! Shared helpers

pub mod logger;
pub mod quantity;

pub use logger::{init_logger, LogLevel};
pub use quantity::NanoQuantity;
