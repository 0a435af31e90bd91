//! Mapper configuration model, mapping engine, and deduplication.

mod config;
mod dedupe;
mod engine;

pub use config::{HeaderSpec, MapperConfig};
pub use dedupe::dedupe;
pub use engine::{MappingEngine, OutputRow};
