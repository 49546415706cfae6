pub mod batcher;
pub mod config;
pub mod dataset;
pub mod problem;
