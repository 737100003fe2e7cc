pub mod ability;
pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod stats;
