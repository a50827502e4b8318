pub mod advice;
pub mod config;
pub mod error;
pub mod growth;
pub mod metrics;
pub mod paths;
pub mod projection;
pub mod stats;
pub mod stress;
