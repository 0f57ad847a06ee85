//! Trip compatibility ranking for the Wasel ride-sharing service.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
