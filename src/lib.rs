pub mod arrivals;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod output;
pub mod routing;
pub mod stage;
pub mod state;
