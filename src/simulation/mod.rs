pub mod config;
pub mod runner;
pub mod sampler;
pub mod scenarios;
