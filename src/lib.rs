//! Seed data generator for table `parking_times`

pub mod config;
pub mod errors;
pub mod generator;
pub mod models;
