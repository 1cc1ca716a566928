// src/lib.rs

// This file defines the public modules of the library.
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod noise;
pub mod prelude;
pub mod types;
pub mod vehicle;
