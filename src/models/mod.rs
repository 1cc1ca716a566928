// src/models/mod.rs

pub mod dynamics;
pub mod measurement;
