// src/infrastructure/mod.rs
pub mod repositories;
