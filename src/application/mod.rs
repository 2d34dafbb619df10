// src/application/mod.rs
pub mod storage;
