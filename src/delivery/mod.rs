// src/delivery/mod.rs
pub mod api_server;
pub mod router;
