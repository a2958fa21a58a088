// src/utils/mod.rs

pub mod credentials;
pub mod detection;
pub mod extract;
pub mod jwt;
