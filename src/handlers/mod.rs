// src/handlers/mod.rs

pub mod auth;
pub mod proctor;
pub mod quiz;
