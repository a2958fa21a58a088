// src/models/mod.rs

pub mod exam_event;
pub mod quiz_result;
pub mod user;
