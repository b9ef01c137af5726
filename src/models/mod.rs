// src/models/mod.rs

pub mod platform;
pub mod quiz;
pub mod student;
pub mod user;
