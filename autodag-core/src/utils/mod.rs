// src/utils/mod.rs

//! Helpers shared by unit tests, integration tests and downstream crates.

pub mod testing;
