// src/config/mod.rs

pub mod constants;

pub use constants::LoaderConfig;
