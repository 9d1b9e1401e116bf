//! Hexhamlet - hex-grid village builder tile-state engine

pub mod core;
pub mod grid;
pub mod village;
