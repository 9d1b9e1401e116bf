//! Hex grid math - coordinates and world-space projection

pub mod coord;
pub mod layout;

pub use coord::AxialCoord;
pub use layout::world_position;
