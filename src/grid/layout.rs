//! Hex layout projection from grid coordinates to world positions
//!
//! The constants here are load-bearing: position-based tile lookups elsewhere
//! in the system compare against these exact values, so they must reproduce
//! the original projection bit-for-bit.

use crate::grid::coord::AxialCoord;

/// Width of a hex tile in world units
pub const HEX_WIDTH: f64 = 1.0;

/// Height factor of a hex tile: sqrt(3) / 2
pub fn hex_height() -> f64 {
    3.0_f64.sqrt() / 2.0
}

/// Row spacing factor: sqrt(1.4)
pub fn row_scale() -> f64 {
    1.4_f64.sqrt()
}

/// Project a grid coordinate onto the horizontal world plane
///
/// Returns (x, z); the vertical y component is supplied by the tile kind
/// (border tiles sit slightly below the interior plane).
pub fn world_position(coord: AxialCoord) -> (f64, f64) {
    let q = f64::from(coord.q());
    let r = f64::from(coord.r());
    let x = HEX_WIDTH * 0.9 * q;
    let z = hex_height() * (row_scale() * r + row_scale() / 2.0 * q);
    (x, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_origin() {
        assert_eq!(world_position(AxialCoord::ZERO), (0.0, 0.0));
    }

    #[test]
    fn test_projection_matches_source_formula() {
        let c = AxialCoord::axial(3, -2);
        let (x, z) = world_position(c);
        assert_eq!(x, 1.0 * 0.9 * 3.0);
        let h = 3.0_f64.sqrt() / 2.0;
        let k = 1.4_f64.sqrt();
        assert_eq!(z, h * (k * -2.0 + k / 2.0 * 3.0));
    }

    #[test]
    fn test_distinct_coords_distinct_positions() {
        let a = world_position(AxialCoord::axial(1, 0));
        let b = world_position(AxialCoord::axial(0, 1));
        assert_ne!(a, b);
    }
}
