//! Pure axial-coordinate math.

use hexx::Hex;

/// The axial offsets of the six neighbors of a hex, in the order they are enumerated.
pub const NEIGHBOR_OFFSETS: [Hex; 6] = [
    Hex { x: 1, y: -1 },
    Hex { x: 1, y: 0 },
    Hex { x: 0, y: 1 },
    Hex { x: -1, y: 1 },
    Hex { x: -1, y: 0 },
    Hex { x: 0, y: -1 },
];

/// Rounds to the nearest integer, with exact halves rounding towards positive infinity.
#[inline]
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snaps fractional axial coordinates to the hex that contains them.
///
/// All three cube coordinates are rounded independently,
/// then the one with the largest rounding error is recomputed from the other two
/// so that `q + r + s = 0` holds exactly.
/// Rounding `q` and `r` on their own picks the wrong hex near the corners of a cell.
#[must_use]
pub fn axial_round(q_frac: f32, r_frac: f32) -> Hex {
    let q_frac = f64::from(q_frac);
    let r_frac = f64::from(r_frac);
    let s_frac = -q_frac - r_frac;

    let mut q = round_half_up(q_frac);
    let mut r = round_half_up(r_frac);
    let s = round_half_up(s_frac);

    let q_diff = (q - q_frac).abs();
    let r_diff = (r - r_frac).abs();
    let s_diff = (s - s_frac).abs();

    if q_diff > r_diff && q_diff > s_diff {
        q = -r - s;
    } else if r_diff > s_diff {
        r = -q - s;
    }

    Hex {
        x: q as i32,
        y: r as i32,
    }
}

/// The six hexes adjacent to `hex`, in [`NEIGHBOR_OFFSETS`] order.
#[inline]
#[must_use]
pub fn neighbors(hex: Hex) -> [Hex; 6] {
    NEIGHBOR_OFFSETS.map(|offset| hex + offset)
}
