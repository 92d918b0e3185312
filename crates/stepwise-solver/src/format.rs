//! Number formatting for the rendered explanation.

/// Round half away from zero to 2 decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Fixed number of decimals, e.g. `fixed(5.0, 2) == "5.00"`.
pub fn fixed(x: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, x)
}

/// Shortest natural representation: `3`, `2.5`, `0.125`.
pub fn plain(x: f64) -> String {
    format!("{}", x)
}
