/// Rounds `value` to `places` decimal places. Exact halves go to the even neighbor.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
