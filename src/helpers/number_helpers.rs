/// Reads user-typed numeric text the way the dashboard's inputs were read:
/// surrounding whitespace is ignored and a blank string counts as zero.
/// Non-finite results are rejected.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    // Rust accepts "inf"/"nan" spellings that are never valid input here.
    let value: f64 = trimmed.parse().ok()?;
    value.is_finite().then_some(value)
}
