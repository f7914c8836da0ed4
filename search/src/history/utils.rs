/// Adds `delta` to a history entry, shrinking the step as the entry nears
/// `max_value` so scores saturate instead of overflowing.
/// <https://www.chessprogramming.org/History_Heuristic>
#[inline(always)]
pub fn apply_gravity(entry: &mut i32, delta: i32, max_value: i32) {
    let h = *entry;
    let b = delta.clamp(-max_value, max_value);
    let new = h + b - ((h * b.abs()) / max_value);
    *entry = new.clamp(-max_value, max_value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_saturates() {
        let mut entry = 0;
        for _ in 0..1000 {
            apply_gravity(&mut entry, 400, 4096);
        }
        assert!(entry <= 4096);
        assert!(entry > 4000);

        apply_gravity(&mut entry, -100_000, 4096);
        assert!(entry <= 0);
    }
}
