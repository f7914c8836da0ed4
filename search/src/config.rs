use std::fmt::Display;
use std::str::FromStr;

macro_rules! define_config {
    ($(($field:ident: $type:ty, $name:expr, $min:expr, $max:expr, $default:expr)),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub struct EngineConfig {
            $(pub $field: ConfigParam<$type>,)*
        }

        impl Default for EngineConfig {
            fn default() -> Self {
                Self {
                    $($field: ConfigParam {
                        value: $default,
                        name: $name,
                        min: $min,
                        max: $max,
                    },)*
                }
            }
        }

        impl EngineConfig {
            /// Sets the parameter registered under `name` from its text form.
            pub fn update(&mut self, name: &str, value: &str) -> Result<(), String> {
                $(
                    if name.eq_ignore_ascii_case($name) {
                        return self.$field.update(value);
                    }
                )*
                Err(format!("Unknown parameter: {}", name))
            }

            /// `(name, value)` pairs of every parameter, in declaration order.
            pub fn describe(&self) -> Vec<(&'static str, String)> {
                vec![$((self.$field.name, self.$field.value.to_string()),)*]
            }
        }
    };
}

define_config!(
    // Memory
    (hash_size: usize, "Hash", 1, 4096, 64), // Transposition table size in megabytes
    (eval_cache_size: usize, "Eval Cache Size", 1, 1 << 24, 1 << 16), // Evaluation cache entries

    // Iterative deepening
    (min_depth: u8, "Min Depth", 1, 20, 4), // Depths up to this one ignore the clock
    (fixed_depth: u8, "Fixed Depth", 1, 60, 4), // Depth used when dynamic depth is off
    (poll_interval: u64, "Poll Interval", 1, 1 << 20, 1024), // Nodes between clock and stop checks

    // Aspiration Windows - Search with tight bounds around expected score
    (aspiration_window_size: i16, "Aspiration Window Size", 10, 200, 35), // Initial half-width in centipawns
    (aspiration_window_widen: i16, "Aspiration Window Widening", 2, 4, 2), // Growth per consecutive failure
    (aspiration_window_retries: usize, "Aspiration Window Retries", 1, 8, 4), // Failures before the full window

    // Null Move Pruning - Skip a turn to test position strength
    (nmp_min_depth: u8, "NMP Min Depth", 2, 10, 3), // Minimum remaining depth to try a null move
    (nmp_base_reduction: u8, "NMP Base Reduction", 1, 6, 2), // Base depth reduction
    (nmp_depth_divisor: u8, "NMP Depth Divisor", 1, 10, 4), // Extra reduction per this many plies
    (nmp_min_pieces: u32, "NMP Min Pieces", 0, 16, 3), // Non-pawn pieces required (zugzwang guard)

    // Internal Iterative Deepening - Search with reduced depth when no TT move
    (iid_min_depth: u8, "IID Min Depth", 2, 20, 5),
    (iid_reduction: u8, "IID Reduction", 1, 10, 2),

    // Futility Pruning - Prune quiet moves that can't raise alpha
    (futility_max_depth: u8, "Futility Max Depth", 0, 2, 2),
    (futility_margin_1: i16, "Futility Margin 1", 50, 1000, 300), // Margin one ply above the floor
    (futility_margin_2: i16, "Futility Margin 2", 50, 1500, 520), // Margin two plies above the floor

    // Late Move Reduction - Reduce search depth for later moves
    (lmr_min_depth: u8, "LMR Min Depth", 1, 10, 3), // Minimum remaining depth to reduce
    (lmr_min_moves: usize, "LMR Min Moves", 1, 20, 3), // Moves searched before reducing
    (lmr_divisor: i32, "LMR Divisor", 100, 400, 230), // Formula divisor (2.30 scaled by 100)
    (lmr_max_reduction_ratio: i32, "LMR Max Reduction Ratio", 10, 100, 50), // Max reduction as % of depth

    // Extensions
    (max_extension_ratio: u8, "Max Extension Ratio", 1, 4, 2), // Extended depth may reach this multiple of the iteration depth

    // Quiescence Search - Delta pruning
    (qs_delta_margin: i16, "QS Delta Margin", 0, 1000, 230),

    // History Heuristic
    (history_max_value: i32, "History Max Value", 1024, 1 << 20, 1 << 14),
);

impl EngineConfig {
    /// Transposition table size in bytes.
    pub fn hash_bytes(&self) -> usize {
        self.hash_size.value.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigParam<T> {
    pub value: T,
    pub name: &'static str,
    pub min: T,
    pub max: T,
}

impl<T> ConfigParam<T>
where
    T: FromStr + Display + PartialOrd + Copy,
    T::Err: Display,
{
    pub fn update(&mut self, value: &str) -> Result<(), String> {
        let new_value = value
            .trim()
            .parse::<T>()
            .map_err(|e| format!("Parse error for {}: {}", self.name, e))?;

        if new_value < self.min || new_value > self.max {
            return Err(format!(
                "{} must be between {} and {}, got {}",
                self.name, self.min, self.max, new_value
            ));
        }

        self.value = new_value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_by_name() {
        let mut config = EngineConfig::default();
        assert_eq!(config.hash_size.value, 64);

        config.update("hash", "128").unwrap();
        assert_eq!(config.hash_size.value, 128);

        config.update("Aspiration Window Size", " 50 ").unwrap();
        assert_eq!(config.aspiration_window_size.value, 50);
    }

    #[test]
    fn test_update_rejects_bad_values() {
        let mut config = EngineConfig::default();
        assert!(config.update("Hash", "0").is_err());
        assert!(config.update("Hash", "lots").is_err());
        assert!(config.update("No Such Option", "1").is_err());
        assert_eq!(config.hash_size.value, 64);
    }

    #[test]
    fn test_describe_lists_every_parameter() {
        let config = EngineConfig::default();
        let described = config.describe();
        assert!(described.contains(&("Min Depth", "4".to_string())));
        assert!(described.contains(&("Poll Interval", "1024".to_string())));
    }
}
