mod checks;
mod score;
pub mod see;

pub use checks::{gives_direct_check, has_null_move_material};
pub use score::format_score;
