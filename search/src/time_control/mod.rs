mod budget;
mod timer;

pub use budget::TimeBudget;
pub use timer::{ClockTimer, Timer};
