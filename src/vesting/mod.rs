//! Time-based vesting: cliff + linear monthly schedule and acceleration

mod acceleration;
mod schedule;

pub use acceleration::{
    apply_acceleration, TriggerEvent, DEFAULT_DOUBLE_TRIGGER_WINDOW_MONTHS,
};
pub use schedule::{schedule, vested_position, VestedPosition, VestingScheduleRow};
