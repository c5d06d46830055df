pub mod draw;
pub mod render;
pub mod session;
pub mod timers;
pub mod touch;

pub use render::{Border, Circle, RenderSnapshot};
pub use session::{Phase, TouchSession};
pub use timers::{ManualTimers, TimerId, TimerKind, Timers};
pub use touch::changed_points;
