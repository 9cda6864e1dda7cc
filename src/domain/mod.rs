pub mod phase;
pub mod session;
pub mod settings;
pub mod task;

pub use phase::{Phase, SoundCue};
pub use session::{Session, TickOutcome};
pub use settings::{Settings, MAX_LONG_BREAK_INTERVAL, MIN_LONG_BREAK_INTERVAL};
pub use task::{Credit, Task, TaskList};
