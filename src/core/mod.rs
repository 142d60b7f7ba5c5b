pub mod config;
pub mod error;
pub mod timer;
pub mod types;

pub use config::ExamineConfig;
pub use error::{CurioError, Result};
pub use timer::{TimerHandle, Timers};
