pub mod clear;
pub mod clock;
pub mod config;
pub mod logger;
pub mod record;
pub mod session;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logger::{LogReport, SessionLogger};
pub use record::{Breakdown, LogRecord, LogRow};
pub use timer::SessionTimer;
