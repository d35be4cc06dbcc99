pub mod error;
pub mod event;
pub mod state;

pub use error::{MetricReadError, Result, TrackerError};
pub use event::Message;
pub use state::{AlertMode, LoopState, Reading, RenderSnapshot};
