pub mod error;
pub mod event;
pub mod sample;
pub mod state;
pub mod window;

pub use error::{DashError, Result};
pub use event::Message;
pub use sample::{Sample, SensorField};
pub use state::AppState;
pub use window::SeriesWindow;
