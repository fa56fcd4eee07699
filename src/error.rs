use chrono::{DateTime, Utc};
use thiserror::Error;

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("degenerate view window: start={start}, end={end}")]
    DegenerateWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid {axis} zoom: {value}")]
    InvalidZoom { axis: &'static str, value: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
