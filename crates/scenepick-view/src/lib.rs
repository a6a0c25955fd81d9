use thiserror::Error;

mod config;
mod render;
mod session;

pub use config::{SessionConfig, ViewportConfig};
pub use render::draw_object;
pub use session::ViewportSession;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Picking(#[from] scenepick_picking::PickingError),
    #[error(transparent)]
    Config(#[from] scenepick_base::Error),
    #[error("session config is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViewError>;
