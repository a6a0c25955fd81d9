//! Screen-space object picking through an identity-colored render target.
//!
//! Every pickable thing drawn during a pass is registered first and drawn in
//! a color that encodes its registry index. After the pass the target is read
//! back once, and any pixel can be resolved to the proxy that covered it.

use thiserror::Error;

mod buffer;
mod codec;
#[cfg(feature = "gpu")]
mod gpu;
mod raster;
mod software;
mod target;

pub use buffer::{PickHandle, PickResult, PickingBuffer};
pub use codec::{MAX_INDEX, NOTHING, decode, encode};
#[cfg(feature = "gpu")]
pub use gpu::WgpuTarget;
pub use software::SoftwareTarget;
pub use target::{PickTarget, PixelBuffer};

#[derive(Error, Debug)]
pub enum PickingError {
    #[error("a pick pass is already open")]
    PassAlreadyOpen,
    #[error("no pick pass is open")]
    PassNotOpen,
    #[error("cannot resize the pick target while a pass is open")]
    ResizeDuringPass,
    #[error("pick target must be at least 1x1, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("more than {max} pickable proxies registered in one pass")]
    CapacityExceeded { max: u32 },
    #[error("pick readback failed: {0}")]
    Readback(String),
}

pub type Result<T> = std::result::Result<T, PickingError>;
