mod media_capture;
mod media_error;

pub use media_capture::*;
pub use media_error::*;
