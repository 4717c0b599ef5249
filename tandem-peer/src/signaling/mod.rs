mod relay_client;
mod room_link;

pub use relay_client::*;
pub use room_link::*;
