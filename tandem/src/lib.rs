pub use tandem_core::model::{PeerId, RoomId};

pub mod model {
    pub use tandem_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use tandem_server::*;
}

#[cfg(feature = "peer")]
pub mod peer {
    pub use tandem_peer::*;
}
