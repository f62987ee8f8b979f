pub mod config;
pub mod util; // doctestのためpubにする
pub mod webcast;

pub use config::WebcastConfig;
pub use webcast::{
    ClientSettings, FetchResult, GiftInfo, HttpTransport, RoomStatus, TransportError,
    WebcastApiClient, WebcastError, WebcastTransport,
};
