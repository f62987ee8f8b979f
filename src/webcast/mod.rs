//! TikTok LIVE webcast API クライアントモジュール
//!
//! 配信者名からroom_idを解決し、セッション状態（cursor・ack ID）を
//! 呼び出し間で引き継ぎながらwebcast APIを操作する。
//!
//! ## 注意事項
//! - 非公開APIのため、ページ構造・応答形式の変更リスクあり
//! - リトライ・バックオフは行わない（呼び出し側の責務）
//! - 1インスタンスあたり同時に1つの呼び出しのみ

mod chat;
pub mod client;
pub mod errors;
mod fetch;
mod gifts;
pub mod resolver;
mod room_info;
pub mod settings;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use client::WebcastApiClient;
pub use errors::{Operation, Precondition, TransportError, WebcastError};
pub use settings::{ClientSettings, ParamValue};
pub use transport::{HttpTransport, WebcastTransport};
pub use types::{FetchResult, GiftInfo, RoomStatus, WebcastMessage, WebcastResponse};
