//! webcast API のドメイン型・ワイヤー型

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ポーリング間隔の最大値（30秒）
/// 極端に大きな値が返された場合のガード
const MAX_POLLING_INTERVAL_MS: u64 = 30000;

/// ポーリング間隔の最小値（500ms）
/// 極端に短い値によるサーバー過負荷を防止
const MIN_POLLING_INTERVAL_MS: u64 = 500;

/// ホストが間隔を返さなかった場合のポーリング間隔
const DEFAULT_POLLING_INTERVAL_MS: u64 = 1000;

/// ルーム状態
///
/// ホストのステータスコードをそのまま保持する。
/// データなしの応答は`RoomStatus::default()`（不明）になる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatus {
    pub code: i64,
}

impl RoomStatus {
    pub const UNKNOWN: i64 = 0;
    pub const LIVE: i64 = 2;
    pub const ENDED: i64 = 4;

    pub fn new(code: i64) -> Self {
        Self { code }
    }

    pub fn is_unknown(&self) -> bool {
        self.code == Self::UNKNOWN
    }

    pub fn is_live(&self) -> bool {
        self.code == Self::LIVE
    }

    pub fn is_ended(&self) -> bool {
        self.code == Self::ENDED
    }
}

/// ギフト画像
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftImage {
    #[serde(default)]
    pub url_list: Vec<String>,
}

/// ギフト情報（gift/list/ の data.gifts 要素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftInfo {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub diamond_count: i64,
    #[serde(rename = "type", default)]
    pub gift_type: i64,
    #[serde(default)]
    pub describe: String,
    pub image: Option<GiftImage>,
}

impl GiftInfo {
    /// 先頭の画像URL
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|image| image.url_list.first())
            .map(String::as_str)
    }
}

/// im/fetch/ 応答内の個々のメッセージ（ペイロードは未デコードのまま）
#[derive(Clone, PartialEq, prost::Message)]
pub struct WebcastMessage {
    #[prost(string, tag = "1")]
    pub method: String,
    #[prost(bytes = "vec", tag = "2")]
    pub payload: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub msg_id: i64,
    #[prost(int32, tag = "4")]
    pub msg_type: i32,
    #[prost(int64, tag = "5")]
    pub offset: i64,
}

/// im/fetch/ 応答のエンベロープ（protobuf）
#[derive(Clone, PartialEq, prost::Message)]
pub struct WebcastResponse {
    #[prost(message, repeated, tag = "1")]
    pub messages: Vec<WebcastMessage>,
    #[prost(string, tag = "2")]
    pub cursor: String,
    #[prost(int64, tag = "3")]
    pub fetch_interval: i64,
    /// サーバー時刻（ミリ秒）
    #[prost(int64, tag = "4")]
    pub now: i64,
    #[prost(string, tag = "5")]
    pub internal_ext: String,
}

/// メッセージバッチと次回用ページネーショントークン
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub messages: Vec<WebcastMessage>,
    pub cursor: String,
    pub ack_ids: Vec<String>,
    /// ホスト推奨のポーリング間隔（ミリ秒、0は指定なし）
    pub fetch_interval_ms: u64,
    pub server_time: Option<DateTime<Utc>>,
}

impl FetchResult {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// 次回ポーリングまでの待機時間
    ///
    /// ホストの値を500ms〜30秒でガードする。指定なしは1秒。
    pub fn next_poll_interval(&self) -> Duration {
        let millis = match self.fetch_interval_ms {
            0 => DEFAULT_POLLING_INTERVAL_MS,
            ms => ms.clamp(MIN_POLLING_INTERVAL_MS, MAX_POLLING_INTERVAL_MS),
        };
        Duration::from_millis(millis)
    }
}

impl From<WebcastResponse> for FetchResult {
    fn from(response: WebcastResponse) -> Self {
        let ack_ids = if response.internal_ext.is_empty() {
            vec![]
        } else {
            vec![response.internal_ext]
        };

        let server_time = match response.now {
            0 => None,
            ms => Utc.timestamp_millis_opt(ms).single(),
        };

        Self {
            messages: response.messages,
            cursor: response.cursor,
            ack_ids,
            fetch_interval_ms: u64::try_from(response.fetch_interval).unwrap_or(0),
            server_time,
        }
    }
}
