//! room_id 解決
//!
//! ライブページのHTMLからroom_idを抽出する。ページ構造は非公開かつ頻繁に変わるため、
//! 抽出方法を優先順の関数リストとして持ち、最初に成功したものを採用する。

use once_cell::sync::Lazy;
use regex::Regex;

use super::client::WebcastApiClient;
use super::errors::{Operation, Precondition, WebcastError};
use super::transport::WebcastTransport;

/// パターン: room_id=12345（URLクエリ形式）
static ROOM_ID_QUERY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"room_id=(\d+)").expect("Failed to compile room_id regex")
});

/// パターン: "roomId":"12345"（埋め込みJSON形式）
static ROOM_ID_JSON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""roomId":"(\d+)""#).expect("Failed to compile roomId regex")
});

/// 抽出方法（純粋関数）
pub type RoomIdStrategy = fn(&str) -> Option<String>;

/// 抽出方法の適用順
pub const ROOM_ID_STRATEGIES: &[RoomIdStrategy] = &[from_query_param, from_embedded_json];

fn first_capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|id| !id.is_empty())
}

pub fn from_query_param(html: &str) -> Option<String> {
    first_capture(&ROOM_ID_QUERY_REGEX, html)
}

pub fn from_embedded_json(html: &str) -> Option<String> {
    first_capture(&ROOM_ID_JSON_REGEX, html)
}

/// 抽出方法を順に適用し、最初に見つかったroom_idを返す
pub fn extract_room_id(html: &str) -> Option<String> {
    ROOM_ID_STRATEGIES.iter().find_map(|strategy| strategy(html))
}

impl<T: WebcastTransport> WebcastApiClient<T> {
    /// 配信者名からroom_idを解決し、スナップショットに保存する
    ///
    /// 先頭の`@`は取り除く。同じ名前で再実行すると同じ値で上書きされる。
    ///
    /// # Errors
    /// - 名前が空の場合は`MissingPrecondition`
    /// - ページ取得に失敗した場合は`Request`
    /// - room_idが見つからない場合は`HostOffline`（スナップショットは変更しない）
    pub async fn fetch_room_id(&mut self, user_name: &str) -> Result<String, WebcastError> {
        let user_name = user_name.trim().trim_start_matches('@');
        if user_name.is_empty() {
            return Err(WebcastError::MissingPrecondition(Precondition::EmptyUserName));
        }

        log::info!("Fetching room ID for {}", user_name);

        let html = self
            .transport
            .fetch_page(user_name)
            .await
            .map_err(WebcastError::request(Operation::FetchRoomId))?;

        let Some(room_id) = extract_room_id(&html) else {
            log::warn!("No room ID found in live page of {}", user_name);
            return Err(WebcastError::HostOffline {
                user_name: user_name.to_string(),
            });
        };

        self.settings.set_room_id(room_id.as_str());
        log::info!("Room ID -> {}", room_id);
        Ok(room_id)
    }
}
