//! リクエストパラメータの共有状態（Settings Snapshot）
//!
//! room_id・cursor・internal_ext などのセッション状態を保持する唯一の場所。
//! クライアントインスタンスが所有し、各API操作が読み書きする。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ROOM_ID: &str = "room_id";
pub const CURSOR: &str = "cursor";
/// ack ID（次回fetchで返送する受信確認トークン）
pub const INTERNAL_EXT: &str = "internal_ext";
pub const CONTENT: &str = "content";
pub const CHANNEL: &str = "channel";

/// リストをクエリ・フォームに載せる際の区切り文字
const LIST_SEPARATOR: &str = ",";

/// パラメータ値（文字列または文字列リスト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            ParamValue::List(_) => None,
        }
    }

    /// ワイヤー上の表現（リストはカンマ区切り）
    pub fn to_wire(&self) -> String {
        match self {
            ParamValue::Text(text) => text.clone(),
            ParamValue::List(items) => items.join(LIST_SEPARATOR),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

/// Webクライアントが常に送信するホスト固有パラメータ
///
/// cursor・internal_extは初回fetchまで存在しない
const DEFAULT_CLIENT_PARAMS: &[(&str, &str)] = &[
    ("aid", "1988"),
    ("app_language", "en-US"),
    ("app_name", "tiktok_web"),
    ("browser_language", "en"),
    ("browser_name", "Mozilla"),
    ("browser_online", "true"),
    ("browser_platform", "Win32"),
    ("browser_version", "5.0 (Windows NT 10.0; Win64; x64)"),
    ("cookie_enabled", "true"),
    ("device_platform", "web"),
    ("did_rule", "3"),
    ("fetch_rule", "1"),
    ("focus_state", "true"),
    ("from_page", "user"),
    ("history_len", "4"),
    ("identity", "audience"),
    ("is_fullscreen", "false"),
    ("is_page_visible", "true"),
    ("live_id", "12"),
    ("resp_content_type", "protobuf"),
    ("screen_height", "1152"),
    ("screen_width", "2048"),
    ("tz_name", "Europe/Berlin"),
    ("version_code", "180800"),
    ("webcast_sdk_version", "1.3.0"),
    ("update_version_code", "1.3.0"),
];

/// リクエストパラメータのスナップショット
///
/// room_idは一度設定されるとこの層では削除しない。
/// cursor・internal_extはfetchのたびに置き換える（マージしない）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSettings {
    params: BTreeMap<String, ParamValue>,
}

impl ClientSettings {
    /// 空のスナップショットを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ホスト既定パラメータ入りのスナップショットを作成
    pub fn with_defaults() -> Self {
        let mut settings = Self::new();
        for (key, value) in DEFAULT_CLIENT_PARAMS {
            settings.set(*key, *value);
        }
        settings
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_text)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.params.remove(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// 解決済みのroom_id（空文字列は未設定扱い）
    pub fn room_id(&self) -> Option<&str> {
        self.get_text(ROOM_ID).filter(|id| !id.is_empty())
    }

    pub fn set_room_id(&mut self, room_id: impl Into<String>) {
        self.set(ROOM_ID, room_id.into());
    }

    pub fn cursor(&self) -> Option<&str> {
        self.get_text(CURSOR)
    }

    /// 前回fetchで受け取ったack ID
    pub fn ack_ids(&self) -> Option<&[String]> {
        match self.get(INTERNAL_EXT)? {
            ParamValue::List(items) => Some(items),
            ParamValue::Text(_) => None,
        }
    }

    /// ページネーション状態を置き換える
    pub fn set_pagination(&mut self, cursor: impl Into<String>, ack_ids: Vec<String>) {
        self.set(CURSOR, cursor.into());
        self.set(INTERNAL_EXT, ack_ids);
    }

    /// クエリ・フォーム用のキー/値ペア
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(key, value)| (key.clone(), value.to_wire()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults_has_no_pagination() {
        let settings = ClientSettings::with_defaults();
        assert_eq!(settings.get_text("app_name"), Some("tiktok_web"));
        assert_eq!(settings.get_text("device_platform"), Some("web"));
        assert!(!settings.contains(CURSOR));
        assert!(!settings.contains(INTERNAL_EXT));
        assert!(!settings.contains(ROOM_ID));
    }

    #[test]
    fn test_room_id_empty_is_unset() {
        let mut settings = ClientSettings::new();
        assert_eq!(settings.room_id(), None);

        settings.set_room_id("");
        assert_eq!(settings.room_id(), None);

        settings.set_room_id("12345");
        assert_eq!(settings.room_id(), Some("12345"));
    }

    #[test]
    fn test_set_pagination_replaces() {
        let mut settings = ClientSettings::new();
        settings.set_pagination("first", vec!["1".to_string(), "2".to_string()]);
        settings.set_pagination("second", vec!["3".to_string()]);

        assert_eq!(settings.cursor(), Some("second"));
        assert_eq!(settings.ack_ids(), Some(&["3".to_string()][..]));
    }

    #[test]
    fn test_to_pairs_joins_lists() {
        let mut settings = ClientSettings::new();
        settings.set("aid", "1988");
        settings.set(INTERNAL_EXT, vec!["1".to_string(), "2".to_string()]);

        let pairs = settings.to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("aid".to_string(), "1988".to_string()),
                ("internal_ext".to_string(), "1,2".to_string()),
            ]
        );
    }

    #[test]
    fn test_serde_roundtrip_snapshot() {
        let mut settings = ClientSettings::new();
        settings.set_room_id("42");
        settings.set_pagination("abc", vec!["1".to_string()]);

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["room_id"], "42");
        assert_eq!(json["internal_ext"], serde_json::json!(["1"]));

        let restored: ClientSettings = serde_json::from_value(json).unwrap();
        assert_eq!(restored, settings);
    }
}
