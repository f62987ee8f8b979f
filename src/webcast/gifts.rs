use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::client::{WebcastApiClient, GIFT_LIST_PATH};
use super::errors::{Operation, TransportError, WebcastError};
use super::transport::WebcastTransport;
use super::types::GiftInfo;

/// gift/list/ 応答をID→ギフト情報のマップに変換
///
/// `data`・`data.gifts`がない場合は空マップ。
/// 1件でもデコードできない要素があれば全体を失敗させる（部分的なカタログを返さない）。
/// IDが重複した場合は後勝ち。
fn parse_gift_catalog(response: &Value) -> Result<HashMap<i64, GiftInfo>, TransportError> {
    let gifts = match response.get("data").and_then(|data| data.get("gifts")) {
        None | Some(Value::Null) => return Ok(HashMap::new()),
        Some(gifts) => gifts,
    };

    let Some(items) = gifts.as_array() else {
        return Err(TransportError::Malformed(
            "data.gifts is not an array".to_string(),
        ));
    };

    let mut catalog = HashMap::with_capacity(items.len());
    for item in items {
        let gift = GiftInfo::deserialize(item)?;
        log::debug!("Found available gift {} with ID {}", gift.name, gift.id);
        catalog.insert(gift.id, gift);
    }
    Ok(catalog)
}

impl<T: WebcastTransport> WebcastApiClient<T> {
    /// ルームで利用可能なギフト一覧を取得する
    ///
    /// # Errors
    /// 通信失敗・不正な要素を含む応答は`Request`
    pub async fn fetch_available_gifts(&self) -> Result<HashMap<i64, GiftInfo>, WebcastError> {
        log::info!("Fetching available gifts");

        let response = self
            .transport
            .get_json_from_api(GIFT_LIST_PATH, &self.settings)
            .await
            .map_err(WebcastError::request(Operation::FetchAvailableGifts))?;

        let catalog = parse_gift_catalog(&response)
            .map_err(WebcastError::request(Operation::FetchAvailableGifts))?;

        log::info!("Found {} available gifts", catalog.len());
        Ok(catalog)
    }
}
