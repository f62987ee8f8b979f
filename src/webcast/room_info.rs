use serde_json::Value;

use super::client::{WebcastApiClient, ROOM_INFO_PATH};
use super::errors::{Operation, TransportError, WebcastError};
use super::transport::WebcastTransport;
use super::types::RoomStatus;

/// room/info/ 応答からステータスを取り出す
///
/// `data`・`data.status`がない（またはnull）場合は不明ステータス。
/// 整数でないステータスは不正な応答として扱う。
fn parse_room_status(response: &Value) -> Result<RoomStatus, TransportError> {
    let status = match response.get("data").and_then(|data| data.get("status")) {
        None | Some(Value::Null) => return Ok(RoomStatus::default()),
        Some(status) => status,
    };

    status
        .as_i64()
        .map(RoomStatus::new)
        .ok_or_else(|| TransportError::Malformed(format!("room status is not an integer: {}", status)))
}

impl<T: WebcastTransport> WebcastApiClient<T> {
    /// 現在のルーム状態を取得する
    ///
    /// # Errors
    /// 通信失敗・不正な応答の場合は`Request`。データなしはエラーにしない。
    pub async fn fetch_room_info(&self) -> Result<RoomStatus, WebcastError> {
        log::info!("Fetching room info");

        let response = self
            .transport
            .get_json_from_api(ROOM_INFO_PATH, &self.settings)
            .await
            .map_err(WebcastError::request(Operation::FetchRoomInfo))?;

        let status =
            parse_room_status(&response).map_err(WebcastError::request(Operation::FetchRoomInfo))?;

        log::info!("Room info status -> {}", status.code);
        Ok(status)
    }
}
