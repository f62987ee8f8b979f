use super::client::{WebcastApiClient, FETCH_PATH};
use super::errors::{Operation, WebcastError};
use super::transport::WebcastTransport;
use super::types::FetchResult;

impl<T: WebcastTransport> WebcastApiClient<T> {
    /// 次のメッセージバッチを取得し、ページネーション状態を進める
    ///
    /// 成功時のみcursor・internal_extを応答の値で置き換える。
    /// 空のバッチもそのまま返す。
    ///
    /// # Errors
    /// 通信・デコード失敗は`Request`（スナップショットは変更しない）
    pub async fn fetch_client_data(&mut self) -> Result<FetchResult, WebcastError> {
        log::debug!("Fetching client data (cursor: {:?})", self.settings.cursor());

        let result = self
            .transport
            .get_decoded_message_from_api(FETCH_PATH, &self.settings)
            .await
            .map_err(|e| {
                log::warn!("Failed to fetch client data: {}", e);
                WebcastError::request(Operation::FetchClientData)(e)
            })?;

        self.settings
            .set_pagination(result.cursor.as_str(), result.ack_ids.clone());

        log::debug!(
            "Fetched {} messages, next poll in {}ms",
            result.messages.len(),
            result.next_poll_interval().as_millis()
        );
        Ok(result)
    }
}
