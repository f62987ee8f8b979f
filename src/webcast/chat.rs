//! チャット送信（セッション認証付きの書き込み操作）

use super::client::{WebcastApiClient, CHAT_PATH};
use super::errors::{Operation, Precondition, TransportError, WebcastError};
use super::settings::{CHANNEL, CONTENT, CURSOR};
use super::transport::WebcastTransport;
use crate::util::mask_session_id;

/// チャット送信時に付与するチャネル識別子
const CHAT_CHANNEL: &str = "tiktok_web";

impl<T: WebcastTransport> WebcastApiClient<T> {
    /// チャットメッセージを送信する
    ///
    /// セッションIDは呼び出しごとに渡し、スナップショットには保存しない。
    /// 送信パラメータはスナップショットの複製にcontent・channelを加え、cursorを除いたもの。
    ///
    /// # Errors
    /// - セッションIDが空、またはroom_id未解決の場合は`MissingPrecondition`（通信しない）
    /// - 送信失敗（セッション期限切れを含む）は`Request`
    pub async fn send_chat_message(
        &mut self,
        message: &str,
        session_id: &str,
    ) -> Result<(), WebcastError> {
        if session_id.is_empty() {
            return Err(WebcastError::MissingPrecondition(Precondition::EmptySessionId));
        }
        if self.settings.room_id().is_none() {
            return Err(WebcastError::MissingPrecondition(Precondition::MissingRoomId));
        }

        log::info!(
            "Sending message to chat (session: {})",
            mask_session_id(session_id)
        );

        let mut params = self.settings.clone();
        params.set(CONTENT, message);
        params.set(CHANNEL, CHAT_CHANNEL);
        params.remove(CURSOR);

        self.transport.set_session_id(session_id);
        let result = match self.transport.post_form_to_api(CHAT_PATH, &params).await {
            Ok(status_code) => TransportError::check_status_code(status_code, String::new()),
            Err(e) => Err(e),
        };

        result.map_err(|e| {
            log::error!("Failed to send chat message: {}", e);
            WebcastError::request(Operation::SendChatMessage)(e)
        })
    }
}
