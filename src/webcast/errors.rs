use std::fmt;

use thiserror::Error;

/// ホストが返す「セッション期限切れ」のステータスコード
pub const SESSION_EXPIRED_STATUS_CODE: i64 = 20003;

/// トランスポート層のエラー（HTTP・デコード・ホスト応答）
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Session id has expired, please provide a new one")]
    SessionExpired,

    #[error("Host responded with status code {status_code}: {message}")]
    Api { status_code: i64, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to decode message: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// ホスト応答のstatus_codeを検査する
    ///
    /// `0`のみ成功。`SESSION_EXPIRED_STATUS_CODE`は`SessionExpired`、それ以外は`Api`。
    pub fn check_status_code(status_code: i64, message: String) -> Result<(), Self> {
        match status_code {
            0 => Ok(()),
            SESSION_EXPIRED_STATUS_CODE => {
                log::warn!("Host reported an expired session");
                Err(TransportError::SessionExpired)
            }
            status_code => {
                log::warn!("Host rejected request: {} - {}", status_code, message);
                Err(TransportError::Api {
                    status_code,
                    message,
                })
            }
        }
    }
}

/// 呼び出し側が満たすべき前提条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    EmptySessionId,
    MissingRoomId,
    EmptyUserName,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Precondition::EmptySessionId => "session id must not be empty",
            Precondition::MissingRoomId => "room id must be resolved before this call",
            Precondition::EmptyUserName => "user name must not be empty",
        };
        f.write_str(text)
    }
}

/// 失敗したAPI操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchRoomId,
    SendChatMessage,
    FetchRoomInfo,
    FetchClientData,
    FetchAvailableGifts,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operation::FetchRoomId => "fetch room id",
            Operation::SendChatMessage => "send chat message",
            Operation::FetchRoomInfo => "fetch room info",
            Operation::FetchClientData => "fetch client data",
            Operation::FetchAvailableGifts => "fetch available gifts",
        };
        f.write_str(text)
    }
}

/// webcast API操作のエラー
///
/// - `MissingPrecondition`: 入力・事前状態の不足（ネットワークアクセスなし）
/// - `HostOffline`: ページからroom_idを抽出できなかった（配信者がオフライン、または名前の誤り）
/// - `Request`: トランスポート・デコードの失敗（原因を保持）
#[derive(Error, Debug)]
pub enum WebcastError {
    #[error("Missing precondition: {0}")]
    MissingPrecondition(Precondition),

    #[error("Unable to fetch room id for '{user_name}', live host could be offline or name is misspelled")]
    HostOffline { user_name: String },

    #[error("Failed to {operation}: {source}")]
    Request {
        operation: Operation,
        source: TransportError,
    },
}

impl WebcastError {
    /// `map_err`用: トランスポートエラーを指定操作のRequestエラーに包む
    pub fn request(operation: Operation) -> impl FnOnce(TransportError) -> Self {
        move |source| WebcastError::Request { operation, source }
    }

    /// 失敗した操作（Requestエラーのみ）
    pub fn operation(&self) -> Option<Operation> {
        match self {
            WebcastError::Request { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// セッション期限切れが原因かどうか
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            WebcastError::Request {
                source: TransportError::SessionExpired,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_request_error_keeps_source() {
        let err = WebcastError::request(Operation::FetchRoomInfo)(TransportError::Status(503));

        assert_eq!(err.operation(), Some(Operation::FetchRoomInfo));
        assert_eq!(
            err.to_string(),
            "Failed to fetch room info: Unexpected HTTP status: 503"
        );

        let source = err.source().expect("source should be chained");
        let transport = source
            .downcast_ref::<TransportError>()
            .expect("source should be a TransportError");
        assert!(matches!(transport, TransportError::Status(503)));
    }

    #[test]
    fn test_is_session_expired() {
        let expired = WebcastError::request(Operation::SendChatMessage)(TransportError::SessionExpired);
        assert!(expired.is_session_expired());

        let other = WebcastError::request(Operation::SendChatMessage)(TransportError::Api {
            status_code: 1,
            message: "denied".to_string(),
        });
        assert!(!other.is_session_expired());

        let precondition = WebcastError::MissingPrecondition(Precondition::EmptySessionId);
        assert!(!precondition.is_session_expired());
        assert_eq!(precondition.operation(), None);
    }

    #[test]
    fn test_check_status_code() {
        assert!(TransportError::check_status_code(0, String::new()).is_ok());
        assert!(matches!(
            TransportError::check_status_code(SESSION_EXPIRED_STATUS_CODE, String::new()),
            Err(TransportError::SessionExpired)
        ));
        match TransportError::check_status_code(4003, "too fast".to_string()) {
            Err(TransportError::Api {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 4003);
                assert_eq!(message, "too fast");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_host_offline_message() {
        let err = WebcastError::HostOffline {
            user_name: "someone".to_string(),
        };
        assert!(err.to_string().contains("'someone'"));
        assert!(err.source().is_none());
    }
}
