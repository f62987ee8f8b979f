//! webcast APIクライアント本体
//!
//! 5つのAPI操作（room_id解決・チャット送信・ルーム情報・メッセージ取得・ギフト一覧）は
//! それぞれ別ファイルの`impl`ブロックで定義する。互いに呼び合わず、
//! 呼び出し順序は利用側が決める。

use super::errors::TransportError;
use super::settings::ClientSettings;
use super::transport::{HttpTransport, WebcastTransport};
use crate::config::WebcastConfig;

pub(crate) const CHAT_PATH: &str = "room/chat/";
pub(crate) const ROOM_INFO_PATH: &str = "room/info/";
pub(crate) const FETCH_PATH: &str = "im/fetch/";
pub(crate) const GIFT_LIST_PATH: &str = "gift/list/";

/// webcast APIクライアント
///
/// 設定スナップショットを所有する。スナップショットを変更する操作は`&mut self`を取るため、
/// 1インスタンスあたり同時に実行できる呼び出しは1つだけ。
/// タスク間で共有する場合は`Arc<Mutex<_>>`で包むこと。
pub struct WebcastApiClient<T: WebcastTransport> {
    pub(crate) transport: T,
    pub(crate) settings: ClientSettings,
}

impl<T: WebcastTransport> WebcastApiClient<T> {
    pub fn new(transport: T, settings: ClientSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// 現在のセッション状態
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// ホスト固有パラメータの追加など、呼び出し間で状態を調整する場合に使う
    pub fn settings_mut(&mut self) -> &mut ClientSettings {
        &mut self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_parts(self) -> (T, ClientSettings) {
        (self.transport, self.settings)
    }
}

impl WebcastApiClient<HttpTransport> {
    /// HTTPトランスポートと既定パラメータでクライアントを作成
    ///
    /// # Errors
    /// HTTPクライアントのビルドに失敗した場合にエラーを返す
    pub fn from_config(config: WebcastConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(transport, ClientSettings::with_defaults()))
    }
}

impl<T: WebcastTransport> std::fmt::Debug for WebcastApiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebcastApiClient")
            .field("room_id", &self.settings.room_id())
            .field("cursor", &self.settings.cursor())
            .field("params", &self.settings.len())
            .finish()
    }
}
