// =============================================================================
// 共通設定・定数モジュール
// =============================================================================
// webcastクライアント全体で使用する接続先URL・タイムアウトなどを定義
// =============================================================================

use std::time::Duration;

/// HTTPリクエストのデフォルトタイムアウト（秒）
///
/// ライブページ取得・webcast APIへのリクエストで使用。
/// 接続単位のタイムアウトはトランスポート側の責務であり、
/// 各API操作は独自のタイムアウトを持たない。
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// ライブページを配信しているWebドメイン
pub const DEFAULT_WEB_URL: &str = "https://www.tiktok.com/";

/// webcast APIのベースURL（末尾スラッシュ付き）
pub const DEFAULT_API_URL: &str = "https://webcast.tiktok.com/webcast/";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTPリクエストのデフォルトタイムアウト（Duration）
///
/// HTTPクライアント構築時に直接使用可能
pub fn http_timeout() -> Duration {
    Duration::from_secs(HTTP_TIMEOUT_SECS)
}

/// トランスポートの接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebcastConfig {
    /// ライブページ取得先（末尾スラッシュ付き）
    pub web_url: String,
    /// webcast APIのベースURL（末尾スラッシュ付き）
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for WebcastConfig {
    fn default() -> Self {
        Self {
            web_url: DEFAULT_WEB_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: http_timeout(),
        }
    }
}

impl WebcastConfig {
    /// 環境変数で上書きした設定を作成
    ///
    /// - `WEBCAST_WEB_URL` / `WEBCAST_API_URL` / `WEBCAST_USER_AGENT`
    /// - `WEBCAST_TIMEOUT_SECS`（数値として解釈できない場合は無視）
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("WEBCAST_WEB_URL") {
            config = config.with_web_url(url);
        }
        if let Some(url) = lookup("WEBCAST_API_URL") {
            config = config.with_api_url(url);
        }
        if let Some(agent) = lookup("WEBCAST_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = lookup("WEBCAST_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => log::warn!("Ignoring invalid WEBCAST_TIMEOUT_SECS: {}", secs),
            }
        }

        config
    }

    pub fn with_web_url(mut self, url: impl Into<String>) -> Self {
        self.web_url = with_trailing_slash(url.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = with_trailing_slash(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// パス連結は単純な文字列結合のため、末尾スラッシュを保証する
fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
