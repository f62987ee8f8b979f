//! HTTPトランスポート
//!
//! API操作から見た外部協力者。接続・Cookie・ヘッダー・セッションCookieの注入を担当し、
//! 生テキスト・JSON・デコード済みメッセージを返す。

use async_trait::async_trait;
use prost::Message as _;
use reqwest::{header, Client, Response, Url};
use serde::Deserialize;

use super::errors::TransportError;
use super::settings::ClientSettings;
use super::types::{FetchResult, WebcastResponse};
use crate::config::WebcastConfig;
use crate::util::mask_session_id;

/// API操作が依存するトランスポート
///
/// 取得系は`&self`、セッション注入のみ`&mut self`。
#[async_trait]
pub trait WebcastTransport: Send + Sync {
    /// 配信者のライブページを取得（未認証GET）
    async fn fetch_page(&self, user_name: &str) -> Result<String, TransportError>;

    /// APIへフォームをPOST（セッションCookie付き）し、ホストのステータスコードを返す
    async fn post_form_to_api(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<i64, TransportError>;

    /// APIからJSONを取得
    async fn get_json_from_api(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<serde_json::Value, TransportError>;

    /// APIからprotobufのメッセージバッチを取得・デコード
    async fn get_decoded_message_from_api(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<FetchResult, TransportError>;

    /// 以後のリクエストで送るセッションCookieを設定
    fn set_session_id(&mut self, session_id: &str);
}

/// POST応答のエンベロープ
#[derive(Debug, Deserialize)]
struct PostResponse {
    status_code: Option<i64>,
    data: Option<PostResponseData>,
}

#[derive(Debug, Deserialize)]
struct PostResponseData {
    message: Option<String>,
}

/// reqwestベースのトランスポート
pub struct HttpTransport {
    client: Client,
    config: WebcastConfig,
    session_id: Option<String>,
}

impl HttpTransport {
    /// 新しいトランスポートを作成
    ///
    /// # Errors
    /// HTTPクライアントのビルドに失敗した場合にエラーを返す
    pub fn new(config: WebcastConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            session_id: None,
        })
    }

    pub fn config(&self) -> &WebcastConfig {
        &self.config
    }

    pub fn has_session_id(&self) -> bool {
        self.session_id.is_some()
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path.trim_start_matches('/'))
    }

    /// 配信ページのURL（`{web_url}@{user_name}/live`）
    ///
    /// ユーザー名は1つのパスセグメントとしてパーセントエンコードする。
    fn page_url(&self, user_name: &str) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.config.web_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", self.config.web_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.config.web_url.clone()))?
            .pop_if_empty()
            .push(&format!("@{}", user_name))
            .push("live");
        Ok(url)
    }

    fn session_cookie(&self) -> Option<String> {
        self.session_id
            .as_ref()
            .map(|id| format!("sessionid={id}; sessionid_ss={id}; sid_tt={id}"))
    }

    async fn api_get(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<Response, TransportError> {
        let url = self.api_url(path);
        log::debug!("GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .query(&params.to_pairs())
            .header(header::REFERER, self.config.web_url.as_str());
        if let Some(cookie) = self.session_cookie() {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        ensure_success(response).await
    }
}

/// 非成功ステータスをエラーに変換
async fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log::error!("Webcast request failed: {} - {}", status, body);
    Err(TransportError::Status(status.as_u16()))
}

#[async_trait]
impl WebcastTransport for HttpTransport {
    async fn fetch_page(&self, user_name: &str) -> Result<String, TransportError> {
        let url = self.page_url(user_name)?;
        log::info!("Fetching live page: {}", url);

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.text().await?)
    }

    async fn post_form_to_api(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<i64, TransportError> {
        let url = self.api_url(path);
        log::debug!("POST {}", url);

        let mut request = self
            .client
            .post(&url)
            .form(&params.to_pairs())
            .header(header::REFERER, self.config.web_url.as_str())
            .header(header::ORIGIN, self.config.web_url.trim_end_matches('/'));
        if let Some(cookie) = self.session_cookie() {
            request = request.header(header::COOKIE, cookie);
        }

        let response = ensure_success(request.send().await?).await?;
        let parsed: PostResponse = response.json().await?;

        let Some(status_code) = parsed.status_code else {
            log::error!("POST response has no status_code");
            return Err(TransportError::Malformed(
                "missing status_code in response".to_string(),
            ));
        };
        let message = parsed
            .data
            .and_then(|data| data.message)
            .unwrap_or_default();
        TransportError::check_status_code(status_code, message)?;
        Ok(status_code)
    }

    async fn get_json_from_api(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<serde_json::Value, TransportError> {
        let response = self.api_get(path, params).await?;
        Ok(response.json::<serde_json::Value>().await?)
    }

    async fn get_decoded_message_from_api(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<FetchResult, TransportError> {
        let response = self.api_get(path, params).await?;
        let bytes = response.bytes().await?;
        let decoded = WebcastResponse::decode(bytes)?;
        Ok(FetchResult::from(decoded))
    }

    fn set_session_id(&mut self, session_id: &str) {
        log::debug!("Session id set: {}", mask_session_id(session_id));
        self.session_id = Some(session_id.to_string());
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("web_url", &self.config.web_url)
            .field("api_url", &self.config.api_url)
            .field(
                "session_id",
                &self.session_id.as_deref().map(mask_session_id),
            )
            .finish()
    }
}
