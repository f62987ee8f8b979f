//! テスト用のスクリプト式トランスポート

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::errors::TransportError;
use super::settings::ClientSettings;
use super::transport::WebcastTransport;
use super::types::FetchResult;

/// 記録されたトランスポート呼び出し
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchPage(String),
    PostForm(String, ClientSettings),
    GetJson(String, ClientSettings),
    GetDecoded(String, ClientSettings),
    SetSessionId(String),
}

#[derive(Default)]
struct Script {
    pages: VecDeque<Result<String, TransportError>>,
    posts: VecDeque<Result<i64, TransportError>>,
    json: HashMap<String, VecDeque<Result<serde_json::Value, TransportError>>>,
    fetches: VecDeque<Result<FetchResult, TransportError>>,
}

/// 応答を順に返し、すべての呼び出しを記録するモック
///
/// スクリプトが尽きた場合は`Status(599)`を返す。
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, page: Result<String, TransportError>) {
        self.script.lock().unwrap().pages.push_back(page);
    }

    pub fn push_post(&self, result: Result<i64, TransportError>) {
        self.script.lock().unwrap().posts.push_back(result);
    }

    pub fn push_json(&self, path: &str, result: Result<serde_json::Value, TransportError>) {
        self.script
            .lock()
            .unwrap()
            .json
            .entry(path.to_string())
            .or_default()
            .push_back(result);
    }

    pub fn push_fetch(&self, result: Result<FetchResult, TransportError>) {
        self.script.lock().unwrap().fetches.push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn exhausted<T>() -> Result<T, TransportError> {
    Err(TransportError::Status(599))
}

#[async_trait]
impl WebcastTransport for MockTransport {
    async fn fetch_page(&self, user_name: &str) -> Result<String, TransportError> {
        self.record(Call::FetchPage(user_name.to_string()));
        self.script
            .lock()
            .unwrap()
            .pages
            .pop_front()
            .unwrap_or_else(exhausted)
    }

    async fn post_form_to_api(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<i64, TransportError> {
        self.record(Call::PostForm(path.to_string(), params.clone()));
        self.script
            .lock()
            .unwrap()
            .posts
            .pop_front()
            .unwrap_or_else(exhausted)
    }

    async fn get_json_from_api(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<serde_json::Value, TransportError> {
        self.record(Call::GetJson(path.to_string(), params.clone()));
        self.script
            .lock()
            .unwrap()
            .json
            .get_mut(path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(exhausted)
    }

    async fn get_decoded_message_from_api(
        &self,
        path: &str,
        params: &ClientSettings,
    ) -> Result<FetchResult, TransportError> {
        self.record(Call::GetDecoded(path.to_string(), params.clone()));
        self.script
            .lock()
            .unwrap()
            .fetches
            .pop_front()
            .unwrap_or_else(exhausted)
    }

    fn set_session_id(&mut self, session_id: &str) {
        self.record(Call::SetSessionId(session_id.to_string()));
    }
}
