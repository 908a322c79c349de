//! Karma 回答客户端
//!
//! 通过 OpenAI 兼容的 Chat Completions API（非流式）获取问题的回答。

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use super::types::AnswerError;
use super::AnswerProvider;
use crate::config::AppConfig;

/// 修复 base_url
///
/// - 移除末尾斜杠
/// - 修复双斜杠（保留协议部分）
fn fix_base_url(base_url: &str) -> String {
    let mut url = base_url.trim_end_matches('/').to_string();

    // 修复双斜杠（跳过协议部分）
    if let Some(pos) = url.find("://") {
        let (protocol, rest) = url.split_at(pos + 3);
        let fixed_rest = rest.replace("//", "/");
        url = format!("{}{}", protocol, fixed_rest);
    }

    url
}

/// 构建 Chat Completions 端点
fn build_chat_endpoint(base_url: &str) -> String {
    let url = fix_base_url(base_url);

    if url.ends_with("/chat/completions") {
        url
    } else if url.ends_with("/v1") {
        format!("{}/chat/completions", url)
    } else {
        format!("{}/v1/chat/completions", url)
    }
}

/// 聊天消息
#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// 请求载荷
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// 响应载荷
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Karma 回答客户端
///
/// 每个问题恰好发起一次上游调用，不缓存、不重试
pub struct KarmaClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl KarmaClient {
    /// 创建新的回答客户端
    ///
    /// api_key 允许为空，调用 answer 时才返回配置错误，
    /// 保证服务在未配置时也能启动。
    pub fn new(config: &AppConfig) -> Result<Self, AnswerError> {
        // 构建 HTTP 客户端
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(AnswerError::HttpError)?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: build_chat_endpoint(&config.base_url),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl AnswerProvider for KarmaClient {
    async fn answer(&self, question: &str) -> Result<String, AnswerError> {
        if self.api_key.is_empty() {
            return Err(AnswerError::ConfigError("API Key is required".to_string()));
        }

        // 构建请求体
        let payload = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: question.to_string(),
            }],
            stream: false,
        };

        debug!("Answer request: endpoint={}, model={}", self.endpoint, self.model);

        // 发送请求
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        // 检查状态码
        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Answer API error: status={}, body={}",
                status_code,
                &error_text[..error_text.len().min(500)]
            );
            return Err(AnswerError::ApiError {
                status: status_code,
                message: error_text,
            });
        }

        // 解析响应，取第一个 choice 的文本
        let body: ChatResponse = response.json().await?;
        let answer = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if answer.is_empty() {
            return Err(AnswerError::EmptyAnswer);
        }

        Ok(answer)
    }
}
