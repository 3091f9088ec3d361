//! Gemini `generateContent` 客户端
//!
//! 实现 [`TextGenerator`]，每次调用只发送一个请求，不做重试

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::NuanceConfig;
use crate::error::{Result, TranslationError};
use crate::translation_error;
use crate::translator::TextGenerator;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn build_request_body<'a>(prompt: &'a str, system_instruction: &'a str) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: prompt }],
        }],
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: system_instruction,
            }],
        },
    }
}

/// 拼接第一个候选结果中的全部文本片段
fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// 从错误响应体中提取可读消息，解析失败时退回原始文本
fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

/// Gemini 客户端
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: url::Url,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// 根据配置创建客户端
    ///
    /// 未设置超时时沿用reqwest默认行为
    pub fn new(config: &NuanceConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                translation_error!(
                    config,
                    "api_key",
                    "missing API key (set GEMINI_API_KEY or pass --api-key)"
                )
            })?
            .to_string();

        let endpoint = Self::endpoint_for(config.api_base(), config.model())?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model().to_string(),
        })
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    pub fn endpoint_for(api_base: &str, model: &str) -> Result<url::Url> {
        let base = url::Url::parse(api_base)
            .map_err(|e| translation_error!(config, "api_base", e))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(translation_error!(
                config,
                "api_base",
                format!("unsupported scheme: {}", base.scheme())
            ));
        }

        let path = format!(
            "{}/{}/models/{}:generateContent",
            base.path().trim_end_matches('/'),
            crate::api_constants::api_config::API_VERSION,
            model
        );
        let mut endpoint = base;
        endpoint.set_path(&path);
        Ok(endpoint)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String> {
        debug!(
            "🤖 调用模型 {}: 提示词 {} 字符",
            self.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&build_request_body(prompt, system_instruction))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            warn!("❌ 模型API返回错误状态: {}", status);
            return Err(TranslationError::ModelApi {
                status_code: status.as_u16(),
                message,
                api_url: self.endpoint.to_string(),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(extract_text(parsed))
    }
}
