use async_openai::{
    Client as OpenAiClient,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use crate::config::{CompletionConfig, PROVIDER_COMPATIBLE, PROVIDER_OPENAI};
use crate::error::{ExpungementError, Result};
use crate::models::{ChatMessage, ChatRequest, ChatResponse, Choice};

/// One synchronous round trip to a chat-completion endpoint.
///
/// Implementations make exactly one call per invocation and surface every
/// failure as an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse>;
}

/// Build the transport named by `cfg.provider`
pub fn from_config(cfg: &CompletionConfig) -> Result<Arc<dyn Transport>> {
    match cfg.provider.as_str() {
        PROVIDER_OPENAI => Ok(Arc::new(OpenAiTransport::new(
            cfg.api_key.clone(),
            cfg.api_base.clone(),
        ))),
        PROVIDER_COMPATIBLE => Ok(Arc::new(CompatibleTransport::new(
            cfg.api_key.clone(),
            cfg.api_base.clone(),
        ))),
        other => Err(ExpungementError::Config(format!(
            "Unknown completion provider '{other}'"
        ))),
    }
}

/// OpenAI chat completions through the async-openai client
pub struct OpenAiTransport {
    client: OpenAiClient<OpenAIConfig>,
}

impl OpenAiTransport {
    pub fn new(api_key: String, api_base: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Self {
            client: OpenAiClient::with_config(config),
        }
    }

    fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
        let message: ChatCompletionRequestMessage = match msg.role.as_str() {
            "system" => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()?
                .into(),
            "assistant" => ChatCompletionRequestAssistantMessageArgs::default()
                .content(msg.content.clone())
                .build()?
                .into(),
            _ => ChatCompletionRequestUserMessageArgs::default()
                .content(msg.content.clone())
                .build()?
                .into(),
        };
        Ok(message)
    }
}

#[async_trait]
impl Transport for OpenAiTransport {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let messages = req
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(req.model.clone())
            .messages(messages)
            .build()?;

        let response = self.client.chat().create(request).await?;

        Ok(ChatResponse {
            choices: response
                .choices
                .into_iter()
                .map(|choice| Choice {
                    message: ChatMessage {
                        role: "assistant".to_string(),
                        content: choice.message.content.unwrap_or_default(),
                    },
                })
                .collect(),
        })
    }
}

/// Any OpenAI-compatible endpoint over plain HTTP (Groq, local servers)
pub struct CompatibleTransport {
    client: Client,
    api_key: String,
    url: String,
}

impl CompatibleTransport {
    pub fn new(api_key: String, api_base: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            url: format!("{}/chat/completions", api_base.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl Transport for CompatibleTransport {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ExpungementError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
