use crate::config::GatewaySettings;
use crate::domain::ports::{ChatMessage, Gateway};
use crate::utils::error::{AgentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// OpenAI 相容的 `/chat/completions` 介面，OpenAI 與 Groq 皆適用
pub struct ChatCompletionsGateway {
    settings: GatewaySettings,
    client: Client,
}

impl ChatCompletionsGateway {
    pub fn new(settings: GatewaySettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Gateway for ChatCompletionsGateway {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let url = self.endpoint();
        let request = ChatRequest {
            model: &self.settings.model,
            messages: &messages,
            temperature: self.settings.temperature,
        };

        tracing::debug!(
            "Calling {} with model {} ({} messages)",
            url,
            self.settings.model,
            messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Gateway response status: {}", status);

        if !status.is_success() {
            return Err(AgentError::Gateway {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AgentError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn settings_for(server: &MockServer, temperature: Option<f32>) -> GatewaySettings {
        GatewaySettings {
            base_url: server.url("/v1"),
            model: "gpt-3.5-turbo".to_string(),
            api_key: "sk-test".to_string(),
            temperature,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test")
                .json_body(serde_json::json!({
                    "model": "gpt-3.5-turbo",
                    "messages": [
                        {"role": "system", "content": "critic"},
                        {"role": "user", "content": "Paris"}
                    ]
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": "chatcmpl-1",
                    "choices": [
                        {"index": 0, "message": {"role": "assistant", "content": "Looks good.\n\n- Pack light"}}
                    ]
                }));
        });

        let gateway = ChatCompletionsGateway::new(settings_for(&server, None));
        let text = gateway
            .complete(vec![ChatMessage::system("critic"), ChatMessage::user("Paris")])
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(text, "Looks good.\n\n- Pack light");
    }

    #[tokio::test]
    async fn test_complete_sends_temperature_when_set() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .json_body_partial(r#"{"temperature": 0.5}"#);
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"content": "{}"}}]
            }));
        });

        let gateway = ChatCompletionsGateway::new(settings_for(&server, Some(0.5)));
        let text = gateway.complete(vec![ChatMessage::user("Rome")]).await.unwrap();

        api_mock.assert();
        assert_eq!(text, "{}");
    }

    #[tokio::test]
    async fn test_complete_maps_error_status() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401).body(r#"{"error": "invalid_api_key"}"#);
        });

        let gateway = ChatCompletionsGateway::new(settings_for(&server, None));
        let err = gateway.complete(vec![ChatMessage::user("Rome")]).await.unwrap_err();

        match err {
            AgentError::Gateway { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("invalid_api_key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_empty_completion() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(serde_json::json!({"choices": []}));
        });

        let gateway = ChatCompletionsGateway::new(settings_for(&server, None));
        let err = gateway.complete(vec![ChatMessage::user("Rome")]).await.unwrap_err();

        assert!(matches!(err, AgentError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_complete_with_non_json_body_is_serialization_error() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).body("<html>proxy page</html>");
        });

        let gateway = ChatCompletionsGateway::new(settings_for(&server, None));
        let err = gateway.complete(vec![ChatMessage::user("Rome")]).await.unwrap_err();

        assert!(matches!(err, AgentError::Serialization(_)));
    }
}
