use crate::message::Message;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("request to the model failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model endpoint returned {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("model returned an empty response")]
    EmptyResponse,
}

impl ModelError {
    /// Whether the same request could reasonably succeed if sent again.
    /// Nothing in this crate retries; callers decide.
    pub fn is_transient(&self) -> bool {
        match self {
            ModelError::Transport(e) => e.is_timeout() || e.is_connect(),
            ModelError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            ModelError::EmptyResponse => false,
        }
    }
}

// The text-generation service both phases talk to. It is treated as stateless:
// every call carries the full system prompt and history it needs.
//
// `#[cfg_attr(test, automock)]` generates `MockModelCapability` for unit tests so
// the session and generator can be exercised without network calls.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelCapability: Send + Sync {
    async fn invoke(
        &self,
        system_prompt: &str,
        history: &[Message],
        user_message: &str,
    ) -> Result<String, ModelError>;
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LlmResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// [`ModelCapability`] backed by an OpenAI-compatible chat completions endpoint.
pub struct ChatCompletionsClient {
    client: Client,
    api_key: SecretString,
    settings: ModelSettings,
}

impl ChatCompletionsClient {
    pub fn new(api_key: SecretString, settings: ModelSettings) -> Result<Self, ModelError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            api_key,
            settings,
        })
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ModelCapability for ChatCompletionsClient {
    async fn invoke(
        &self,
        system_prompt: &str,
        history: &[Message],
        user_message: &str,
    ) -> Result<String, ModelError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(serde_json::json!({ "role": "system", "content": system_prompt }));
        for message in history {
            messages.push(serde_json::json!({
                "role": message.role().as_str(),
                "content": message.content(),
            }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": user_message }));

        let body = serde_json::json!({
            "model": self.settings.model,
            "temperature": self.settings.temperature,
            "messages": messages,
        });

        tracing::debug!(
            model = %self.settings.model,
            history = history.len(),
            "sending chat completion request"
        );

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(ModelError::Api { status, body });
        }

        let resp = resp.json::<LlmResponse>().await?;
        let answer = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ModelError::EmptyResponse)?;

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn completions(
        State(seen): State<Seen>,
        headers: axum::http::HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        seen.lock().unwrap().push((auth, body));
        Json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Who attended the meeting?" } }
            ]
        }))
    }

    async fn rate_limited() -> (AxumStatus, &'static str) {
        (AxumStatus::TOO_MANY_REQUESTS, "slow down")
    }

    async fn no_choices() -> Json<Value> {
        Json(json!({ "choices": [] }))
    }

    // Starts a throwaway chat completions endpoint and returns its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn client_for(base_url: String) -> ChatCompletionsClient {
        let settings = ModelSettings {
            base_url,
            model: "test-model".to_string(),
            temperature: 0.2,
            timeout: Duration::from_secs(5),
        };
        ChatCompletionsClient::new(SecretString::from("sk-test".to_string()), settings).unwrap()
    }

    #[tokio::test]
    async fn test_invoke_sends_system_history_and_user_message() {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(seen.clone());
        let client = client_for(serve(app).await);

        let history = vec![
            Message::user("hi"),
            Message::assistant("What is the company name?"),
        ];
        let reply = client
            .invoke("be brief", &history, "Acme Corp")
            .await
            .unwrap();
        assert_eq!(reply, "Who attended the meeting?");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], "test-model");
        assert_eq!(
            body["messages"],
            json!([
                { "role": "system", "content": "be brief" },
                { "role": "user", "content": "hi" },
                { "role": "assistant", "content": "What is the company name?" },
                { "role": "user", "content": "Acme Corp" },
            ])
        );
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_api_error() {
        let app = Router::new().route("/v1/chat/completions", post(rate_limited));
        let client = client_for(serve(app).await);

        let err = client.invoke("sys", &[], "hello").await.unwrap_err();
        match &err {
            ModelError::Api { status, body } => {
                assert_eq!(*status, StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(body, "slow down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_missing_choices_is_empty_response() {
        let app = Router::new().route("/v1/chat/completions", post(no_choices));
        let client = client_for(serve(app).await);

        let err = client.invoke("sys", &[], "hello").await.unwrap_err();
        assert!(matches!(err, ModelError::EmptyResponse));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_truncated_error_body_is_noted() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // A raw socket that promises a longer body than it sends, then hangs up.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request_is_complete(&request) {
                    break;
                }
            }
            socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\n\r\npartial")
                .await
                .unwrap();
        });
        let client = client_for(format!("http://{addr}/v1"));

        let err = client.invoke("sys", &[], "hello").await.unwrap_err();
        match err {
            ModelError::Api { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert!(body.starts_with("<unreadable body: "), "got {body:?}");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    // Headers received and the declared body length read in full.
    fn request_is_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let declared = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        body.len() >= declared
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = client_for("http://localhost:9999/v1/".to_string());
        assert_eq!(client.endpoint(), "http://localhost:9999/v1/chat/completions");
    }

    // Makes a live call to the configured provider. Ignored by default; run with
    // `cargo test -- --ignored` and OPENAI_API_KEY set.
    #[tokio::test]
    #[ignore]
    async fn test_live_interview_opening() {
        let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
        let client =
            ChatCompletionsClient::new(SecretString::from(api_key), ModelSettings::default())
                .unwrap();
        let reply = client
            .invoke(crate::prompts::INTERVIEW_PROMPT, &[], "hi")
            .await
            .expect("live call failed");
        assert!(!reply.trim().is_empty());
    }
}
