use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::Serialize;

use aifm_core::config::IntentConfig;
use aifm_core::intent::literal_filename_action;
use aifm_core::intent::parse_action_reply;
use aifm_core::intent::parse_process_reply;
use aifm_core::intent::INTENT_SYSTEM_PROMPT;
use aifm_core::IntentError;
use aifm_core::Resolution;

use crate::gateway::RemoteGateway;

/// Something that interprets a free-form utterance.
pub trait IntentService {
    fn interpret(&self, utterance: &str, context_path: &str) -> Result<Resolution, IntentError>;
}

/// Chat-completion endpoint (OpenRouter style) asked to answer with one
/// action object.
pub struct ChatCompletionService {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionService {
    /// The bearer token is read from the environment variable the config
    /// names; a missing token still sends the request unauthenticated.
    pub fn from_config(config: &IntentConfig) -> Result<Self, IntentError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!(var = %config.api_key_env, "no API key set for intent service");
        }
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| IntentError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl IntentService for ChatCompletionService {
    fn interpret(&self, utterance: &str, _context_path: &str) -> Result<Resolution, IntentError> {
        let body = ChatRequest {
            model: self.model.as_str(),
            messages: [
                ChatMessage {
                    role: "system",
                    content: INTENT_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: utterance,
                },
            ],
            max_tokens: self.max_tokens,
        };
        let mut request = self.client.post(self.endpoint.as_str()).json(&body);
        if let Some(key) = self.api_key.as_deref() {
            request = request.bearer_auth(key);
        }
        let response = request
            .send()
            .map_err(|err| IntentError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(IntentError::Status(status.as_u16()));
        }
        let reply = response
            .json::<ChatResponse>()
            .map_err(|err| IntentError::Malformed(err.to_string()))?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| IntentError::Malformed("reply has no message".to_string()))?;
        parse_action_reply(&content).map(Resolution::Action)
    }
}

/// The gateway's `/process` endpoint. It may answer with an action or with
/// the listing after applying the command itself.
pub struct GatewayIntentService<'a> {
    gateway: &'a dyn RemoteGateway,
}

impl<'a> GatewayIntentService<'a> {
    pub fn new(gateway: &'a dyn RemoteGateway) -> Self {
        Self { gateway }
    }
}

impl IntentService for GatewayIntentService<'_> {
    fn interpret(&self, utterance: &str, context_path: &str) -> Result<Resolution, IntentError> {
        let reply = self
            .gateway
            .process(utterance, context_path)
            .map_err(|err| IntentError::Transport(err.to_string()))?;
        parse_process_reply(reply)
    }
}

/// Fast path first, then the service. Every failure is terminal for the
/// utterance and resolves to `Unknown`.
pub fn resolve(
    service: Option<&dyn IntentService>,
    utterance: &str,
    context_path: &str,
) -> Resolution {
    let utterance = utterance.trim();
    if utterance.is_empty() {
        tracing::debug!(error = %IntentError::Empty, "intent unresolved");
        return Resolution::unknown();
    }
    if let Some(action) = literal_filename_action(utterance) {
        tracing::debug!(action = action.label(), "literal filename fast path");
        return Resolution::Action(action);
    }
    let Some(service) = service else {
        tracing::info!("no intent service configured");
        return Resolution::unknown();
    };
    match service.interpret(utterance, context_path) {
        Ok(resolution) => {
            if let Resolution::Action(action) = &resolution {
                tracing::info!(action = action.label(), "intent resolved");
            }
            resolution
        }
        Err(err) => {
            tracing::warn!(error = %err, "intent unresolved");
            Resolution::unknown()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::net::TcpListener;
    use std::thread;

    use aifm_core::config::IntentConfig;
    use aifm_core::FileAction;
    use aifm_core::IntentError;
    use aifm_core::Resolution;
    use pretty_assertions::assert_eq;

    use super::resolve;
    use super::ChatCompletionService;
    use super::IntentService;

    struct CountingService {
        calls: Cell<usize>,
        reply: fn() -> Result<Resolution, IntentError>,
    }

    impl IntentService for CountingService {
        fn interpret(&self, _utterance: &str, _context: &str) -> Result<Resolution, IntentError> {
            self.calls.set(self.calls.get() + 1);
            (self.reply)()
        }
    }

    fn counting(reply: fn() -> Result<Resolution, IntentError>) -> CountingService {
        CountingService {
            calls: Cell::new(0),
            reply,
        }
    }

    #[test]
    fn literal_filenames_never_reach_the_service() {
        let service = counting(|| Ok(Resolution::unknown()));
        for ext in ["pdf", "txt", "jpg", "png", "mp4", "mp3"] {
            let utterance = format!("foo.{ext}");
            match resolve(Some(&service), &utterance, "") {
                Resolution::Action(action) => {
                    assert_eq!(action.creation().map(|creation| creation.name), Some(utterance));
                }
                other => panic!("expected action, got {other:?}"),
            }
        }
        assert_eq!(service.calls.get(), 0);
    }

    #[test]
    fn service_failure_resolves_to_unknown() {
        let service = counting(|| Err(IntentError::Transport("connection refused".to_string())));
        assert_eq!(
            resolve(Some(&service), "make me a folder", ""),
            Resolution::unknown()
        );
        assert_eq!(service.calls.get(), 1);
    }

    #[test]
    fn blank_utterance_and_missing_service_resolve_to_unknown() {
        let service = counting(|| Ok(Resolution::unknown()));
        assert_eq!(resolve(Some(&service), "   ", ""), Resolution::unknown());
        assert_eq!(service.calls.get(), 0);
        assert_eq!(resolve(None, "delete a.txt", ""), Resolution::unknown());
    }

    #[test]
    fn service_answer_is_passed_through() {
        let service = counting(|| {
            Ok(Resolution::Action(FileAction::DeleteFile {
                name: "a.txt".to_string(),
            }))
        });
        assert_eq!(
            resolve(Some(&service), "get rid of a.txt", "docs/"),
            Resolution::Action(FileAction::DeleteFile {
                name: "a.txt".to_string()
            })
        );
    }

    fn chat_server(status: u16, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = tiny_http::Server::from_listener(listener, None).expect("server");
        let handle = thread::spawn(move || {
            let mut request = server.recv().expect("request");
            let mut received = String::new();
            request
                .as_reader()
                .read_to_string(&mut received)
                .expect("body");
            let auth = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.to_string())
                .unwrap_or_default();
            request
                .respond(tiny_http::Response::from_string(body).with_status_code(status))
                .expect("respond");
            format!("{auth}\n{received}")
        });
        (format!("http://{addr}/v1/chat/completions"), handle)
    }

    fn chat_service(endpoint: String) -> ChatCompletionService {
        ChatCompletionService::from_config(&IntentConfig {
            endpoint,
            api_key_env: "AIFM_TEST_UNSET_KEY".to_string(),
            ..IntentConfig::default()
        })
        .expect("client")
        .with_api_key("test-key")
    }

    #[test]
    fn chat_completion_reply_is_decoded() {
        let (url, server) = chat_server(
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"```json\n{\"action\":\"create_folder\",\"name\":\"drafts\"}\n```"}}]}"#,
        );
        let resolution = chat_service(url)
            .interpret("make a folder called drafts", "")
            .expect("interpret");
        let received = server.join().expect("server thread");

        assert_eq!(
            resolution,
            Resolution::Action(FileAction::CreateFolder {
                name: Some("drafts".to_string())
            })
        );
        let (auth, body) = received.split_once('\n').expect("auth line");
        assert_eq!(auth, "Bearer test-key");
        let body: serde_json::Value = serde_json::from_str(body).expect("json");
        assert_eq!(body["model"], "x-ai/grok-4.1-fast");
        assert_eq!(body["max_tokens"], 100);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "make a folder called drafts");
    }

    #[test]
    fn chat_completion_error_status_is_reported() {
        let (url, server) = chat_server(401, r#"{"error":"unauthorized"}"#);
        let err = chat_service(url)
            .interpret("make a folder", "")
            .expect_err("status error");
        server.join().expect("server thread");
        assert!(matches!(err, IntentError::Status(401)));
    }
}
