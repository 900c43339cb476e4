//! HfInferenceAgent - sparring partner backed by the Hugging Face Inference API.
//!
//! This agent calls the hosted text-generation endpoint directly over REST.
//! Configuration priority: ~/.config/rhetor/secret.json > environment variables

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use rhetor_infrastructure::storage::SecretStorage;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::agent::{ReplyRequest, SparringAgent};
use crate::error::InferenceError;
use crate::prompts;

pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
const BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Generated replies are capped at this many words to keep turns snappy.
pub const MAX_REPLY_WORDS: usize = 50;

const DEFAULT_MAX_NEW_TOKENS: u32 = 120;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const FEEDBACK_MAX_NEW_TOKENS: u32 = 30;
const FEEDBACK_TEMPERATURE: f32 = 0.5;

/// A hosted model known to work with the debate prompt format.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub notes: &'static str,
}

pub static AVAILABLE_MODELS: [ModelInfo; 2] = [
    ModelInfo {
        id: "mistralai/Mistral-7B-Instruct-v0.3",
        label: "Mistral 7B Instruct",
        notes: "default, strongest counter-arguments",
    },
    ModelInfo {
        id: "microsoft/DialoGPT-medium",
        label: "DialoGPT Medium",
        notes: "lighter conversational model",
    },
];

/// Looks up a catalog entry by model id.
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    AVAILABLE_MODELS.iter().find(|model| model.id == id)
}

/// Sparring agent that talks to the Hugging Face Inference API.
#[derive(Clone)]
pub struct HfInferenceAgent {
    client: Client,
    api_token: String,
    model: String,
    description: String,
    max_new_tokens: u32,
    temperature: f32,
}

impl HfInferenceAgent {
    /// Creates a new agent with the provided API token and model id.
    pub fn new(api_token: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            client: Client::new(),
            api_token: api_token.into(),
            description: format!("Hugging Face Inference API ({model})"),
            model,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Loads the API token from ~/.config/rhetor/secret.json or environment
    /// variables.
    ///
    /// Priority:
    /// 1. ~/.config/rhetor/secret.json
    /// 2. Environment variables (HF_API_TOKEN, HF_MODEL_ID)
    ///
    /// Model id defaults to `mistralai/Mistral-7B-Instruct-v0.3` when not
    /// specified.
    pub fn try_from_env() -> Result<Self, InferenceError> {
        // Try loading from SecretStorage first. A blank token means the user
        // has not filled in the template yet.
        if let Ok(storage) = SecretStorage::new() {
            if let Ok(secret) = storage.load() {
                if let Some(hf) = secret.hugging_face {
                    if !hf.api_token.trim().is_empty() {
                        return Ok(Self::new(hf.api_token, DEFAULT_MODEL));
                    }
                }
            }
        }

        // Fallback to environment variables
        let api_token = env::var("HF_API_TOKEN").map_err(|_| {
            InferenceError::Unauthorized(
                "HF_API_TOKEN not found in ~/.config/rhetor/secret.json or environment variables"
                    .into(),
            )
        })?;

        let model = env::var("HF_MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Ok(Self::new(api_token, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self.description = format!("Hugging Face Inference API ({})", self.model);
        self
    }

    /// Sets the generation budget for counter-arguments.
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Sets the sampling temperature for counter-arguments.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// The model id this agent generates with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a tiny generation request to verify connectivity, the token,
    /// and the model id.
    pub async fn ping(&self) -> Result<(), InferenceError> {
        let request = GenerateRequest {
            inputs: "Hello".to_string(),
            parameters: GenerationParameters {
                max_new_tokens: 5,
                ..self.parameters()
            },
        };
        self.send_request(&request).await.map(|_| ())
    }

    fn parameters(&self) -> GenerationParameters {
        GenerationParameters {
            max_new_tokens: self.max_new_tokens,
            temperature: self.temperature,
            top_p: 0.9,
            do_sample: true,
            return_full_text: false,
        }
    }

    async fn send_request(&self, body: &GenerateRequest) -> Result<String, InferenceError> {
        let url = format!("{BASE_URL}/{}", self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| InferenceError::Unknown(format!("inference request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(&self.model, status, &body_text, retry_after));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|err| {
            InferenceError::Unknown(format!("failed to parse inference response: {err}"))
        })?;

        extract_generated_text(parsed)
    }
}

#[async_trait]
impl SparringAgent for HfInferenceAgent {
    fn describe(&self) -> &str {
        &self.description
    }

    async fn counter_argument(&self, request: &ReplyRequest) -> Result<String, InferenceError> {
        let prompt = prompts::counter_argument_prompt(request)
            .map_err(|err| InferenceError::Unknown(format!("prompt render failed: {err}")))?;

        let body = GenerateRequest {
            inputs: prompt,
            parameters: self.parameters(),
        };

        let text = self.send_request(&body).await?;
        Ok(cap_words(&text, MAX_REPLY_WORDS))
    }

    async fn identification_feedback(
        &self,
        user_answer: &str,
        correct_answer: &str,
    ) -> Result<String, InferenceError> {
        let prompt = prompts::identification_feedback_prompt(user_answer, correct_answer)
            .map_err(|err| InferenceError::Unknown(format!("prompt render failed: {err}")))?;

        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: FEEDBACK_MAX_NEW_TOKENS,
                temperature: FEEDBACK_TEMPERATURE,
                ..self.parameters()
            },
        };

        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Serialize, Clone)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
    return_full_text: bool,
}

/// The endpoint answers with either a one-element array or a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Many(Vec<Generation>),
    One(Generation),
}

#[derive(Deserialize)]
struct Generation {
    generated_text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    estimated_time: Option<f64>,
}

fn extract_generated_text(response: GenerateResponse) -> Result<String, InferenceError> {
    let text = match response {
        GenerateResponse::Many(generations) => {
            generations.into_iter().next().map(|g| g.generated_text)
        }
        GenerateResponse::One(generation) => Some(generation.generated_text),
    };

    text.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            InferenceError::Unknown("inference endpoint returned no generated text".to_string())
        })
}

fn map_http_error(
    model: &str,
    status: StatusCode,
    body: &str,
    retry_after: Option<Duration>,
) -> InferenceError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = parsed
        .as_ref()
        .map(|b| b.error.clone())
        .unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => InferenceError::Unauthorized(message),
        StatusCode::NOT_FOUND => InferenceError::NotFound(model.to_string()),
        StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited { retry_after },
        StatusCode::SERVICE_UNAVAILABLE => InferenceError::ModelLoading {
            model: model.to_string(),
            estimated_secs: parsed.and_then(|b| b.estimated_time),
        },
        _ => InferenceError::Unknown(format!("HTTP {status}: {message}")),
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // The HTTP-date form of Retry-After is not handled
    None
}

/// Caps a reply at `max_words`, appending an ellipsis when truncated.
fn cap_words(content: &str, max_words: usize) -> String {
    let words: Vec<&str> = content.split_whitespace().collect();
    if words.len() > max_words {
        format!("{}...", words[..max_words].join(" "))
    } else {
        content.to_string()
    }
}
