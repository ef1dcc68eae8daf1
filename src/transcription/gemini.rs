//! Gemini generateContent client for transcription and summarization.
//!
//! Sends the mode's instruction prompt plus the raw audio bytes (inline,
//! base64) to the hosted Gemini model and returns the generated text. One
//! synchronous request/response per user action: no retries, no streaming.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

use crate::processing::{prompt, OutputMode};

const GEMINI_MODEL: &str = "gemini-2.5-flash";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Global HTTP client for reuse across requests (avoids TLS handshake overhead)
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

fn get_http_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Errors that can occur during an inference call
#[derive(Debug)]
pub enum InferenceError {
    /// No Gemini API key available
    MissingApiKey,
    /// The uploaded audio payload was empty
    EmptyAudio,
    /// Network/HTTP error
    NetworkError(String),
    /// Gemini API returned an error
    ApiError { status: u16, message: String },
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::MissingApiKey => {
                write!(
                    f,
                    "Gemini API key not configured. Enter one in the app or set GEMINI_API_KEY."
                )
            }
            InferenceError::EmptyAudio => write!(f, "Audio payload is empty"),
            InferenceError::NetworkError(e) => write!(f, "Network error: {}", e),
            InferenceError::ApiError { status, message } => {
                write!(f, "Gemini API error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for InferenceError {}

/// Request body for the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

/// Response from the generateContent endpoint (text fields only)
#[derive(Debug, Deserialize)]
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
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini API error response
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn build_request(instruction: &str, audio: &[u8], mime_type: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: instruction.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: BASE64.encode(audio),
                    },
                },
            ],
        }],
    }
}

/// Concatenated text parts of the first candidate, or None if the response
/// carries no text.
fn response_text(body: &str) -> Option<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body).ok()?;
    let content = parsed.candidates.into_iter().next()?.content?;

    let mut out = String::new();
    for part in content.parts {
        if let Some(text) = part.text {
            out.push_str(&text);
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Run one inference call: instruction for `mode` plus the audio payload.
///
/// # Returns
/// * `Ok(String)` - The generated text. If the response carried no text
///   part, the raw response body is returned instead; a textless response is
///   unusual but not an error.
/// * `Err(InferenceError)` - Error details
pub async fn process(
    audio: &[u8],
    mime_type: &str,
    mode: OutputMode,
    api_key: &str,
) -> Result<String, InferenceError> {
    if api_key.is_empty() {
        return Err(InferenceError::MissingApiKey);
    }
    if audio.is_empty() {
        return Err(InferenceError::EmptyAudio);
    }

    let instruction = prompt::instruction_for(mode);
    let request = build_request(instruction, audio, mime_type);

    log::info!(
        "Sending {} bytes of {} audio to {} (mode: {:?})",
        audio.len(),
        mime_type,
        GEMINI_MODEL,
        mode
    );

    let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, GEMINI_MODEL);

    // Make API request using shared client
    let response = get_http_client()
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| InferenceError::NetworkError(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| InferenceError::NetworkError(e.to_string()))?;

    if status.is_success() {
        let text = response_text(&body).unwrap_or(body);
        log::info!("Inference successful: {} chars", text.len());
        Ok(text)
    } else {
        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(parsed) => parsed.error.message,
            Err(_) => body,
        };

        log::error!("Gemini API error ({}): {}", status.as_u16(), message);

        Err(InferenceError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}
