use crate::config::AppConfig;
use crate::error::GenerationError;
use crate::model::Difficulty;
use crate::quiz::GenerationRequest;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const SYSTEM_INSTRUCTION: &str = "You are a strict educational quiz generator. \
Ensure options are factually correct and distinctive.";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest error body kept in a `GenerationError::Http`.
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

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

pub fn build_prompt(topic: &str, difficulty: Difficulty, count: usize) -> String {
    format!(
        "Generate {count} {difficulty}-level multiple-choice objective questions about \"{topic}\" for a student. \
         Include a question text, 4 distinct options, the correct answer text (must match one option exactly), \
         and a short explanation."
    )
}

fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "text": { "type": "STRING", "description": "The question text" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Array of 4 options"
                },
                "correctAnswer": { "type": "STRING", "description": "The correct option text" },
                "explanation": { "type": "STRING", "description": "Explanation of the answer" }
            },
            "required": ["text", "options", "correctAnswer", "explanation"],
            "propertyOrdering": ["text", "options", "correctAnswer", "explanation"]
        }
    })
}

fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: SYSTEM_INSTRUCTION.to_string(),
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part {
                text: build_prompt(&request.topic, request.difficulty, request.count),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: response_schema(),
        },
    }
}

pub fn endpoint_url(config: &AppConfig) -> String {
    format!(
        "{}/models/{}:generateContent",
        config.endpoint.trim_end_matches('/'),
        config.model
    )
}

/// Pulls the generated text out of a `generateContent` response body.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(GenerationError::EmptyResponse)
    } else {
        Ok(text)
    }
}

fn http_error(status: u16, body: &str) -> GenerationError {
    let body = body.trim();
    let body = match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    };
    GenerationError::Http { status, body }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn request_questions(
    config: &AppConfig,
    api_key: &str,
    request: &GenerationRequest,
) -> Result<String, GenerationError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| GenerationError::Transport(e.to_string()))?;

    let response = client
        .post(endpoint_url(config))
        .header(API_KEY_HEADER, api_key)
        .json(&build_request(request))
        .send()
        .map_err(|e| GenerationError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .map_err(|e| GenerationError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(http_error(status.as_u16(), &body));
    }
    extract_text(&body)
}

#[cfg(target_arch = "wasm32")]
pub async fn request_questions(
    config: &AppConfig,
    api_key: &str,
    request: &GenerationRequest,
) -> Result<String, GenerationError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let payload = serde_json::to_string(&build_request(request))
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&payload));

    let window = web_sys::window()
        .ok_or_else(|| GenerationError::Transport("no window in this environment".into()))?;

    let fetch_request = Request::new_with_str_and_init(&endpoint_url(config), &opts)
        .map_err(|e| GenerationError::Transport(format!("could not build request: {e:?}")))?;
    let headers = fetch_request.headers();
    headers
        .set("Content-Type", "application/json")
        .and_then(|_| headers.set(API_KEY_HEADER, api_key))
        .map_err(|e| GenerationError::Transport(format!("could not set headers: {e:?}")))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&fetch_request))
        .await
        .map_err(|e| GenerationError::Transport(format!("fetch failed: {e:?}")))?;
    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| GenerationError::Transport("fetch did not return a Response".into()))?;

    let text_promise = response
        .text()
        .map_err(|e| GenerationError::Transport(format!("could not read body: {e:?}")))?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|e| GenerationError::Transport(format!("could not read body: {e:?}")))?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        return Err(http_error(response.status(), &body));
    }
    extract_text(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            id: 7,
            topic: "Python".into(),
            difficulty: Difficulty::Easy,
            count: 3,
        }
    }

    #[test]
    fn prompt_names_count_difficulty_and_topic() {
        let prompt = build_prompt("Python", Difficulty::Easy, 3);
        assert!(prompt.starts_with("Generate 3 Easy-level multiple-choice"));
        assert!(prompt.contains("about \"Python\""));
        assert!(prompt.contains("4 distinct options"));
    }

    #[test]
    fn request_body_asks_for_schema_constrained_json() {
        let body = serde_json::to_value(build_request(&request())).expect("serialize");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        let schema = &body["generationConfig"]["responseSchema"];
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(
            schema["items"]["required"],
            json!(["text", "options", "correctAnswer", "explanation"])
        );
    }

    #[test]
    fn endpoint_url_joins_model() {
        let config = AppConfig {
            endpoint: "https://example.test/v1beta/".into(),
            model: "gemini-2.5-flash".into(),
            ..AppConfig::default()
        };
        assert_eq!(
            endpoint_url(&config),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn text_is_extracted_from_first_candidate() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"[{\"a\":"},{"text":"1}]"}]}}]}"#;
        assert_eq!(extract_text(body).expect("text"), r#"[{"a":1}]"#);
    }

    #[test]
    fn missing_text_is_an_empty_response() {
        assert_eq!(
            extract_text(r#"{"candidates":[]}"#),
            Err(GenerationError::EmptyResponse)
        );
        assert_eq!(
            extract_text(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
            Err(GenerationError::EmptyResponse)
        );
        assert!(matches!(
            extract_text("<html>"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let long = "x".repeat(1000);
        match http_error(500, &long) {
            GenerationError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.chars().count(), MAX_ERROR_BODY + 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
