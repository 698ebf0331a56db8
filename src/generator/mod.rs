//! Question source adapter: turns the provider's untrusted output into
//! validated [`Question`]s.

pub mod gemini;

use crate::config::AppConfig;
use crate::error::GenerationError;
use crate::model::Question;
use crate::quiz::GenerationRequest;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, channel};

pub const OPTIONS_PER_QUESTION: usize = 4;

static NEXT_QUESTION_ID: AtomicU64 = AtomicU64::new(1);

/// Result of one generation request, tagged with the request it answers.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub request_id: u64,
    pub result: Result<Vec<Question>, GenerationError>,
}

/// Reserves `n` consecutive ids and returns the first one.
fn reserve_ids(n: usize) -> u64 {
    NEXT_QUESTION_ID.fetch_add(n as u64, Ordering::Relaxed)
}

/// Parses the provider's JSON text. All questions must validate and there must
/// be exactly `expected` of them; otherwise nothing is returned.
pub fn parse_questions(text: &str, expected: usize) -> Result<Vec<Question>, GenerationError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| GenerationError::Malformed(e.to_string()))?;
    let items = value
        .as_array()
        .ok_or_else(|| GenerationError::Malformed("expected a JSON array of questions".into()))?;

    if items.len() != expected {
        return Err(GenerationError::WrongCount {
            expected,
            received: items.len(),
        });
    }

    let mut questions = items
        .iter()
        .enumerate()
        .map(|(i, item)| validate_question(i + 1, item))
        .collect::<Result<Vec<_>, _>>()?;

    // provider ids are never trusted
    let first_id = reserve_ids(questions.len());
    for (offset, q) in questions.iter_mut().enumerate() {
        q.id = first_id + offset as u64;
    }
    Ok(questions)
}

fn validate_question(number: usize, item: &Value) -> Result<Question, GenerationError> {
    let invalid = |reason: &str| GenerationError::InvalidQuestion {
        number,
        reason: reason.to_string(),
    };

    let obj = item.as_object().ok_or_else(|| invalid("not an object"))?;

    let text = string_field(obj, "text").ok_or_else(|| invalid("missing text"))?;
    if text.trim().is_empty() {
        return Err(invalid("empty text"));
    }

    let raw_options = obj
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("missing options"))?;
    let options = raw_options
        .iter()
        .map(|o| o.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| invalid("options must be strings"))?;
    if options.len() != OPTIONS_PER_QUESTION {
        return Err(invalid(&format!(
            "expected {OPTIONS_PER_QUESTION} options, got {}",
            options.len()
        )));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(invalid("empty option"));
    }
    let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
    if distinct.len() != options.len() {
        return Err(invalid("duplicate options"));
    }

    let correct_answer =
        string_field(obj, "correctAnswer").ok_or_else(|| invalid("missing correctAnswer"))?;
    if !options.contains(&correct_answer) {
        return Err(invalid("correctAnswer does not match any option"));
    }

    let explanation =
        string_field(obj, "explanation").ok_or_else(|| invalid("missing explanation"))?;

    Ok(Question {
        id: 0,
        text: text.trim().to_string(),
        options,
        correct_answer,
        explanation: explanation.trim().to_string(),
    })
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Asks the provider for questions and validates the answer.
#[cfg(not(target_arch = "wasm32"))]
pub fn generate(
    config: &AppConfig,
    request: &GenerationRequest,
) -> Result<Vec<Question>, GenerationError> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or(GenerationError::MissingApiKey)?;
    let text = gemini::request_questions(config, api_key, request)?;
    parse_questions(&text, request.count)
}

#[cfg(target_arch = "wasm32")]
pub async fn generate(
    config: &AppConfig,
    request: &GenerationRequest,
) -> Result<Vec<Question>, GenerationError> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or(GenerationError::MissingApiKey)?;
    let text = gemini::request_questions(config, api_key, request).await?;
    parse_questions(&text, request.count)
}

/// Runs [`generate`] off the UI thread; the outcome arrives on the receiver.
/// Dropping the receiver abandons the request.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_generation(config: AppConfig, request: GenerationRequest) -> Receiver<GenerationOutcome> {
    let (tx, rx) = channel();
    std::thread::spawn(move || {
        let result = generate(&config, &request);
        if tx
            .send(GenerationOutcome {
                request_id: request.id,
                result,
            })
            .is_err()
        {
            log::debug!("request {} finished after its receiver was dropped", request.id);
        }
    });
    rx
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_generation(config: AppConfig, request: GenerationRequest) -> Receiver<GenerationOutcome> {
    let (tx, rx) = channel();
    wasm_bindgen_futures::spawn_local(async move {
        let result = generate(&config, &request).await;
        if tx
            .send(GenerationOutcome {
                request_id: request.id,
                result,
            })
            .is_err()
        {
            log::debug!("request {} finished after its receiver was dropped", request.id);
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| {
                    json!({
                        "id": 0,
                        "text": format!("Question {i}?"),
                        "options": ["alpha", "beta", "gamma", "delta"],
                        "correctAnswer": "gamma",
                        "explanation": "Because gamma."
                    })
                })
                .collect(),
        )
    }

    fn invalid_reason(item: Value) -> String {
        match parse_questions(&Value::Array(vec![item]).to_string(), 1) {
            Err(GenerationError::InvalidQuestion { number, reason }) => {
                assert_eq!(number, 1);
                reason
            }
            other => panic!("expected InvalidQuestion, got {other:?}"),
        }
    }

    #[test]
    fn five_valid_questions_are_accepted() {
        let questions = parse_questions(&sample(5).to_string(), 5).expect("valid");
        assert_eq!(questions.len(), 5);
        for q in &questions {
            assert_eq!(q.options.len(), 4);
            assert!(q.options.contains(&q.correct_answer));
        }
    }

    #[test]
    fn provider_ids_are_replaced_with_unique_ones() {
        let first = parse_questions(&sample(3).to_string(), 3).expect("valid");
        let second = parse_questions(&sample(3).to_string(), 3).expect("valid");
        let ids: HashSet<u64> = first.iter().chain(&second).map(|q| q.id).collect();
        assert_eq!(ids.len(), 6);
        assert!(!ids.contains(&0));
        assert_eq!(first[1].id, first[0].id + 1);
    }

    #[test]
    fn unparsable_text_is_malformed() {
        assert!(matches!(
            parse_questions("not json", 1),
            Err(GenerationError::Malformed(_))
        ));
        assert!(matches!(
            parse_questions(r#"{"questions": []}"#, 1),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn wrong_count_is_rejected() {
        assert_eq!(
            parse_questions(&sample(4).to_string(), 5),
            Err(GenerationError::WrongCount {
                expected: 5,
                received: 4
            })
        );
    }

    #[test]
    fn missing_fields_are_reported() {
        let mut item = sample(1)[0].clone();
        if let Some(o) = item.as_object_mut() {
            o.remove("explanation");
        }
        assert_eq!(invalid_reason(item), "missing explanation");

        let mut item = sample(1)[0].clone();
        item["text"] = json!("   ");
        assert_eq!(invalid_reason(item), "empty text");

        let mut item = sample(1)[0].clone();
        if let Some(o) = item.as_object_mut() {
            o.remove("correctAnswer");
        }
        assert_eq!(invalid_reason(item), "missing correctAnswer");
    }

    #[test]
    fn options_must_be_four_distinct_strings() {
        let mut item = sample(1)[0].clone();
        item["options"] = json!(["a", "b", "c"]);
        assert_eq!(invalid_reason(item), "expected 4 options, got 3");

        let mut item = sample(1)[0].clone();
        item["options"] = json!(["a", "b", "b", "gamma"]);
        assert_eq!(invalid_reason(item), "duplicate options");

        let mut item = sample(1)[0].clone();
        item["options"] = json!(["a", 2, "c", "gamma"]);
        assert_eq!(invalid_reason(item), "options must be strings");
    }

    #[test]
    fn correct_answer_must_match_verbatim() {
        let mut item = sample(1)[0].clone();
        item["correctAnswer"] = json!("Gamma");
        assert_eq!(
            invalid_reason(item),
            "correctAnswer does not match any option"
        );
    }

    #[test]
    fn one_bad_question_discards_the_batch() {
        let mut batch = sample(3);
        batch[2]["options"] = json!([]);
        assert!(matches!(
            parse_questions(&batch.to_string(), 3),
            Err(GenerationError::InvalidQuestion { number: 3, .. })
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn missing_api_key_fails_before_any_request() {
        let config = AppConfig {
            endpoint: "http://127.0.0.1:9".into(),
            ..AppConfig::default()
        };
        let request = GenerationRequest {
            id: 1,
            topic: "Rust".into(),
            difficulty: crate::model::Difficulty::Easy,
            count: 5,
        };
        assert_eq!(
            generate(&config, &request),
            Err(GenerationError::MissingApiKey)
        );
    }
}
