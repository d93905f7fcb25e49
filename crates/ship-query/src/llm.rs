//! Language model collaborator.
//!
//! Questions the direct engine cannot route are sent to a chat-completions
//! endpoint together with the rendered manifest context.

use std::time::Duration;

use polars::prelude::DataFrame;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use ship_model::ColumnMapping;
use tracing::{debug, info};

use crate::context::{
    ANSWER_SYSTEM_PROMPT, SUMMARY_SYSTEM_PROMPT, question_prompt, render_context, summary_prompt,
};
use crate::engine::QueryEngine;
use crate::error::{QueryError, Result};

/// Default chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Anything that can turn a system and user prompt into text.
pub trait LanguageModel {
    fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Chat-completions request settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 1000,
            timeout_secs: 60,
        }
    }
}

/// Blocking client for an OpenAI-compatible chat-completions API.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    settings: LlmSettings,
}

impl OpenAiClient {
    /// Creates a client with an explicit API key.
    pub fn new(api_key: impl Into<String>, settings: LlmSettings) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(QueryError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            settings,
        })
    }

    /// Creates a client with the key from `OPENAI_API_KEY`.
    pub fn from_env(settings: LlmSettings) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| QueryError::MissingApiKey)?;
        Self::new(api_key, settings)
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Trimmed text of the first choice.
    fn into_content(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(QueryError::EmptyResponse)
    }
}

impl LanguageModel for OpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        debug!(
            model = %self.settings.model,
            prompt_chars = user.len(),
            "Sending completion request"
        );
        let response = self
            .client
            .post(&self.settings.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QueryError::Api { status, message });
        }

        let parsed: ChatResponse = response.json()?;
        parsed.into_content()
    }
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Computed from the manifest.
    Direct,
    /// Generated by the language model.
    Model,
}

impl AnswerSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Model => "model",
        }
    }
}

/// An answer and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

/// Answers directly when possible, otherwise asks `model`.
///
/// # Errors
///
/// Fails with [`QueryError::ModelUnavailable`] when the question needs a model
/// and none is given, or with the model's own error.
pub fn ask(
    engine: &QueryEngine,
    model: Option<&dyn LanguageModel>,
    df: &DataFrame,
    mapping: &ColumnMapping,
    question: &str,
) -> Result<Answer> {
    if let Some(text) = engine.answer_direct(df, mapping, question) {
        return Ok(Answer {
            text,
            source: AnswerSource::Direct,
        });
    }
    let Some(model) = model else {
        return Err(QueryError::ModelUnavailable {
            question: question.to_string(),
        });
    };
    info!("Question not answerable directly, asking language model");
    let context = render_context(df, mapping);
    let text = model.complete(ANSWER_SYSTEM_PROMPT, &question_prompt(&context, question))?;
    Ok(Answer {
        text,
        source: AnswerSource::Model,
    })
}

/// Asks `model` for a summary of the manifest.
pub fn summarize(
    model: &dyn LanguageModel,
    df: &DataFrame,
    mapping: &ColumnMapping,
) -> Result<String> {
    let context = render_context(df, mapping);
    model.complete(SUMMARY_SYSTEM_PROMPT, &summary_prompt(&context))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDate;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    use super::*;

    struct Recording {
        prompts: RefCell<Vec<String>>,
    }

    impl LanguageModel for Recording {
        fn complete(&self, _system: &str, user: &str) -> Result<String> {
            self.prompts.borrow_mut().push(user.to_string());
            Ok("model answer".to_string())
        }
    }

    fn manifest() -> DataFrame {
        DataFrame::new(vec![
            Series::new("carrier".into(), vec!["UPS", "DHL"]).into_column(),
        ])
        .unwrap()
    }

    fn engine() -> QueryEngine {
        QueryEngine::with_today(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn test_direct_answer_skips_model() {
        let model = Recording {
            prompts: RefCell::new(Vec::new()),
        };
        let answer = ask(
            &engine(),
            Some(&model),
            &manifest(),
            &ColumnMapping::new(),
            "What is the total number of shipments?",
        )
        .unwrap();
        assert_eq!(answer.source, AnswerSource::Direct);
        assert!(model.prompts.borrow().is_empty());
    }

    #[test]
    fn test_fallback_sends_context() {
        let model = Recording {
            prompts: RefCell::new(Vec::new()),
        };
        let answer = ask(
            &engine(),
            Some(&model),
            &manifest(),
            &ColumnMapping::new(),
            "Which lanes look risky?",
        )
        .unwrap();
        assert_eq!(answer.source, AnswerSource::Model);
        assert_eq!(answer.text, "model answer");
        let prompts = model.prompts.borrow();
        assert!(prompts[0].starts_with("Question: Which lanes look risky?"));
        assert!(prompts[0].contains("- Total Shipments: 2"));
    }

    #[test]
    fn test_fallback_without_model() {
        let err = ask(
            &engine(),
            None,
            &manifest(),
            &ColumnMapping::new(),
            "Which lanes look risky?",
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: DEFAULT_MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: "be brief",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
            temperature: 0.5,
            max_tokens: 10,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["max_tokens"], 10);
    }

    #[test]
    fn test_response_content_is_trimmed() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Looks fine.\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.into_content().unwrap(), "Looks fine.");

        let empty: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(empty.into_content(), Err(QueryError::EmptyResponse)));

        let none: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(none.into_content(), Err(QueryError::EmptyResponse)));
    }

    #[test]
    fn test_blank_api_key_rejected() {
        assert!(matches!(
            OpenAiClient::new("  ", LlmSettings::default()),
            Err(QueryError::MissingApiKey)
        ));
    }
}
