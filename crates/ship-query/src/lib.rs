//! Question answering over a shipment manifest.
//!
//! Statistical questions (counts, breakdowns, cost and weight totals) are
//! answered exactly by [`QueryEngine`]. Anything else goes to a
//! [`LanguageModel`] with a rendered context of the manifest.

mod context;
mod engine;
mod error;
mod intent;
mod llm;
mod stats;

pub use context::{
    ANSWER_SYSTEM_PROMPT, SUMMARY_SYSTEM_PROMPT, question_prompt, render_context, summary_prompt,
};
pub use engine::{QueryEngine, answer_direct};
pub use error::{QueryError, Result};
pub use intent::{DISPATCH, Intent, mentions_delayed_or_pending, route};
pub use llm::{
    API_KEY_ENV, Answer, AnswerSource, DEFAULT_ENDPOINT, DEFAULT_MODEL, LanguageModel,
    LlmSettings, OpenAiClient, ask, summarize,
};
pub use stats::{NumericStats, ValueCount, breakdown_lines, percentage, value_counts};
