//! Remote Evaluator: one chat-completion call raced against a hard timeout
//!
//! The reply is free text carrying a `Truth Index: NN%` marker. A missing
//! marker is not an error: the turn proceeds with a neutral index and the
//! whole reply as narration.

use std::future::Future;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::config::RemoteConfig;
use crate::error::RemoteFailure;
use crate::types::{EvaluationResult, Statement};
use crate::NEUTRAL_TRUTH_INDEX;

lazy_static! {
    static ref RE_TRUTH_MARKER: Regex = Regex::new(r"(?i)truth index: (\d+)%").unwrap();
}

/// Anything that can judge a statement and may fail doing so
pub trait StatementEvaluator: Send + Sync {
    fn evaluate(
        &self,
        statement: &Statement,
    ) -> impl Future<Output = Result<EvaluationResult, RemoteFailure>> + Send;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

/// HTTP client for an OpenAI-compatible chat-completion endpoint
#[derive(Debug, Clone)]
pub struct RemoteEvaluator {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl RemoteEvaluator {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteFailure> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RemoteFailure::Network(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Fixed-template prompt for one statement
    pub fn prompt(statement: &Statement) -> String {
        format!(
            "You are a mystical lie-detecting orb. Rate the user's statement from 0 to 100% truthful. \
             Respond in a divine, ancient tone. Include a truth index.\n\n\
             The statement to analyze is: \"{}\"\n\n\
             Your response should feel mystical and otherworldly, as if coming from an ancient artifact with deep wisdom.\n\n\
             Indicate the Truth Index clearly in your response using this format: \"Truth Index: XX%\" \
             where XX is a number between 0 and 100.\n\n\
             If the statement is obviously false or impossible (like claiming supernatural abilities), use a low truth value (0-30%).\n\
             If the statement is plausible but unverifiable, use a medium value (40-70%).\n\
             If the statement is likely true or factual, use a high value (71-100%).",
            statement.text()
        )
    }

    /// Send the request and pull `choices[0].message.content` out of the reply
    async fn request(&self, api_key: &str, prompt: &str) -> Result<String, RemoteFailure> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            max_tokens: self.config.max_tokens,
        };

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .header("X-Title", &self.config.title)
            .json(&body);
        if let Some(referer) = &self.config.referer {
            request = request.header("HTTP-Referer", referer);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteFailure::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteFailure::HttpError(status.as_u16()));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| RemoteFailure::ParseError(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RemoteFailure::ParseError("reply has no choices".to_string()))
    }
}

impl StatementEvaluator for RemoteEvaluator {
    async fn evaluate(&self, statement: &Statement) -> Result<EvaluationResult, RemoteFailure> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(RemoteFailure::NotConfigured),
        };

        let prompt = Self::prompt(statement);
        let timeout = self.config.timeout();
        debug!(endpoint = %self.config.endpoint, ?timeout, "remote evaluation");

        // Whichever settles first wins; the losing request is dropped unread
        tokio::select! {
            reply = self.request(api_key, &prompt) => Ok(parse_reply(&reply?)),
            _ = tokio::time::sleep(timeout) => {
                warn!(?timeout, "remote evaluation timed out");
                Err(RemoteFailure::Timeout(timeout))
            }
        }
    }
}

/// Extract the truth marker from free text
pub fn parse_reply(content: &str) -> EvaluationResult {
    match RE_TRUTH_MARKER.captures(content) {
        Some(caps) => {
            // Oversized numbers saturate and are clamped to 100
            let truth_index = caps[1].parse::<u64>().unwrap_or(u64::MAX).min(100) as i64;
            let narration = RE_TRUTH_MARKER.replace_all(content, "").trim().to_string();
            EvaluationResult::new(truth_index, narration.clone(), narration)
        }
        None => {
            debug!("remote reply carries no truth marker");
            EvaluationResult::new(i64::from(NEUTRAL_TRUTH_INDEX), content, content)
        }
    }
}
