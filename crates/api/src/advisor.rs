//! Schedule advisor backed by an OpenAI-compatible chat completions gateway.

use std::time::Duration;

use async_trait::async_trait;
use eyre::WrapErr;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use timetable_core::{
    advisor::{SYSTEM_PROMPT, ScheduleAdvisor, build_prompt, parse_suggestions},
    errors::{TimetableError, TimetableResult},
    models::{course::Course, suggestion::Suggestion},
};
use tracing::{debug, error};

use crate::config::GatewayConfig;

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

fn parse_failure() -> TimetableError {
    TimetableError::Upstream("Failed to parse AI response".to_string())
}

pub struct GatewayAdvisor {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayAdvisor {
    pub fn new(config: GatewayConfig) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .wrap_err("Failed to build AI gateway client")?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ScheduleAdvisor for GatewayAdvisor {
    async fn suggest(
        &self,
        courses: &[Course],
        preferences: &str,
    ) -> TimetableResult<Vec<Suggestion>> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            TimetableError::Upstream("AI gateway API key is not configured".to_string())
        })?;
        let prompt = build_prompt(courses, preferences)?;

        debug!(model = %self.config.model, courses = courses.len(), "Requesting schedule suggestions");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.config.model,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": prompt },
                ],
            }))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "AI gateway request failed");
                TimetableError::Upstream(format!("AI gateway request failed: {}", e))
            })?;

        let status = response.status();
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(TimetableError::RateLimited(
                    "Rate limit exceeded. Please try again later.".to_string(),
                ));
            }
            StatusCode::PAYMENT_REQUIRED => {
                return Err(TimetableError::PaymentRequired(
                    "Payment required. Please add credits to your workspace.".to_string(),
                ));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                error!(%status, %body, "AI gateway error");
                return Err(TimetableError::Upstream(format!("AI gateway error: {}", status.as_u16())));
            }
            _ => {}
        }

        let completion = response.json::<ChatCompletion>().await.map_err(|e| {
            error!(error = %e, "AI gateway returned an unreadable body");
            parse_failure()
        })?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(parse_failure)?;

        parse_suggestions(&content)
    }
}
