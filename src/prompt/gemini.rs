use serde::{Deserialize, Serialize};

use crate::prompt::{PromptError, PromptSource};

const INSTRUCTION: &str = "Generate a random, interesting paragraph for a typing speed test. \
The paragraph should be between 40 and 60 words, suitable for all audiences. \
It should contain common English words, correct punctuation like commas and periods, \
and be a single block of text with no line breaks.";

const TEMPERATURE: f32 = 0.8;
const MAX_OUTPUT_TOKENS: u32 = 200;
const THINKING_BUDGET: u32 = 100;

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

/// Generates prompts through the Gemini `generateContent` endpoint.
pub struct GeminiPromptSource {
    config: GeminiConfig,
    #[cfg(feature = "network")]
    client: Option<crate::net::HttpClient>,
}

impl GeminiPromptSource {
    pub fn new(config: GeminiConfig) -> Self {
        #[cfg(feature = "network")]
        let client = match crate::net::build_client(config.timeout_secs) {
            Ok(client) => Some(client),
            Err(e) => {
                log::error!("Could not build HTTP client for prompts: {e}");
                None
            }
        };
        Self {
            config,
            #[cfg(feature = "network")]
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl PromptSource for GeminiPromptSource {
    #[cfg(feature = "network")]
    fn fetch_prompt(&self) -> Result<String, PromptError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(PromptError::NotConfigured("GEMINI_API_KEY is not set"))?;
        let client = self
            .client
            .as_ref()
            .ok_or(PromptError::NotConfigured("HTTP client unavailable"))?;

        let response = client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&GenerateRequest::typing_prompt())
            .send()?;

        if !response.status().is_success() {
            let (status, text) = crate::net::describe_failure(response);
            return Err(PromptError::Status { status, text });
        }

        let body: GenerateResponse = response.json()?;
        body.into_prompt()
    }

    #[cfg(not(feature = "network"))]
    fn fetch_prompt(&self) -> Result<String, PromptError> {
        Err(PromptError::Offline)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn typing_prompt() -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(INSTRUCTION.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                thinking_config: ThinkingConfig {
                    thinking_budget: THINKING_BUDGET,
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn into_prompt(self) -> Result<String, PromptError> {
        let raw: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        crate::prompt::normalize_prompt(&raw).ok_or(PromptError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let json = serde_json::to_value(GenerateRequest::typing_prompt()).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 200);
        assert_eq!(json["generationConfig"]["thinkingConfig"]["thinkingBudget"], 100);
        assert!(
            json["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("typing speed test")
        );
    }

    #[test]
    fn test_response_text_is_flattened() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "First half,\n"}, {"text": "second half."}]}
            }]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_prompt().unwrap(), "First half, second half.");
    }

    #[test]
    fn test_empty_response_is_error() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(response.into_prompt(), Err(PromptError::Empty)));

        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#)
                .unwrap();
        assert!(matches!(response.into_prompt(), Err(PromptError::Empty)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let source = GeminiPromptSource::new(GeminiConfig {
            base_url: "https://example.test/".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            timeout_secs: 5,
        });
        assert_eq!(
            source.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[cfg(feature = "network")]
    #[test]
    fn test_missing_key_is_not_configured() {
        let source = GeminiPromptSource::new(GeminiConfig {
            base_url: "https://example.test".to_string(),
            model: "m".to_string(),
            api_key: None,
            timeout_secs: 5,
        });
        assert!(matches!(
            source.fetch_prompt(),
            Err(PromptError::NotConfigured(_))
        ));
    }
}
