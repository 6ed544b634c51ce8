/// Gemini reflection provider
///
/// Speaks the `generateContent` REST API: the transcript and media go in as
/// user content parts, the persona as the system instruction, and the output
/// shape as a JSON schema in the generation config.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::ReflectionConfig;
use crate::reflection::{schema, RawReflection, ReflectionError, ReflectionRequest, ReflectionService};

#[derive(Debug, Clone)]
pub struct GeminiService {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    grounding: bool,
    thinking_budget: Option<u32>,
}

impl GeminiService {
    pub fn new(config: &ReflectionConfig, api_key: String) -> Result<Self, ReflectionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReflectionError::Unavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            grounding: config.grounding,
            thinking_budget: config.thinking_budget,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Request body for one reflection
    fn build_body(&self, request: &ReflectionRequest) -> Value {
        let mut parts = vec![json!({ "text": request.transcript })];
        for media in &request.media {
            parts.push(json!({
                "inlineData": {
                    "mimeType": media.mime_type,
                    "data": media.data
                }
            }));
        }

        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseJsonSchema": schema::output_schema(),
        });
        if let Some(budget) = self.thinking_budget {
            generation_config["thinkingConfig"] = json!({ "thinkingBudget": budget });
        }

        let mut body = json!({
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": generation_config,
        });
        if self.grounding {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }

        body
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    grounding_chunks: Option<Vec<Value>>,
}

/// Pull the answer text and citations out of a `generateContent` response
fn extract(response: GenerateContentResponse) -> Result<RawReflection, ReflectionError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ReflectionError::Unavailable(
            "The reflection session could not be completed: no candidates".to_string(),
        ));
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ReflectionError::Unavailable(
            "The reflection session could not be completed: empty answer".to_string(),
        ));
    }

    Ok(RawReflection {
        text,
        grounding_chunks: candidate.grounding_metadata.and_then(|m| m.grounding_chunks),
    })
}

#[async_trait]
impl ReflectionService for GeminiService {
    async fn generate(&self, request: &ReflectionRequest) -> Result<RawReflection, ReflectionError> {
        let url = self.endpoint();
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(|e| ReflectionError::Unavailable(format!("Failed to send request to Gemini: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let err_text = response.text().await.unwrap_or_default();
            return Err(ReflectionError::Unavailable(format!("Gemini error {}: {}", status, err_text)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ReflectionError::Unavailable(format!("Unreadable Gemini response: {}", e)))?;

        extract(parsed)
    }
}
