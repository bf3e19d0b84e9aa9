use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::log_info;
use crate::models::{ImageRef, Provenance, ScentProfile};
use crate::settings::Settings;

use super::analysis::{AnalysisResult, ImageAnalyzer};

const ENABLE_LOGS: bool = true;

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

const PROMPT: &str = "Analyze this food or drink item.
1. Identify the item name (keep it short, e.g., \"Spicy Tuna Roll\").
2. Determine if it looks \"Industrial\" (mass-produced, packaged) or \"Local/Wild\" (homemade, foraged, artisanal).
3. Estimate its scent/flavor profile on 0-100 scales:
   - intensity: (Quiet -> Loud)
   - warmth: (Cold/Fresh -> Warm/Spicy)
   - texture: (Round/Creamy -> Sharp/Acidic/Spiky)
   - sweetness: (Dry -> Sweet)
4. Write a short, poetic tasting note (max 150 chars) describing the sensory experience.";

/// Generative-language REST client asking a multimodal model for a structured
/// JSON analysis of the photo.
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiAnalyzer {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("API_KEY is not set; the image analyzer needs a generative model key")
            })?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint: format!(
                "{}/models/{}:generateContent",
                settings.api_base.trim_end_matches('/'),
                settings.model
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ImageAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, image: &ImageRef) -> Result<AnalysisResult> {
        log_info!(
            "Requesting analysis for {} byte image from {}",
            image.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(image))
            .send()
            .await
            .context("failed to reach the analysis model")?
            .error_for_status()
            .context("analysis model rejected the request")?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("analysis response was not valid JSON")?;

        let text = body
            .first_text()
            .ok_or_else(|| anyhow!("No response from AI"))?;

        parse_analysis_text(text)
    }
}

fn request_body(image: &ImageRef) -> Value {
    json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": image.mime_type().unwrap_or(DEFAULT_MIME_TYPE),
                        "data": image.payload(),
                    }
                },
                { "text": PROMPT }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        }
    })
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "label": { "type": "STRING" },
            "provenance": { "type": "STRING", "enum": ["Industrial", "Local/Wild"] },
            "scentProfile": {
                "type": "OBJECT",
                "properties": {
                    "intensity": { "type": "NUMBER" },
                    "warmth": { "type": "NUMBER" },
                    "texture": { "type": "NUMBER" },
                    "sweetness": { "type": "NUMBER" }
                },
                "required": ["intensity", "warmth", "texture", "sweetness"]
            },
            "description": { "type": "STRING" }
        },
        "required": ["label", "provenance", "scentProfile", "description"]
    })
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
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .find_map(|part| part.text.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAnalysis {
    label: String,
    provenance: Provenance,
    scent_profile: WireProfile,
    description: String,
}

#[derive(Debug, Deserialize)]
struct WireProfile {
    intensity: f64,
    warmth: f64,
    texture: f64,
    sweetness: f64,
}

/// Parses the model's JSON answer, clamping the profile into slider range.
pub fn parse_analysis_text(text: &str) -> Result<AnalysisResult> {
    let wire: WireAnalysis =
        serde_json::from_str(text.trim()).context("analysis text did not match the schema")?;

    if wire.label.trim().is_empty() {
        bail!("analysis returned an empty label");
    }

    let profile = &wire.scent_profile;
    Ok(AnalysisResult {
        label: wire.label.trim().to_string(),
        provenance: wire.provenance,
        scent_profile: ScentProfile::new(
            ScentProfile::clamp_model_value(profile.intensity),
            ScentProfile::clamp_model_value(profile.warmth),
            ScentProfile::clamp_model_value(profile.texture),
            ScentProfile::clamp_model_value(profile.sweetness),
        ),
        description: wire.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_clamps_model_output() {
        let text = r#"{
            "label": " Spicy Tuna Roll ",
            "provenance": "Local/Wild",
            "scentProfile": { "intensity": 72.4, "warmth": 120, "texture": -5, "sweetness": 30 },
            "description": "Sea breeze and chili oil."
        }"#;

        let result = parse_analysis_text(text).unwrap();
        assert_eq!(result.label, "Spicy Tuna Roll");
        assert_eq!(result.provenance, Provenance::LocalWild);
        assert_eq!(result.scent_profile, ScentProfile::new(72, 100, 0, 30));
    }

    #[test]
    fn rejects_unknown_provenance() {
        let text = r#"{
            "label": "Cola",
            "provenance": "Factory",
            "scentProfile": { "intensity": 1, "warmth": 1, "texture": 1, "sweetness": 1 },
            "description": ""
        }"#;
        assert!(parse_analysis_text(text).is_err());
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"a\":1}" }] } }]
        }))
        .unwrap();
        assert_eq!(body.first_text(), Some("{\"a\":1}"));

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.first_text(), None);
    }

    #[test]
    fn request_strips_data_url_prefix() {
        let image = ImageRef::from_data_url("data:image/png;base64,iVBORw0KGgo=");
        let body = request_body(&image);
        let inline = &body["contents"][0]["parts"][0]["inlineData"];
        assert_eq!(inline["data"], "iVBORw0KGgo=");
        assert_eq!(inline["mimeType"], "image/png");
    }

    #[test]
    fn endpoint_comes_from_settings() {
        let settings = Settings {
            api_key: Some("secret".into()),
            ..Settings::default()
        };
        let analyzer = GeminiAnalyzer::from_settings(&settings).unwrap();
        assert!(analyzer
            .endpoint()
            .ends_with("/models/gemini-2.5-flash:generateContent"));
    }
}
