use std::future::Future;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::log_error;
use crate::models::{ImageRef, Provenance, ScentProfile};
use crate::settings::Settings;

use super::gemini::GeminiAnalyzer;

const ENABLE_LOGS: bool = true;

pub const FALLBACK_LABEL: &str = "Unknown Item";
pub const FALLBACK_DESCRIPTION: &str = "Could not analyze image.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub label: String,
    pub provenance: Provenance,
    pub scent_profile: ScentProfile,
    pub description: String,
}

impl AnalysisResult {
    /// What the tuner shows when the model could not be reached or answered
    /// with something unusable.
    pub fn fallback() -> Self {
        Self {
            label: FALLBACK_LABEL.to_string(),
            provenance: Provenance::Industrial,
            scent_profile: ScentProfile::neutral(),
            description: FALLBACK_DESCRIPTION.to_string(),
        }
    }
}

/// Turns a captured image into a label, provenance guess, scent profile and a
/// short tasting note.
pub trait ImageAnalyzer: Send + Sync + 'static {
    fn analyze(&self, image: &ImageRef) -> impl Future<Output = Result<AnalysisResult>> + Send;
}

/// Wraps an analyzer so that no failure ever crosses into the controller.
pub struct FallbackAnalyzer<A> {
    inner: A,
}

impl<A: ImageAnalyzer> FallbackAnalyzer<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub async fn analyze_or_fallback(&self, image: &ImageRef) -> AnalysisResult {
        match self.inner.analyze(image).await {
            Ok(result) => result,
            Err(err) => {
                log_error!("Image analysis failed, using fallback result: {err:#}");
                AnalysisResult::fallback()
            }
        }
    }
}

/// Offline analyzer that answers every image with the same result.
#[derive(Debug, Clone)]
pub struct CannedAnalyzer {
    result: AnalysisResult,
}

impl CannedAnalyzer {
    pub fn new(result: AnalysisResult) -> Self {
        Self { result }
    }
}

impl Default for CannedAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisResult {
            label: "Satsuma".to_string(),
            provenance: Provenance::LocalWild,
            scent_profile: ScentProfile::new(65, 45, 60, 75),
            description: "Bright peel oils up front, honeyed pulp underneath.".to_string(),
        })
    }
}

impl ImageAnalyzer for CannedAnalyzer {
    async fn analyze(&self, _image: &ImageRef) -> Result<AnalysisResult> {
        Ok(self.result.clone())
    }
}

/// The analyzer picked from settings at startup.
pub enum ConfiguredAnalyzer {
    Gemini(GeminiAnalyzer),
    Canned(CannedAnalyzer),
}

impl ConfiguredAnalyzer {
    /// Offline mode uses the canned analyzer; otherwise the API key must be set
    /// or startup fails here.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if settings.offline {
            return Ok(ConfiguredAnalyzer::Canned(CannedAnalyzer::default()));
        }
        GeminiAnalyzer::from_settings(settings).map(ConfiguredAnalyzer::Gemini)
    }
}

impl ImageAnalyzer for ConfiguredAnalyzer {
    async fn analyze(&self, image: &ImageRef) -> Result<AnalysisResult> {
        match self {
            ConfiguredAnalyzer::Gemini(analyzer) => analyzer.analyze(image).await,
            ConfiguredAnalyzer::Canned(analyzer) => analyzer.analyze(image).await,
        }
    }
}
