use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use crate::log_info;
use crate::models::{Provenance, ScentProfile};

const ENABLE_LOGS: bool = true;

pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 800;

/// Anonymized copy of a finished capture session, contributed to the training
/// set. Carries no author identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Data URL of the captured image, empty when none was captured.
    pub image: String,
    pub label: String,
    pub scent_profile: ScentProfile,
    pub provenance: Provenance,
    pub description: String,
    pub anonymised_user_id: String,
}

/// A payload stamped at the moment it was handed to the submitter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelledDataRecord {
    #[serde(flatten)]
    pub payload: SubmissionPayload,
    pub timestamp: i64,
}

impl LabelledDataRecord {
    pub fn stamp(payload: SubmissionPayload) -> Self {
        Self {
            payload,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

pub trait DataSubmitter: Send + Sync + 'static {
    /// Acknowledges receipt; `Ok(false)` means the submission was refused.
    fn submit(&self, payload: SubmissionPayload) -> impl Future<Output = Result<bool>> + Send;
}

/// Stand-in for the dataset contribution endpoint: logs the record and acks
/// after a simulated network delay.
#[derive(Debug, Clone)]
pub struct LoggingSubmitter {
    delay: Duration,
}

impl LoggingSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for LoggingSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS))
    }
}

impl DataSubmitter for LoggingSubmitter {
    async fn submit(&self, payload: SubmissionPayload) -> Result<bool> {
        let record = LabelledDataRecord::stamp(payload);
        let payload = &record.payload;

        log_info!("Knowledge base submission: uploading anonymised labelled data");
        log_info!("  contributor: {}", payload.anonymised_user_id);
        log_info!("  image length: {}", payload.image.len());
        log_info!("  label: {}", payload.label);
        log_info!(
            "  descriptors: intensity={} warmth={} texture={} sweetness={} ({})",
            payload.scent_profile.intensity,
            payload.scent_profile.warmth,
            payload.scent_profile.texture,
            payload.scent_profile.sweetness,
            payload.provenance.as_str()
        );
        log_info!("  notes: {}", payload.description);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(true)
    }
}
