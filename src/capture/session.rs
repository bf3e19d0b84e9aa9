use serde::Serialize;
use uuid::Uuid;

use crate::models::{ImageRef, Post, Provenance, ScentField, ScentProfile};
use crate::services::{AnalysisResult, SubmissionPayload};

/// Working draft between "start scan" and "finish" or "cancel". Every field is
/// reset when a new scan begins, and `session_id` is fresh each time so a late
/// analysis result can tell it no longer belongs here.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSession {
    pub session_id: Uuid,
    pub detected_label: String,
    pub refined_label: String,
    pub label_edit_mode: bool,
    pub image: Option<ImageRef>,
    pub scent_profile: ScentProfile,
    pub provenance: Provenance,
    pub description: String,
    pub is_analyzing: bool,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            detected_label: String::new(),
            refined_label: String::new(),
            label_edit_mode: false,
            image: None,
            scent_profile: ScentProfile::neutral(),
            provenance: Provenance::Industrial,
            description: String::new(),
            is_analyzing: false,
        }
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn begin_analysis(&mut self, image: ImageRef) {
        self.image = Some(image);
        self.is_analyzing = true;
    }

    /// The refined label starts out equal to what the model detected.
    pub fn apply_analysis(&mut self, result: AnalysisResult) {
        self.refined_label = result.label.clone();
        self.detected_label = result.label;
        self.scent_profile = result.scent_profile;
        self.provenance = result.provenance;
        self.description = result.description;
        self.is_analyzing = false;
    }

    pub fn set_scent_field(&mut self, field: ScentField, raw: i64) -> u8 {
        self.scent_profile.set(field, raw)
    }

    pub fn toggle_label_edit_mode(&mut self) -> bool {
        self.label_edit_mode = !self.label_edit_mode;
        self.label_edit_mode
    }

    /// Appends a dictated transcript to the tasting notes.
    pub fn append_dictation(&mut self, transcript: &str) {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return;
        }
        if self.description.is_empty() {
            self.description = transcript.to_string();
        } else {
            self.description = format!("{} {}", self.description, transcript);
        }
    }

    /// Label shown in the tuner header.
    pub fn display_label(&self) -> &str {
        if self.refined_label.is_empty() {
            &self.detected_label
        } else {
            &self.refined_label
        }
    }

    /// Label committed with the post: the refined label only counts when the
    /// user switched into edit mode and left something in it.
    pub fn final_label(&self) -> &str {
        if self.label_edit_mode && !self.refined_label.trim().is_empty() {
            &self.refined_label
        } else {
            &self.detected_label
        }
    }

    pub fn to_post(&self) -> Post {
        Post::authored(
            self.image.clone(),
            self.final_label().to_string(),
            self.scent_profile,
            self.provenance,
            self.description.clone(),
        )
    }

    pub fn to_submission(&self, anonymised_user_id: String) -> SubmissionPayload {
        SubmissionPayload {
            image: self
                .image
                .as_ref()
                .map(|image| image.as_str().to_string())
                .unwrap_or_default(),
            label: self.final_label().to_string(),
            scent_profile: self.scent_profile,
            provenance: self.provenance,
            description: self.description.clone(),
            anonymised_user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysed(label: &str) -> CaptureSession {
        let mut session = CaptureSession::new();
        session.begin_analysis(ImageRef::from_data_url("data:image/jpeg;base64,AA=="));
        session.apply_analysis(AnalysisResult {
            label: label.into(),
            provenance: Provenance::LocalWild,
            scent_profile: ScentProfile::new(10, 20, 30, 40),
            description: "note".into(),
        });
        session
    }

    #[test]
    fn reset_clears_everything_and_renews_id() {
        let mut session = analysed("Orange");
        session.toggle_label_edit_mode();
        let old_id = session.session_id;

        session.reset();

        assert_ne!(session.session_id, old_id);
        assert_eq!(
            CaptureSession {
                session_id: session.session_id,
                ..CaptureSession::default()
            },
            session
        );
    }

    #[test]
    fn analysis_fills_draft_and_clears_flag() {
        let session = analysed("Orange");
        assert_eq!(session.detected_label, "Orange");
        assert_eq!(session.refined_label, "Orange");
        assert_eq!(session.provenance, Provenance::LocalWild);
        assert!(!session.is_analyzing);
    }

    #[test]
    fn refined_label_only_counts_in_edit_mode() {
        let mut session = analysed("Orange");
        session.refined_label = "Satsuma".into();
        assert_eq!(session.final_label(), "Orange");
        assert_eq!(session.display_label(), "Satsuma");

        session.toggle_label_edit_mode();
        assert_eq!(session.final_label(), "Satsuma");

        session.refined_label = "   ".into();
        assert_eq!(session.final_label(), "Orange");
    }

    #[test]
    fn dictation_appends_with_a_space() {
        let mut session = CaptureSession::new();
        session.append_dictation("smoky");
        session.append_dictation("  and sweet ");
        session.append_dictation("   ");
        assert_eq!(session.description, "smoky and sweet");
    }

    #[test]
    fn submission_carries_final_label_without_author() {
        let mut session = analysed("Orange");
        session.refined_label = "Satsuma".into();
        session.toggle_label_edit_mode();

        let payload = session.to_submission("anon_7".into());
        assert_eq!(payload.label, "Satsuma");
        assert_eq!(payload.anonymised_user_id, "anon_7");
        assert_eq!(payload.image, "data:image/jpeg;base64,AA==");
    }
}
