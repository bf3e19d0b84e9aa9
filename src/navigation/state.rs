use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capture::CaptureSession;
use crate::feed::FeedStore;
use crate::models::{SessionContext, SELF_AUTHOR};
use crate::visual::{map_profile_to_visual, SizeClass, VisualParams};

use super::error::ControllerError;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ViewState {
    #[default]
    Onboarding,
    Feed,
    Discover,
    Profile,
    Camera,
    Tuner,
    Result,
}

impl ViewState {
    pub const TABS: [ViewState; 3] = [ViewState::Feed, ViewState::Discover, ViewState::Profile];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Onboarding => "onboarding",
            ViewState::Feed => "feed",
            ViewState::Discover => "discover",
            ViewState::Profile => "profile",
            ViewState::Camera => "camera",
            ViewState::Tuner => "tuner",
            ViewState::Result => "result",
        }
    }

    /// Views carrying the top bar and bottom navigation.
    pub fn is_tab(&self) -> bool {
        Self::TABS.contains(self)
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the controller mutates, kept behind one lock.
#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    pub view: ViewState,
    pub context: Option<SessionContext>,
    pub capture: CaptureSession,
    pub feed: FeedStore,
}

impl ControllerState {
    pub fn new(feed: FeedStore) -> Self {
        Self {
            feed,
            ..Self::default()
        }
    }

    pub fn require_view(
        &self,
        allowed: &[ViewState],
        action: &'static str,
    ) -> Result<(), ControllerError> {
        if allowed.contains(&self.view) {
            Ok(())
        } else {
            Err(ControllerError::InvalidTransition {
                action,
                from: self.view,
            })
        }
    }

    /// Tuner edits and the final confirm wait for the analysis to land.
    pub fn require_editable_draft(&self, action: &'static str) -> Result<(), ControllerError> {
        self.require_view(&[ViewState::Tuner], action)?;
        if self.capture.is_analyzing {
            return Err(ControllerError::AnalysisPending { action });
        }
        Ok(())
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let aura_size = match self.view {
            ViewState::Tuner => Some(SizeClass::Medium),
            ViewState::Result => Some(SizeClass::Large),
            _ => None,
        };

        ViewSnapshot {
            view: self.view,
            archetype: SessionContext::display_label(self.context.as_ref()).to_string(),
            shows_chrome: self.view.is_tab(),
            display_label: self.capture.display_label().to_string(),
            final_label: self.capture.final_label().to_string(),
            aura: aura_size.map(|size| {
                map_profile_to_visual(&self.capture.scent_profile, self.capture.provenance, size)
            }),
            capture: self.capture.clone(),
        }
    }

    pub fn profile(&self) -> ProfileSummary {
        ProfileSummary {
            archetype: SessionContext::display_label(self.context.as_ref()).to_string(),
            scans: self.feed.count_by_author(SELF_AUTHOR),
        }
    }
}

/// What the web view renders for the current screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub view: ViewState,
    pub archetype: String,
    pub shows_chrome: bool,
    pub capture: CaptureSession,
    pub display_label: String,
    pub final_label: String,
    pub aura: Option<VisualParams>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub archetype: String,
    pub scans: usize,
}
