use std::sync::Arc;

use tokio::{sync::Mutex, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    capture::CaptureSession,
    feed::{FeedFilter, FeedStore, LikeOutcome},
    log_debug, log_error, log_info, log_warn,
    models::{
        Archetype, CilantroAnswer, ComfortChoice, CommunityNote, ImageRef, Post, Provenance,
        ScentField, ScentProfile, SessionContext,
    },
    services::{
        anonymized_user_id, DataSubmitter, FallbackAnalyzer, ImageAnalyzer, RandomSource,
        SubmissionPayload,
    },
};

use super::{
    error::ControllerError,
    state::{ControllerState, ProfileSummary, ViewSnapshot, ViewState},
};

const ENABLE_LOGS: bool = true;

struct InFlightAnalysis {
    session_id: Uuid,
    cancel_token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

/// Drives the screen state machine. Cheap to clone; clones share the same
/// state, feed and in-flight analysis.
pub struct ViewController<A, S> {
    state: Arc<Mutex<ControllerState>>,
    analyzer: Arc<FallbackAnalyzer<A>>,
    submitter: Arc<S>,
    random: Arc<dyn RandomSource>,
    analysis: Arc<Mutex<Option<InFlightAnalysis>>>,
}

impl<A, S> Clone for ViewController<A, S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            analyzer: self.analyzer.clone(),
            submitter: self.submitter.clone(),
            random: self.random.clone(),
            analysis: self.analysis.clone(),
        }
    }
}

impl<A: ImageAnalyzer, S: DataSubmitter> ViewController<A, S> {
    pub fn new(analyzer: A, submitter: S, random: Arc<dyn RandomSource>, feed: FeedStore) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState::new(feed))),
            analyzer: Arc::new(FallbackAnalyzer::new(analyzer)),
            submitter: Arc::new(submitter),
            random,
            analysis: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn view(&self) -> ViewState {
        self.state.lock().await.view
    }

    pub async fn capture_session(&self) -> CaptureSession {
        self.state.lock().await.capture.clone()
    }

    pub async fn session_context(&self) -> Option<SessionContext> {
        self.state.lock().await.context.clone()
    }

    pub async fn feed(&self, filter: FeedFilter) -> Vec<Post> {
        self.state.lock().await.feed.filtered(filter)
    }

    pub async fn profile(&self) -> ProfileSummary {
        self.state.lock().await.profile()
    }

    pub async fn complete_onboarding(
        &self,
        first: CilantroAnswer,
        comfort: ComfortChoice,
    ) -> Result<Archetype, ControllerError> {
        let mut state = self.state.lock().await;
        state.require_view(&[ViewState::Onboarding], "complete onboarding")?;

        let archetype = Archetype::from_quiz(first, comfort);
        state.context = Some(SessionContext::new(archetype));
        state.view = ViewState::Feed;

        log_info!("Onboarding complete, archetype {}", archetype.label());
        Ok(archetype)
    }

    /// Moves between the tab views (feed, discover, profile).
    pub async fn navigate(&self, to: ViewState) -> Result<ViewState, ControllerError> {
        let mut state = self.state.lock().await;
        if !to.is_tab() {
            return Err(ControllerError::InvalidTransition {
                action: "navigate to a non-tab view",
                from: state.view,
            });
        }
        state.require_view(&ViewState::TABS, "switch tabs")?;
        state.view = to;
        Ok(to)
    }

    /// Opens the camera with a clean capture session.
    pub async fn start_scan(&self) -> Result<Uuid, ControllerError> {
        let session_id = {
            let mut state = self.state.lock().await;
            state.require_view(&ViewState::TABS, "start a scan")?;
            state.capture.reset();
            state.view = ViewState::Camera;
            state.capture.session_id
        };

        self.cancel_analysis().await;
        log_info!("Capture session {session_id} started");
        Ok(session_id)
    }

    /// Stores the image, moves to the tuner and starts the analysis in the
    /// background. The draft is overwritten once the analysis resolves.
    pub async fn capture(&self, image: ImageRef) -> Result<Uuid, ControllerError> {
        let session_id = {
            let mut state = self.state.lock().await;
            state.require_view(&[ViewState::Camera], "capture an image")?;
            if image.is_empty() {
                return Err(ControllerError::EmptyImage);
            }
            state.capture.begin_analysis(image.clone());
            state.view = ViewState::Tuner;
            state.capture.session_id
        };

        self.spawn_analysis(session_id, image).await;
        Ok(session_id)
    }

    /// Resolves once the analysis started by the last [`capture`](Self::capture)
    /// has been applied or discarded. Returns immediately when none is running.
    pub async fn wait_for_analysis(&self) {
        let handle = {
            let mut slot = self.analysis.lock().await;
            slot.as_mut().and_then(|inflight| inflight.handle.take())
        };

        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                log_error!("Analysis task failed to join: {err}");
            }
        }
    }

    pub async fn set_scent_field(
        &self,
        field: ScentField,
        value: i64,
    ) -> Result<ScentProfile, ControllerError> {
        let mut state = self.state.lock().await;
        state.require_editable_draft("adjust the scent profile")?;
        state.capture.set_scent_field(field, value);
        Ok(state.capture.scent_profile)
    }

    pub async fn set_provenance(&self, provenance: Provenance) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        state.require_editable_draft("change the provenance")?;
        state.capture.provenance = provenance;
        Ok(())
    }

    pub async fn set_description(&self, text: impl Into<String>) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        state.require_editable_draft("edit the tasting notes")?;
        state.capture.description = text.into();
        Ok(())
    }

    /// Appends a dictated transcript and returns the resulting notes.
    pub async fn append_dictation(&self, transcript: &str) -> Result<String, ControllerError> {
        let mut state = self.state.lock().await;
        state.require_editable_draft("dictate tasting notes")?;
        state.capture.append_dictation(transcript);
        Ok(state.capture.description.clone())
    }

    pub async fn set_refined_label(&self, text: impl Into<String>) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        state.require_editable_draft("refine the label")?;
        state.capture.refined_label = text.into();
        Ok(())
    }

    pub async fn toggle_label_edit_mode(&self) -> Result<bool, ControllerError> {
        let mut state = self.state.lock().await;
        state.require_editable_draft("toggle label editing")?;
        Ok(state.capture.toggle_label_edit_mode())
    }

    /// `None` when no post has this id; nothing changes in that case.
    pub async fn like(&self, post_id: &str) -> Option<LikeOutcome> {
        let outcome = self.state.lock().await.feed.toggle_like(post_id);
        if outcome.is_none() {
            log_warn!("Ignoring like for unknown post {post_id}");
        }
        outcome
    }

    /// Appends a note by the local user. Blank text and unknown posts are
    /// ignored and yield `None`.
    pub async fn add_note(&self, post_id: &str, text: &str) -> Option<CommunityNote> {
        if text.trim().is_empty() {
            log_debug!("Ignoring blank note for post {post_id}");
            return None;
        }

        let note = CommunityNote::from_self(text);
        let appended = self
            .state
            .lock()
            .await
            .feed
            .append_note(post_id, note.clone());

        if appended {
            Some(note)
        } else {
            log_warn!("Ignoring note for unknown post {post_id}");
            None
        }
    }

    /// Commits the draft as a new post at the top of the feed and shows the
    /// result screen. The anonymized copy is submitted in the background.
    pub async fn finish_creation(&self) -> Result<Post, ControllerError> {
        let (post, payload) = {
            let mut state = self.state.lock().await;
            state.require_editable_draft("finish the capture")?;

            let payload = state
                .capture
                .to_submission(anonymized_user_id(self.random.as_ref()));
            let post = state.capture.to_post();
            state.feed.prepend(post.clone());
            state.view = ViewState::Result;
            (post, payload)
        };

        log_info!("Posted {:?} as {}", post.item, post.id);
        self.spawn_submission(payload);
        Ok(post)
    }

    /// Abandons the draft from the camera or the tuner, including while the
    /// analysis is still running, and returns to the feed.
    pub async fn cancel_capture(&self) -> Result<(), ControllerError> {
        {
            let mut state = self.state.lock().await;
            state.require_view(&[ViewState::Camera, ViewState::Tuner], "cancel the capture")?;
            state.capture.reset();
            state.view = ViewState::Feed;
        }
        self.cancel_analysis().await;
        Ok(())
    }

    /// Back to the feed; the draft stays until the next scan resets it.
    pub async fn reset_from_result(&self) -> Result<(), ControllerError> {
        let mut state = self.state.lock().await;
        state.require_view(&[ViewState::Result], "leave the result screen")?;
        state.view = ViewState::Feed;
        Ok(())
    }

    async fn spawn_analysis(&self, session_id: Uuid, image: ImageRef) {
        let cancel_token = CancellationToken::new();
        let task_token = cancel_token.clone();
        let state = self.state.clone();
        let analyzer = self.analyzer.clone();

        let handle = tokio::spawn(async move {
            let result = tokio::select! {
                _ = task_token.cancelled() => {
                    log_debug!("Analysis for capture session {session_id} cancelled");
                    return;
                }
                result = analyzer.analyze_or_fallback(&image) => result,
            };

            let mut guard = state.lock().await;
            if task_token.is_cancelled() || guard.capture.session_id != session_id {
                log_info!("Discarding stale analysis for capture session {session_id}");
                return;
            }

            log_info!(
                "Analysis for capture session {} resolved as {:?}",
                session_id,
                result.label
            );
            guard.capture.apply_analysis(result);
        });

        let previous = self.analysis.lock().await.replace(InFlightAnalysis {
            session_id,
            cancel_token,
            handle: Some(handle),
        });
        if let Some(previous) = previous {
            previous.cancel_token.cancel();
        }
    }

    async fn cancel_analysis(&self) {
        if let Some(inflight) = self.analysis.lock().await.take() {
            inflight.cancel_token.cancel();
            log_debug!(
                "Cancelled analysis for capture session {}",
                inflight.session_id
            );
        }
    }

    // Detached: the outcome is only logged and never reaches the UI.
    fn spawn_submission(&self, payload: SubmissionPayload) {
        let submitter = self.submitter.clone();
        tokio::spawn(async move {
            match submitter.submit(payload).await {
                Ok(true) => log_debug!("Labelled data submission acknowledged"),
                Ok(false) => log_warn!("Labelled data submission was refused"),
                Err(err) => log_warn!("Labelled data submission failed: {err:#}"),
            }
        });
    }
}
