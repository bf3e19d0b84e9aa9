use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    capture::{DataUrlSource, FileCaptureSource, ImageCaptureSource},
    feed::FeedFilter,
    models::{CilantroAnswer, ComfortChoice, Provenance, ScentField, ScentProfile},
    services::{DataSubmitter, ImageAnalyzer},
    visual::{map_profile_to_visual, SizeClass},
};

use super::{controller::ViewController, state::ViewState};

/// One request from the web view, e.g. `{"command":"like","postId":"2"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    GetState,
    GetFeed {
        #[serde(default)]
        filter: FeedFilter,
    },
    GetProfile,
    CompleteOnboarding {
        cilantro: CilantroAnswer,
        comfort: String,
    },
    Navigate {
        view: ViewState,
    },
    StartScan,
    Capture {
        image: String,
    },
    CaptureFile {
        path: PathBuf,
    },
    WaitForAnalysis,
    SetScentField {
        field: ScentField,
        value: i64,
    },
    SetProvenance {
        provenance: Provenance,
    },
    SetDescription {
        text: String,
    },
    AppendDictation {
        transcript: String,
    },
    SetRefinedLabel {
        text: String,
    },
    ToggleLabelEditMode,
    Like {
        post_id: String,
    },
    AddNote {
        post_id: String,
        text: String,
    },
    FinishCreation,
    CancelCapture,
    ResetFromResult,
    Visualize {
        profile: ScentProfile,
        #[serde(default)]
        provenance: Provenance,
        #[serde(default)]
        size: SizeClass,
    },
}

fn to_value<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Runs one command against the controller. Errors come back as display
/// strings, ready to hand to the web view.
pub async fn dispatch<A, S>(
    controller: &ViewController<A, S>,
    command: Command,
) -> Result<Value, String>
where
    A: ImageAnalyzer,
    S: DataSubmitter,
{
    match command {
        Command::GetState => to_value(controller.snapshot().await),
        Command::GetFeed { filter } => to_value(controller.feed(filter).await),
        Command::GetProfile => to_value(controller.profile().await),
        Command::CompleteOnboarding { cilantro, comfort } => {
            let archetype = controller
                .complete_onboarding(cilantro, ComfortChoice::from_label(&comfort))
                .await
                .map_err(|e| e.to_string())?;
            to_value(archetype.label())
        }
        Command::Navigate { view } => {
            let view = controller.navigate(view).await.map_err(|e| e.to_string())?;
            to_value(view)
        }
        Command::StartScan => {
            let session_id = controller.start_scan().await.map_err(|e| e.to_string())?;
            to_value(session_id)
        }
        Command::Capture { image } => {
            let image = DataUrlSource::new(image)
                .capture()
                .map_err(|e| e.to_string())?;
            let session_id = controller.capture(image).await.map_err(|e| e.to_string())?;
            to_value(session_id)
        }
        Command::CaptureFile { path } => {
            let image = tokio::task::spawn_blocking(move || FileCaptureSource::new(path).capture())
                .await
                .map_err(|e| e.to_string())?
                .map_err(|e| format!("{e:#}"))?;
            let session_id = controller.capture(image).await.map_err(|e| e.to_string())?;
            to_value(session_id)
        }
        Command::WaitForAnalysis => {
            controller.wait_for_analysis().await;
            to_value(controller.capture_session().await)
        }
        Command::SetScentField { field, value } => {
            let profile = controller
                .set_scent_field(field, value)
                .await
                .map_err(|e| e.to_string())?;
            to_value(profile)
        }
        Command::SetProvenance { provenance } => {
            controller
                .set_provenance(provenance)
                .await
                .map_err(|e| e.to_string())?;
            to_value(provenance)
        }
        Command::SetDescription { text } => {
            controller
                .set_description(text)
                .await
                .map_err(|e| e.to_string())?;
            Ok(Value::Null)
        }
        Command::AppendDictation { transcript } => {
            let description = controller
                .append_dictation(&transcript)
                .await
                .map_err(|e| e.to_string())?;
            to_value(description)
        }
        Command::SetRefinedLabel { text } => {
            controller
                .set_refined_label(text)
                .await
                .map_err(|e| e.to_string())?;
            Ok(Value::Null)
        }
        Command::ToggleLabelEditMode => {
            let enabled = controller
                .toggle_label_edit_mode()
                .await
                .map_err(|e| e.to_string())?;
            to_value(enabled)
        }
        Command::Like { post_id } => to_value(controller.like(&post_id).await),
        Command::AddNote { post_id, text } => to_value(controller.add_note(&post_id, &text).await),
        Command::FinishCreation => {
            let post = controller
                .finish_creation()
                .await
                .map_err(|e| e.to_string())?;
            to_value(post)
        }
        Command::CancelCapture => {
            controller.cancel_capture().await.map_err(|e| e.to_string())?;
            Ok(Value::Null)
        }
        Command::ResetFromResult => {
            controller
                .reset_from_result()
                .await
                .map_err(|e| e.to_string())?;
            Ok(Value::Null)
        }
        Command::Visualize {
            profile,
            provenance,
            size,
        } => to_value(map_profile_to_visual(&profile, provenance, size)),
    }
}
