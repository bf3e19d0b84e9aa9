use thiserror::Error;

use super::state::ViewState;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("cannot {action} from the {from} view")]
    InvalidTransition {
        action: &'static str,
        from: ViewState,
    },
    #[error("cannot {action} while the image is still being analyzed")]
    AnalysisPending { action: &'static str },
    #[error("captured image is empty")]
    EmptyImage,
}
