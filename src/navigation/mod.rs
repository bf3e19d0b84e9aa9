pub mod commands;
mod controller;
mod error;
mod state;

pub use commands::{dispatch, Command};
pub use controller::ViewController;
pub use error::ControllerError;
pub use state::{ControllerState, ProfileSummary, ViewSnapshot, ViewState};
