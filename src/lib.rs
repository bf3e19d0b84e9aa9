pub mod bridge;
pub mod capture;
pub mod feed;
pub mod models;
pub mod navigation;
pub mod services;
pub mod settings;
pub mod utils;
pub mod visual;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use feed::FeedStore;
use navigation::ViewController;
use services::{ConfiguredAnalyzer, LoggingSubmitter, ThreadRandom};
use settings::Settings;
use tokio::io::BufReader;

pub type AppController = ViewController<ConfiguredAnalyzer, LoggingSubmitter>;

pub struct AppState {
    pub settings: Settings,
    pub controller: AppController,
}

impl AppState {
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let analyzer = ConfiguredAnalyzer::from_settings(&settings)?;
        let submitter = LoggingSubmitter::new(Duration::from_millis(settings.submit_delay_ms));
        let controller = ViewController::new(
            analyzer,
            submitter,
            Arc::new(ThreadRandom),
            FeedStore::seeded(),
        );

        Ok(Self {
            settings,
            controller,
        })
    }
}

pub async fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var); stdout is reserved for responses.
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Food-E starting up...");

    let settings = Settings::load()?;
    let state = AppState::from_settings(settings)?;
    if state.settings.offline {
        log::warn!("Offline mode: every capture gets the canned analysis");
    } else {
        log::info!("Analyzing captures with {}", state.settings.model);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    bridge::serve(&state.controller, stdin, tokio::io::stdout()).await
}
