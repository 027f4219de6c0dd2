// src/api/state.rs
use crate::backend::BackendClient;
use crate::config::AppConfig;
use crate::ui::{JobsPanel, JobsPanelHandle};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: BackendClient,
    pub jobs: JobsPanel,
}

impl AppState {
    /// Builds the state with an empty, unmounted jobs panel.
    pub fn new(config: AppConfig) -> Self {
        let backend = BackendClient::from_config(Client::new(), &config);
        Self {
            config: Arc::new(config),
            backend,
            jobs: JobsPanel::default(),
        }
    }

    /// Starts polling the backend's job list. The returned handle owns the task.
    pub fn mount_jobs_panel(&mut self) -> JobsPanelHandle {
        let handle = JobsPanel::mount(
            Arc::new(self.backend.clone()),
            self.config.jobs_poll_interval,
        );
        self.jobs = handle.panel();
        handle
    }
}
