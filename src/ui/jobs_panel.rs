// src/ui/jobs_panel.rs
//! Periodically polls a job list and renders it as a table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::html_escape;
use crate::errors::Result;
use crate::models::Job;

/// Anything that can produce the current list of jobs.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<Job>>;
}

/// What the panel currently shows.
#[derive(Debug, Clone, Default)]
pub struct JobsSnapshot {
    pub jobs: Vec<Job>,
    pub last_success: Option<DateTime<Utc>>,
    /// Set when the most recent poll failed; the rows are then stale.
    pub last_error: Option<String>,
    pub polls: u64,
    /// Distinct status strings seen from the backend outside the known set.
    pub unrecognized_statuses: BTreeSet<String>,
}

impl JobsSnapshot {
    pub fn is_stale(&self) -> bool {
        self.last_error.is_some()
    }
}

/// Read side of a mounted panel. Cheap to clone.
#[derive(Clone, Default)]
pub struct JobsPanel {
    snapshot: Arc<RwLock<JobsSnapshot>>,
}

/// Owns the polling task. Dropping it cancels the task; `unmount` also waits for it.
pub struct JobsPanelHandle {
    panel: JobsPanel,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl JobsPanel {
    /// Starts polling `source` immediately and then every `period`.
    pub fn mount(source: Arc<dyn JobSource>, period: Duration) -> JobsPanelHandle {
        Self::mount_with_token(source, period, CancellationToken::new())
    }

    /// Like `mount`, but the task also stops when `token` (or a parent of it) is cancelled.
    pub fn mount_with_token(
        source: Arc<dyn JobSource>,
        period: Duration,
        token: CancellationToken,
    ) -> JobsPanelHandle {
        let panel = JobsPanel::default();
        let task = tokio::spawn(poll_loop(
            source,
            panel.snapshot.clone(),
            period,
            token.clone(),
        ));
        log::info!("Jobs panel mounted, polling every {:?}", period);
        JobsPanelHandle {
            panel,
            token,
            task: Some(task),
        }
    }

    pub async fn snapshot(&self) -> JobsSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn jobs(&self) -> Vec<Job> {
        self.snapshot.read().await.jobs.clone()
    }
}

impl JobsPanelHandle {
    pub fn panel(&self) -> JobsPanel {
        self.panel.clone()
    }

    pub(crate) fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Stops polling and waits until the task has exited.
    pub async fn unmount(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                log::error!("Jobs panel task ended abnormally: {}", e);
            }
        }
        log::info!("Jobs panel unmounted");
    }
}

impl Drop for JobsPanelHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn poll_loop(
    source: Arc<dyn JobSource>,
    snapshot: Arc<RwLock<JobsSnapshot>>,
    period: Duration,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            outcome = source.fetch_jobs() => outcome,
        };

        let mut current = snapshot.write().await;
        current.polls += 1;
        match outcome {
            Ok(jobs) => {
                log::debug!("Jobs poll returned {} jobs", jobs.len());
                for job in jobs.iter().filter(|job| !job.status.is_recognized()) {
                    if current.unrecognized_statuses.insert(job.status.to_string()) {
                        log::warn!(
                            "Backend reported unrecognized status {:?} for job {}",
                            job.status.as_str(),
                            job.id
                        );
                    }
                }
                current.jobs = jobs;
                current.last_success = Some(Utc::now());
                current.last_error = None;
            }
            Err(e) => {
                log::warn!("Jobs poll failed, keeping previous rows: {}", e);
                current.last_error = Some(e.to_string());
            }
        }
    }
}

/// Renders the jobs table. A download link appears only for jobs that are done.
pub fn render_table(jobs: &[Job]) -> String {
    let mut rows = String::new();
    for job in jobs {
        let action = match job.download_href() {
            Some(href) => format!(r#"<a href="{}">Download</a>"#, html_escape(&href)),
            None => String::new(),
        };
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            job.id,
            html_escape(&job.filename),
            html_escape(job.status.as_str()),
            action
        ));
    }

    format!(
        r#"<table class="jobs">
<thead><tr><th>ID</th><th>Filename</th><th>Status</th><th>Actions</th></tr></thead>
<tbody>
{}</tbody>
</table>"#,
        rows
    )
}
