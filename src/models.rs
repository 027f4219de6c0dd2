// src/models.rs
use serde::{Deserialize, Serialize};

/// Processing state reported by the backend for a document.
///
/// The backend's strings are matched exactly and case-sensitively. Anything
/// outside the known set is kept verbatim so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Uploaded,
    Queued,
    Processing,
    Done,
    Error,
    Other(String),
}

/// Whether a job's result can be downloaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Pending,
    Done,
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Uploaded => "uploaded",
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
            JobStatus::Other(raw) => raw,
        }
    }

    pub fn phase(&self) -> JobPhase {
        match self {
            JobStatus::Done => JobPhase::Done,
            _ => JobPhase::Pending,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, JobStatus::Other(_))
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "uploaded" => JobStatus::Uploaded,
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "done" => JobStatus::Done,
            "error" => JobStatus::Error,
            _ => JobStatus::Other(raw),
        }
    }
}

impl From<&str> for JobStatus {
    fn from(raw: &str) -> Self {
        JobStatus::from(raw.to_string())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend-tracked unit of OCR work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub filename: String,
    pub status: JobStatus,
}

impl Job {
    /// Download path for the job's result, present only once it is done.
    pub fn download_href(&self) -> Option<String> {
        match self.status.phase() {
            JobPhase::Done => Some(format!("/api/result/{}", self.id)),
            JobPhase::Pending => None,
        }
    }
}
