// src/ui/mod.rs
pub mod jobs_panel;
pub mod page;
pub mod upload_form;

pub use jobs_panel::{JobSource, JobsPanel, JobsPanelHandle, JobsSnapshot};
pub use page::render_page;
pub use upload_form::UploadForm;

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
