// src/ui/page.rs

use super::jobs_panel::render_table;
use super::upload_form::UploadForm;
use crate::models::Job;

/// Renders the whole page: the upload form above the jobs table.
pub fn render_page(form: &UploadForm, jobs: &[Job]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>OCR Service</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <main>
        <h1>OCR Service</h1>
        <p>Upload files (PDF, PNG, JPG) or an archive for batch processing.</p>
        {}
        <hr>
        <section id="jobs-panel">
            <h3>Jobs</h3>
            <div id="jobs-table" data-refresh="/ui/jobs">
{}
            </div>
        </section>
    </main>
    <script src="/static/app.js"></script>
</body>
</html>
"#,
        form.render(),
        render_table(jobs)
    )
}
