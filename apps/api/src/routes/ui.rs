use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>AI Resume Optimizer</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 3rem auto; }
    fieldset { margin-bottom: 1rem; }
    label { display: block; margin: 0.4rem 0; }
  </style>
</head>
<body>
  <h1>AI Resume Optimizer</h1>
  <form method="post" action="/api/v1/sessions/report" enctype="multipart/form-data">
    <fieldset>
      <legend>Upload Files</legend>
      <label>Resume (.docx or .pdf) <input type="file" name="resume" accept=".docx,.pdf" required></label>
      <label>Job Description (.txt) <input type="file" name="job_description" accept=".txt" required></label>
    </fieldset>
    <fieldset>
      <legend>Select Action</legend>
      <label><input type="radio" name="action" value="enhance" checked> Enhance Resume</label>
      <label><input type="radio" name="action" value="rate"> Rate Resume</label>
      <label><input type="radio" name="action" value="optimize"> Optimize Resume</label>
    </fieldset>
    <button type="submit">Run</button>
  </form>
</body>
</html>
"#;

/// GET /
/// Upload form for the three session actions.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
