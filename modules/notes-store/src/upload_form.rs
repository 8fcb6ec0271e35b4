//! Static HTML form for creating a note from the browser.

use axum::response::Html;

const UPLOAD_FORM: &str = r#"<!DOCTYPE html>
<html>
<body>
  <h2>Upload Form</h2>

  <form method="post" action="/write" enctype="multipart/form-data">
    <label for="note_name">Note Name:</label><br>
    <input type="text" id="note_name" name="note_name"><br><br>
    <label for="note">Note:</label><br>
    <textarea id="note" name="note" rows="4" cols="50"></textarea><br><br>
    <input type="submit" value="Create Note">
  </form>

  <p>Click "Create Note" button to create a new note on the server.</p>

</body>
</html>"#;

pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}
