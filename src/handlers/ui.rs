use axum::response::Html;

/// The upload page. Keeps its own session-local list of uploads; it does not
/// fetch `/files`, so the page list and the server registry can diverge.
pub async fn index() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Cloud File Upload</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem; text-align: center; color: #1d1d1f; }
    h1 { margin-bottom: 0.5rem; }
    button { margin-left: 0.5rem; padding: 0.4rem 1rem; }
    ul { list-style: none; padding: 0; }
    li { margin: 0.4rem 0; }
  </style>
</head>
<body>
  <h1>Cloud File Upload App</h1>

  <input id="fileInput" type="file" />
  <button id="uploadBtn">Upload</button>

  <h2>Uploaded Files</h2>
  <ul id="fileList"></ul>

  <script>
    const fileInput = document.getElementById('fileInput');
    const fileList = document.getElementById('fileList');

    document.getElementById('uploadBtn').addEventListener('click', async () => {
      if (!fileInput.files.length) {
        alert('Please select a file!');
        return;
      }

      const formData = new FormData();
      formData.append('file', fileInput.files[0]);

      try {
        const res = await fetch('/upload', { method: 'POST', body: formData });
        if (!res.ok) throw new Error('upload returned ' + res.status);
        const json = await res.json();

        const link = document.createElement('a');
        link.href = json.file.url;
        link.target = '_blank';
        link.rel = 'noopener noreferrer';
        link.textContent = json.file.name;

        const item = document.createElement('li');
        item.appendChild(link);
        fileList.appendChild(item);

        alert('File uploaded successfully!');
      } catch (err) {
        console.error('Upload failed:', err);
        alert('Upload failed!');
      }
    });
  </script>
</body>
</html>"#,
    )
}
