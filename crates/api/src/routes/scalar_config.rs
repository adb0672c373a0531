//! Custom HTML shell for the Scalar reference page served at `/docs`.

use serde_json::to_string_pretty;
use utoipa::openapi::OpenApi;

/// Renders the reference page with the API document inlined, so `/docs`
/// works without a network round trip for the document itself.
///
/// # Panics
///
/// Panics if the `OpenApi` document cannot be serialized to JSON.
#[must_use]
pub fn get_custom_html(open_api: &OpenApi) -> String {
    let json = to_string_pretty(open_api).expect("failed to serialize OpenApi document");

    format!(
        r#"
<!doctype html>
<html>
  <head>
    <title>Annotation Backend API Reference</title>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
  </head>
  <body>
    <div id="app"></div>

    <script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference"></script>

    <script>
      Scalar.createApiReference('#app', {{
        "content": {json},
        "layout": "modern",
        "showSidebar": true,
        "hideModels": false
      }})
    </script>
  </body>
</html>
"#,
    )
}
