//! Live preview document assembly.

use crate::models::ProjectFiles;

/// Inline the three buffers into one HTML document for the preview iframe.
///
/// The stylesheet goes into `<head>`, the markup into `<body>` followed by the
/// script, so the script runs after the markup it touches has been parsed.
pub fn render_preview(files: &ProjectFiles) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <style>{css}</style>\n  </head>\n  <body>\n    {html}\n    <script>{js}</script>\n  </body>\n</html>\n",
        css = files.css,
        html = files.html,
        js = files.javascript,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_preview_orders_sections() {
        let files = ProjectFiles {
            html: "<p id=\"x\">hi</p>".to_string(),
            css: "p { color: red; }".to_string(),
            javascript: "document.getElementById('x').textContent = 'js';".to_string(),
        };
        let doc = render_preview(&files);

        assert!(doc.starts_with("<!DOCTYPE html>"));
        let style = doc.find("<style>p { color: red; }</style>").unwrap();
        let body = doc.find("<body>").unwrap();
        let markup = doc.find("<p id=\"x\">hi</p>").unwrap();
        let script = doc.find("<script>document.getElementById").unwrap();
        assert!(style < body);
        assert!(body < markup);
        assert!(markup < script);
    }

    #[test]
    fn test_render_preview_with_empty_buffers() {
        let doc = render_preview(&ProjectFiles::default());
        assert!(doc.contains("<style></style>"));
        assert!(doc.contains("<script></script>"));
    }
}
