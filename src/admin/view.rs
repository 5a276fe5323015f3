//! HTML rendering of the admin page.
//!
//! Download payloads travel in `data-` attributes so the inline script never
//! has to embed user-controlled text in JavaScript literals.

use std::fmt::Write;

use crate::admin::export::EntryExport;
use crate::capture::CaptureEntry;

/// One rendered capture card.
pub struct EntryView<'a> {
    pub entry: &'a CaptureEntry,
    pub export: EntryExport,
}

/// Everything the page template needs.
pub struct PageView<'a> {
    pub domain: &'a str,
    pub admin_path: &'a str,
    pub bulk_file_name: String,
    pub all_logs_base64: String,
    pub entries: Vec<EntryView<'a>>,
}

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; background: #f0f2f5; padding: 20px; color: #1c1e21; }
        .container { max-width: 1200px; margin: 0 auto; }
        .header { background: #fff; padding: 20px; border-radius: 12px; display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; box-shadow: 0 4px 12px rgba(0,0,0,0.05); }
        .card { background: #fff; border-radius: 12px; margin-bottom: 20px; padding: 20px; box-shadow: 0 2px 8px rgba(0,0,0,0.08); border-left: 6px solid #007bff; }
        .card-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 15px; border-bottom: 1px solid #eee; padding-bottom: 10px; }
        .log-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
        pre { background: #1e1e1e; color: #d4d4d4; padding: 15px; font-size: 13px; overflow-x: auto; white-space: pre-wrap; word-break: break-all; margin: 0; border-radius: 8px; line-height: 1.5; }
        .res-pre { color: #9cdcfe; }
        .label { font-size: 12px; font-weight: bold; color: #65676b; margin-bottom: 8px; text-transform: uppercase; }
        button { padding: 10px 18px; border: none; border-radius: 6px; cursor: pointer; font-weight: 600; }
        .btn-green { background: #42b72a; color: white; }
        .btn-blue { background: #1877f2; color: white; }
        .btn-grey { background: #ebedf0; color: #4b4f56; }
        .btn-small { background: #f0f2f5; border: 1px solid #ddd; font-size: 12px; padding: 5px 10px; }
        .empty { text-align: center; padding: 100px; background: white; border-radius: 12px; color: #999; }
        .sub-title { font-size: 14px; color: #65676b; }
"#;

const SCRIPT: &str = r#"
        function downloadFile(b64, name, type) {
            const bin = atob(b64);
            const buf = new Uint8Array(bin.length);
            for (let i = 0; i < bin.length; i++) buf[i] = bin.charCodeAt(i);
            const a = document.createElement("a");
            a.href = URL.createObjectURL(new Blob([buf], { type }));
            a.download = name;
            a.click();
        }
        function downloadSingle(el) { downloadFile(el.dataset.b64, el.dataset.name, "text/plain"); }
        function downloadAll(el) { downloadFile(el.dataset.b64, el.dataset.name, "application/json"); }
        function confirmClear(el) {
            if (confirm("Delete all captured requests?")) {
                fetch(el.dataset.clear, { method: "POST" }).then(() => location.reload());
            }
        }
"#;

/// Render the full admin document.
pub fn render_page(view: &PageView<'_>) -> String {
    let domain = escape_html(view.domain);
    let mut html = String::with_capacity(8 * 1024 + view.all_logs_base64.len() * 2);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>SSRF Monitor - {domain}</title>
    <meta charset="utf-8">
    <style>{STYLE}    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div>
                <h1 style="margin:0; font-size: 24px;">SSRF Monitor</h1>
                <div class="sub-title">Running on: <strong>{domain}</strong> &middot; {count} captured</div>
            </div>
            <div style="display: flex; gap: 10px;">
                <button class="btn-green" onclick="location.reload()">Reload</button>
                <button class="btn-blue" data-b64="{all}" data-name="{bulk}" onclick="downloadAll(this)">Download all (.json)</button>
                <button class="btn-grey" data-clear="{clear}" onclick="confirmClear(this)">Clear</button>
            </div>
        </div>
        <div>
"#,
        count = view.entries.len(),
        all = escape_html(&view.all_logs_base64),
        bulk = escape_html(&view.bulk_file_name),
        clear = escape_html(&format!("{}/clear", view.admin_path)),
    );

    if view.entries.is_empty() {
        let _ = write!(
            html,
            r#"            <div class="empty"><h3>Waiting for requests... ({domain})</h3></div>
"#
        );
    }

    for item in &view.entries {
        render_entry(&mut html, item);
    }

    let _ = write!(
        html,
        r#"        </div>
    </div>
    <script>{SCRIPT}    </script>
</body>
</html>
"#
    );
    html
}

fn render_entry(html: &mut String, item: &EntryView<'_>) {
    let entry = item.entry;
    let _ = write!(
        html,
        r#"            <div class="card" id="capture-{id}">
                <div class="card-header">
                    <span><strong style="color:#007bff;">[{at}]</strong> From: {ip}</span>
                    <button class="btn-small" data-b64="{b64}" data-name="{name}" onclick="downloadSingle(this)">Save</button>
                </div>
                <div class="log-grid">
                    <div><div class="label">Request</div><pre>{request}</pre></div>
                    <div><div class="label">Response</div><pre class="res-pre">{response}</pre></div>
                </div>
            </div>
"#,
        id = entry.id(),
        at = escape_html(entry.captured_at()),
        ip = escape_html(entry.source_ip()),
        b64 = escape_html(&item.export.base64),
        name = escape_html(&item.export.file_name),
        request = escape_html(entry.raw_request()),
        response = escape_html(entry.raw_response()),
    );
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureDraft;
    use chrono::Local;

    fn page<'a>(entries: Vec<EntryView<'a>>) -> PageView<'a> {
        PageView {
            domain: "localhost:3001",
            admin_path: "/admin",
            bulk_file_name: "ssrf_logs_localhost:3001.json".to_string(),
            all_logs_base64: "W10=".to_string(),
            entries,
        }
    }

    #[test]
    fn empty_log_shows_waiting_state() {
        let html = render_page(&page(Vec::new()));
        assert!(html.contains("Waiting for requests... (localhost:3001)"));
        assert!(html.contains(r#"data-b64="W10=""#));
        assert!(html.contains(r#"data-clear="/admin/clear""#));
    }

    #[test]
    fn captured_text_is_escaped() {
        let entry = CaptureEntry::new(
            1,
            Local::now(),
            CaptureDraft {
                source_ip: "127.0.0.1".to_string(),
                raw_request: "POST / HTTP/1.1\r\n\r\n<script>alert(1)</script>".to_string(),
                raw_response: "HTTP/1.1 200 OK\r\n\r\nActive".to_string(),
            },
        );
        let export = EntryExport {
            file_name: "localhost:3001_x.txt".to_string(),
            text: String::new(),
            base64: "QQ==".to_string(),
        };
        let html = render_page(&page(vec![EntryView { entry: &entry, export }]));

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("From: 127.0.0.1"));
        assert!(!html.contains("Waiting for requests"));
    }

    #[test]
    fn escapes_quotes() {
        assert_eq!(escape_html(r#"a"b'c&"#), "a&quot;b&#39;c&amp;");
    }
}
