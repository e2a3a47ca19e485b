use crate::config::ENV_ACCESS_TOKEN;
use crate::types::AccessToken;

/// Confirmation page served to the browser after a successful exchange
pub fn render_success_page(token: &AccessToken) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Authorization complete</title>
    <style>
        body {{ font-family: Arial, sans-serif; text-align: center; padding: 50px; }}
        .success {{ color: green; font-size: 24px; }}
        .token {{
            background: #f0f0f0;
            padding: 20px;
            margin: 20px;
            border-radius: 5px;
            word-break: break-all;
            font-family: monospace;
        }}
    </style>
</head>
<body>
    <div class="success">&#x2713; Authorization complete</div>
    <h2>Access Token:</h2>
    <div class="token">{token}</div>
    <p>Copy this token into your repository secrets as <code>{secret}</code>.</p>
    <p><strong>You can close this window and return to the terminal.</strong></p>
</body>
</html>
"#,
        token = escape_html(token.as_str()),
        secret = ENV_ACCESS_TOKEN,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
