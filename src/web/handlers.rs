//! Web UI handlers: the MO-injection form and its POST target.

use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use tracing::warn;

use crate::smsc::Smsc;

/// Query parameters carried across the post/redirect/get cycle.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    sender: Option<String>,
    #[serde(default)]
    recipient: Option<String>,
}

/// The submitted MO form.
#[derive(Debug, Deserialize)]
pub struct MoForm {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub system_id: String,
}

/// GET /: render the form with the current bound sessions.
pub async fn render_page(
    State(smsc): State<Arc<Smsc>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let system_ids = smsc.bound_system_ids().await;
    Html(render_form(&system_ids, &query))
}

/// POST /: deliver the MO message, then redirect back with the outcome.
pub async fn submit_message(
    State(smsc): State<Arc<Smsc>>,
    Form(form): Form<MoForm>,
) -> Redirect {
    let outcome = smsc
        .send_mo(&form.sender, &form.recipient, &form.message, &form.system_id)
        .await;

    let status = match outcome {
        Ok(()) => ("message", "MO message was successfully sent".to_string()),
        Err(e) => {
            warn!(error = %e, "MO submission failed");
            ("error", e.to_string())
        }
    };

    let query = serde_urlencoded::to_string([
        (status.0, status.1.as_str()),
        ("sender", form.sender.as_str()),
        ("recipient", form.recipient.as_str()),
    ])
    .unwrap_or_default();

    Redirect::to(&format!("/?{query}"))
}

const STYLE: &str = "
html, body { padding: 0; margin: 0; font-size: 20px; font-family: sans-serif; background: #f0f0f0; }
#container { margin: 40px auto; width: 560px; padding: 10px 40px; border-radius: 6px; box-shadow: 0 0 7px #dfdfdf; background: #fff; }
#title { color: #3585f7; font-weight: bold; text-transform: uppercase; font-size: 24px; }
form { margin: 20px auto; color: #394045; padding: 10px; width: 400px; }
input, label, textarea { display: block; box-sizing: border-box; width: 100%; border: none; color: #657c89; }
label { text-transform: uppercase; color: #657c89; font-size: 14px; font-weight: bold; padding: 0; }
input, textarea { background: #f0f0f0; font-size: 20px; padding: 10px; margin: 5px 0 20px 0; border-radius: 3px; }
textarea { resize: vertical; }
select { min-width: 200px; }
input[type=\"submit\"] { font-weight: bold; font-size: 16px; color: #fff; text-transform: uppercase; background: #3585f7; }
input[type=\"submit\"]:disabled { background: #dfdfdf; }
#message { color: #009688; }
.error { color: #f44336; }
";

fn render_form(system_ids: &[String], query: &PageQuery) -> String {
    let sender = escape(query.sender.as_deref().unwrap_or_default());
    let recipient = escape(query.recipient.as_deref().unwrap_or_default());

    let options: String = system_ids
        .iter()
        .map(|id| format!("<option value=\"{0}\">{0}</option>\n", escape(id)))
        .collect();

    let no_sessions_note = if system_ids.is_empty() {
        "<sub class=\"error\">No smpp sessions found. At least one smpp client should connect to smscsim</sub>"
    } else {
        ""
    };
    let submit_disabled = if system_ids.is_empty() { " disabled" } else { "" };

    let banner = match (&query.message, &query.error) {
        (Some(message), _) => format!("<p id=\"message\">{}</p>", escape(message)),
        (None, Some(error)) => format!("<p class=\"error\">{}</p>", escape(error)),
        (None, None) => String::new(),
    };

    format!(
        r#"<html lang="en">
<head>
  <meta charset="utf-8">
  <title>smscsim web page</title>
  <style>{STYLE}</style>
</head>
<body>
<div id="container">
<form action="/" method="POST">
  <p id="title">Send MO message</p>
  <p>
    <label for="sender">Sender (MSISDN)</label>
    <input id="sender" type="text" name="sender" placeholder="sender" value="{sender}">
  </p>
  <p>
    <label for="recipient">Recipient (short number)</label>
    <input id="recipient" type="text" name="recipient" placeholder="recipient" value="{recipient}">
  </p>
  <p>
    <label for="system_id">System ID</label>
    {no_sessions_note}
    <select id="system_id" name="system_id">
    {options}
    </select>
  </p>
  <p>
    <label for="short_message">Short message</label>
    <textarea id="short_message" name="message" placeholder="Short message..."></textarea>
  </p>
  <p>
    <input type="submit" value="Submit"{submit_disabled}>
  </p>
  {banner}
</form>
</div>
</body>
</html>
"#
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
