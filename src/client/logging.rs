//! Request and response logging.
//!
//! Request and status lines go to `info`, headers and bodies to `debug`, all
//! tagged with the request id so interleaved output can be followed.

use crate::models::ApiResponse;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

/// Bodies larger than this are logged truncated.
const MAX_LOGGED_BODY: usize = 64 * 1024;

/// Logs an outgoing request.
pub fn log_request(request_id: &str, method: &str, url: &Url, headers: &HashMap<String, String>) {
    log::info!("[{}] --> {} {}", request_id, method, url);

    if log::log_enabled!(log::Level::Debug) {
        let mut names: Vec<&String> = headers.keys().collect();
        names.sort();
        for name in names {
            log::debug!("[{}]     {}: {}", request_id, name, headers[name]);
        }
    }
}

/// Logs a received response.
pub fn log_response(response: &ApiResponse) {
    log::info!(
        "[{}] <-- {} {} ({} ms, {} bytes)",
        response.request_id,
        response.status_code,
        response.status_text,
        response.duration.as_millis(),
        response.body.len()
    );

    if log::log_enabled!(log::Level::Debug) {
        let mut names: Vec<&String> = response.headers.keys().collect();
        names.sort();
        for name in names {
            log::debug!(
                "[{}]     {}: {}",
                response.request_id,
                name,
                response.headers[name]
            );
        }
        log::debug!("[{}]\n{}", response.request_id, render_body(&response.body));
    }
}

/// Renders a body for the log: pretty-printed when it is JSON, raw text
/// otherwise.
pub fn render_body(body: &[u8]) -> String {
    if body.is_empty() {
        return "<empty body>".to_string();
    }

    let (shown, truncated) = if body.len() > MAX_LOGGED_BODY {
        (&body[..MAX_LOGGED_BODY], true)
    } else {
        (body, false)
    };

    let rendered = if truncated {
        String::from_utf8_lossy(shown).into_owned()
    } else {
        match serde_json::from_slice::<Value>(shown) {
            Ok(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| lossy(shown))
            }
            Err(_) => lossy(shown),
        }
    };

    if truncated {
        format!(
            "{}\n... ({} of {} bytes shown)",
            rendered,
            MAX_LOGGED_BODY,
            body.len()
        )
    } else {
        rendered
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
