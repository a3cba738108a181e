//! Token/task extraction from the remote service's HTML page.
//!
//! The upstream exposes no documented API; both credentials are embedded in
//! the page markup. Everything that depends on that markup lives in this one
//! adapter so an upstream change only touches these patterns.

use super::RemoteSession;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""token":"([^"]+)""#).unwrap());
static TASK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"taskId\s*=\s*'([^']+)'").unwrap());

/// Scan a fetched HTML document for the auth token and task id.
///
/// The two extractions are independent; either one missing means no
/// session.
pub fn scrape_session(html: &str) -> Option<RemoteSession> {
    let token = TOKEN_RE.captures(html)?.get(1)?.as_str().to_string();
    let task_id = TASK_RE.captures(html)?.get(1)?.as_str().to_string();

    Some(RemoteSession { token, task_id })
}
