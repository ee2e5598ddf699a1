//! Page title lookup for newly shortened URLs

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use ureq::Agent;

use crate::config::TitleConfig;
use crate::errors::{Result, ShortlyError};

#[async_trait]
pub trait TitleFetcher: Send + Sync {
    /// Title for `url`. Falls back to the url itself when the page has none.
    async fn fetch_title(&self, url: &str) -> Result<String>;
}

/// Build the fetcher selected by the `title` config section
pub fn title_fetcher_from_config(config: &TitleConfig) -> Arc<dyn TitleFetcher> {
    if config.enabled {
        Arc::new(HttpTitleFetcher::new(config))
    } else {
        Arc::new(UrlAsTitle)
    }
}

/// Uses the url as its own title; no network access.
pub struct UrlAsTitle;

#[async_trait]
impl TitleFetcher for UrlAsTitle {
    async fn fetch_title(&self, url: &str) -> Result<String> {
        Ok(url.to_string())
    }
}

/// Fetches the page over HTTP on the blocking pool.
pub struct HttpTitleFetcher {
    agent: Agent,
    user_agent: String,
    max_body_bytes: u64,
}

impl HttpTitleFetcher {
    pub fn new(config: &TitleConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs.max(1))))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            user_agent: config.user_agent.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }

    fn fetch_sync(
        agent: &Agent,
        user_agent: &str,
        max_body_bytes: u64,
        url: &str,
    ) -> Result<String> {
        let resp = agent
            .get(url)
            .header("User-Agent", user_agent)
            .call()
            .map_err(|e| ShortlyError::title_fetch(format!("Request to {} failed: {}", url, e)))?;

        debug!("Title fetch {} -> HTTP {}", url, resp.status());

        let mut buf = Vec::new();
        resp.into_body()
            .into_reader()
            .take(max_body_bytes)
            .read_to_end(&mut buf)
            .map_err(|e| {
                ShortlyError::title_fetch(format!("Reading body of {} failed: {}", url, e))
            })?;

        let html = String::from_utf8_lossy(&buf);
        Ok(parse_title(&html).unwrap_or_else(|| url.to_string()))
    }
}

#[async_trait]
impl TitleFetcher for HttpTitleFetcher {
    async fn fetch_title(&self, url: &str) -> Result<String> {
        let agent = self.agent.clone();
        let user_agent = self.user_agent.clone();
        let max_body_bytes = self.max_body_bytes;
        let url_owned = url.to_string();

        tokio::task::spawn_blocking(move || {
            Self::fetch_sync(&agent, &user_agent, max_body_bytes, &url_owned)
        })
        .await
        .map_err(|e| {
            warn!("Title fetch task for {} failed: {}", url, e);
            ShortlyError::title_fetch(format!("Title fetch task failed: {}", e))
        })?
    }
}

/// Text of the first `<title>` element, whitespace-collapsed and entity-decoded.
///
/// Returns `None` when there is no title or it is blank.
pub fn parse_title(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();

    let mut search_from = 0;
    let open = loop {
        let idx = search_from + lower[search_from..].find("<title")?;
        // Reject <titlefoo>
        match lower.as_bytes().get(idx + 6) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {
                break idx;
            }
            _ => search_from = idx + 6,
        }
    };

    let content_start = open + lower[open..].find('>')? + 1;
    let content_end = content_start + lower[content_start..].find("</title")?;

    let collapsed = html[content_start..content_end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let decoded = decode_entities(&collapsed);
    let title = decoded.trim();

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }

    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "middot" => '\u{00B7}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        _ => return None,
    })
}
