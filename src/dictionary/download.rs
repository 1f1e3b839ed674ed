//! Background dictionary downloads.
//!
//! A download runs on its own task and reports exactly once through an
//! unbounded channel; the controller installs the bytes when the outcome
//! arrives on its event loop.

use std::sync::LazyLock;
use std::time::Duration;

use tokio::sync::mpsc;

use super::dictionary_file_name;

/// Shared HTTP client for dictionary downloads.
static HTTP_CLIENT: LazyLock<Option<reqwest::Client>> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(15))
        .timeout(Duration::from_secs(60))
        .user_agent(format!("emoji-palette/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| tracing::warn!(error = %e, "failed to build HTTP client"))
        .ok()
});

/// One requested download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Locale the dictionary is for.
    pub locale: String,
    /// Source URL (`http(s)://` or `file://`).
    pub url: String,
}

/// Completion message for a [`DownloadRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Locale the download was started for.
    pub locale: String,
    /// Downloaded bytes, or a human-readable failure reason.
    pub result: Result<Vec<u8>, String>,
}

/// What: Build the download URL for a locale's dictionary.
///
/// Inputs:
/// - `base`: Directory-style base URL, with or without a trailing `/`.
/// - `locale`: Target locale.
///
/// Output:
/// - `<base>/emoji_<lang>.dict`
#[must_use]
pub fn dictionary_url(base: &str, locale: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), dictionary_file_name(locale))
}

/// Fetch the bytes behind `url`.
async fn fetch(url: &str) -> Result<Vec<u8>, String> {
    if let Some(path) = url.strip_prefix("file://") {
        return tokio::fs::read(path)
            .await
            .map_err(|e| format!("read {path}: {e}"));
    }
    let client = HTTP_CLIENT
        .as_ref()
        .ok_or_else(|| "HTTP client unavailable".to_string())?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;
    tracing::debug!(
        url,
        status = response.status().as_u16(),
        "dictionary download response received"
    );
    let response = response
        .error_for_status()
        .map_err(|e| format!("server error: {e}"))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("reading body failed: {e}"))?;
    if bytes.is_empty() {
        return Err("empty response body".to_string());
    }
    Ok(bytes.to_vec())
}

/// What: Start a download on a background task.
///
/// Inputs:
/// - `request`: Locale and source URL.
/// - `tx`: Channel receiving the single [`DownloadOutcome`].
///
/// Details:
/// - Must be called from within a Tokio runtime.
/// - A closed receiver is ignored; the outcome is simply dropped.
pub fn download_in_background(request: DownloadRequest, tx: mpsc::UnboundedSender<DownloadOutcome>) {
    tokio::spawn(async move {
        tracing::info!(locale = %request.locale, url = %request.url, "downloading emoji dictionary");
        let result = fetch(&request.url).await;
        match &result {
            Ok(bytes) => tracing::info!(
                locale = %request.locale,
                bytes = bytes.len(),
                "emoji dictionary download finished"
            ),
            Err(e) => tracing::warn!(
                locale = %request.locale,
                url = %request.url,
                error = %e,
                "emoji dictionary download failed"
            ),
        }
        let _ = tx.send(DownloadOutcome {
            locale: request.locale,
            result,
        });
    });
}
