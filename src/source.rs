// src/source.rs
use reqwest::header;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::utils::error::SourceError;

const USER_AGENT: &str = concat!("value-summer/", env!("CARGO_PKG_VERSION"));

/// Where the page to scan comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    File(PathBuf),
    Stdin,
    Url(String),
}

impl DocumentSource {
    /// `-` means stdin; anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            DocumentSource::Stdin
        } else {
            DocumentSource::File(PathBuf::from(arg))
        }
    }

    pub async fn load(&self) -> Result<String, SourceError> {
        match self {
            DocumentSource::File(path) => {
                tracing::info!("Reading page from {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
            DocumentSource::Stdin => {
                tracing::info!("Reading page from stdin");
                let mut html = String::new();
                tokio::io::stdin().read_to_string(&mut html).await?;
                Ok(html)
            }
            DocumentSource::Url(url) => fetch_page(url).await,
        }
    }
}

/// Creates a reqwest client for fetching pages.
fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}

/// Downloads a page. Only the static HTML is seen; nothing is rendered.
pub async fn fetch_page(url: &str) -> Result<String, SourceError> {
    let client = build_client()?;

    tracing::info!("Downloading page from: {}", url);
    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(SourceError::Forbidden);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url.to_string()));
        }
        return Err(SourceError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg() {
        assert_eq!(DocumentSource::from_arg("-"), DocumentSource::Stdin);
        assert_eq!(
            DocumentSource::from_arg("page.html"),
            DocumentSource::File(PathBuf::from("page.html"))
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = DocumentSource::File(PathBuf::from("/no/such/page.html"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[tokio::test]
    async fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("value_summer_{}.html", std::process::id()));
        tokio::fs::write(&path, "<p>$1</p>").await.unwrap();
        let html = DocumentSource::File(path.clone()).load().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(html, "<p>$1</p>");
    }
}
