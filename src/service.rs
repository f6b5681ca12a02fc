// src/service.rs
//! Host <-> page round trip.
//!
//! The page context owns the current document and answers scan requests one
//! at a time. The host only ever sees a [`PageHandle`]; each scan is a single
//! request/response exchange and the document is re-read fresh every time.

use tokio::sync::{mpsc, oneshot};

use crate::aggregate::ScanResult;
use crate::scanner::Scanner;
use crate::utils::error::{ScanError, ServiceError};

const COMMAND_BUFFER: usize = 16;

enum PageCommand {
    Scan {
        reply: oneshot::Sender<Result<ScanResult, ScanError>>,
    },
    Replace {
        html: String,
    },
}

/// Host-side handle to a running page context.
#[derive(Clone)]
pub struct PageHandle {
    tx: mpsc::Sender<PageCommand>,
}

impl PageHandle {
    /// Starts a page context holding `html`. Must be called inside a tokio runtime.
    pub fn spawn(html: String, scanner: Scanner) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        tokio::spawn(run_page_context(html, scanner, rx));
        Self { tx }
    }

    /// Requests one scan of the document as it is right now.
    pub async fn scan(&self) -> Result<ScanResult, ServiceError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(PageCommand::Scan { reply })
            .await
            .map_err(|_| ServiceError::ContextClosed)?;
        let outcome = response.await.map_err(|_| ServiceError::ContextClosed)?;
        Ok(outcome?)
    }

    /// Swaps the page content; later scans see the new document.
    pub async fn replace_document(&self, html: String) -> Result<(), ServiceError> {
        self.tx
            .send(PageCommand::Replace { html })
            .await
            .map_err(|_| ServiceError::ContextClosed)
    }
}

async fn run_page_context(
    mut html: String,
    scanner: Scanner,
    mut rx: mpsc::Receiver<PageCommand>,
) {
    tracing::debug!("Page context started ({} bytes)", html.len());
    while let Some(command) = rx.recv().await {
        match command {
            PageCommand::Scan { reply } => {
                let outcome = scanner.scan_html(&html);
                if reply.send(outcome).is_err() {
                    tracing::debug!("Scan requester went away before the result was ready");
                }
            }
            PageCommand::Replace { html: next } => {
                tracing::debug!("Page content replaced ({} bytes)", next.len());
                html = next;
            }
        }
    }
    tracing::debug!("Page context stopped");
}
