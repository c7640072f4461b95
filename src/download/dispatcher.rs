//! Per-intent download dispatch.
//!
//! Each intent is handled on its own spawned task with no ordering
//! guarantees relative to its siblings; every completion path is
//! self-contained. Completions feed back into the coordinator as recount
//! requests over a channel — the dispatcher never holds a reference to the
//! coordinator itself.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::badge::BadgeController;
use crate::config::Config;
use crate::error::Error;
use crate::host::{BrowserSession, DownloadRequest, DownloadService};

use super::intent::IntentMap;

// ============================================================================
// Recount Feedback
// ============================================================================

/// How urgently a completion wants the badge re-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecountRequest {
    /// Recount now.
    Immediate,
    /// Coalesce with other completions through the completion debouncer.
    Debounced,
}

/// Clonable handle for requesting recounts from completion paths.
#[derive(Clone)]
pub struct RecountHandle {
    /// Channel into the coordinator's recount loop.
    tx: mpsc::UnboundedSender<RecountRequest>,
}

impl RecountHandle {
    /// Creates a handle over the coordinator's channel.
    pub(crate) fn new(tx: mpsc::UnboundedSender<RecountRequest>) -> Self {
        Self { tx }
    }

    /// Requests a recount. Silently drops the request if the coordinator
    /// is gone — there is no badge left to update.
    pub fn request(&self, request: RecountRequest) {
        let _ = self.tx.send(request);
    }
}

// ============================================================================
// DownloadDispatcher
// ============================================================================

/// Issues download requests for qualifying tabs and conditionally closes
/// tabs afterward.
pub struct DownloadDispatcher {
    /// The host download service.
    downloads: Arc<dyn DownloadService>,
    /// The browsing session, for closing tabs after download.
    session: Arc<dyn BrowserSession>,
    /// Badge controller, for the no-downloadable-tabs error.
    badge: Arc<BadgeController>,
    /// Recount feedback into the coordinator.
    recount: RecountHandle,
}

impl DownloadDispatcher {
    /// Creates a dispatcher.
    #[must_use]
    pub fn new(
        downloads: Arc<dyn DownloadService>,
        session: Arc<dyn BrowserSession>,
        badge: Arc<BadgeController>,
        recount: RecountHandle,
    ) -> Self {
        Self {
            downloads,
            session,
            badge,
            recount,
        }
    }

    /// Dispatches every intent, fire-and-forget.
    ///
    /// An empty map is the "no downloadable tabs in this window" condition:
    /// it transitions the badge to its error state and issues zero download
    /// requests. Otherwise each intent runs independently; a failed request
    /// never aborts a sibling, and every outcome requests a recount so the
    /// badge reflects current reality. Successful closes coalesce through
    /// the completion debouncer; a failed download or failed tab removal
    /// recounts immediately.
    pub async fn dispatch(&self, intents: IntentMap, config: &Config) {
        if intents.is_empty() {
            warn!("No downloadable tabs in this window");
            self.badge
                .set_error(&Error::NoDownloadableTabs.to_string());
            return;
        }

        info!(count = intents.len(), "Dispatching downloads");

        for (tab_id, intent) in intents {
            let request = DownloadRequest {
                url: intent.url.clone(),
                conflict_action: config.conflict_action,
                save_as: config.save_as,
            };

            let downloads = Arc::clone(&self.downloads);
            let session = Arc::clone(&self.session);
            let recount = self.recount.clone();

            tokio::spawn(async move {
                match downloads.download(request).await {
                    Ok(download_id) => {
                        debug!(%tab_id, %download_id, url = %intent.url, "Download started");

                        if intent.close_after_download {
                            match session.remove_tab(tab_id).await {
                                Ok(()) => recount.request(RecountRequest::Debounced),
                                Err(e) => {
                                    warn!(%tab_id, error = %e, "Failed to close tab after download");
                                    // The tab is still open; re-sync now rather
                                    // than after the completion window.
                                    recount.request(RecountRequest::Immediate);
                                }
                            }
                        } else {
                            recount.request(RecountRequest::Immediate);
                        }
                    }
                    Err(e) => {
                        warn!(%tab_id, url = %intent.url, error = %e, "Download request failed");
                        recount.request(RecountRequest::Immediate);
                    }
                }
            });
        }
    }
}
