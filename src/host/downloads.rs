//! Download service contract and filename-determination hook types.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::config::ConflictAction;
use crate::error::Result;
use crate::identifiers::DownloadId;

// ============================================================================
// DownloadRequest
// ============================================================================

/// A single download request handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// URL to download.
    pub url: String,
    /// Policy for naming the file when one of the same name exists.
    #[serde(rename = "conflictAction")]
    pub conflict_action: ConflictAction,
    /// Whether to prompt the user with a save dialog.
    #[serde(rename = "saveAs")]
    pub save_as: bool,
}

// ============================================================================
// Filename Hook Types
// ============================================================================

/// A download whose filename is being determined by the host.
#[derive(Debug, Clone)]
pub struct FilenameItem {
    /// The download being named.
    pub download_id: DownloadId,
    /// Filename the host suggests.
    pub filename: String,
}

/// The listener's answer: keep or change the filename, set the policy.
///
/// The engine's own listener always echoes the filename unchanged and only
/// overrides the conflict policy from stored configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameSuggestion {
    /// Filename to use.
    pub filename: String,
    /// Conflict policy to apply.
    pub conflict_action: ConflictAction,
}

/// Callback invoked by the host for every initiated download.
///
/// The listener may suspend (it reads the settings store), so it returns a
/// boxed future rather than a value.
pub type FilenameListener =
    Box<dyn Fn(FilenameItem) -> BoxFuture<'static, FilenameSuggestion> + Send + Sync>;

// ============================================================================
// DownloadService
// ============================================================================

/// Asynchronous download issuing and filename interception.
#[async_trait]
pub trait DownloadService: Send + Sync {
    /// Issues a download request.
    ///
    /// Resolves once the request is accepted; completion of the transfer
    /// itself is not modeled here.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected. Failures are handled
    /// per-intent and never abort sibling downloads.
    async fn download(&self, request: DownloadRequest) -> Result<DownloadId>;

    /// Registers the filename-determination listener.
    ///
    /// The host must invoke the listener for every initiated download and
    /// apply the returned suggestion. Registering a new listener replaces
    /// the previous one.
    fn on_determining_filename(&self, listener: FilenameListener);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_request_wire_names() {
        let request = DownloadRequest {
            url: "http://x/a.png".into(),
            conflict_action: ConflictAction::Uniquify,
            save_as: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["conflictAction"], "uniquify");
        assert_eq!(json["saveAs"], false);
    }
}
