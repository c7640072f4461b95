//! Shared in-memory fakes for the workflow tests.
//!
//! Each fake records the calls the engine makes so tests can assert on
//! them. All state sits behind `parking_lot` locks; nothing blocks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;

use tab_downloader::{
    BadgeSurface, BrowserSession, DownloadId, DownloadRequest, DownloadService, Error,
    FilenameItem, FilenameListener, FilenameSuggestion, PhrasePicker, Result, SettingsStore,
    TabId, TabInfo, WindowId,
};

// ============================================================================
// MemoryStore
// ============================================================================

/// Settings store backed by a plain map, optionally failing outright.
pub struct MemoryStore {
    values: Mutex<FxHashMap<String, Value>>,
    fail: bool,
}

impl MemoryStore {
    pub fn with(pairs: &[(&str, Value)]) -> Arc<Self> {
        let mut values = FxHashMap::default();
        for (k, v) in pairs {
            values.insert((*k).to_string(), v.clone());
        }
        Arc::new(Self {
            values: Mutex::new(values),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            values: Mutex::new(FxHashMap::default()),
            fail: true,
        })
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<FxHashMap<String, Value>> {
        if self.fail {
            return Err(Error::store("store offline"));
        }
        let values = self.values.lock();
        Ok(keys
            .iter()
            .filter_map(|k| values.get(*k).map(|v| ((*k).to_string(), v.clone())))
            .collect())
    }
}

// ============================================================================
// FakeSession
// ============================================================================

/// One-window session; `remove_tab` actually removes and records.
pub struct FakeSession {
    window: WindowId,
    tabs: Mutex<Vec<TabInfo>>,
    removed: Mutex<Vec<TabId>>,
    fail_removals: bool,
}

impl FakeSession {
    pub fn with_tabs(tabs: Vec<TabInfo>) -> Arc<Self> {
        Arc::new(Self {
            window: WindowId::new(1).unwrap(),
            tabs: Mutex::new(tabs),
            removed: Mutex::new(Vec::new()),
            fail_removals: false,
        })
    }

    /// Like [`with_tabs`](Self::with_tabs), but every removal is rejected.
    pub fn with_unremovable_tabs(tabs: Vec<TabInfo>) -> Arc<Self> {
        Arc::new(Self {
            window: WindowId::new(1).unwrap(),
            tabs: Mutex::new(tabs),
            removed: Mutex::new(Vec::new()),
            fail_removals: true,
        })
    }

    pub fn removed_tabs(&self) -> Vec<TabId> {
        self.removed.lock().clone()
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn current_window(&self) -> Result<WindowId> {
        Ok(self.window)
    }

    async fn tabs_in_window(&self, window: WindowId) -> Result<Vec<TabInfo>> {
        if window != self.window {
            return Err(Error::session("no such window"));
        }
        Ok(self.tabs.lock().clone())
    }

    async fn remove_tab(&self, tab: TabId) -> Result<()> {
        if self.fail_removals {
            return Err(Error::session("tab removal rejected"));
        }
        let mut tabs = self.tabs.lock();
        let before = tabs.len();
        tabs.retain(|t| t.id != tab);
        if tabs.len() == before {
            return Err(Error::tab_not_found(tab));
        }
        self.removed.lock().push(tab);
        Ok(())
    }
}

// ============================================================================
// FakeDownloads
// ============================================================================

/// Records download requests; URLs in `fail_urls` are rejected.
pub struct FakeDownloads {
    requests: Mutex<Vec<DownloadRequest>>,
    fail_urls: Vec<String>,
    listener: Mutex<Option<FilenameListener>>,
}

impl FakeDownloads {
    pub fn new() -> Arc<Self> {
        Self::failing_for(&[])
    }

    pub fn failing_for(urls: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            fail_urls: urls.iter().map(|s| (*s).to_string()).collect(),
            listener: Mutex::new(None),
        })
    }

    pub fn requests(&self) -> Vec<DownloadRequest> {
        self.requests.lock().clone()
    }

    /// Drives the registered filename listener the way a host would.
    pub async fn determine_filename(&self, item: FilenameItem) -> Option<FilenameSuggestion> {
        let future = {
            let guard = self.listener.lock();
            guard.as_ref().map(|listener| listener(item))
        };
        match future {
            Some(future) => Some(future.await),
            None => None,
        }
    }
}

#[async_trait]
impl DownloadService for FakeDownloads {
    async fn download(&self, request: DownloadRequest) -> Result<DownloadId> {
        if self.fail_urls.contains(&request.url) {
            return Err(Error::download(request.url, "rejected by test"));
        }
        self.requests.lock().push(request);
        Ok(DownloadId::generate())
    }

    fn on_determining_filename(&self, listener: FilenameListener) {
        *self.listener.lock() = Some(listener);
    }
}

// ============================================================================
// RecordingSurface
// ============================================================================

/// Badge surface recording the last pushed values and the error count.
#[derive(Default)]
pub struct RecordingSurface {
    pub text: Mutex<String>,
    pub title: Mutex<String>,
    pub color: Mutex<String>,
    pub error_transitions: Mutex<usize>,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl BadgeSurface for RecordingSurface {
    fn set_text(&self, text: &str) {
        if text == "!" {
            *self.error_transitions.lock() += 1;
        }
        *self.text.lock() = text.to_string();
    }

    fn set_title(&self, title: &str) {
        *self.title.lock() = title.to_string();
    }

    fn set_background_color(&self, color: &str) {
        *self.color.lock() = color.to_string();
    }
}

// ============================================================================
// FixedPicker
// ============================================================================

/// Phrase picker pinned to a fixed index.
pub struct FixedPicker(pub usize);

impl PhrasePicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Installs the test log subscriber; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn tab(id: u32, url: &str) -> TabInfo {
    TabInfo::new(TabId::new(id).unwrap(), url)
}

pub fn tab_id(id: u32) -> TabId {
    TabId::new(id).unwrap()
}

/// Polls `condition` until it holds or the timeout elapses.
pub async fn wait_until(condition: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
