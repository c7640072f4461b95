//! Event coordination: debounced bindings and the two user-visible
//! workflows.
//!
//! The coordinator subscribes to environment events, debounces them, and
//! sequences the other components:
//!
//! - **Recount** (tab lifecycle events, startup): resolve configuration →
//!   compile patterns → query tabs → publish the badge count.
//! - **Collect-and-download** (action click): reset the badge → query →
//!   build intents → dispatch, or surface "no downloadable tabs".
//!
//! The coordinator is stateless between events apart from the debounce
//! timers it owns; the badge carries the only persistent state. Within one
//! workflow the steps run strictly in sequence; across invocations nothing
//! is ordered and nothing needs to be — recounts are idempotent and always
//! re-derive from a fresh query.
//!
//! Download completions feed back as recount requests over a channel
//! consumed by a task spawned at construction, so the dispatcher never
//! references the coordinator.

// ============================================================================
// Submodules
// ============================================================================

/// Per-binding debounce timers.
pub mod debounce;

/// Environment events and binding wait durations.
pub mod events;

pub use debounce::{DebounceMode, Debouncer};
pub use events::{DebounceWaits, EnvironmentEvent};

// ============================================================================
// Imports
// ============================================================================

use std::sync::{Arc, Weak};

use futures_util::FutureExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::badge::{BadgeController, BadgeState, PhrasePicker, RandomPicker, RangeColorTable};
use crate::config::{ConfigKey, ConfigResolver};
use crate::download::{DownloadDispatcher, RecountHandle, RecountRequest, build_intents};
use crate::error::{Error, Result};
use crate::host::{
    BadgeSurface, BrowserSession, DownloadService, FilenameSuggestion, SettingsStore,
};
use crate::tabs::{PatternSet, TabQueryService};

// ============================================================================
// Bindings
// ============================================================================

/// One independent debounce timer per event binding.
struct Bindings {
    /// Action-click → collect-and-download.
    action_clicked: Debouncer,
    /// Tab-created → recount.
    tab_created: Debouncer,
    /// Tab-updated → recount.
    tab_updated: Debouncer,
    /// Tab-detached → recount.
    tab_detached: Debouncer,
    /// Tab-attached → recount.
    tab_attached: Debouncer,
    /// Tab-removed → recount.
    tab_removed: Debouncer,
}

impl Bindings {
    fn new(waits: &DebounceWaits) -> Self {
        Self {
            action_clicked: Debouncer::new(waits.action_clicked),
            tab_created: Debouncer::new(waits.tab_created),
            tab_updated: Debouncer::new(waits.tab_updated),
            tab_detached: Debouncer::new(waits.tab_detached),
            tab_attached: Debouncer::new(waits.tab_attached),
            tab_removed: Debouncer::new(waits.tab_removed),
        }
    }
}

// ============================================================================
// CoordinatorInner
// ============================================================================

/// Shared coordinator state.
struct CoordinatorInner {
    /// Store-backed configuration resolution.
    resolver: ConfigResolver,
    /// Focused-window tab query.
    query: TabQueryService,
    /// Badge state machine.
    badge: Arc<BadgeController>,
    /// Per-intent download dispatch.
    dispatcher: DownloadDispatcher,
    /// Debounce timers.
    bindings: Bindings,
}

impl CoordinatorInner {
    /// Recount workflow: config → patterns → query → badge.
    async fn recount(&self) {
        let config = self.resolver.resolve(&[ConfigKey::FileTypes]).await;

        let patterns = match PatternSet::for_file_types(&config.file_types) {
            Ok(patterns) => patterns,
            Err(e) => {
                warn!(error = %e, "Failed to compile URL patterns");
                return;
            }
        };

        match self.query.query(&patterns).await {
            Ok(tabs) => self.badge.update(tabs.len()),
            Err(e) => {
                // Leave the badge as-is; the next event re-derives it.
                warn!(error = %e, "Tab query failed, badge left unchanged");
            }
        }
    }

    /// Collect-and-download workflow.
    async fn collect_and_download(&self) {
        info!("Collect-and-download started");
        self.badge.reset();

        let config = self.resolver.resolve_all().await;

        let patterns = match PatternSet::for_file_types(&config.file_types) {
            Ok(patterns) => patterns,
            Err(e) => {
                warn!(error = %e, "Failed to compile URL patterns");
                return;
            }
        };

        let tabs = match self.query.query(&patterns).await {
            Ok(tabs) => tabs,
            Err(e) => {
                // Zero tabs reaches the user as the badge error below.
                warn!(error = %e, "Tab query failed, treating as zero tabs");
                Vec::new()
            }
        };

        let intents = build_intents(&tabs, &config);
        self.dispatcher.dispatch(intents, &config).await;
    }
}

// ============================================================================
// Recount Loop
// ============================================================================

/// Consumes recount requests from download completion paths.
///
/// Holds the coordinator weakly: the loop ends when the coordinator is
/// dropped and the channel drains.
async fn run_recount_loop(
    inner: Weak<CoordinatorInner>,
    mut rx: mpsc::UnboundedReceiver<RecountRequest>,
    completion: Debouncer,
) {
    while let Some(request) = rx.recv().await {
        let Some(strong) = inner.upgrade() else {
            break;
        };

        match request {
            RecountRequest::Immediate => strong.recount().await,
            RecountRequest::Debounced => {
                completion.schedule(move || async move { strong.recount().await });
            }
        }
    }

    debug!("Recount loop terminated");
}

// ============================================================================
// EventCoordinator
// ============================================================================

/// The engine's entry point: routes environment events into workflows.
///
/// Clonable handle over shared state, like every long-lived type in this
/// crate. Construct with [`EventCoordinator::builder`].
#[derive(Clone)]
pub struct EventCoordinator {
    /// Shared inner state.
    inner: Arc<CoordinatorInner>,
}

impl EventCoordinator {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> EventCoordinatorBuilder {
        EventCoordinatorBuilder::new()
    }

    /// Routes one environment event to its binding.
    ///
    /// Startup recounts immediately with no debounce; everything else goes
    /// through its own trailing-edge timer. In-flight workflows are never
    /// cancelled — only the scheduling of the next one is debounced.
    pub async fn handle_event(&self, event: EnvironmentEvent) {
        debug!(%event, "Environment event");

        match event {
            EnvironmentEvent::Startup => self.inner.recount().await,
            EnvironmentEvent::ActionClicked => {
                let inner = Arc::clone(&self.inner);
                self.inner
                    .bindings
                    .action_clicked
                    .schedule(move || async move { inner.collect_and_download().await });
            }
            EnvironmentEvent::TabCreated => self.schedule_recount(|b| &b.tab_created),
            EnvironmentEvent::TabUpdated => self.schedule_recount(|b| &b.tab_updated),
            EnvironmentEvent::TabDetached => self.schedule_recount(|b| &b.tab_detached),
            EnvironmentEvent::TabAttached => self.schedule_recount(|b| &b.tab_attached),
            EnvironmentEvent::TabRemoved => self.schedule_recount(|b| &b.tab_removed),
        }
    }

    /// Drains an event channel, routing each event.
    ///
    /// Returns when the sender side is dropped. No single event failure
    /// ever ends the loop — workflows swallow their own errors.
    pub async fn run(&self, mut events: mpsc::UnboundedReceiver<EnvironmentEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        debug!("Event stream ended");
    }

    /// Runs the recount workflow immediately.
    pub async fn recount(&self) {
        self.inner.recount().await;
    }

    /// Runs the collect-and-download workflow immediately.
    ///
    /// Event-driven hosts get the debounced version via
    /// [`EnvironmentEvent::ActionClicked`]; this bypasses the timer.
    pub async fn collect_and_download(&self) {
        self.inner.collect_and_download().await;
    }

    /// Returns a snapshot of the badge state.
    #[must_use]
    pub fn badge_state(&self) -> BadgeState {
        self.inner.badge.state()
    }

    fn schedule_recount(&self, binding: impl FnOnce(&Bindings) -> &Debouncer) {
        let inner = Arc::clone(&self.inner);
        binding(&self.inner.bindings).schedule(move || async move { inner.recount().await });
    }
}

// ============================================================================
// Filename Hook
// ============================================================================

/// Registers the filename-determination listener.
///
/// For every initiated download the listener re-reads the conflict policy
/// from the store (defaults applied) and suggests the item's own filename
/// unchanged with only the policy overridden.
fn install_filename_hook(resolver: ConfigResolver, downloads: &Arc<dyn DownloadService>) {
    downloads.on_determining_filename(Box::new(move |item| {
        let resolver = resolver.clone();
        async move {
            let config = resolver.resolve(&[ConfigKey::ConflictAction]).await;
            debug!(
                download_id = %item.download_id,
                conflict_action = %config.conflict_action,
                "Filename hook applied"
            );
            FilenameSuggestion {
                filename: item.filename,
                conflict_action: config.conflict_action,
            }
        }
        .boxed()
    }));
}

// ============================================================================
// EventCoordinatorBuilder
// ============================================================================

/// Builder for [`EventCoordinator`].
///
/// The four collaborators are required; the color table, phrase picker,
/// and debounce waits have defaults.
///
/// # Example
///
/// ```ignore
/// let coordinator = EventCoordinator::builder()
///     .store(store)
///     .session(session)
///     .downloads(downloads)
///     .badge_surface(surface)
///     .build()?;
///
/// coordinator.handle_event(EnvironmentEvent::Startup).await;
/// ```
pub struct EventCoordinatorBuilder {
    /// Persistent configuration store.
    store: Option<Arc<dyn SettingsStore>>,
    /// Browsing session service.
    session: Option<Arc<dyn BrowserSession>>,
    /// Download service.
    downloads: Option<Arc<dyn DownloadService>>,
    /// Visual indicator surface.
    surface: Option<Arc<dyn BadgeSurface>>,
    /// Count → color table.
    ranges: RangeColorTable,
    /// Interjection randomness source.
    picker: Option<Box<dyn PhrasePicker>>,
    /// Per-binding quiet periods.
    waits: DebounceWaits,
}

impl Default for EventCoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCoordinatorBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            session: None,
            downloads: None,
            surface: None,
            ranges: RangeColorTable::default(),
            picker: None,
            waits: DebounceWaits::default(),
        }
    }

    /// Sets the settings store.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the browsing session service.
    #[must_use]
    pub fn session(mut self, session: Arc<dyn BrowserSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the download service.
    #[must_use]
    pub fn downloads(mut self, downloads: Arc<dyn DownloadService>) -> Self {
        self.downloads = Some(downloads);
        self
    }

    /// Sets the badge surface.
    #[must_use]
    pub fn badge_surface(mut self, surface: Arc<dyn BadgeSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Overrides the count → color table.
    #[must_use]
    pub fn color_table(mut self, ranges: RangeColorTable) -> Self {
        self.ranges = ranges;
        self
    }

    /// Overrides the interjection randomness source.
    #[must_use]
    pub fn phrase_picker(mut self, picker: Box<dyn PhrasePicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Overrides the per-binding debounce waits.
    #[must_use]
    pub fn debounce_waits(mut self, waits: DebounceWaits) -> Self {
        self.waits = waits;
        self
    }

    /// Builds the coordinator: wires the components, installs the filename
    /// hook, and spawns the recount-feedback loop.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required collaborator is missing.
    pub fn build(self) -> Result<EventCoordinator> {
        let store = self
            .store
            .ok_or_else(|| Error::config("Settings store is required. Use .store() to set it."))?;
        let session = self.session.ok_or_else(|| {
            Error::config("Browsing session is required. Use .session() to set it.")
        })?;
        let downloads = self.downloads.ok_or_else(|| {
            Error::config("Download service is required. Use .downloads() to set it.")
        })?;
        let surface = self.surface.ok_or_else(|| {
            Error::config("Badge surface is required. Use .badge_surface() to set it.")
        })?;

        let picker = self.picker.unwrap_or_else(|| Box::new(RandomPicker));
        let badge = Arc::new(BadgeController::new(surface, self.ranges, picker));

        let (recount_tx, recount_rx) = mpsc::unbounded_channel();
        let dispatcher = DownloadDispatcher::new(
            Arc::clone(&downloads),
            Arc::clone(&session),
            Arc::clone(&badge),
            RecountHandle::new(recount_tx),
        );

        let resolver = ConfigResolver::new(store);
        install_filename_hook(resolver.clone(), &downloads);

        let inner = Arc::new(CoordinatorInner {
            resolver,
            query: TabQueryService::new(session),
            badge,
            dispatcher,
            bindings: Bindings::new(&self.waits),
        });

        tokio::spawn(run_recount_loop(
            Arc::downgrade(&inner),
            recount_rx,
            Debouncer::new(self.waits.completion),
        ));

        debug!("Event coordinator built");
        Ok(EventCoordinator { inner })
    }
}

// ============================================================================
// Tests
// ============================================================================
