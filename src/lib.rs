//! Tab Downloader - background coordination engine for downloading media
//! from open browser tabs.
//!
//! The engine filters open tabs by URL file-extension, dispatches download
//! requests with a conflict-resolution policy, optionally closes tabs after
//! a successful download, and maintains a live badge counter reflecting how
//! many tabs currently qualify.
//!
//! # Architecture
//!
//! The engine is host-agnostic: everything browser-specific sits behind
//! four contracts in [`host`]. An environment event enters the
//! [`EventCoordinator`], which debounces it, resolves configuration,
//! compiles URL patterns, queries tabs, and either republishes the badge
//! count or builds download intents and hands them to the dispatcher.
//! Completion callbacks feed back into a recount.
//!
//! Key design principles:
//!
//! - Configuration is re-read from the store on every workflow run
//! - The badge is the only state with continuity between runs
//! - The tab the user is viewing is never auto-closed
//! - No failure ever stops the event subscriptions: everything terminates
//!   in a default substitution or a badge error transition
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tab_downloader::{EnvironmentEvent, EventCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> tab_downloader::Result<()> {
//!     // Host-provided implementations of the collaborator contracts.
//!     let coordinator = EventCoordinator::builder()
//!         .store(store)
//!         .session(session)
//!         .downloads(downloads)
//!         .badge_surface(surface)
//!         .build()?;
//!
//!     coordinator.handle_event(EnvironmentEvent::Startup).await;
//!     coordinator.run(event_receiver).await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`badge`] | Badge state machine and count→color table |
//! | [`config`] | Typed configuration, defaults, store-backed resolution |
//! | [`coordinator`] | Event routing, debouncing, the two workflows |
//! | [`download`] | Download intents and per-intent dispatch |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`host`] | Contracts for the external collaborators |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`tabs`] | URL pattern compilation and the tab query |

// ============================================================================
// Modules
// ============================================================================

/// Badge state machine and count→color mapping.
pub mod badge;

/// Configuration model, defaults, and resolution.
pub mod config;

/// Event coordination, debouncing, and workflows.
pub mod coordinator;

/// Download intents and dispatch.
pub mod download;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Contracts for the external collaborators.
///
/// Hosts implement these traits over their concrete environment.
pub mod host;

/// Type-safe identifiers for browser entities.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Tab filtering: URL patterns and the window-scoped query.
pub mod tabs;

// ============================================================================
// Re-exports
// ============================================================================

// Badge types
pub use badge::{BadgeController, BadgeState, ColorRange, PhrasePicker, RandomPicker, RangeColorTable};

// Configuration types
pub use config::{Config, ConfigKey, ConfigResolver, ConflictAction};

// Coordinator types
pub use coordinator::{
    DebounceMode, DebounceWaits, Debouncer, EnvironmentEvent, EventCoordinator,
    EventCoordinatorBuilder,
};

// Download types
pub use download::{DownloadDispatcher, DownloadIntent, IntentMap, build_intents};

// Error types
pub use error::{Error, Result};

// Host contracts
pub use host::{
    BadgeSurface, BrowserSession, DownloadRequest, DownloadService, FilenameItem,
    FilenameListener, FilenameSuggestion, SettingsStore, TabInfo, TabStatus,
};

// Identifier types
pub use identifiers::{DownloadId, TabId, WindowId};

// Tab query types
pub use tabs::{PatternSet, TabQueryService};
