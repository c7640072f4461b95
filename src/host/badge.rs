//! Visual indicator surface contract.

// ============================================================================
// BadgeSurface
// ============================================================================

/// The host-rendered indicator: short text, tooltip title, background color.
///
/// Calls are cheap display updates, so this trait is synchronous; the
/// controller pushes every state transition through it. Colors are CSS hex
/// strings (`"#2196f3"`).
pub trait BadgeSurface: Send + Sync {
    /// Sets the indicator text (empty string clears it).
    fn set_text(&self, text: &str);

    /// Sets the tooltip title.
    fn set_title(&self, title: &str);

    /// Sets the indicator background color.
    fn set_background_color(&self, color: &str);
}
