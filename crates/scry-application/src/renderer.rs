//! Presentation seam.

use scry_core::selection::Selection;
use scry_core::session::MessageRole;
use scry_core::snapshot::Snapshot;

/// Rendering capabilities the session controller calls with data.
///
/// Message content is markup: assistant replies arrive from the endpoint as
/// markup, and user/notice text is escaped before it gets here. A terminal
/// frontend will typically strip tags before printing; a graphical one can
/// render them.
pub trait Renderer: Send {
    /// Redraws the canvas: base image plus the selection rectangle when it
    /// has nonzero area. `None` means the no-snapshot placeholder.
    fn render_canvas(&mut self, image: Option<&Snapshot>, selection: &Selection);

    /// Appends one message to the chat panel.
    fn render_message(&mut self, role: MessageRole, markup: &str);

    /// Shows or hides the pending ("Thinking...") indicator.
    fn set_pending(&mut self, pending: bool);

    /// Surfaces a blocking notice outside the chat panel.
    fn notice(&mut self, message: &str);

    /// Empties the chat panel.
    fn clear_transcript(&mut self);
}
