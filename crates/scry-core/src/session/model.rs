//! Session domain model.
//!
//! This module contains the core Session entity: the single stateful object
//! of the application. All image replacement goes through [`Session`]
//! methods so the selection and the sent-flag can never drift out of sync
//! with the image they describe.

use uuid::Uuid;

use crate::selection::Selection;
use crate::session::message::{ConversationMessage, MessageRole};
use crate::snapshot::Snapshot;

/// Greeting seeded into a fresh session's transcript.
pub const GREETING: &str = "Hi! You can ask about the snapshot. \
     Type a question to send it, or use /insight for a quick analysis.";

/// In-memory state for one session: snapshot, selection, transcript and the
/// one-time-send flag for the current image.
///
/// Invariants upheld here:
/// - `image_already_sent` is true only while the current image has been
///   transmitted at least once since it was last set; replacing the image
///   resets it.
/// - Replacing the image clears the selection, which is expressed in
///   displayed coordinates of the previous image.
/// - The transcript is append-only between clears.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// The user-drawn crop selection, in displayed coordinates
    pub selection: Selection,
    image: Option<Snapshot>,
    transcript: Vec<ConversationMessage>,
    image_already_sent: bool,
}

impl Session {
    /// Creates a fresh session with the seeded assistant greeting.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            selection: Selection::default(),
            image: None,
            transcript: vec![ConversationMessage::new(MessageRole::Assistant, GREETING)],
            image_already_sent: false,
        }
    }

    pub fn image(&self) -> Option<&Snapshot> {
        self.image.as_ref()
    }

    pub fn transcript(&self) -> &[ConversationMessage] {
        &self.transcript
    }

    pub fn image_already_sent(&self) -> bool {
        self.image_already_sent
    }

    /// The current image, if it has not yet been transmitted.
    pub fn unsent_image(&self) -> Option<&Snapshot> {
        if self.image_already_sent {
            None
        } else {
            self.image.as_ref()
        }
    }

    /// Installs a new image (from capture or crop), clearing the selection
    /// and resetting the sent-flag.
    pub fn replace_image(&mut self, snapshot: Snapshot) {
        self.image = Some(snapshot);
        self.selection.clear();
        self.image_already_sent = false;
    }

    /// Marks the current image as transmitted. No effect without an image.
    pub fn mark_image_sent(&mut self) {
        if self.image.is_some() {
            self.image_already_sent = true;
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.transcript
            .push(ConversationMessage::new(MessageRole::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.transcript
            .push(ConversationMessage::new(MessageRole::Assistant, content));
    }

    /// Full reset: image, selection and transcript are dropped and the
    /// sent-flag cleared. The session keeps its identity.
    pub fn clear(&mut self) {
        self.image = None;
        self.selection.clear();
        self.transcript.clear();
        self.image_already_sent = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn snapshot(width: u32, height: u32) -> Snapshot {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255]));
        Snapshot::from_rgba(img, 300).unwrap()
    }

    #[test]
    fn test_new_session_is_seeded_with_greeting() {
        let session = Session::new();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, MessageRole::Assistant);
        assert_eq!(session.transcript()[0].content, GREETING);
        assert!(session.image().is_none());
        assert!(session.selection.is_empty());
        assert!(!session.image_already_sent());
    }

    #[test]
    fn test_replace_image_resets_selection_and_flag() {
        let mut session = Session::new();
        session.replace_image(snapshot(800, 600));
        session.selection.press(10, 10);
        session.selection.drag_to(60, 40);
        session.selection.release();
        session.mark_image_sent();

        session.replace_image(snapshot(400, 300));
        assert!(session.selection.is_empty());
        assert!(!session.image_already_sent());
        assert_eq!(session.image().unwrap().native_size(), (400, 300));
    }

    #[test]
    fn test_unsent_image_respects_flag() {
        let mut session = Session::new();
        assert!(session.unsent_image().is_none());

        session.replace_image(snapshot(100, 100));
        assert!(session.unsent_image().is_some());

        session.mark_image_sent();
        assert!(session.unsent_image().is_none());
        assert!(session.image().is_some());
    }

    #[test]
    fn test_mark_image_sent_without_image_is_noop() {
        let mut session = Session::new();
        session.mark_image_sent();
        assert!(!session.image_already_sent());
    }

    #[test]
    fn test_transcript_is_append_only() {
        let mut session = Session::new();
        session.push_user("hello");
        session.push_assistant("hi");
        let roles: Vec<_> = session.transcript().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::Assistant, MessageRole::User, MessageRole::Assistant]
        );
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = Session::new();
        session.replace_image(snapshot(100, 100));
        session.selection.press(1, 1);
        session.selection.drag_to(10, 10);
        session.push_user("hello");
        session.mark_image_sent();

        session.clear();
        assert!(session.image().is_none());
        assert!(session.selection.is_empty());
        assert!(session.transcript().is_empty());
        assert!(!session.image_already_sent());
    }
}
