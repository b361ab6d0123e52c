//! Session use case implementation.
//!
//! Drives the capture / crop / chat operations over a single [`Session`].
//! One operation runs at a time (the frontend awaits each call); network and
//! capture requests are the only suspension points. Every failure is mapped
//! to a user-visible message; nothing here is fatal to the session and
//! nothing is retried automatically.

use std::path::Path;
use std::sync::Arc;

use scry_capture::CaptureRelayHandle;
use scry_core::config::ScryConfig;
use scry_core::markup;
use scry_core::session::{MessageRole, Session};
use scry_core::snapshot::Snapshot;
use scry_core::ScryError;
use scry_interaction::AnalysisApi;

use crate::renderer::Renderer;

/// Prompt synthesized by the quick-insight operation.
pub const INSIGHT_PROMPT: &str = "Please analyze the attached snapshot: \
     what is visible, readable text, bullet points, and suggested actions.";

const SELECT_FIRST: &str = "Draw a selection on the image first (click-and-drag).";
const NO_IMAGE_TO_SEND: &str = "No image to send.";

/// The session controller.
///
/// Owns the session state and its collaborators: the capture relay, the
/// analysis endpoint client, and the renderer.
pub struct SessionUseCase {
    session: Session,
    config: ScryConfig,
    capture: CaptureRelayHandle,
    api: Arc<dyn AnalysisApi>,
    renderer: Box<dyn Renderer>,
}

impl SessionUseCase {
    /// Creates the controller with a fresh session and renders the initial
    /// state: the seeded greeting and the empty canvas placeholder.
    pub fn new(
        config: ScryConfig,
        capture: CaptureRelayHandle,
        api: Arc<dyn AnalysisApi>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        let mut usecase = Self {
            session: Session::new(),
            config,
            capture,
            api,
            renderer,
        };
        if let Some(greeting) = usecase.session.transcript().first() {
            let content = greeting.content.clone();
            usecase
                .renderer
                .render_message(MessageRole::Assistant, &content);
        }
        usecase.render_canvas();
        usecase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Requests a snapshot from the capture relay and installs it.
    ///
    /// On failure the error is surfaced and prior state is left untouched.
    pub async fn capture(&mut self) {
        tracing::info!("[capture] requesting snapshot");
        let frame = match self.capture.capture().await {
            Ok(frame) => frame,
            Err(e) => {
                self.renderer.notice(&e.to_string());
                return;
            }
        };

        match Snapshot::from_rgba(frame.image, self.config.display_width) {
            Ok(snapshot) => {
                tracing::info!(
                    "[capture] snapshot {}x{} displayed at {}x{}",
                    snapshot.width(),
                    snapshot.height(),
                    snapshot.display_size().0,
                    snapshot.display_size().1
                );
                self.session.replace_image(snapshot);
                self.render_canvas();
            }
            Err(e) => self
                .renderer
                .notice(&format!("Failed to load captured image: {e}")),
        }
    }

    /// Resets the session and the chat panel.
    pub fn clear(&mut self) {
        tracing::info!("[clear] resetting session");
        self.session.clear();
        self.renderer.clear_transcript();
        self.render_canvas();
    }

    /// Starts a selection drag. Ignored without a snapshot.
    pub fn selection_press(&mut self, x: i32, y: i32) {
        if self.session.image().is_none() {
            return;
        }
        self.session.selection.press(x, y);
    }

    /// Continues a selection drag, redrawing the overlay.
    pub fn selection_drag(&mut self, x: i32, y: i32) {
        if self.session.image().is_none() || !self.session.selection.is_dragging() {
            return;
        }
        self.session.selection.drag_to(x, y);
        self.render_canvas();
    }

    /// Finalizes the selection drag.
    pub fn selection_release(&mut self) {
        self.session.selection.release();
    }

    /// Crops the snapshot to the current selection.
    ///
    /// The selection is rescaled from displayed to native coordinates; the
    /// crop result replaces the session image (resetting the selection and
    /// the sent-flag). A zero-area selection is an error and changes nothing.
    pub fn crop(&mut self) {
        let crop_result = match self.session.image() {
            None => return,
            Some(_) if self.session.selection.is_empty() => {
                self.renderer.notice(SELECT_FIRST);
                return;
            }
            Some(snapshot) => {
                let region = self
                    .session
                    .selection
                    .rect()
                    .scale_to_native(snapshot.display_size(), snapshot.native_size());
                tracing::info!(
                    "[crop] region {},{} {}x{} at native resolution",
                    region.x,
                    region.y,
                    region.w,
                    region.h
                );
                snapshot.crop(region, self.config.display_width)
            }
        };

        match crop_result {
            Ok(cropped) => {
                self.session.replace_image(cropped);
                self.render_canvas();
            }
            Err(e) => self.renderer.notice(&format!("Crop failed: {e}")),
        }
    }

    /// Sends a user prompt to the analysis endpoint.
    ///
    /// Prompts that are empty after trimming are ignored.
    pub async fn send_message(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.send_internal(text).await;
    }

    /// Convenience variant of send: synthesizes a fixed analysis prompt in
    /// place of typed input, then follows the identical contract, including
    /// the one-time image attachment rule.
    pub async fn quick_insight(&mut self) {
        if self.session.image().is_none() {
            self.renderer
                .render_message(MessageRole::Assistant, &markup::escape_text(NO_IMAGE_TO_SEND));
            return;
        }
        self.send_internal(INSIGHT_PROMPT).await;
    }

    /// Writes the current snapshot to disk as PNG.
    pub fn save(&mut self, path: &Path) {
        match self.session.image() {
            None => self.renderer.notice("No image to save."),
            Some(snapshot) => match snapshot.save_png(path) {
                Ok(()) => self
                    .renderer
                    .notice(&format!("Saved snapshot to {}", path.display())),
                Err(e) => self.renderer.notice(&format!("Save failed: {e}")),
            },
        }
    }

    async fn send_internal(&mut self, text: &str) {
        self.renderer
            .render_message(MessageRole::User, &markup::escape_text(text));
        self.session.push_user(text);

        // Attach the image only while the current one has never been sent.
        let image = match self.session.unsent_image() {
            Some(snapshot) => match snapshot.to_data_url() {
                Ok(url) => Some(url),
                Err(e) => {
                    self.renderer.render_message(
                        MessageRole::Assistant,
                        &markup::escape_text(&format!("Failed to send message: {e}")),
                    );
                    return;
                }
            },
            None => None,
        };
        let attached = image.is_some();

        tracing::info!(
            "[send] {} transcript messages, image attached: {}",
            self.session.transcript().len(),
            attached
        );

        self.renderer.set_pending(true);
        let outcome = self
            .api
            .analyze(self.session.transcript(), image.as_deref())
            .await;
        // Cleared on every settle path, success or failure.
        self.renderer.set_pending(false);

        match outcome {
            Ok(reply) => {
                self.renderer
                    .render_message(MessageRole::Assistant, &reply.markup);
                self.session.push_assistant(markup::strip_tags(&reply.markup));
                if attached {
                    self.session.mark_image_sent();
                }
            }
            Err(e) => {
                // Error replies are rendered but never pushed into the
                // transcript; the user entry above stays.
                let message = match &e {
                    ScryError::Remote { .. } => format!("Error: {e}"),
                    ScryError::UnrecognizedResponse => "Unknown response from server.".to_string(),
                    _ => format!("Failed to send message: {e}"),
                };
                tracing::warn!("[send] request failed: {e}");
                self.renderer
                    .render_message(MessageRole::Assistant, &markup::escape_text(&message));
            }
        }
    }

    fn render_canvas(&mut self) {
        self.renderer
            .render_canvas(self.session.image(), &self.session.selection);
    }
}
