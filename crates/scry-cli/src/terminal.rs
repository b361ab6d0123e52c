//! Terminal renderer.
//!
//! Prints the controller's render calls as colored lines: the canvas becomes
//! a status line, chat messages are tag-stripped, and the pending indicator
//! is a transient stderr line.

use colored::Colorize;

use scry_application::Renderer;
use scry_core::markup;
use scry_core::selection::Selection;
use scry_core::session::MessageRole;
use scry_core::snapshot::Snapshot;

#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TerminalRenderer {
    fn render_canvas(&mut self, image: Option<&Snapshot>, selection: &Selection) {
        match image {
            None => println!("{}", "[no snapshot yet]".bright_black()),
            Some(snapshot) => {
                let (native_w, native_h) = snapshot.native_size();
                let (display_w, display_h) = snapshot.display_size();
                let mut line =
                    format!("[snapshot {native_w}x{native_h}, shown at {display_w}x{display_h}]");
                if !selection.is_empty() {
                    let rect = selection.rect();
                    line.push_str(&format!(
                        " selection {},{} {}x{}",
                        rect.x, rect.y, rect.w, rect.h
                    ));
                }
                println!("{}", line.cyan());
            }
        }
    }

    fn render_message(&mut self, role: MessageRole, content: &str) {
        let text = markup::strip_tags(content);
        match role {
            MessageRole::User => {
                for line in text.lines() {
                    println!("{}", format!("> {line}").green());
                }
            }
            MessageRole::Assistant => {
                for line in text.lines() {
                    println!("{}", line.bright_blue());
                }
            }
        }
    }

    fn set_pending(&mut self, pending: bool) {
        // A terminal line cannot be retracted; showing it only on raise is
        // enough, the next prompt visually settles it.
        if pending {
            eprintln!("{}", "Thinking...".bright_black());
        }
    }

    fn notice(&mut self, message: &str) {
        println!("{}", message.yellow());
    }

    fn clear_transcript(&mut self) {
        println!("{}", "[chat cleared]".bright_black());
    }
}
