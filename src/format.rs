//! WhatsApp chat log rendering.
//!
//! Every retained message becomes zero or more lines of the form
//!
//! ```text
//! [01.02.2023, 10:00:00] Alice: Hello
//! [01.02.2023, 10:00:00] Alice: IMG-20230201-WA0000.jpg (file attached)
//! ```
//!
//! The text line comes first, then one line per attachment in extraction
//! order. A message with neither text nor media contributes nothing.
//!
//! # Example
//!
//! ```rust
//! use chatport::Message;
//! use chatport::diagnostics::Diagnostics;
//! use chatport::format::ChatFormatter;
//! use chrono::DateTime;
//!
//! let ts = DateTime::parse_from_rfc3339("2023-02-01T10:00:00+00:00").unwrap();
//! let messages = vec![Message::new("Alice").with_timestamp(ts).with_text("Hello")];
//!
//! let chat = ChatFormatter::new(Diagnostics::default()).render(&messages);
//! assert_eq!(chat.text, "[01.02.2023, 10:00:00] Alice: Hello\n");
//! ```

use crate::Message;
use crate::core::models::{MediaEntry, RenderedChat};
use crate::diagnostics::Diagnostics;

/// Suffix WhatsApp appends to attachment lines.
pub const FILE_ATTACHED_SUFFIX: &str = "(file attached)";

/// Renders messages into the WhatsApp chat log format.
#[derive(Debug, Clone, Default)]
pub struct ChatFormatter {
    diagnostics: Diagnostics,
}

impl ChatFormatter {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self { diagnostics }
    }

    /// Renders `messages` in order.
    ///
    /// Messages without a timestamp are logged as errors and skipped; they
    /// contribute neither lines nor media entries.
    pub fn render(&self, messages: &[Message]) -> RenderedChat {
        let mut chat = RenderedChat::new();
        for (position, message) in messages.iter().enumerate() {
            self.render_message(position, message, &mut chat);
        }
        chat
    }

    fn render_message(&self, position: usize, message: &Message, chat: &mut RenderedChat) {
        if message.is_empty() {
            return;
        }
        let (Some(date), Some(time)) = (message.display_date(), message.display_time()) else {
            self.diagnostics.unrenderable_message(position, message);
            return;
        };
        let prefix = format!("[{date}, {time}] {}:", message.sender);

        if let Some(text) = &message.text {
            chat.push_line(&format!("{prefix} {text}"));
        }
        for attachment in &message.media {
            chat.push_line(&format!(
                "{prefix} {} {FILE_ATTACHED_SUFFIX}",
                attachment.assigned_name
            ));
            chat.media.push(MediaEntry::new(
                attachment.assigned_name.clone(),
                attachment.original_path.clone(),
            ));
        }
    }
}
