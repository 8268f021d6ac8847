//! Rendered output of the pipeline.

use serde::Serialize;

/// One media file to be packed: archive entry name and source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaEntry {
    /// Generated name, used as the archive entry name.
    pub assigned_name: String,
    /// Path of the file relative to the export's base directory.
    pub original_path: String,
}

impl MediaEntry {
    pub fn new(assigned_name: impl Into<String>, original_path: impl Into<String>) -> Self {
        Self {
            assigned_name: assigned_name.into(),
            original_path: original_path.into(),
        }
    }
}

/// Chat log text and media list produced from one input file.
///
/// Several values merge by concatenation, preserving file order:
///
/// ```rust
/// use chatport::core::RenderedChat;
///
/// let mut first = RenderedChat::new();
/// first.push_line("[01.02.2023, 10:00:00] Alice: Hi");
/// let mut second = RenderedChat::new();
/// second.push_line("[01.02.2023, 10:01:00] Bob: Hey");
///
/// let merged = RenderedChat::merge([first, second]);
/// assert_eq!(merged.line_count(), 2);
/// assert!(merged.text.starts_with("[01.02.2023, 10:00:00] Alice"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedChat {
    /// Newline-terminated chat log lines.
    pub text: String,
    /// Media referenced by `text`, in line order.
    pub media: Vec<MediaEntry>,
}

impl RenderedChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line plus its terminating newline.
    pub fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Appends another chat after this one.
    pub fn append(&mut self, other: RenderedChat) {
        self.text.push_str(&other.text);
        self.media.extend(other.media);
    }

    /// Concatenates chats in iteration order.
    pub fn merge<I: IntoIterator<Item = RenderedChat>>(chats: I) -> RenderedChat {
        chats.into_iter().fold(RenderedChat::new(), |mut acc, chat| {
            acc.append(chat);
            acc
        })
    }

    /// Number of lines in the chat log.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.media.is_empty()
    }
}
