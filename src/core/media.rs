//! Media classification and deterministic renaming.
//!
//! Telegram marks every attachment link with a class describing what it
//! points to. [`MediaKind::from_classes`] turns that class list into an
//! explicit kind, and [`MediaNamer`] hands out WhatsApp-style file names:
//!
//! ```text
//! IMG-20230201-WA0000.jpg
//! VID-20230201-WA0001.mp4
//! DOC-20230202-WA0000.pdf
//! ```
//!
//! The four-digit sequence is counted per calendar day and shared by every
//! category and every input file of a run, so two attachments from the same
//! day never collide.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category encoded in generated file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Video,
    Document,
}

impl MediaCategory {
    /// Three-letter tag used as the file name prefix.
    pub fn tag(self) -> &'static str {
        match self {
            MediaCategory::Image => "IMG",
            MediaCategory::Video => "VID",
            MediaCategory::Document => "DOC",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// What an attachment link points to, as declared by its class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// `photo_wrap`
    Photo,
    /// `video_file_wrap`
    VideoFile,
    /// `animated_wrap` (GIFs are exported as mp4)
    Animation,
    /// `media` - files, voice notes, stickers and anything else downloadable
    File,
    /// None of the known classes
    Unrecognized,
}

impl MediaKind {
    /// Classifies a link by its class list.
    ///
    /// Checks run in a fixed order and the first match wins, so a link that
    /// carries both `photo_wrap` and `media` is a photo.
    ///
    /// ```rust
    /// use chatport::core::media::MediaKind;
    ///
    /// assert_eq!(MediaKind::from_classes(["photo_wrap", "clearfix"]), MediaKind::Photo);
    /// assert_eq!(MediaKind::from_classes(["media", "photo_wrap"]), MediaKind::Photo);
    /// assert_eq!(MediaKind::from_classes(["sticker_wrap"]), MediaKind::Unrecognized);
    /// ```
    pub fn from_classes<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<&str> = classes.into_iter().collect();
        let has = |name: &str| classes.iter().any(|c| *c == name);

        if has("photo_wrap") {
            MediaKind::Photo
        } else if has("video_file_wrap") {
            MediaKind::VideoFile
        } else if has("animated_wrap") {
            MediaKind::Animation
        } else if has("media") {
            MediaKind::File
        } else {
            MediaKind::Unrecognized
        }
    }

    /// Category for naming, or `None` if the link cannot be classified.
    pub fn category(self) -> Option<MediaCategory> {
        match self {
            MediaKind::Photo => Some(MediaCategory::Image),
            MediaKind::VideoFile | MediaKind::Animation => Some(MediaCategory::Video),
            MediaKind::File => Some(MediaCategory::Document),
            MediaKind::Unrecognized => None,
        }
    }
}

/// Hands out collision-free media names for one conversion run.
///
/// Owns the per-day sequence counters. One namer must be shared by every
/// file merged into the same archive; names depend on the order in which
/// attachments are submitted.
#[derive(Debug, Clone, Default)]
pub struct MediaNamer {
    counters: BTreeMap<NaiveDate, u32>,
}

impl MediaNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next sequence number for `date` and advances the counter.
    pub fn next_sequence(&mut self, date: NaiveDate) -> u32 {
        let counter = self.counters.entry(date).or_insert(0);
        let current = *counter;
        *counter += 1;
        current
    }

    /// Generates the archive name for an attachment of `category` sent on
    /// `date`, keeping the extension of `original_path`.
    ///
    /// ```rust
    /// use chatport::core::media::{MediaCategory, MediaNamer};
    /// use chrono::NaiveDate;
    ///
    /// let mut namer = MediaNamer::new();
    /// let day = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
    ///
    /// assert_eq!(namer.assign(MediaCategory::Image, day, "photos/a.jpg"), "IMG-20230201-WA0000.jpg");
    /// assert_eq!(namer.assign(MediaCategory::Video, day, "video_files/b.mp4"), "VID-20230201-WA0001.mp4");
    /// ```
    pub fn assign(&mut self, category: MediaCategory, date: NaiveDate, original_path: &str) -> String {
        let sequence = self.next_sequence(date);
        format!(
            "{}-{}-WA{:04}{}",
            category.tag(),
            date.format("%Y%m%d"),
            sequence,
            extension_of(original_path)
        )
    }

    /// Total number of names handed out by this namer.
    pub fn total_issued(&self) -> u64 {
        self.counters.values().map(|&n| u64::from(n)).sum()
    }
}

/// Extension of `path` including the leading dot, or `""`.
fn extension_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
