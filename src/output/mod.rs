// Output formatting — terminal display and result files.

pub mod files;
pub mod terminal;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or Arabic script.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Render a score for a text column. Whole numbers keep their ".0".
pub fn format_score(score: f64) -> String {
    format!("{score:?}")
}

/// File names a uniqueness result is saved under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputNames {
    pub csv: String,
    pub json: String,
}

impl OutputNames {
    /// `unique_content_<YYYYmmddHHMMSS>.{csv,json}`
    pub fn at(time: DateTime<Local>) -> Self {
        let stamp = time.format("%Y%m%d%H%M%S");
        Self {
            csv: format!("unique_content_{stamp}.csv"),
            json: format!("unique_content_{stamp}.json"),
        }
    }

    pub fn now() -> Self {
        Self::at(Local::now())
    }
}
