//! Panorama title parsing
//!
//! Filenames in the panorama repository encode an install number and an
//! optional label, but the naming was never enforced: titles arrive with
//! `IMG_` prefixes, leading spaces, stray characters, and free-form labels.
//! The grammar below reproduces the accumulated conventions exactly; real
//! files depend on each edge case, so the rules are spelled out as a small
//! state machine rather than generalized into a pattern.

use std::path::Path;
use thiserror::Error;

/// Marker that short-circuits parsing: everything after it is the number.
const IMG_MARKER: &str = "IMG_";

/// A successfully parsed panorama title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    /// Digit string identifying the install. Never empty; leading zeros are
    /// kept (coercion to an integer happens at record lookup).
    pub number: String,
    /// Remainder of the stem starting at the first non-digit, verbatim.
    /// May be empty.
    pub label: String,
}

/// A title that cannot be resolved to a leading numeric identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTitle {
    #[error("Got title of length 0")]
    Empty,

    #[error("First character not a digit: {title}")]
    NonNumericLead { title: String },
}

/// Scanner states for the digit/label split.
enum ScanState {
    /// Before any character has been consumed
    Start,
    /// A non-digit at position 0 was dropped; still looking for digits
    SkippingLeadingJunk,
    /// Inside the digit run
    AccumulatingDigits,
    /// A later non-digit ended the number; the rest is the label
    InLabel,
}

/// Parse a panorama title into its install number and label.
///
/// ```
/// use core_sync::title::parse_pano_title;
///
/// let parsed = parse_pano_title("42 Lobby.jpg").unwrap();
/// assert_eq!(parsed.number, "42");
/// assert_eq!(parsed.label, " Lobby");
/// ```
///
/// # Errors
///
/// [`InvalidTitle`] when the input is empty or the stem does not lead with a
/// digit (after the `IMG_` and leading-space allowances).
pub fn parse_pano_title(title: &str) -> Result<ParsedTitle, InvalidTitle> {
    if title.is_empty() {
        return Err(InvalidTitle::Empty);
    }

    // Get that file extension outta here.
    let stem = title_stem(title);

    // `IMG_` followed by anything is taken as-is, digits or not.
    if let Some(tail) = stem.strip_prefix(IMG_MARKER) {
        if !tail.is_empty() {
            return Ok(ParsedTitle {
                number: tail.to_string(),
                label: String::new(),
            });
        }
    }

    // Some of the files have a single leading space but are otherwise fine.
    let stem = stem.strip_prefix(' ').unwrap_or(stem);

    // Anything not leading with a digit is unsalvageable; bail. This also
    // covers a stem emptied by the space strip.
    if !stem.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Err(InvalidTitle::NonNumericLead {
            title: title.to_string(),
        });
    }

    let mut number = String::new();
    let mut label = String::new();
    let mut state = ScanState::Start;

    for (idx, ch) in stem.char_indices() {
        state = if ch.is_ascii_digit() {
            number.push(ch);
            ScanState::AccumulatingDigits
        } else if matches!(state, ScanState::Start) {
            // A stray character in the first position is dropped; this
            // tolerance applies at position 0 only.
            ScanState::SkippingLeadingJunk
        } else {
            // First later non-digit: the label is the rest of the stem,
            // boundary character included.
            label = stem[idx..].to_string();
            ScanState::InLabel
        };

        if matches!(state, ScanState::InLabel) {
            break;
        }
    }

    Ok(ParsedTitle { number, label })
}

/// Stem of a title: the final path segment with its last extension removed.
pub(crate) fn title_stem(title: &str) -> &str {
    Path::new(title)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(title)
}
