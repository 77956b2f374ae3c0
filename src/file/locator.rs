//! Storage locator classification.
//!
//! A file row stores where its bytes live in a single `storage_url` column.
//! The value is either absent, a self-contained `data:<mime>;base64,<payload>`
//! locator, or a reference to a remote resource. [`StorageLocator::classify`]
//! turns that string into a tagged value once; nothing else parses it.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix marking an embedded locator.
pub const EMBEDDED_PREFIX: &str = "data:";

static EMBEDDED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:([^;]+);base64,(.+)$").expect("valid embedded locator regex"));

/// Standard alphabet; padding optional on decode, always written on encode.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A classified storage locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocator<'a> {
    /// No locator stored.
    Empty,
    /// Self-contained content.
    ///
    /// A locator that carries the `data:` prefix but does not parse has an
    /// empty `mime_type` and empty `bytes`.
    Embedded {
        locator: &'a str,
        mime_type: String,
        bytes: Vec<u8>,
    },
    /// Reference to a remote resource.
    Remote { url: &'a str },
}

impl<'a> StorageLocator<'a> {
    /// Classify a stored locator. Never fails.
    pub fn classify(locator: Option<&'a str>) -> Self {
        let locator = match locator {
            Some(l) if !l.is_empty() => l,
            _ => return StorageLocator::Empty,
        };

        if locator.starts_with(EMBEDDED_PREFIX) {
            let (mime_type, bytes) = parse_embedded(locator).unwrap_or_default();
            return StorageLocator::Embedded {
                locator,
                mime_type,
                bytes,
            };
        }

        // http(s) URLs and any other verbatim reference are both treated as remote.
        StorageLocator::Remote { url: locator }
    }

    /// Build an embedded locator string for `bytes`.
    pub fn embed(mime_type: &str, bytes: &[u8]) -> String {
        format!(
            "{EMBEDDED_PREFIX}{mime_type};base64,{}",
            PAYLOAD_ENGINE.encode(bytes)
        )
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StorageLocator::Empty)
    }
}

fn parse_embedded(locator: &str) -> Option<(String, Vec<u8>)> {
    let captures = EMBEDDED_PATTERN.captures(locator)?;
    let mime_type = captures.get(1)?.as_str().to_string();
    let bytes = PAYLOAD_ENGINE.decode(captures.get(2)?.as_str()).ok()?;
    Some((mime_type, bytes))
}
