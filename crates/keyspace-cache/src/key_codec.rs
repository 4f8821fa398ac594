//! Prefixing key codec.

use keyspace_core::KeyspaceResult;
use tracing::{debug, warn};

/// String codec that namespaces cache keys with an application prefix.
///
/// Encoding prepends `"{prefix}:"` to the logical key; an empty prefix turns
/// the codec into a passthrough. Decoding slices the wire key from the first
/// occurrence of the prefix onward, so a well-formed wire key decodes with
/// its prefix still attached. Keys written before a prefix change therefore
/// keep decoding to whatever is stored.
///
/// Wire keys are the UTF-8 bytes of the encoded string and nothing else;
/// [`PrefixKeyCodec::decode_bytes`] rejects anything that is not UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixKeyCodec {
    prefix: String,
}

impl PrefixKeyCodec {
    /// Creates a codec for the given prefix. An empty prefix disables
    /// prefixing entirely.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Creates a codec that leaves keys untouched.
    #[must_use]
    pub fn passthrough() -> Self {
        Self::new("")
    }

    /// Returns the configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Encodes a logical key into its wire form.
    #[must_use]
    pub fn encode(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.prefix, key)
        }
    }

    /// Decodes a wire key back to the application-facing form.
    ///
    /// A wire key that carries the prefix somewhere past position zero is
    /// suspicious: it gets logged and sliced from where the prefix starts. A
    /// wire key without the prefix at all is returned unchanged.
    #[must_use]
    pub fn decode(&self, wire_key: &str) -> String {
        if self.prefix.is_empty() {
            return wire_key.to_string();
        }

        match wire_key.find(&self.prefix) {
            Some(0) => wire_key.to_string(),
            Some(index) => {
                warn!(key = %wire_key, prefix = %self.prefix, "Key missing expected leading prefix");
                wire_key[index..].to_string()
            }
            None => {
                debug!(key = %wire_key, prefix = %self.prefix, "Key does not carry the configured prefix");
                wire_key.to_string()
            }
        }
    }

    /// Decodes raw wire-key bytes, validating them as UTF-8 first.
    pub fn decode_bytes(&self, bytes: &[u8]) -> KeyspaceResult<String> {
        let wire_key = String::from_utf8(bytes.to_vec())?;
        Ok(self.decode(&wire_key))
    }
}
