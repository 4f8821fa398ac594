//! Common test infrastructure for cache facade tests.

use async_trait::async_trait;
use keyspace_cache::CacheBackend;
use keyspace_core::KeyspaceResult;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory cache backend.
///
/// Stores entries in a mutex-guarded map and matches patterns with the
/// `*` wildcard rules Redis applies to KEYS. TTLs are accepted and
/// ignored; nothing stored here expires.
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot of the stored wire keys, sorted.
    pub fn wire_keys(&self) -> Vec<String> {
        let entries = self.entries.lock().expect("entries lock poisoned");
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get_raw(&self, key: &str) -> KeyspaceResult<Option<String>> {
        let entries = self.entries.lock().expect("entries lock poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn set_raw(
        &self,
        key: &str,
        payload: &str,
        _ttl: Option<Duration>,
    ) -> KeyspaceResult<()> {
        let mut entries = self.entries.lock().expect("entries lock poisoned");
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> KeyspaceResult<bool> {
        let mut entries = self.entries.lock().expect("entries lock poisoned");
        Ok(entries.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> KeyspaceResult<bool> {
        let entries = self.entries.lock().expect("entries lock poisoned");
        Ok(entries.contains_key(key))
    }

    async fn keys(&self, pattern: &str) -> KeyspaceResult<Vec<Vec<u8>>> {
        let entries = self.entries.lock().expect("entries lock poisoned");
        let mut matches: Vec<Vec<u8>> = entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .map(|key| key.clone().into_bytes())
            .collect();
        matches.sort();
        Ok(matches)
    }

    async fn delete_pattern(&self, pattern: &str) -> KeyspaceResult<u64> {
        let mut entries = self.entries.lock().expect("entries lock poisoned");
        let doomed: Vec<String> = entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();
        for key in &doomed {
            entries.remove(key);
        }
        Ok(doomed.len() as u64)
    }

    async fn ping(&self) -> KeyspaceResult<()> {
        Ok(())
    }
}

/// Matches `*` wildcards the way Redis KEYS does, minus character classes.
fn glob_match(pattern: &str, candidate: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == candidate;
    }

    let mut remainder = match candidate.strip_prefix(parts[0]) {
        Some(rest) => rest,
        None => return false,
    };

    let last_index = parts.len() - 1;
    for part in &parts[1..last_index] {
        if part.is_empty() {
            continue;
        }
        match remainder.find(part) {
            Some(found) => remainder = &remainder[found + part.len()..],
            None => return false,
        }
    }

    parts[last_index].is_empty() || remainder.ends_with(parts[last_index])
}
