//! TTL cache of rendered reports.
//!
//! Entries are keyed by template, format and canonicalized parameters, and
//! are never served past their expiry: lookups check it, and a periodic
//! sweep drops whatever nobody asked for. Concurrent misses on the same key
//! may both regenerate; the last `put` wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::debug;

use africasuite_core::models::parameter::ParameterValues;
use africasuite_core::models::report::{Artifact, GeneratedReport};
use africasuite_core::models::template::OutputFormat;

use crate::clock::Clock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex SHA-256 over template id, format and the canonical JSON of the
/// parameters. Insertion order of the parameters never changes the key.
pub fn cache_key(template_id: &str, format: OutputFormat, parameters: &ParameterValues) -> CacheKey {
    let mut canonical = String::new();
    canonical.push('{');
    for (i, (name, value)) in parameters.iter().enumerate() {
        if i > 0 {
            canonical.push(',');
        }
        write_canonical(&Value::String(name.clone()), &mut canonical);
        canonical.push(':');
        write_canonical(value, &mut canonical);
    }
    canonical.push('}');

    let mut hasher = Sha256::new();
    hasher.update(template_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(format.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(canonical.as_bytes());
    CacheKey(hex::encode(hasher.finalize()))
}

/// JSON with object keys sorted at every depth.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(&Value::String(key.clone()), out);
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

#[derive(Debug)]
pub struct CacheEntry {
    pub report: GeneratedReport,
    pub artifact: Arc<Artifact>,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl CacheEntry {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

pub struct ReportCache {
    entries: RwLock<HashMap<CacheKey, Arc<CacheEntry>>>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
    max_entries: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ReportCache {
    pub fn new(clock: Arc<dyn Clock>, default_ttl: Duration, max_entries: Option<usize>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            default_ttl,
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Live entry for `key`. An expired entry is removed and reported as a miss.
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        let now = self.clock.now();
        let found = self.entries.read().await.get(key).cloned();

        match found {
            Some(entry) if !entry.is_expired(now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry)
            }
            Some(_) => {
                let mut entries = self.entries.write().await;
                // Re-check under the write lock: a fresh put may have replaced it.
                if entries.get(key).is_some_and(|e| e.is_expired(now)) {
                    entries.remove(key);
                    debug!(key = %key, "evicted expired cache entry on lookup");
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store with the default TTL.
    pub async fn put(
        &self,
        key: CacheKey,
        report: GeneratedReport,
        artifact: Arc<Artifact>,
    ) -> Arc<CacheEntry> {
        self.put_with_ttl(key, report, artifact, self.default_ttl).await
    }

    pub async fn put_with_ttl(
        &self,
        key: CacheKey,
        report: GeneratedReport,
        artifact: Arc<Artifact>,
        ttl: Duration,
    ) -> Arc<CacheEntry> {
        let now = self.clock.now();
        let ttl = SignedDuration::try_from(ttl).unwrap_or(SignedDuration::MAX);
        let entry = Arc::new(CacheEntry {
            report,
            artifact,
            created_at: now,
            expires_at: now.checked_add(ttl).unwrap_or(Timestamp::MAX),
        });

        let mut entries = self.entries.write().await;
        if let Some(max) = self.max_entries
            && !entries.contains_key(&key)
            && entries.len() >= max
        {
            entries.retain(|_, e| !e.is_expired(now));
            let victim = (entries.len() >= max)
                .then(|| {
                    entries
                        .iter()
                        .min_by_key(|(_, e)| e.expires_at)
                        .map(|(k, _)| k.clone())
                })
                .flatten();
            if let Some(victim) = victim {
                entries.remove(&victim);
                debug!(key = %victim, "evicted cache entry at capacity");
            }
        }
        entries.insert(key, Arc::clone(&entry));
        entry
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len().await,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
