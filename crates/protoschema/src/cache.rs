// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent cache of resolved schemas.
//!
//! Resolution runs at most once per owning type in the common case;
//! subsequent lookups are served from a `DashMap` without re-resolving.
//! Two threads racing on the same cold type may both resolve it; the
//! first insert wins and both observe the same `Arc<Schema>`.

use crate::config::ResolverConfig;
use crate::error::SchemaError;
use crate::resolver::{Schema, SchemaResolver};
use crate::types::TypeDeclaration;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
    /// Time spent in the most recent resolution.
    pub last_resolve_ns: u64,
}

/// Schemas keyed by owning type name.
pub struct SchemaCache {
    entries: DashMap<Arc<str>, Arc<Schema>>,
    resolver: SchemaResolver,
    stats: RwLock<LookupStats>,
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl SchemaCache {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            entries: DashMap::new(),
            resolver: SchemaResolver::new(config),
            stats: RwLock::new(LookupStats::default()),
        }
    }

    pub fn get(&self, owner: &str) -> Option<Arc<Schema>> {
        self.entries.get(owner).map(|entry| Arc::clone(entry.value()))
    }

    /// Cached schema for `declaration`, resolving it on first use.
    pub fn get_or_resolve(&self, declaration: &TypeDeclaration) -> Result<Arc<Schema>, SchemaError> {
        self.get_or_resolve_with(declaration.name(), || declaration.clone())
    }

    /// Like [`get_or_resolve`](Self::get_or_resolve), but only builds the
    /// declaration on a miss.
    pub fn get_or_resolve_with<F>(&self, owner: &str, declare: F) -> Result<Arc<Schema>, SchemaError>
    where
        F: FnOnce() -> TypeDeclaration,
    {
        if let Some(hit) = self.get(owner) {
            self.stats.write().hits += 1;
            return Ok(hit);
        }

        let start = Instant::now();
        let declaration = declare();
        let schema = Arc::new(self.resolver.resolve(&declaration)?);
        self.record_miss(start);

        let key: Arc<str> = Arc::from(owner);
        let entry = self.entries.entry(key).or_insert(schema);
        Ok(Arc::clone(entry.value()))
    }

    /// Store a schema resolved elsewhere, replacing any previous entry.
    pub fn insert(&self, schema: Schema) -> Arc<Schema> {
        let schema = Arc::new(schema);
        self.entries
            .insert(Arc::from(schema.owner()), Arc::clone(&schema));
        schema
    }

    pub fn remove(&self, owner: &str) -> Option<Arc<Schema>> {
        self.entries.remove(owner).map(|(_, schema)| schema)
    }

    pub fn contains(&self, owner: &str) -> bool {
        self.entries.contains_key(owner)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> LookupStats {
        *self.stats.read()
    }

    fn record_miss(&self, start: Instant) {
        let elapsed = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        let mut stats = self.stats.write();
        stats.misses += 1;
        stats.last_resolve_ns = elapsed;
    }
}

static GLOBAL_CACHE: OnceLock<SchemaCache> = OnceLock::new();

/// Process-wide cache used by `Message::schema()` (strict configuration).
pub fn global_cache() -> &'static SchemaCache {
    GLOBAL_CACHE.get_or_init(SchemaCache::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Directive, FieldDeclaration, TypeDeclaration};
    use std::sync::Barrier;
    use std::thread;

    fn declaration(name: &str) -> TypeDeclaration {
        TypeDeclaration::new(name)
            .field(FieldDeclaration::of::<u32>("id").with_directive(Directive::new().order(1)))
            .field(FieldDeclaration::of::<String>("label").with_directive(Directive::new()))
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let cache = SchemaCache::default();
        let decl = declaration("cache::Item");

        let first = cache.get_or_resolve(&decl).expect("resolve");
        let second = cache.get_or_resolve(&decl).expect("resolve");

        assert!(Arc::ptr_eq(&first, &second));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = SchemaCache::default();
        let bad = TypeDeclaration::new("cache::Bare").field(FieldDeclaration::of::<u8>("x"));

        assert!(cache.get_or_resolve(&bad).is_err());
        assert!(!cache.contains("cache::Bare"));
        assert!(cache.is_empty());
    }

    #[test]
    fn declaration_is_built_only_on_miss() {
        let cache = SchemaCache::default();
        cache
            .get_or_resolve_with("cache::Lazy", || declaration("cache::Lazy"))
            .expect("resolve");
        let hit = cache
            .get_or_resolve_with("cache::Lazy", || panic!("declaration rebuilt on hit"))
            .expect("hit");
        assert_eq!(hit.len(), 2);
    }

    #[test]
    fn insert_remove_and_clear() {
        let cache = SchemaCache::new(ResolverConfig::lenient());
        let schema = SchemaResolver::default()
            .resolve(&declaration("cache::Manual"))
            .expect("resolve");

        cache.insert(schema);
        assert!(cache.get("cache::Manual").is_some());
        assert!(cache.remove("cache::Manual").is_some());
        assert!(cache.get("cache::Manual").is_none());

        cache.get_or_resolve(&declaration("cache::Other")).expect("resolve");
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_lookups_share_one_schema() {
        let cache = Arc::new(SchemaCache::default());
        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache
                        .get_or_resolve(&declaration("cache::Shared"))
                        .expect("resolve")
                })
            })
            .collect();

        let schemas: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect();
        assert_eq!(cache.len(), 1);
        let cached = cache.get("cache::Shared").expect("cached");
        assert!(schemas.iter().all(|s| Arc::ptr_eq(s, &cached)));
    }
}
