//! Place lookup collaborator contract and its memoising wrapper.

use std::sync::Mutex;

use jiff::{SignedDuration, Timestamp};
use log::{debug, warn};

use crate::{cache::ExpiringCache, error::Result, models::Place};

/// Default number of queries remembered by [`CachedPlaceLookup`].
pub const DEFAULT_PLACE_CACHE_CAPACITY: usize = 200;

/// Default lifetime of a cached lookup.
pub const DEFAULT_PLACE_CACHE_TTL: SignedDuration = SignedDuration::from_secs(24 * 60 * 60);

/// A places-lookup service: text query in, best matching place out.
///
/// Implementations translate quota and authentication failures into
/// `PlannerError::UpstreamUnavailable` rather than passing provider text on.
pub trait PlaceLookup {
    fn lookup(&self, query: &str) -> Result<Option<Place>>;
}

/// Memoises another [`PlaceLookup`] in an [`ExpiringCache`].
///
/// Misses (`Ok(None)`) are cached like hits; errors are not.
#[derive(Debug)]
pub struct CachedPlaceLookup<L> {
    inner: L,
    cache: Mutex<ExpiringCache<String, Option<Place>>>,
}

impl<L: PlaceLookup> CachedPlaceLookup<L> {
    pub fn new(inner: L) -> Self {
        Self::with_cache(
            inner,
            ExpiringCache::new(DEFAULT_PLACE_CACHE_CAPACITY, DEFAULT_PLACE_CACHE_TTL),
        )
    }

    pub fn with_cache(inner: L, cache: ExpiringCache<String, Option<Place>>) -> Self {
        Self {
            inner,
            cache: Mutex::new(cache),
        }
    }

    /// Look `query` up as of `now`.
    pub fn lookup_at(&self, query: &str, now: Timestamp) -> Result<Option<Place>> {
        let key = normalize(query);

        if let Some(hit) = self.with_cache_locked(|cache| cache.get_at(key.as_str(), now)) {
            debug!("Place cache hit for '{key}'");
            return Ok(hit);
        }

        let place = self.inner.lookup(query)?;
        self.with_cache_locked(|cache| cache.insert_at(key, place.clone(), now));
        Ok(place)
    }

    pub fn into_inner(self) -> L {
        self.inner
    }

    fn with_cache_locked<T>(
        &self,
        f: impl FnOnce(&mut ExpiringCache<String, Option<Place>>) -> T,
    ) -> T {
        match self.cache.lock() {
            Ok(mut cache) => f(&mut cache),
            Err(poisoned) => {
                warn!("Place cache lock poisoned, recovering");
                f(&mut poisoned.into_inner())
            }
        }
    }
}

impl<L: PlaceLookup> PlaceLookup for CachedPlaceLookup<L> {
    fn lookup(&self, query: &str) -> Result<Option<Place>> {
        self.lookup_at(query, Timestamp::now())
    }
}

fn normalize(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::PlannerError;

    struct CountingLookup {
        calls: Cell<u32>,
        fail: Cell<bool>,
    }

    impl CountingLookup {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
                fail: Cell::new(false),
            }
        }
    }

    impl PlaceLookup for CountingLookup {
        fn lookup(&self, query: &str) -> Result<Option<Place>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail.get() {
                return Err(PlannerError::UpstreamUnavailable {
                    service: "Places".to_string(),
                });
            }
            if query.contains("nowhere") {
                return Ok(None);
            }
            Ok(Some(Place {
                place_id: format!("place-{}", self.calls.get()),
                display_name: query.to_string(),
                lat: 35.0,
                lng: 135.7,
            }))
        }
    }

    fn at(seconds: i64) -> Timestamp {
        Timestamp::from_second(1_700_000_000 + seconds).unwrap()
    }

    #[test]
    fn test_repeat_queries_hit_the_cache() {
        let lookup = CachedPlaceLookup::new(CountingLookup::new());

        let first = lookup.lookup_at("Fushimi Inari", at(0)).unwrap();
        let second = lookup.lookup_at("  fushimi   inari ", at(10)).unwrap();

        assert_eq!(first, second);
        assert_eq!(lookup.into_inner().calls.get(), 1);
    }

    #[test]
    fn test_misses_are_cached() {
        let lookup = CachedPlaceLookup::new(CountingLookup::new());
        assert_eq!(lookup.lookup_at("nowhere at all", at(0)).unwrap(), None);
        assert_eq!(lookup.lookup_at("nowhere at all", at(1)).unwrap(), None);
        assert_eq!(lookup.into_inner().calls.get(), 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let inner = CountingLookup::new();
        inner.fail.set(true);
        let lookup = CachedPlaceLookup::new(inner);

        let err = lookup.lookup_at("Nara", at(0)).unwrap_err();
        assert_eq!(err.status_code(), 502);

        lookup.inner.fail.set(false);
        assert!(lookup.lookup_at("Nara", at(1)).unwrap().is_some());
        assert_eq!(lookup.into_inner().calls.get(), 2);
    }

    #[test]
    fn test_expired_entries_are_refetched() {
        let cache = ExpiringCache::new(4, SignedDuration::from_secs(60));
        let lookup = CachedPlaceLookup::with_cache(CountingLookup::new(), cache);

        lookup.lookup_at("Nara", at(0)).unwrap();
        lookup.lookup_at("Nara", at(61)).unwrap();
        assert_eq!(lookup.into_inner().calls.get(), 2);
    }
}
