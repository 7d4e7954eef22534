//! Context handle for views that receive the cache implicitly.

use crate::clock::{Clock, SystemClock};
use crate::error::CacheError;

use super::manager::DomainCache;

/// Owning scope for a `DomainCache`.
///
/// A view tree holds one of these and asks it for the cache. Asking an empty
/// scope is a wiring bug: `cache()`/`cache_mut()` panic, the `try_` variants
/// return `CacheError::OutsideScope`.
#[derive(Debug)]
pub struct CacheScope<C: Clock = SystemClock> {
    cache: Option<DomainCache<C>>,
}

impl<C: Clock> CacheScope<C> {
    pub fn with_cache(cache: DomainCache<C>) -> Self {
        Self { cache: Some(cache) }
    }

    pub fn empty() -> Self {
        Self { cache: None }
    }

    pub fn is_installed(&self) -> bool {
        self.cache.is_some()
    }

    pub fn try_cache(&self) -> Result<&DomainCache<C>, CacheError> {
        self.cache.as_ref().ok_or(CacheError::OutsideScope)
    }

    pub fn try_cache_mut(&mut self) -> Result<&mut DomainCache<C>, CacheError> {
        self.cache.as_mut().ok_or(CacheError::OutsideScope)
    }

    pub fn cache(&self) -> &DomainCache<C> {
        match self.try_cache() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn cache_mut(&mut self) -> &mut DomainCache<C> {
        match self.try_cache_mut() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Tear the scope down, handing back the cache it owned.
    pub fn into_inner(self) -> Option<DomainCache<C>> {
        self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::domain::FeedPatch;

    #[test]
    fn test_empty_scope_reports_outside_scope() {
        let mut scope = CacheScope::<SystemClock>::empty();
        assert!(!scope.is_installed());
        assert_eq!(scope.try_cache().unwrap_err(), CacheError::OutsideScope);
        assert_eq!(scope.try_cache_mut().unwrap_err(), CacheError::OutsideScope);
    }

    #[test]
    #[should_panic(expected = "outside its owning scope")]
    fn test_empty_scope_panics_on_access() {
        let scope = CacheScope::<SystemClock>::empty();
        let _ = scope.cache();
    }

    #[test]
    fn test_installed_scope_hands_out_the_same_cache() {
        let mut scope = CacheScope::with_cache(DomainCache::new());
        scope
            .cache_mut()
            .update_feed(FeedPatch::default().no_items_available(true));

        assert!(scope.cache().is_feed_valid());
        let cache = scope.into_inner().unwrap();
        assert!(cache.feed().payload.no_items_available);
    }
}
