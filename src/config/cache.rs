use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use super::{load_config, ConfigError};
use crate::scoring::RatingConfig;

type Loader = Box<dyn Fn() -> Result<RatingConfig, ConfigError> + Send + Sync>;

/// Load-once provider for the rating configuration.
///
/// The first successful load is kept and shared as an `Arc`. Check and set
/// happen under one lock, so concurrent first callers trigger a single load.
/// A failed load is not cached; the next call retries.
pub struct ConfigCache {
    loader: Loader,
    loaded: Mutex<Option<Arc<RatingConfig>>>,
}

impl ConfigCache {
    /// Cache backed by [`load_config`] for `dir`.
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self::with_loader(move || load_config(dir.clone()))
    }

    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Result<RatingConfig, ConfigError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            loaded: Mutex::new(None),
        }
    }

    pub fn get(&self) -> Result<Arc<RatingConfig>, ConfigError> {
        let mut guard = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = guard.as_ref() {
            return Ok(Arc::clone(config));
        }

        let config = Arc::new((self.loader)()?);
        *guard = Some(Arc::clone(&config));
        Ok(config)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::bundled_config;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_loads_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = ConfigCache::with_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            bundled_config()
        });

        assert!(!cache.is_loaded());
        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = ConfigCache::with_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            bundled_config()
        });

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| cache.get().unwrap());
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = ConfigCache::with_loader(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ConfigError::NotFound {
                    path: PathBuf::from("missing.yaml"),
                })
            } else {
                bundled_config()
            }
        });

        assert!(cache.get().is_err());
        assert!(!cache.is_loaded());
        assert!(cache.get().is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
