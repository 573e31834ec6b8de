//! The process's "current" client configuration.
//!
//! [`CachedClientConfig`] is built once at startup and passed to whatever
//! needs the configuration. The first successful load is kept for the rest
//! of the process and is never reloaded; a failed load is not kept, so the
//! next call tries again.

use crate::config::resolver::{ConfigResolver, ResolvedPath};
use crate::config::schema::ClientConfig;
use crate::Result;
use std::sync::{Arc, Mutex, PoisonError};

/// Where the cached configuration was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOrigin {
    pub path: ResolvedPath,
    /// Whether a file existed at `path` when it was loaded
    pub found: bool,
}

#[derive(Debug)]
pub struct CachedClientConfig {
    resolver: ConfigResolver,
    cached: Mutex<Option<(Arc<ClientConfig>, ConfigOrigin)>>,
}

impl CachedClientConfig {
    pub fn new(resolver: ConfigResolver) -> Self {
        Self {
            resolver,
            cached: Mutex::new(None),
        }
    }

    /// Cache backed by a resolver built from the process environment.
    pub fn from_env() -> Self {
        Self::new(ConfigResolver::from_env())
    }

    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Return the current configuration, loading it on first use.
    pub fn current(&self) -> Result<Arc<ClientConfig>> {
        self.current_with_origin().map(|(config, _)| config)
    }

    /// Return the current configuration together with the file it came from,
    /// as recorded at load time.
    ///
    /// The lock is held while loading, so concurrent first callers wait for
    /// one load instead of each reading the file.
    pub fn current_with_origin(&self) -> Result<(Arc<ClientConfig>, ConfigOrigin)> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some((config, origin)) = cached.as_ref() {
            tracing::trace!("using cached client config");
            return Ok((Arc::clone(config), origin.clone()));
        }

        let loaded = self.resolver.load(None)?;
        let config = Arc::new(loaded.config);
        let origin = ConfigOrigin {
            path: loaded.path,
            found: loaded.found,
        };
        tracing::debug!(path = %origin.path.path.display(), found = origin.found, "client config loaded and cached");
        *cached = Some((Arc::clone(&config), origin.clone()));
        Ok((config, origin))
    }

    /// Whether a configuration has been loaded and cached.
    pub fn is_loaded(&self) -> bool {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::test_utils::TestEnv;
    use std::thread;

    #[test]
    fn test_current_loads_lazily() {
        let env = TestEnv::new();
        env.write_vaultrc("token_helper = \"/bin/helper\"");

        let cache = CachedClientConfig::new(env.resolver());
        assert!(!cache.is_loaded());

        let config = cache.current().unwrap();
        assert_eq!(config.token_helper(), Some("/bin/helper"));
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_current_is_memoized_after_success() {
        let env = TestEnv::new();
        env.write_vaultrc("token_helper = \"first\"");
        let cache = CachedClientConfig::new(env.resolver());

        let first = cache.current().unwrap();
        env.write_vaultrc("token_helper = \"second\"");
        let second = cache.current().unwrap();

        assert_eq!(second.token_helper(), Some("first"));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_file_is_cached_as_default() {
        let env = TestEnv::new();
        let cache = CachedClientConfig::new(env.resolver());

        assert_eq!(cache.current().unwrap().token_helper(), None);

        env.write_vaultrc("token_helper = \"late\"");
        assert_eq!(cache.current().unwrap().token_helper(), None);
    }

    #[test]
    fn test_origin_is_recorded_at_load_time() {
        let env = TestEnv::new();
        let cache = CachedClientConfig::new(env.resolver());

        let (_, origin) = cache.current_with_origin().unwrap();
        assert!(!origin.found);
        assert_eq!(origin.path.path, env.home_path().join(".vaultrc"));

        env.write_vaultrc("token_helper = \"late\"");
        let (config, origin) = cache.current_with_origin().unwrap();
        assert!(!origin.found);
        assert_eq!(config.token_helper(), None);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let env = TestEnv::new();
        env.write_vaultrc("token_helper = ");
        let cache = CachedClientConfig::new(env.resolver());

        assert!(matches!(cache.current(), Err(Error::Parse { .. })));
        assert!(!cache.is_loaded());

        env.write_vaultrc("token_helper = \"fixed\"");
        let config = cache.current().unwrap();
        assert_eq!(config.token_helper(), Some("fixed"));
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_invalid_keys_are_not_cached() {
        let env = TestEnv::new();
        env.write_vaultrc("tokenhelper = \"typo\"");
        let cache = CachedClientConfig::new(env.resolver());

        assert!(matches!(cache.current(), Err(Error::InvalidKeys(_))));
        assert!(!cache.is_loaded());
    }

    #[test]
    fn test_home_directory_error_is_not_cached() {
        let cache = CachedClientConfig::new(ConfigResolver::new());
        assert!(matches!(
            cache.current(),
            Err(Error::HomeDirectory { .. })
        ));
        assert!(!cache.is_loaded());
    }

    #[test]
    fn test_concurrent_callers_share_one_value() {
        let env = TestEnv::new();
        env.write_vaultrc("token_helper = \"shared\"");
        let cache = CachedClientConfig::new(env.resolver());

        let configs: Vec<Arc<ClientConfig>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| cache.current().unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for config in &configs {
            assert!(Arc::ptr_eq(config, &configs[0]));
            assert_eq!(config.token_helper(), Some("shared"));
        }
    }
}
