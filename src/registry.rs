//! Registry of authentication providers.
//!
//! Thin wrapper over `DashMap` that routes authentication requests to the
//! provider registered for a method name. Hosts typically build one
//! registry at startup, register a provider per accepted method, and share
//! it across connection handlers.

use std::sync::Arc;

use dashmap::DashMap;

use crate::provider::{AuthenticationProvider, Principal};
use crate::session::AuthenticationData;
use crate::{Error, Result};

/// Registry of named authentication providers.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use peerauth::{AuthenticationRegistry, TlsAuthenticationProvider};
///
/// let registry = AuthenticationRegistry::new();
/// registry.register(Arc::new(TlsAuthenticationProvider::new()));
/// assert!(registry.get("tls").is_some());
/// ```
pub struct AuthenticationRegistry {
    providers: DashMap<String, Arc<dyn AuthenticationProvider>>,
}

impl AuthenticationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Register a provider under its own method name.
    ///
    /// Registering a second provider for the same method replaces the
    /// first.
    pub fn register(&self, provider: Arc<dyn AuthenticationProvider>) {
        self.providers
            .insert(provider.method_name().to_string(), provider);
    }

    /// Look up a provider by method name.
    #[must_use]
    pub fn get(&self, method: &str) -> Option<Arc<dyn AuthenticationProvider>> {
        self.providers.get(method).map(|p| Arc::clone(&*p))
    }

    /// Remove a provider by method name. Returns `true` if it existed.
    pub fn remove(&self, method: &str) -> bool {
        self.providers.remove(method).is_some()
    }

    /// Authenticate a session with the provider registered for `method`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedAuthMethod` if no provider is registered
    /// for the method, or the provider's own error if authentication
    /// fails.
    pub fn authenticate(&self, method: &str, data: &dyn AuthenticationData) -> Result<Principal> {
        let provider = self
            .get(method)
            .ok_or_else(|| Error::UnsupportedAuthMethod(method.to_string()))?;
        provider.authenticate(data)
    }

    /// Method names with a registered provider.
    #[must_use]
    pub fn method_names(&self) -> Vec<String> {
        self.providers.iter().map(|e| e.key().clone()).collect()
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns `true` if no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for AuthenticationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
