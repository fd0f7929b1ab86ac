//! Shared-secret admin gate.

use glow_store::{JsonStore, KvStore};

use super::AuthError;

/// Store key holding the admin flag.
pub const ADMIN_KEY: &str = "isAdmin";

/// Compares a password against a shared secret and remembers the result in
/// the store, next to the catalog.
#[derive(Debug)]
pub struct AdminGate<S> {
    store: JsonStore<S>,
    password: String,
}

impl<S: KvStore> AdminGate<S> {
    /// Create a gate checking against `password`.
    pub fn new(store: S, password: impl Into<String>) -> Self {
        Self {
            store: JsonStore::new(store),
            password: password.into(),
        }
    }

    /// Check `password` and mark the session as admin on success.
    pub fn login(&self, password: &str) -> Result<(), AuthError> {
        if !constant_time_eq(password.as_bytes(), self.password.as_bytes()) {
            tracing::warn!("admin login rejected");
            return Err(AuthError::InvalidPassword);
        }
        self.store.set(ADMIN_KEY, &true)?;
        tracing::info!("admin logged in");
        Ok(())
    }

    /// Whether the admin flag is set.
    ///
    /// Accepts both a JSON `true` and the string `"true"`.
    pub fn is_admin(&self) -> Result<bool, AuthError> {
        let value: Option<serde_json::Value> = match self.store.get(ADMIN_KEY) {
            Ok(value) => value,
            Err(e) if !e.is_closed() => {
                tracing::warn!(error = %e, "unreadable admin flag");
                None
            }
            Err(e) => return Err(e.into()),
        };
        Ok(match value {
            Some(serde_json::Value::Bool(flag)) => flag,
            Some(serde_json::Value::String(s)) => s == "true",
            _ => false,
        })
    }

    /// Clear the admin flag.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.delete(ADMIN_KEY)?;
        tracing::info!("admin logged out");
        Ok(())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use glow_store::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_login_sets_flag() {
        let store = Arc::new(MemoryStore::new());
        let gate = AdminGate::new(Arc::clone(&store), "admin123");

        assert!(!gate.is_admin().unwrap());
        gate.login("admin123").unwrap();
        assert!(gate.is_admin().unwrap());
        assert!(store.exists(ADMIN_KEY).unwrap());
    }

    #[test]
    fn test_wrong_password() {
        let gate = AdminGate::new(MemoryStore::new(), "admin123");
        let err = gate.login("nope").unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(err.to_string(), "Invalid password. Please try again.");
        assert!(!gate.is_admin().unwrap());
    }

    #[test]
    fn test_logout_clears_flag() {
        let gate = AdminGate::new(MemoryStore::new(), "admin123");
        gate.login("admin123").unwrap();
        gate.logout().unwrap();
        assert!(!gate.is_admin().unwrap());
    }

    #[test]
    fn test_only_true_counts() {
        let store = Arc::new(MemoryStore::new());
        let gate = AdminGate::new(Arc::clone(&store), "admin123");

        store.set(ADMIN_KEY, b"false").unwrap();
        assert!(!gate.is_admin().unwrap());
        store.set(ADMIN_KEY, b"\"true\"").unwrap();
        assert!(gate.is_admin().unwrap());
        store.set(ADMIN_KEY, b"yes").unwrap();
        assert!(!gate.is_admin().unwrap());
    }
}
