//! Guards for mutating the process environment in tests.
//!
//! Every mutation happens under one global re-entrant mutex and returns an
//! [`EnvVarGuard`] that restores the previous value, or removes the variable
//! when it was absent, on drop. Guards for the same key restore in LIFO order.
//!
//! The mutex is only held for each individual mutation. Tests that need the
//! environment to stay fixed across a whole parse should hold an [`EnvScope`]
//! (or a [`lock`]) for the duration, and should also be marked `#[serial]`
//! because unguarded reads such as `dirs::home_dir` do not take the mutex.
//!
//! # Examples
//!
//! ```
//! use typed_flags_test_helpers::env;
//!
//! let _home = env::home("/home/tester");
//! assert_eq!(std::env::var("HOME").as_deref(), Ok("/home/tester"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use camino::Utf8Path;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn write_var(key: &str, value: Option<&OsStr>) {
    match value {
        // SAFETY: the caller holds `ENV_MUTEX`.
        Some(value) => unsafe { env::set_var(key, value) },
        // SAFETY: the caller holds `ENV_MUTEX`.
        None => unsafe { env::remove_var(key) },
    }
}

fn replace_locked(
    key: String,
    value: Option<&OsStr>,
    _guard: &ReentrantMutexGuard<'static, ()>,
) -> EnvVarGuard {
    let original = env::var_os(&key);
    // SAFETY: `_guard` proves `ENV_MUTEX` is held.
    unsafe { write_var(&key, value) };
    EnvVarGuard { key, original }
}

fn replace(key: String, value: Option<&OsStr>) -> EnvVarGuard {
    let guard = ENV_MUTEX.lock();
    replace_locked(key, value, &guard)
}

/// Restores an environment variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// The variable this guard restores.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        let original = self.original.take();
        // SAFETY: `ENV_MUTEX` is held for the restoration.
        unsafe { write_var(&self.key, original.as_deref()) };
    }
}

/// Sets `key` to `value` until the guard drops.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    replace(key.into(), Some(value.as_ref()))
}

/// Removes `key` until the guard drops.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    replace(key.into(), None)
}

/// Points `HOME` at `path` until the guard drops.
///
/// Path flags expand a leading `~` against this directory.
pub fn home<P>(path: P) -> EnvVarGuard
where
    P: AsRef<Utf8Path>,
{
    set_var("HOME", path.as_ref().as_str())
}

/// Holds the environment mutex for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvLock {
    /// Sets `key` to `value` while the lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        replace_locked(key.into(), Some(value.as_ref()), &self.guard)
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        replace_locked(key.into(), None, &self.guard)
    }
}

impl fmt::Debug for EnvLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvLock").finish_non_exhaustive()
    }
}

/// Acquires the environment mutex until the returned lock drops.
pub fn lock() -> EnvLock {
    EnvLock {
        guard: ENV_MUTEX.lock(),
    }
}

/// Keeps the environment locked while a set of guards is alive.
///
/// Guards are restored before the lock is released.
///
/// # Examples
///
/// ```
/// use typed_flags_test_helpers::env;
///
/// let _scope = env::scope_with(|lock| {
///     vec![
///         lock.set_var("SELECTOR_VCPUS", "4"),
///         lock.remove_var("SELECTOR_MEMORY"),
///     ]
/// });
/// assert_eq!(std::env::var("SELECTOR_VCPUS").as_deref(), Ok("4"));
/// ```
#[must_use = "dropping restores the guards and releases the lock"]
#[derive(Debug)]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvLock,
}

impl EnvScope {
    /// Locks the environment and keeps `guards` alive under the lock.
    pub fn new(guards: Vec<EnvVarGuard>) -> Self {
        Self {
            _lock: lock(),
            guards,
        }
    }

    /// Number of variables this scope restores.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether the scope restores no variables.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore while `_lock` is still held; fields drop after this body.
        drop(std::mem::take(&mut self.guards));
    }
}

/// Builds a scope from guards created under the lock by `builder`.
pub fn scope_with<F>(builder: F) -> EnvScope
where
    F: FnOnce(&EnvLock) -> Vec<EnvVarGuard>,
{
    let held = lock();
    let guards = builder(&held);
    EnvScope {
        guards,
        _lock: held,
    }
}

/// Runs `f` while holding the environment mutex.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock();
    f()
}

#[cfg(test)]
mod tests;
