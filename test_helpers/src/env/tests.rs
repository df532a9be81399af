//! Unit tests for environment guards.

use super::*;

fn current(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[test]
fn set_var_restores_previous_value() {
    let _outer = set_var("TYPED_FLAGS_HELPERS_SET", "original");
    {
        let _inner = set_var("TYPED_FLAGS_HELPERS_SET", "temporary");
        assert_eq!(current("TYPED_FLAGS_HELPERS_SET").as_deref(), Some("temporary"));
    }
    assert_eq!(current("TYPED_FLAGS_HELPERS_SET").as_deref(), Some("original"));
}

#[test]
fn set_var_removes_variables_that_were_absent() {
    let _cleared = remove_var("TYPED_FLAGS_HELPERS_ABSENT");
    {
        let _guard = set_var("TYPED_FLAGS_HELPERS_ABSENT", "present");
        assert!(current("TYPED_FLAGS_HELPERS_ABSENT").is_some());
    }
    assert!(current("TYPED_FLAGS_HELPERS_ABSENT").is_none());
}

#[test]
fn remove_var_restores_on_drop() {
    let _outer = set_var("TYPED_FLAGS_HELPERS_REMOVE", "kept");
    {
        let guard = remove_var("TYPED_FLAGS_HELPERS_REMOVE");
        assert_eq!(guard.key(), "TYPED_FLAGS_HELPERS_REMOVE");
        assert!(current("TYPED_FLAGS_HELPERS_REMOVE").is_none());
    }
    assert_eq!(current("TYPED_FLAGS_HELPERS_REMOVE").as_deref(), Some("kept"));
}

#[test]
fn scope_restores_every_guard() {
    let _baseline = remove_var("TYPED_FLAGS_HELPERS_SCOPE_A");
    {
        let scope = scope_with(|lock| {
            vec![
                lock.set_var("TYPED_FLAGS_HELPERS_SCOPE_A", "a"),
                lock.set_var("TYPED_FLAGS_HELPERS_SCOPE_B", "b"),
            ]
        });
        assert_eq!(scope.len(), 2);
        assert_eq!(current("TYPED_FLAGS_HELPERS_SCOPE_A").as_deref(), Some("a"));
    }
    assert!(current("TYPED_FLAGS_HELPERS_SCOPE_A").is_none());
    assert!(current("TYPED_FLAGS_HELPERS_SCOPE_B").is_none());
}

#[test]
fn lock_is_reentrant() {
    let _held = lock();
    let value = with_lock(|| {
        let _guard = set_var("TYPED_FLAGS_HELPERS_REENTRANT", "yes");
        current("TYPED_FLAGS_HELPERS_REENTRANT")
    });
    assert_eq!(value.as_deref(), Some("yes"));
}
