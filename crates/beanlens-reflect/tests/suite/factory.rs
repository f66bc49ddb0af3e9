use std::sync::Arc;

use beanlens_config::ReflectionConfig;
use beanlens_reflect::{ReflectionError, ReflectorFactory};
use beanlens_types::{ClassDef, ClassRef, ClassStore};
use pretty_assertions::assert_eq;

use super::fixtures::Fixture;

fn user(f: &mut Fixture) -> ClassRef {
    let id = f.define(ClassDef {
        methods: vec![
            f.getter("getName", f.string()),
            f.setter("setName", f.string()),
        ],
        ..f.bean("com.example.User")
    });
    ClassRef::Class(id)
}

#[test]
fn cached_reflectors_are_shared() {
    let mut f = Fixture::new();
    let user = user(&mut f);
    let factory = ReflectorFactory::default();
    assert!(factory.is_class_cache_enabled());

    let first = factory.find_for_class(&f.store, &user).unwrap();
    let second = factory.find_for_class(&f.store, &user).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.cached_len(), 1);

    factory.clear();
    assert_eq!(factory.cached_len(), 0);
    let rebuilt = factory.find_for_class(&f.store, &user).unwrap();
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert_eq!(*first, *rebuilt);
}

#[test]
fn disabled_cache_builds_every_time() {
    let mut f = Fixture::new();
    let user = user(&mut f);
    let factory = ReflectorFactory::new(&ReflectionConfig {
        class_cache_enabled: false,
        ..ReflectionConfig::default()
    });
    assert!(!factory.is_class_cache_enabled());

    let first = factory.find_for_class(&f.store, &user).unwrap();
    let second = factory.find_for_class(&f.store, &user).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert_eq!(factory.cached_len(), 0);
}

#[test]
fn toggling_the_cache_takes_effect_on_the_next_lookup() {
    let mut f = Fixture::new();
    let user = user(&mut f);
    let mut factory = ReflectorFactory::default();

    factory.set_class_cache_enabled(false);
    factory.find_for_class(&f.store, &user).unwrap();
    assert_eq!(factory.cached_len(), 0);

    factory.set_class_cache_enabled(true);
    factory.find_for_class(&f.store, &user).unwrap();
    assert_eq!(factory.cached_len(), 1);
}

#[test]
fn failed_introspection_is_not_cached() {
    let mut store = ClassStore::with_minimal_jdk();
    let ghost = ClassRef::Class(store.intern_class_id("com.example.Ghost"));
    let factory = ReflectorFactory::default();

    for _ in 0..2 {
        assert_eq!(
            factory.find_for_class(&store, &ghost).unwrap_err(),
            ReflectionError::UnknownClass("com.example.Ghost".into())
        );
    }
    assert_eq!(factory.cached_len(), 0);
}

#[test]
fn concurrent_lookups_observe_one_reflector() {
    let mut f = Fixture::new();
    let user = user(&mut f);
    let factory = ReflectorFactory::default();
    let store = &f.store;

    let found: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| factory.find_for_class(store, &user).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(factory.cached_len(), 1);
    let cached = factory.find_for_class(store, &user).unwrap();
    for reflector in &found {
        assert!(Arc::ptr_eq(reflector, &cached));
    }
}
