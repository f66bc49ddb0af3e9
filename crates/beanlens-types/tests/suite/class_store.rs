use beanlens_types::{
    ClassDef, ClassEnv, ClassKind, ClassStore, GenericOwner, MethodDef, MethodId, Type,
};

use pretty_assertions::assert_eq;

#[test]
fn intern_class_id_is_idempotent() {
    let mut store = ClassStore::default();
    let first = store.intern_class_id("com.example.Foo");
    let second = store.intern_class_id("com.example.Foo");
    assert_eq!(first, second);
    assert!(!store.is_defined(first));
    assert_eq!(store.class_name(first), Some("com.example.Foo"));
    assert!(store.class(first).is_none());
}

#[test]
fn default_store_defines_primitives_only() {
    let store = ClassStore::default();
    let wk = store.well_known();

    let int = store.class(wk.int).expect("int is always defined");
    assert_eq!(int.kind, ClassKind::Primitive);
    assert_eq!(int.name, "int");
    assert_eq!(store.class_name(wk.void), Some("void"));

    assert!(!store.is_defined(wk.object));
    assert_eq!(store.lookup_class("java.lang.Object"), Some(wk.object));
}

#[test]
fn upsert_class_overwrites_without_changing_id() {
    let mut store = ClassStore::default();

    let first = store.upsert_class(ClassDef::class("com.example.Bar", None));
    let second = store.upsert_class(ClassDef {
        methods: vec![MethodDef::new("f", vec![], Type::Class(store.well_known().void))],
        ..ClassDef::interface("com.example.Bar")
    });

    assert_eq!(first, second);
    let def = store.class(first).expect("class should be defined");
    assert_eq!(def.kind, ClassKind::Interface);
    assert_eq!(def.methods.len(), 1);

    let method = store
        .method(MethodId {
            owner: first,
            index: 0,
        })
        .expect("method handle should resolve");
    assert_eq!(method.name, "f");
    assert!(store
        .method(MethodId {
            owner: first,
            index: 1,
        })
        .is_none());
}

#[test]
fn type_params_can_be_redefined_after_allocation() {
    let mut store = ClassStore::with_minimal_jdk();
    let object = Type::Class(store.well_known().object);
    let owner = store.intern_class_id("com.example.Box");

    let before = store.type_param_count();
    let t = store.add_type_param("T", vec![object.clone()], GenericOwner::Class(owner));
    assert_eq!(store.type_param_count(), before + 1);

    let string = Type::Class(store.well_known().string);
    store.define_type_param(
        t,
        beanlens_types::TypeParamDef {
            name: "T".into(),
            upper_bounds: vec![string.clone()],
            owner: GenericOwner::Class(owner),
        },
    );
    assert_eq!(store.type_param(t).unwrap().upper_bounds, vec![string]);
}

#[test]
fn minimal_jdk_defines_collections_and_boxes() {
    let store = ClassStore::with_minimal_jdk();
    for name in [
        "java.lang.Object",
        "java.lang.String",
        "java.lang.Integer",
        "java.lang.Boolean",
        "java.util.List",
        "java.util.ArrayList",
        "java.util.Map",
        "java.util.HashMap",
        "java.util.Collection",
    ] {
        let id = store.class_id(name).unwrap_or_else(|| panic!("{name} not interned"));
        assert!(store.is_defined(id), "{name} should be defined");
    }

    let list = store.class(store.class_id("java.util.List").unwrap()).unwrap();
    assert!(list.is_interface());
    assert_eq!(list.type_params.len(), 1);
}

#[test]
fn access_check_probe_is_configurable() {
    let mut store = ClassStore::default();
    assert!(store.can_suppress_access_checks());
    store.set_access_checks_suppressible(false);
    assert!(!store.can_suppress_access_checks());
}
