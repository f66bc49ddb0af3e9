use beanlens_reflect::{Accessor, ReflectionError};
use beanlens_types::{ClassDef, MethodId, ACC_BRIDGE, ACC_PUBLIC, ACC_SYNTHETIC};
use pretty_assertions::assert_eq;

use super::fixtures::Fixture;

#[test]
fn round_trip_setter_overrides_an_earlier_ambiguity() {
    let mut f = Fixture::new();
    let long = f.ty("java.lang.Long");
    let integer = f.ty("java.lang.Integer");
    let string = f.string();
    let record = f.define(ClassDef {
        methods: vec![
            f.getter("getX", long.clone()),
            f.setter("setX", integer),
            f.setter("setX", string),
            f.setter("setX", long),
        ],
        ..f.bean("com.example.Record")
    });

    let reflector = f.reflect(record).unwrap();
    assert_eq!(
        reflector.get_writer("x").unwrap(),
        Accessor::MethodCall(MethodId {
            owner: record,
            index: 3
        })
    );
    assert_eq!(reflector.writer_type("x").unwrap(), &f.class_ref("java.lang.Long"));
}

#[test]
fn round_trip_setter_found_first_ignores_later_conflicts() {
    let mut f = Fixture::new();
    let long = f.ty("java.lang.Long");
    let integer = f.ty("java.lang.Integer");
    let string = f.string();
    let record = f.define(ClassDef {
        methods: vec![
            f.getter("getX", long.clone()),
            f.setter("setX", long),
            f.setter("setX", integer),
            f.setter("setX", string),
        ],
        ..f.bean("com.example.Record")
    });

    let reflector = f.reflect(record).unwrap();
    assert_eq!(
        reflector.get_writer("x").unwrap(),
        Accessor::MethodCall(MethodId {
            owner: record,
            index: 1
        })
    );
}

#[test]
fn narrowest_setter_wins_when_none_matches_the_getter() {
    let mut f = Fixture::new();
    let string = f.string();
    let number = f.ty("java.lang.Number");
    let integer = f.ty("java.lang.Integer");
    let reading = f.define(ClassDef {
        methods: vec![
            f.getter("getValue", string),
            f.setter("setValue", number),
            f.setter("setValue", integer),
        ],
        ..f.bean("com.example.Reading")
    });

    let reflector = f.reflect(reading).unwrap();
    assert_eq!(
        reflector.get_writer("value").unwrap(),
        Accessor::MethodCall(MethodId {
            owner: reading,
            index: 2
        })
    );
    assert_eq!(
        reflector.writer_type("value").unwrap(),
        &f.class_ref("java.lang.Integer")
    );
    assert_eq!(
        reflector.reader_type("value").unwrap(),
        &f.class_ref("java.lang.String")
    );
}

#[test]
fn narrower_setter_wins_without_a_getter() {
    let mut f = Fixture::new();
    let number = f.ty("java.lang.Number");
    let integer = f.ty("java.lang.Integer");
    let gauge = f.define(ClassDef {
        methods: vec![f.setter("setLevel", number), f.setter("setLevel", integer)],
        ..f.bean("com.example.Gauge")
    });

    let reflector = f.reflect(gauge).unwrap();
    assert_eq!(
        reflector.writer_type("level").unwrap(),
        &f.class_ref("java.lang.Integer")
    );
}

#[test]
fn ambiguous_setters_report_both_types() {
    let mut f = Fixture::new();
    let integer = f.ty("java.lang.Integer");
    let string = f.string();
    let number = f.ty("java.lang.Number");
    let mixed = f.define(ClassDef {
        methods: vec![
            f.getter("getValue", number),
            f.setter("setValue", integer),
            f.setter("setValue", string),
        ],
        ..f.bean("com.example.Mixed")
    });

    match f.reflect(mixed).unwrap_err() {
        ReflectionError::AmbiguousProperty {
            property, detail, ..
        } => {
            assert_eq!(property, "value");
            assert!(detail.contains("java.lang.Integer"), "{detail}");
            assert!(detail.contains("java.lang.String"), "{detail}");
        }
        other => panic!("expected AmbiguousProperty, got {other:?}"),
    }
}

#[test]
fn equal_non_boolean_getters_are_ambiguous() {
    let mut f = Fixture::new();
    let boxed = f.ty("java.lang.Boolean");
    let flagged = f.define(ClassDef {
        methods: vec![
            f.getter("getEnabled", boxed.clone()),
            f.getter("isEnabled", boxed),
        ],
        ..f.bean("com.example.Flagged")
    });

    assert!(matches!(
        f.reflect(flagged),
        Err(ReflectionError::AmbiguousProperty { property, .. }) if property == "enabled"
    ));
}

#[test]
fn unrelated_getters_name_the_winning_declaring_class() {
    let mut f = Fixture::new();
    let integer = f.ty("java.lang.Integer");
    let string = f.string();

    let mut sized = ClassDef::interface("com.example.Sized");
    sized.methods = vec![f.getter("getSize", integer)];
    let sized = f.define(sized);

    let mut box_def = f.bean("com.example.Box");
    box_def.interfaces = vec![beanlens_types::Type::Class(sized)];
    box_def.methods = vec![f.getter("getSize", string)];
    let boxed = f.define(box_def);

    assert_eq!(
        f.reflect(boxed),
        Err(ReflectionError::AmbiguousProperty {
            property: "size".into(),
            class: "com.example.Box".into(),
            detail: "overloaded getters have ambiguous types, which breaks the JavaBeans \
                     specification"
                .into(),
        })
    );
}

#[test]
fn bridge_methods_are_ignored() {
    let mut f = Fixture::new();
    let string = f.string();
    let integer = f.ty("java.lang.Integer");
    let label = f.define(ClassDef {
        methods: vec![
            f.getter("getText", integer).with_flags(ACC_PUBLIC | ACC_BRIDGE | ACC_SYNTHETIC),
            f.getter("getText", string),
        ],
        ..f.bean("com.example.Label")
    });

    let reflector = f.reflect(label).unwrap();
    assert_eq!(
        reflector.get_reader("text").unwrap(),
        Accessor::MethodCall(MethodId {
            owner: label,
            index: 1
        })
    );
    assert_eq!(
        reflector.reader_type("text").unwrap(),
        &f.class_ref("java.lang.String")
    );
}

#[test]
fn overridden_methods_are_seen_once() {
    let mut f = Fixture::new();
    let string = f.string();
    let parent = f.define(ClassDef {
        methods: vec![
            f.getter("getName", string.clone()),
            f.setter("setName", string.clone()),
        ],
        ..f.bean("com.example.Animal")
    });
    let child = f.define(ClassDef {
        methods: vec![f.getter("getName", string)],
        ..f.bean_extending("com.example.Dog", beanlens_types::Type::Class(parent))
    });

    let reflector = f.reflect(child).unwrap();
    assert_eq!(
        reflector.get_reader("name").unwrap(),
        Accessor::MethodCall(MethodId {
            owner: child,
            index: 0
        })
    );
    assert_eq!(
        reflector.get_writer("name").unwrap(),
        Accessor::MethodCall(MethodId {
            owner: parent,
            index: 1
        })
    );
}

#[test]
fn reserved_names_are_never_properties() {
    let mut f = Fixture::new();
    let class = f.ty("java.lang.Class");
    let long = f.ty("java.lang.Long");
    let string = f.string();
    let tricky = f.define(ClassDef {
        methods: vec![
            f.getter("getClass", class),
            f.getter("getSerialVersionUID", long.clone()),
        ],
        fields: vec![
            f.field("serialVersionUID", long),
            f.field("$jacocoData", string),
        ],
        ..f.bean("com.example.Tricky")
    });

    let reflector = f.reflect(tricky).unwrap();
    assert!(!reflector.has_reader("class"));
    assert!(!reflector.has_reader("serialVersionUID"));
    assert!(!reflector.has_writer("serialVersionUID"));
    assert!(!reflector.has_reader("$jacocoData"));
    assert!(reflector.readable_property_names().is_empty());
}
