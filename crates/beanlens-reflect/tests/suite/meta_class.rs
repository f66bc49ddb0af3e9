use beanlens_config::ReflectionConfig;
use beanlens_reflect::{Accessor, MetaClass, ReflectionError, ReflectorFactory};
use beanlens_types::{ClassDef, ClassRef, MethodId, Type};
use pretty_assertions::assert_eq;

use super::fixtures::Fixture;

/// `Order { Customer customer; List<Line> lines; }`, `Customer { String name; String userName;
/// Address address; }`, `Address { String city; }` (read-only), `Line { String sku; }`.
fn order_model(f: &mut Fixture) -> ClassRef {
    let string = f.string();
    let address = f.define(ClassDef {
        methods: vec![f.getter("getCity", string.clone())],
        ..f.bean("com.example.Address")
    });
    let customer = f.define(ClassDef {
        methods: vec![
            f.getter("getName", string.clone()),
            f.setter("setName", string.clone()),
            f.getter("getUserName", string.clone()),
            f.setter("setUserName", string.clone()),
            f.getter("getAddress", Type::Class(address)),
            f.setter("setAddress", Type::Class(address)),
        ],
        ..f.bean("com.example.Customer")
    });
    let line = f.define(ClassDef {
        methods: vec![f.getter("getSku", string)],
        ..f.bean("com.example.Line")
    });
    let lines = Type::parameterized(f.id("java.util.List"), vec![Type::Class(line)]);
    let order = f.define(ClassDef {
        methods: vec![
            f.getter("getCustomer", Type::Class(customer)),
            f.setter("setCustomer", Type::Class(customer)),
            f.getter("getLines", lines.clone()),
            f.setter("setLines", lines),
        ],
        ..f.bean("com.example.Order")
    });
    ClassRef::Class(order)
}

#[test]
fn getter_types_follow_nested_paths() {
    let mut f = Fixture::new();
    let order = order_model(&mut f);
    let factory = ReflectorFactory::default();
    let meta = MetaClass::for_class(&f.store, &factory, &order).unwrap();

    assert_eq!(
        meta.getter_type("customer.name").unwrap(),
        f.class_ref("java.lang.String")
    );
    assert_eq!(
        meta.getter_type("customer.address.city").unwrap(),
        f.class_ref("java.lang.String")
    );
    assert_eq!(meta.getter_type("lines").unwrap(), f.class_ref("java.util.List"));
    assert_eq!(meta.getter_type("lines[0]").unwrap(), f.class_ref("com.example.Line"));
    assert_eq!(
        meta.getter_type("lines[0].sku").unwrap(),
        f.class_ref("java.lang.String")
    );
}

#[test]
fn setter_types_follow_nested_paths() {
    let mut f = Fixture::new();
    let order = order_model(&mut f);
    let factory = ReflectorFactory::default();
    let meta = MetaClass::for_class(&f.store, &factory, &order).unwrap();

    assert_eq!(
        meta.setter_type("customer.address").unwrap(),
        f.class_ref("com.example.Address")
    );
    assert_eq!(
        meta.setter_type("customer.address.city"),
        Err(ReflectionError::NoSuchWriter {
            property: "city".into(),
            class: "com.example.Address".into(),
        })
    );
}

#[test]
fn presence_checks_walk_every_segment() {
    let mut f = Fixture::new();
    let order = order_model(&mut f);
    let factory = ReflectorFactory::default();
    let meta = MetaClass::for_class(&f.store, &factory, &order).unwrap();

    assert!(meta.has_getter("customer.address.city").unwrap());
    assert!(meta.has_getter("lines[0].sku").unwrap());
    assert!(!meta.has_getter("customer.phone").unwrap());
    assert!(!meta.has_getter("missing.name").unwrap());

    assert!(meta.has_setter("customer.name").unwrap());
    assert!(!meta.has_setter("customer.address.city").unwrap());
    assert!(!meta.has_setter("missing.name").unwrap());
}

#[test]
fn find_property_restores_declared_casing() {
    let mut f = Fixture::new();
    let order = order_model(&mut f);
    let factory = ReflectorFactory::default();
    let meta = MetaClass::for_class(&f.store, &factory, &order).unwrap();

    assert_eq!(
        meta.find_property("CUSTOMER.NAME", false).unwrap().as_deref(),
        Some("customer.name")
    );
    assert_eq!(
        meta.find_property("customer.user_name", true).unwrap().as_deref(),
        Some("customer.userName")
    );
    // Only the resolvable prefix survives an unknown trailing segment.
    assert_eq!(
        meta.find_property("customer.user_name", false).unwrap().as_deref(),
        Some("customer.")
    );
    assert_eq!(meta.find_property("missing", false).unwrap(), None);
}

#[test]
fn column_matching_follows_the_factory_configuration() {
    let mut f = Fixture::new();
    let order = order_model(&mut f);

    let plain = ReflectorFactory::default();
    let meta = MetaClass::for_class(&f.store, &plain, &order).unwrap();
    assert_eq!(
        meta.find_property_for_column("CUSTOMER.USER_NAME").unwrap().as_deref(),
        Some("customer.")
    );

    let mapping = ReflectorFactory::new(&ReflectionConfig {
        map_underscore_to_camel_case: true,
        ..ReflectionConfig::default()
    });
    let meta = MetaClass::for_class(&f.store, &mapping, &order).unwrap();
    assert_eq!(
        meta.find_property_for_column("CUSTOMER.USER_NAME").unwrap().as_deref(),
        Some("customer.userName")
    );
}

#[test]
fn nested_classes_share_the_factory_cache() {
    let mut f = Fixture::new();
    let order = order_model(&mut f);
    let factory = ReflectorFactory::default();
    let meta = MetaClass::for_class(&f.store, &factory, &order).unwrap();

    meta.getter_type("customer.address.city").unwrap();
    assert_eq!(factory.cached_len(), 3);

    let customer = meta.meta_class_for_property("customer").unwrap();
    assert_eq!(factory.cached_len(), 3);
    assert_eq!(customer.getter_names(), ["name", "userName", "address"]);
    assert_eq!(customer.setter_names(), ["name", "userName", "address"]);
    assert!(customer.has_default_constructor());
    assert_eq!(
        customer.get_writer("address").unwrap(),
        Accessor::MethodCall(MethodId {
            owner: f.id("com.example.Customer"),
            index: 5
        })
    );
}

#[test]
fn unknown_segments_report_the_missing_reader() {
    let mut f = Fixture::new();
    let order = order_model(&mut f);
    let factory = ReflectorFactory::default();
    let meta = MetaClass::for_class(&f.store, &factory, &order).unwrap();

    assert_eq!(
        meta.getter_type("customer.phone"),
        Err(ReflectionError::NoSuchReader {
            property: "phone".into(),
            class: "com.example.Customer".into(),
        })
    );
    assert!(matches!(
        meta.get_reader("total"),
        Err(ReflectionError::NoSuchReader { property, .. }) if property == "total"
    ));
}
