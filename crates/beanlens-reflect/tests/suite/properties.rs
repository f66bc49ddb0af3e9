use std::collections::BTreeSet;

use beanlens_reflect::{namer, Reflector};
use beanlens_types::{ClassDef, ClassId};
use proptest::prelude::*;

use super::fixtures::Fixture;

fn property_names() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set("[a-z][a-zA-Z0-9]{0,8}", 1..8)
        .prop_map(|names| names.into_iter().filter(|name| name != "class").collect())
}

fn accessor_name(prefix: &str, property: &str) -> String {
    let mut chars = property.chars();
    let first = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
    format!("{prefix}{first}{}", chars.as_str())
}

/// A bean with a getter for every name and a setter for every other name.
fn bean_with(f: &mut Fixture, names: &BTreeSet<String>) -> ClassId {
    let string = f.string();
    let mut methods = Vec::new();
    for (i, name) in names.iter().enumerate() {
        methods.push(f.getter(&accessor_name("get", name), string.clone()));
        if i % 2 == 0 {
            methods.push(f.setter(&accessor_name("set", name), string.clone()));
        }
    }
    f.define(ClassDef {
        methods,
        ..f.bean("com.example.Generated")
    })
}

proptest! {
    #[test]
    fn accessor_names_round_trip_through_the_namer(name in "[a-z][a-zA-Z0-9]{0,12}") {
        prop_assert_eq!(namer::method_to_property(&accessor_name("get", &name)).unwrap(), name.clone());
        prop_assert_eq!(namer::method_to_property(&accessor_name("set", &name)).unwrap(), name);
    }

    #[test]
    fn every_property_is_found_ignoring_case(names in property_names()) {
        let mut f = Fixture::new();
        let bean = bean_with(&mut f, &names);
        let reflector = f.reflect(bean).unwrap();

        for name in &names {
            for probe in [name.to_uppercase(), name.to_lowercase(), name.clone()] {
                let found = reflector.find_property_by_case_insensitive_name(&probe);
                prop_assert_eq!(
                    found.map(str::to_uppercase),
                    Some(name.to_uppercase()),
                    "probe {}", probe
                );
            }
        }
    }

    #[test]
    fn discovered_properties_match_the_declared_accessors(names in property_names()) {
        let mut f = Fixture::new();
        let bean = bean_with(&mut f, &names);
        let reflector = f.reflect(bean).unwrap();

        let readable: BTreeSet<String> = reflector.readable_property_names().iter().cloned().collect();
        prop_assert_eq!(&readable, &names);

        let expected_writable: BTreeSet<String> = names
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 0)
            .map(|(_, name)| name.clone())
            .collect();
        let writable: BTreeSet<String> = reflector.writable_property_names().iter().cloned().collect();
        prop_assert_eq!(writable, expected_writable);
    }

    #[test]
    fn introspection_is_deterministic(names in property_names()) {
        let mut f = Fixture::new();
        let bean = bean_with(&mut f, &names);
        let first = f.reflect(bean).unwrap();
        let second = Reflector::new(&f.store, first.get_type().clone()).unwrap();
        prop_assert_eq!(first, second);
    }
}
