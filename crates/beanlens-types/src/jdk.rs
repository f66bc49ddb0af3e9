//! A hand-written slice of the JDK, enough for bean introspection over common property types.

use crate::model::{
    ACC_ABSTRACT, ACC_FINAL, ACC_INTERFACE, ACC_PRIVATE, ACC_PUBLIC, ACC_STATIC,
};
use crate::{ClassStub, FieldStub, MethodStub};

const CLASS: u16 = ACC_PUBLIC;
const ABSTRACT_CLASS: u16 = ACC_PUBLIC | ACC_ABSTRACT;
const FINAL_CLASS: u16 = ACC_PUBLIC | ACC_FINAL;
const INTERFACE: u16 = ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT;
const PUBLIC: u16 = ACC_PUBLIC;
const ABSTRACT: u16 = ACC_PUBLIC | ACC_ABSTRACT;
const CONSTANT: u16 = ACC_PUBLIC | ACC_STATIC | ACC_FINAL;

fn stub(
    name: &str,
    access_flags: u16,
    super_name: Option<&str>,
    interfaces: &[&str],
    signature: Option<&str>,
) -> ClassStub {
    ClassStub {
        binary_name: name.to_string(),
        access_flags,
        super_binary_name: super_name.map(str::to_string),
        interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
        signature: signature.map(str::to_string),
        fields: Vec::new(),
        methods: Vec::new(),
    }
}

fn method(name: &str, descriptor: &str, signature: Option<&str>, access_flags: u16) -> MethodStub {
    MethodStub {
        name: name.to_string(),
        descriptor: descriptor.to_string(),
        signature: signature.map(str::to_string),
        access_flags,
    }
}

fn field(name: &str, descriptor: &str, access_flags: u16) -> FieldStub {
    FieldStub {
        name: name.to_string(),
        descriptor: descriptor.to_string(),
        signature: None,
        access_flags,
    }
}

fn ctor(descriptor: &str) -> MethodStub {
    method("<init>", descriptor, None, PUBLIC)
}

fn boxed(name: &str, primitive_desc: &str, super_name: &str, interfaces: &[&str], signature: &str) -> ClassStub {
    let mut out = stub(name, FINAL_CLASS, Some(super_name), interfaces, Some(signature));
    out.fields = vec![field("value", primitive_desc, ACC_PRIVATE | ACC_FINAL)];
    let internal = name.replace('.', "/");
    out.methods = vec![
        ctor(&format!("({primitive_desc})V")),
        method(
            "valueOf",
            &format!("({primitive_desc})L{internal};"),
            None,
            ACC_PUBLIC | ACC_STATIC,
        ),
    ];
    out
}

pub(crate) fn minimal_jdk_stubs() -> Vec<ClassStub> {
    let mut out = Vec::new();

    let mut object = stub("java.lang.Object", CLASS, None, &[], None);
    object.methods = vec![
        ctor("()V"),
        method(
            "getClass",
            "()Ljava/lang/Class;",
            Some("()Ljava/lang/Class<*>;"),
            PUBLIC | ACC_FINAL,
        ),
        method("hashCode", "()I", None, PUBLIC),
        method("equals", "(Ljava/lang/Object;)Z", None, PUBLIC),
        method("toString", "()Ljava/lang/String;", None, PUBLIC),
    ];
    out.push(object);

    out.push(stub("java.io.Serializable", INTERFACE, None, &[], None));
    out.push(stub("java.lang.Cloneable", INTERFACE, None, &[], None));

    let mut class = stub(
        "java.lang.Class",
        FINAL_CLASS,
        Some("java.lang.Object"),
        &["java.io.Serializable"],
        Some("<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/io/Serializable;"),
    );
    class.methods = vec![method("getName", "()Ljava/lang/String;", None, PUBLIC)];
    out.push(class);

    let mut comparable = stub(
        "java.lang.Comparable",
        INTERFACE,
        None,
        &[],
        Some("<T:Ljava/lang/Object;>Ljava/lang/Object;"),
    );
    comparable.methods = vec![method(
        "compareTo",
        "(Ljava/lang/Object;)I",
        Some("(TT;)I"),
        ABSTRACT,
    )];
    out.push(comparable);

    let mut char_sequence = stub("java.lang.CharSequence", INTERFACE, None, &[], None);
    char_sequence.methods = vec![
        method("length", "()I", None, ABSTRACT),
        method("charAt", "(I)C", None, ABSTRACT),
    ];
    out.push(char_sequence);

    let mut string = stub(
        "java.lang.String",
        FINAL_CLASS,
        Some("java.lang.Object"),
        &[
            "java.io.Serializable",
            "java.lang.Comparable",
            "java.lang.CharSequence",
        ],
        Some("Ljava/lang/Object;Ljava/io/Serializable;Ljava/lang/Comparable<Ljava/lang/String;>;Ljava/lang/CharSequence;"),
    );
    string.fields = vec![
        field("value", "[C", ACC_PRIVATE | ACC_FINAL),
        field("serialVersionUID", "J", ACC_PRIVATE | ACC_STATIC | ACC_FINAL),
    ];
    string.methods = vec![
        ctor("()V"),
        method("length", "()I", None, PUBLIC),
        method("isEmpty", "()Z", None, PUBLIC),
        method("charAt", "(I)C", None, PUBLIC),
        method("compareTo", "(Ljava/lang/String;)I", None, PUBLIC),
    ];
    out.push(string);

    let mut number = stub(
        "java.lang.Number",
        ABSTRACT_CLASS,
        Some("java.lang.Object"),
        &["java.io.Serializable"],
        None,
    );
    number.methods = vec![
        ctor("()V"),
        method("intValue", "()I", None, ABSTRACT),
        method("longValue", "()J", None, ABSTRACT),
        method("doubleValue", "()D", None, ABSTRACT),
    ];
    out.push(number);

    let mut integer = boxed(
        "java.lang.Integer",
        "I",
        "java.lang.Number",
        &["java.lang.Comparable"],
        "Ljava/lang/Number;Ljava/lang/Comparable<Ljava/lang/Integer;>;",
    );
    integer.fields.push(field("MAX_VALUE", "I", CONSTANT));
    integer.fields.push(field("MIN_VALUE", "I", CONSTANT));
    out.push(integer);
    out.push(boxed(
        "java.lang.Long",
        "J",
        "java.lang.Number",
        &["java.lang.Comparable"],
        "Ljava/lang/Number;Ljava/lang/Comparable<Ljava/lang/Long;>;",
    ));
    out.push(boxed(
        "java.lang.Double",
        "D",
        "java.lang.Number",
        &["java.lang.Comparable"],
        "Ljava/lang/Number;Ljava/lang/Comparable<Ljava/lang/Double;>;",
    ));
    out.push(boxed(
        "java.lang.Boolean",
        "Z",
        "java.lang.Object",
        &["java.io.Serializable", "java.lang.Comparable"],
        "Ljava/lang/Object;Ljava/io/Serializable;Ljava/lang/Comparable<Ljava/lang/Boolean;>;",
    ));

    let mut iterator = stub(
        "java.util.Iterator",
        INTERFACE,
        None,
        &[],
        Some("<E:Ljava/lang/Object;>Ljava/lang/Object;"),
    );
    iterator.methods = vec![
        method("hasNext", "()Z", None, ABSTRACT),
        method("next", "()Ljava/lang/Object;", Some("()TE;"), ABSTRACT),
    ];
    out.push(iterator);

    let mut iterable = stub(
        "java.lang.Iterable",
        INTERFACE,
        None,
        &[],
        Some("<T:Ljava/lang/Object;>Ljava/lang/Object;"),
    );
    iterable.methods = vec![method(
        "iterator",
        "()Ljava/util/Iterator;",
        Some("()Ljava/util/Iterator<TT;>;"),
        ABSTRACT,
    )];
    out.push(iterable);

    let mut collection = stub(
        "java.util.Collection",
        INTERFACE,
        None,
        &["java.lang.Iterable"],
        Some("<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/lang/Iterable<TE;>;"),
    );
    collection.methods = vec![
        method("size", "()I", None, ABSTRACT),
        method("isEmpty", "()Z", None, ABSTRACT),
        method("add", "(Ljava/lang/Object;)Z", Some("(TE;)Z"), ABSTRACT),
    ];
    out.push(collection);

    let mut list = stub(
        "java.util.List",
        INTERFACE,
        None,
        &["java.util.Collection"],
        Some("<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Collection<TE;>;"),
    );
    list.methods = vec![
        method("get", "(I)Ljava/lang/Object;", Some("(I)TE;"), ABSTRACT),
        method(
            "set",
            "(ILjava/lang/Object;)Ljava/lang/Object;",
            Some("(ITE;)TE;"),
            ABSTRACT,
        ),
    ];
    out.push(list);

    out.push(stub(
        "java.util.Set",
        INTERFACE,
        None,
        &["java.util.Collection"],
        Some("<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Collection<TE;>;"),
    ));

    let mut array_list = stub(
        "java.util.ArrayList",
        CLASS,
        Some("java.lang.Object"),
        &["java.util.List", "java.lang.Cloneable", "java.io.Serializable"],
        Some("<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/List<TE;>;Ljava/lang/Cloneable;Ljava/io/Serializable;"),
    );
    array_list.methods = vec![
        ctor("()V"),
        method("size", "()I", None, PUBLIC),
        method("isEmpty", "()Z", None, PUBLIC),
        method("get", "(I)Ljava/lang/Object;", Some("(I)TE;"), PUBLIC),
        method("add", "(Ljava/lang/Object;)Z", Some("(TE;)Z"), PUBLIC),
    ];
    out.push(array_list);

    let mut hash_set = stub(
        "java.util.HashSet",
        CLASS,
        Some("java.lang.Object"),
        &["java.util.Set", "java.lang.Cloneable", "java.io.Serializable"],
        Some("<E:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Set<TE;>;Ljava/lang/Cloneable;Ljava/io/Serializable;"),
    );
    hash_set.methods = vec![ctor("()V")];
    out.push(hash_set);

    let mut map = stub(
        "java.util.Map",
        INTERFACE,
        None,
        &[],
        Some("<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;"),
    );
    map.methods = vec![
        method("size", "()I", None, ABSTRACT),
        method("isEmpty", "()Z", None, ABSTRACT),
        method(
            "get",
            "(Ljava/lang/Object;)Ljava/lang/Object;",
            Some("(Ljava/lang/Object;)TV;"),
            ABSTRACT,
        ),
        method(
            "put",
            "(Ljava/lang/Object;Ljava/lang/Object;)Ljava/lang/Object;",
            Some("(TK;TV;)TV;"),
            ABSTRACT,
        ),
    ];
    out.push(map);

    let mut hash_map = stub(
        "java.util.HashMap",
        CLASS,
        Some("java.lang.Object"),
        &["java.util.Map", "java.lang.Cloneable", "java.io.Serializable"],
        Some("<K:Ljava/lang/Object;V:Ljava/lang/Object;>Ljava/lang/Object;Ljava/util/Map<TK;TV;>;Ljava/lang/Cloneable;Ljava/io/Serializable;"),
    );
    hash_map.methods = vec![ctor("()V")];
    out.push(hash_map);

    out
}
