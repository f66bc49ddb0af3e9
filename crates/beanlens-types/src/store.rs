use std::collections::HashMap;

use crate::descriptor::BaseType;
use crate::model::{ACC_ABSTRACT, ACC_FINAL, ACC_PUBLIC};
use crate::{
    ClassDef, ClassId, ClassKind, ConstructorDef, ConstructorId, FieldDef, FieldId, GenericOwner,
    MethodDef, MethodId, Type, TypeParamDef, TypeVarId,
};

/// Read access to a class model: the host reflection facility that introspection runs against.
///
/// Implementations must be pure with respect to lookups; the reflection layer treats every
/// answer as stable for the lifetime of the environment.
pub trait ClassEnv {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;
    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef>;
    fn lookup_class(&self, name: &str) -> Option<ClassId>;
    fn well_known(&self) -> &WellKnownClasses;

    /// Binary name of `id`, available even for classes that were referenced but never defined.
    fn class_name(&self, id: ClassId) -> Option<&str> {
        self.class(id).map(|def| def.name.as_str())
    }

    fn method(&self, id: MethodId) -> Option<&MethodDef> {
        self.class(id.owner)?.methods.get(id.index as usize)
    }

    fn field(&self, id: FieldId) -> Option<&FieldDef> {
        self.class(id.owner)?.fields.get(id.index as usize)
    }

    fn constructor(&self, id: ConstructorId) -> Option<&ConstructorDef> {
        self.class(id.owner)?.constructors.get(id.index as usize)
    }

    /// Whether the process policy allows bypassing language-level access checks on reflected
    /// members. Environments without an access-control policy always allow it.
    fn can_suppress_access_checks(&self) -> bool {
        true
    }
}

/// Ids of the classes the reflection layer needs to name directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellKnownClasses {
    pub object: ClassId,
    pub class: ClassId,
    pub string: ClassId,
    pub cloneable: ClassId,
    pub serializable: ClassId,
    pub collection: ClassId,
    pub void: ClassId,
    pub boolean: ClassId,
    pub byte: ClassId,
    pub char: ClassId,
    pub short: ClassId,
    pub int: ClassId,
    pub long: ClassId,
    pub float: ClassId,
    pub double: ClassId,
}

impl WellKnownClasses {
    pub fn primitive(&self, base: BaseType) -> ClassId {
        match base {
            BaseType::Boolean => self.boolean,
            BaseType::Byte => self.byte,
            BaseType::Char => self.char,
            BaseType::Short => self.short,
            BaseType::Int => self.int,
            BaseType::Long => self.long,
            BaseType::Float => self.float,
            BaseType::Double => self.double,
        }
    }

    fn unset() -> Self {
        let zero = ClassId::from_raw(0);
        Self {
            object: zero,
            class: zero,
            string: zero,
            cloneable: zero,
            serializable: zero,
            collection: zero,
            void: zero,
            boolean: zero,
            byte: zero,
            char: zero,
            short: zero,
            int: zero,
            long: zero,
            float: zero,
            double: zero,
        }
    }
}

/// In-memory class model.
///
/// Classes are interned by binary name; a name may be interned (and referenced from other
/// definitions) before it is defined.
#[derive(Clone, Debug)]
pub struct ClassStore {
    names: Vec<String>,
    classes: Vec<Option<ClassDef>>,
    by_name: HashMap<String, ClassId>,
    type_params: Vec<TypeParamDef>,
    well_known: WellKnownClasses,
    access_checks_suppressible: bool,
}

impl Default for ClassStore {
    /// A store with the primitive classes defined and the other well-known names interned but
    /// not yet defined. Use [`ClassStore::with_minimal_jdk`] for usable `java.*` definitions.
    fn default() -> Self {
        let mut store = ClassStore {
            names: Vec::new(),
            classes: Vec::new(),
            by_name: HashMap::new(),
            type_params: Vec::new(),
            well_known: WellKnownClasses::unset(),
            access_checks_suppressible: true,
        };

        let well_known = WellKnownClasses {
            object: store.intern_class_id("java.lang.Object"),
            class: store.intern_class_id("java.lang.Class"),
            string: store.intern_class_id("java.lang.String"),
            cloneable: store.intern_class_id("java.lang.Cloneable"),
            serializable: store.intern_class_id("java.io.Serializable"),
            collection: store.intern_class_id("java.util.Collection"),
            void: store.define_primitive("void"),
            boolean: store.define_primitive(BaseType::Boolean.keyword()),
            byte: store.define_primitive(BaseType::Byte.keyword()),
            char: store.define_primitive(BaseType::Char.keyword()),
            short: store.define_primitive(BaseType::Short.keyword()),
            int: store.define_primitive(BaseType::Int.keyword()),
            long: store.define_primitive(BaseType::Long.keyword()),
            float: store.define_primitive(BaseType::Float.keyword()),
            double: store.define_primitive(BaseType::Double.keyword()),
        };
        store.well_known = well_known;
        store
    }
}

impl ClassStore {
    /// A store populated with the small slice of the JDK that bean classes commonly touch
    /// (`Object`, `String`, boxed primitives, the core collection interfaces and their usual
    /// implementations).
    pub fn with_minimal_jdk() -> Self {
        let mut store = Self::default();
        for stub in crate::jdk::minimal_jdk_stubs() {
            if let Err(err) = store.load_stub(&stub) {
                panic!("bundled JDK stub {} is invalid: {err}", stub.binary_name);
            }
        }
        store
    }

    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let raw: u32 = self
            .names
            .len()
            .try_into()
            .expect("too many classes interned");
        let id = ClassId::from_raw(raw);
        self.names.push(name.to_string());
        self.classes.push(None);
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Define (or redefine) an interned class.
    pub fn define_class(&mut self, id: ClassId, def: ClassDef) {
        let idx = id.to_raw() as usize;
        if idx >= self.classes.len() {
            panic!("define_class called with foreign ClassId {id:?}");
        }
        tracing::trace!(target: "beanlens.types", class = %def.name, "defining class");
        self.classes[idx] = Some(def);
    }

    /// Intern `def.name` and define it, replacing any previous definition.
    pub fn upsert_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);
        self.define_class(id, def);
        id
    }

    pub fn add_type_param(
        &mut self,
        name: impl Into<String>,
        upper_bounds: Vec<Type>,
        owner: GenericOwner,
    ) -> TypeVarId {
        let raw: u32 = self
            .type_params
            .len()
            .try_into()
            .expect("too many type parameters");
        self.type_params.push(TypeParamDef {
            name: name.into(),
            upper_bounds,
            owner,
        });
        TypeVarId::from_raw(raw)
    }

    pub fn define_type_param(&mut self, id: TypeVarId, def: TypeParamDef) {
        let idx = id.to_raw() as usize;
        if idx >= self.type_params.len() {
            panic!("define_type_param called with foreign TypeVarId {id:?}");
        }
        self.type_params[idx] = def;
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn is_defined(&self, id: ClassId) -> bool {
        self.classes
            .get(id.to_raw() as usize)
            .is_some_and(|def| def.is_some())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn type_param_count(&self) -> usize {
        self.type_params.len()
    }

    pub fn set_access_checks_suppressible(&mut self, allowed: bool) {
        self.access_checks_suppressible = allowed;
    }

    fn define_primitive(&mut self, name: &str) -> ClassId {
        let id = self.intern_class_id(name);
        self.define_class(
            id,
            ClassDef {
                kind: ClassKind::Primitive,
                access_flags: ACC_PUBLIC | ACC_FINAL | ACC_ABSTRACT,
                ..ClassDef::class(name, None)
            },
        );
        id
    }
}

impl ClassEnv for ClassStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.to_raw() as usize)?.as_ref()
    }

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef> {
        self.type_params.get(id.to_raw() as usize)
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.class_id(name)
    }

    fn well_known(&self) -> &WellKnownClasses {
        &self.well_known
    }

    fn class_name(&self, id: ClassId) -> Option<&str> {
        self.names.get(id.to_raw() as usize).map(String::as_str)
    }

    fn can_suppress_access_checks(&self) -> bool {
        self.access_checks_suppressible
    }
}
