use std::collections::{HashMap, HashSet};

use beanlens_types::{
    erasure, is_assignable, ClassDef, ClassEnv, ClassId, ClassRef, ConstructorId, FieldId,
    MethodDef, MethodId, Type, TypeError, ACC_PUBLIC,
};
use indexmap::IndexMap;

use crate::accessor::Accessor;
use crate::error::{ReflectionError, Result};
use crate::namer;
use crate::resolver::{resolve_field_type, resolve_param_types, resolve_return_type, type_to_class};

/// Cached property metadata of one class: which accessor reads and writes each property, and
/// the type each direction resolves to.
///
/// Built once by [`Reflector::new`] and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reflector {
    class: ClassRef,
    class_name: String,
    default_constructor: Option<ConstructorId>,
    readers: IndexMap<String, Binding>,
    writers: IndexMap<String, Binding>,
    readable: Vec<String>,
    writable: Vec<String>,
    case_insensitive: HashMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Binding {
    accessor: Accessor,
    class: ClassRef,
    generic: Type,
}

/// A member type resolved against the introspected class, and the class it collapses to.
#[derive(Clone, Debug)]
struct Resolved {
    generic: Type,
    class: ClassRef,
}

/// An accessor method competing for a property. Conflicts are decided on the erased declared
/// type so a covariant override of a generic member beats the member it overrides.
#[derive(Clone, Debug)]
struct Candidate {
    method: MethodId,
    declared: ClassRef,
    resolved: Resolved,
}

/// Structural method identity used to drop overridden methods seen again higher up.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MethodKey {
    return_type: ClassRef,
    name: String,
    params: Vec<ClassRef>,
}

impl Reflector {
    pub fn new(env: &dyn ClassEnv, class: ClassRef) -> Result<Reflector> {
        let mut builder = Builder {
            env,
            src: class.to_type(),
            readers: IndexMap::new(),
            writers: IndexMap::new(),
        };

        let mut default_constructor = None;
        if let Some(id) = class.class_id() {
            let def = builder.class_def(id)?;
            default_constructor = (0u32..)
                .zip(def.constructors.iter())
                .find(|(_, ctor)| ctor.params.is_empty())
                .map(|(index, _)| ConstructorId { owner: id, index });

            let methods = builder.collect_methods(id)?;
            builder.add_get_methods(&methods)?;
            builder.add_set_methods(&methods)?;
            builder.add_fields(id)?;
        }

        let readable: Vec<String> = builder.readers.keys().cloned().collect();
        let writable: Vec<String> = builder.writers.keys().cloned().collect();
        let mut case_insensitive = HashMap::new();
        for name in readable.iter().chain(writable.iter()) {
            case_insensitive.insert(name.to_uppercase(), name.clone());
        }

        let class_name = class.binary_name(env);
        tracing::debug!(
            target: "beanlens.reflect",
            class = %class_name,
            readable = readable.len(),
            writable = writable.len(),
            default_constructor = default_constructor.is_some(),
            "built reflector"
        );

        Ok(Reflector {
            class,
            class_name,
            default_constructor,
            readers: builder.readers,
            writers: builder.writers,
            readable,
            writable,
            case_insensitive,
        })
    }

    pub fn get_type(&self) -> &ClassRef {
        &self.class
    }

    pub fn has_default_constructor(&self) -> bool {
        self.default_constructor.is_some()
    }

    pub fn default_constructor(&self) -> Result<ConstructorId> {
        self.default_constructor
            .ok_or_else(|| ReflectionError::NoDefaultConstructor(self.class_name.clone()))
    }

    pub fn get_reader(&self, property: &str) -> Result<Accessor> {
        self.reader(property).map(|b| b.accessor)
    }

    pub fn get_writer(&self, property: &str) -> Result<Accessor> {
        self.writer(property).map(|b| b.accessor)
    }

    pub fn reader_type(&self, property: &str) -> Result<&ClassRef> {
        self.reader(property).map(|b| &b.class)
    }

    pub fn writer_type(&self, property: &str) -> Result<&ClassRef> {
        self.writer(property).map(|b| &b.class)
    }

    /// The reader's resolved type before collapsing to a class (`List<String>` rather than
    /// `List`).
    pub fn reader_generic_type(&self, property: &str) -> Result<&Type> {
        self.reader(property).map(|b| &b.generic)
    }

    pub fn writer_generic_type(&self, property: &str) -> Result<&Type> {
        self.writer(property).map(|b| &b.generic)
    }

    /// Readable property names in discovery order.
    pub fn readable_property_names(&self) -> &[String] {
        &self.readable
    }

    /// Writable property names in discovery order.
    pub fn writable_property_names(&self) -> &[String] {
        &self.writable
    }

    pub fn has_reader(&self, property: &str) -> bool {
        self.readers.contains_key(property)
    }

    pub fn has_writer(&self, property: &str) -> bool {
        self.writers.contains_key(property)
    }

    /// Property name matching `name` ignoring case, in its declared casing.
    ///
    /// When two properties differ only in case, the writable spelling wins.
    pub fn find_property_by_case_insensitive_name(&self, name: &str) -> Option<&str> {
        self.case_insensitive
            .get(&name.to_uppercase())
            .map(String::as_str)
    }

    /// Whether callers may bypass access checks on the members this reflector hands out.
    pub fn can_control_member_accessible(env: &dyn ClassEnv) -> bool {
        env.can_suppress_access_checks()
    }

    fn reader(&self, property: &str) -> Result<&Binding> {
        self.readers
            .get(property)
            .ok_or_else(|| ReflectionError::NoSuchReader {
                property: property.to_string(),
                class: self.class_name.clone(),
            })
    }

    fn writer(&self, property: &str) -> Result<&Binding> {
        self.writers
            .get(property)
            .ok_or_else(|| ReflectionError::NoSuchWriter {
                property: property.to_string(),
                class: self.class_name.clone(),
            })
    }
}

struct Builder<'a> {
    env: &'a dyn ClassEnv,
    src: Type,
    readers: IndexMap<String, Binding>,
    writers: IndexMap<String, Binding>,
}

impl<'a> Builder<'a> {
    /// Methods declared on `root`, its superclasses below `java.lang.Object`, and every
    /// interface those classes implement, with overridden methods removed.
    fn collect_methods(&self, root: ClassId) -> Result<Vec<MethodId>> {
        let object = self.env.well_known().object;
        let mut unique: IndexMap<MethodKey, MethodId> = IndexMap::new();
        let mut visited = HashSet::new();
        let mut current = Some(root);

        while let Some(id) = current {
            if id == object || !visited.insert(id) {
                break;
            }
            let def = self.class_def(id)?;
            self.add_unique_methods(&mut unique, id, def, false)?;

            for iface in self.interface_closure(def)? {
                let iface_def = self.class_def(iface)?;
                self.add_unique_methods(&mut unique, iface, iface_def, true)?;
            }

            current = def.super_class.as_ref().and_then(Type::raw_class);
        }

        Ok(unique.into_values().collect())
    }

    /// Direct interfaces of `def` followed by their superinterfaces, each listed once.
    fn interface_closure(&self, def: &ClassDef) -> Result<Vec<ClassId>> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<ClassId> = def
            .interfaces
            .iter()
            .rev()
            .filter_map(Type::raw_class)
            .collect();

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            out.push(id);
            let iface = self.class_def(id)?;
            stack.extend(iface.interfaces.iter().rev().filter_map(Type::raw_class));
        }
        Ok(out)
    }

    fn add_unique_methods(
        &self,
        unique: &mut IndexMap<MethodKey, MethodId>,
        owner: ClassId,
        def: &ClassDef,
        public_only: bool,
    ) -> Result<()> {
        for (index, method) in (0u32..).zip(def.methods.iter()) {
            if method.is_bridge() {
                continue;
            }
            if public_only && method.access_flags & ACC_PUBLIC == 0 {
                continue;
            }
            let key = MethodKey {
                return_type: erasure(self.env, &method.return_type)?,
                name: method.name.clone(),
                params: method
                    .params
                    .iter()
                    .map(|param| erasure(self.env, param))
                    .collect::<std::result::Result<_, _>>()?,
            };
            unique.entry(key).or_insert(MethodId { owner, index });
        }
        Ok(())
    }

    fn add_get_methods(&mut self, methods: &[MethodId]) -> Result<()> {
        let mut conflicting: IndexMap<String, Vec<MethodId>> = IndexMap::new();
        for &id in methods {
            let def = self.method_def(id)?;
            if !def.params.is_empty() || !namer::is_getter(&def.name) {
                continue;
            }
            let property = namer::method_to_property(&def.name)?;
            conflicting.entry(property).or_default().push(id);
        }

        for (property, candidates) in conflicting {
            let count = candidates.len();
            let mut candidates = candidates.into_iter();
            let Some(first) = candidates.next() else {
                continue;
            };
            let mut winner = self.getter_candidate(first)?;
            for candidate in candidates {
                let candidate = self.getter_candidate(candidate)?;
                winner = self.pick_better_getter(&property, winner, candidate)?;
            }
            if count > 1 {
                let winner_name = self.method_def(winner.method)?.name.as_str();
                tracing::debug!(
                    target: "beanlens.reflect",
                    property = %property,
                    candidates = count,
                    winner = winner_name,
                    "resolved getter conflict"
                );
            }
            self.add_binding(
                Direction::Read,
                property,
                Accessor::MethodCall(winner.method),
                winner.resolved,
            );
        }
        Ok(())
    }

    fn pick_better_getter(
        &self,
        property: &str,
        winner: Candidate,
        candidate: Candidate,
    ) -> Result<Candidate> {
        let winner_class = &winner.declared;
        let candidate_class = &candidate.declared;

        if candidate_class == winner_class {
            if *candidate_class != ClassRef::Class(self.env.well_known().boolean) {
                return Err(self.ambiguous_getter(property, winner.method));
            }
            if self.method_def(candidate.method)?.name.starts_with("is") {
                return Ok(candidate);
            }
            return Ok(winner);
        }
        if is_assignable(self.env, winner_class, candidate_class) {
            // Covariant override already chosen.
            return Ok(winner);
        }
        if is_assignable(self.env, candidate_class, winner_class) {
            return Ok(candidate);
        }
        Err(self.ambiguous_getter(property, winner.method))
    }

    fn add_set_methods(&mut self, methods: &[MethodId]) -> Result<()> {
        let mut conflicting: IndexMap<String, Vec<MethodId>> = IndexMap::new();
        for &id in methods {
            let def = self.method_def(id)?;
            if def.params.len() != 1 || !namer::is_setter(&def.name) {
                continue;
            }
            let property = namer::method_to_property(&def.name)?;
            conflicting.entry(property).or_default().push(id);
        }

        for (property, setters) in conflicting {
            let getter_class = self.readers.get(&property).map(|b| b.class.clone());
            let mut matched: Option<Candidate> = None;
            let mut error: Option<ReflectionError> = None;

            for setter in setters.iter().copied() {
                let candidate = self.setter_candidate(setter)?;
                if getter_class.as_ref() == Some(&candidate.resolved.class) {
                    matched = Some(candidate);
                    break;
                }
                if error.is_none() {
                    match self.pick_better_setter(&property, matched.take(), candidate) {
                        Ok(better) => matched = Some(better),
                        // A later setter may still match the getter exactly.
                        Err(err) => error = Some(err),
                    }
                }
            }

            match (matched, error) {
                (Some(setter), _) => {
                    if setters.len() > 1 {
                        tracing::debug!(
                            target: "beanlens.reflect",
                            property = %property,
                            candidates = setters.len(),
                            "resolved setter conflict"
                        );
                    }
                    self.add_binding(
                        Direction::Write,
                        property,
                        Accessor::MethodCall(setter.method),
                        setter.resolved,
                    );
                }
                (None, Some(err)) => return Err(err),
                (None, None) => {}
            }
        }
        Ok(())
    }

    fn pick_better_setter(
        &self,
        property: &str,
        current: Option<Candidate>,
        candidate: Candidate,
    ) -> Result<Candidate> {
        let Some(current) = current else {
            return Ok(candidate);
        };
        if is_assignable(self.env, &candidate.declared, &current.declared) {
            return Ok(candidate);
        }
        if is_assignable(self.env, &current.declared, &candidate.declared) {
            return Ok(current);
        }
        Err(ReflectionError::AmbiguousProperty {
            property: property.to_string(),
            class: self.declaring_class_name(candidate.method.owner),
            detail: format!(
                "setters take unrelated types '{}' and '{}'",
                current.declared.binary_name(self.env),
                candidate.declared.binary_name(self.env)
            ),
        })
    }

    /// Fields back any property still missing a reader or writer, walking every superclass
    /// including `java.lang.Object`. Constants never become writers.
    fn add_fields(&mut self, root: ClassId) -> Result<()> {
        let env = self.env;
        let object = env.well_known().object;
        let mut visited = HashSet::new();
        let mut current = Some(root);

        while let Some(id) = current {
            if !visited.insert(id) {
                break;
            }
            let def = match env.class(id) {
                Some(def) => def,
                None if id == object => break,
                None => return Err(self.unknown_class(id)),
            };
            for (index, field) in (0u32..).zip(def.fields.iter()) {
                if !is_valid_property_name(&field.name) {
                    continue;
                }
                let field_id = FieldId { owner: id, index };
                let constant = field.is_static() && field.is_final();
                if !constant && !self.writers.contains_key(&field.name) {
                    let resolved = self.resolve_field(field_id)?;
                    self.add_binding(
                        Direction::Write,
                        field.name.clone(),
                        Accessor::FieldWrite(field_id),
                        resolved,
                    );
                }
                if !self.readers.contains_key(&field.name) {
                    let resolved = self.resolve_field(field_id)?;
                    self.add_binding(
                        Direction::Read,
                        field.name.clone(),
                        Accessor::FieldRead(field_id),
                        resolved,
                    );
                }
            }
            current = def.super_class.as_ref().and_then(Type::raw_class);
        }
        Ok(())
    }

    fn add_binding(
        &mut self,
        direction: Direction,
        property: String,
        accessor: Accessor,
        resolved: Resolved,
    ) {
        if !is_valid_property_name(&property) {
            return;
        }
        let binding = Binding {
            accessor,
            class: resolved.class,
            generic: resolved.generic,
        };
        match direction {
            Direction::Read => self.readers.insert(property, binding),
            Direction::Write => self.writers.insert(property, binding),
        };
    }

    fn getter_candidate(&self, method: MethodId) -> Result<Candidate> {
        let declared = erasure(self.env, &self.method_def(method)?.return_type)?;
        let generic = resolve_return_type(self.env, method, &self.src)?;
        Ok(Candidate {
            method,
            declared,
            resolved: self.resolved(generic),
        })
    }

    fn setter_candidate(&self, method: MethodId) -> Result<Candidate> {
        let def = self.method_def(method)?;
        let mut params = resolve_param_types(self.env, method, &self.src)?;
        if params.len() != 1 || def.params.len() != 1 {
            return Err(ReflectionError::UnresolvableGenerics(format!(
                "setter takes {} parameters",
                params.len()
            )));
        }
        Ok(Candidate {
            method,
            declared: erasure(self.env, &def.params[0])?,
            resolved: self.resolved(params.remove(0)),
        })
    }

    fn resolve_field(&self, field: FieldId) -> Result<Resolved> {
        let generic = resolve_field_type(self.env, field, &self.src)?;
        Ok(self.resolved(generic))
    }

    fn resolved(&self, generic: Type) -> Resolved {
        Resolved {
            class: type_to_class(self.env, &generic),
            generic,
        }
    }

    fn class_def(&self, id: ClassId) -> Result<&'a ClassDef> {
        self.env.class(id).ok_or_else(|| self.unknown_class(id))
    }

    fn method_def(&self, id: MethodId) -> Result<&'a MethodDef> {
        self.env.method(id).ok_or_else(|| {
            ReflectionError::Type(TypeError::UnknownMember {
                class: self.declaring_class_name(id.owner),
                member: format!("method #{}", id.index),
            })
        })
    }

    fn unknown_class(&self, id: ClassId) -> ReflectionError {
        ReflectionError::UnknownClass(self.declaring_class_name(id))
    }

    fn declaring_class_name(&self, id: ClassId) -> String {
        self.env.class_name(id).unwrap_or("<unknown>").to_string()
    }

    fn ambiguous_getter(&self, property: &str, winner: MethodId) -> ReflectionError {
        ReflectionError::AmbiguousProperty {
            property: property.to_string(),
            class: self.declaring_class_name(winner.owner),
            detail: "overloaded getters have ambiguous types, which breaks the JavaBeans \
                     specification"
                .to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Read,
    Write,
}

fn is_valid_property_name(name: &str) -> bool {
    !(name.starts_with('$') || name == "serialVersionUID" || name == "class")
}
