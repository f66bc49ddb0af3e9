use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::descriptor::{parse_field_descriptor, parse_method_descriptor, FieldType, ReturnType};
use crate::error::{Result, TypeError};
use crate::model::ACC_INTERFACE;
use crate::signature::{
    parse_class_signature, parse_field_signature, parse_method_signature, ClassTypeSignature,
    TypeArgument, TypeParameter, TypeSignature,
};
use crate::{
    ClassDef, ClassId, ClassKind, ClassStore, ConstructorDef, ConstructorId, FieldDef,
    GenericOwner, MethodDef, MethodId, ParameterizedType, Type, TypeParamDef, TypeVarId,
    WildcardType,
};

/// Classfile-level description of a class: names, flags, descriptors and optional generic
/// signatures, exactly as `javap -v` would show them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStub {
    /// Binary name, e.g. `com.example.User` or `com.example.Outer$Inner`.
    pub binary_name: String,
    #[serde(default)]
    pub access_flags: u16,
    #[serde(default)]
    pub super_binary_name: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldStub>,
    #[serde(default)]
    pub methods: Vec<MethodStub>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStub {
    pub name: String,
    pub descriptor: String,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub access_flags: u16,
}

/// A method, constructor (`<init>`) or static initializer (`<clinit>`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodStub {
    pub name: String,
    pub descriptor: String,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub access_flags: u16,
}

type TypeVarScope = HashMap<String, TypeVarId>;

impl ClassStore {
    /// Convert `stub` into a [`ClassDef`] and define it, replacing any earlier definition of the
    /// same name. Referenced classes that are not defined yet are interned as placeholders.
    ///
    /// Generic signatures take precedence over descriptors when present.
    pub fn load_stub(&mut self, stub: &ClassStub) -> Result<ClassId> {
        let id = self.intern_class_id(&stub.binary_name);
        let kind = if stub.access_flags & ACC_INTERFACE != 0 {
            ClassKind::Interface
        } else {
            ClassKind::Class
        };

        let no_vars = TypeVarScope::new();
        let mut class_vars = TypeVarScope::new();

        let (type_params, super_class, interfaces) = match stub.signature.as_deref() {
            Some(sig) => {
                let sig = parse_class_signature(sig)?;
                let type_params = self.declare_type_params(
                    &sig.type_parameters,
                    GenericOwner::Class(id),
                    &no_vars,
                    &mut class_vars,
                )?;
                // Interfaces record `Object` as their superclass in signatures; the class model
                // does not.
                let super_class = match kind {
                    ClassKind::Interface => None,
                    _ => Some(self.class_type_signature(&sig.super_class, &no_vars, &class_vars)?),
                };
                let interfaces = sig
                    .interfaces
                    .iter()
                    .map(|iface| self.class_type_signature(iface, &no_vars, &class_vars))
                    .collect::<Result<Vec<_>>>()?;
                (type_params, super_class, interfaces)
            }
            None => {
                let super_class = match kind {
                    ClassKind::Interface => None,
                    _ => stub
                        .super_binary_name
                        .as_deref()
                        .map(|name| Type::Class(self.intern_class_id(name))),
                };
                let interfaces = stub
                    .interfaces
                    .iter()
                    .map(|name| Type::Class(self.intern_class_id(name)))
                    .collect();
                (Vec::new(), super_class, interfaces)
            }
        };

        let fields = stub
            .fields
            .iter()
            .map(|field| {
                let ty = match field.signature.as_deref() {
                    Some(sig) => {
                        let sig = parse_field_signature(sig)?;
                        self.type_signature(&sig, &no_vars, &class_vars)?
                    }
                    None => {
                        let desc = parse_field_descriptor(&field.descriptor)?;
                        self.field_type(&desc)
                    }
                };
                Ok(FieldDef {
                    name: field.name.clone(),
                    access_flags: field.access_flags,
                    ty,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut methods = Vec::new();
        let mut constructors = Vec::new();
        for method in &stub.methods {
            match method.name.as_str() {
                "<clinit>" => continue,
                "<init>" => {
                    let owner = GenericOwner::Constructor(ConstructorId {
                        owner: id,
                        index: member_index(constructors.len(), &stub.binary_name)?,
                    });
                    let (_, params, _) = self.method_types(method, owner, &class_vars)?;
                    constructors.push(ConstructorDef {
                        access_flags: method.access_flags,
                        params,
                    });
                }
                _ => {
                    let owner = GenericOwner::Method(MethodId {
                        owner: id,
                        index: member_index(methods.len(), &stub.binary_name)?,
                    });
                    let (type_params, params, return_type) =
                        self.method_types(method, owner, &class_vars)?;
                    methods.push(MethodDef {
                        name: method.name.clone(),
                        access_flags: method.access_flags,
                        type_params,
                        params,
                        return_type,
                    });
                }
            }
        }

        self.define_class(
            id,
            ClassDef {
                name: stub.binary_name.clone(),
                kind,
                access_flags: stub.access_flags,
                type_params,
                super_class,
                interfaces,
                fields,
                constructors,
                methods,
            },
        );
        Ok(id)
    }

    /// Load several stubs in order, returning their ids.
    pub fn load_stubs<'a>(
        &mut self,
        stubs: impl IntoIterator<Item = &'a ClassStub>,
    ) -> Result<Vec<ClassId>> {
        stubs.into_iter().map(|stub| self.load_stub(stub)).collect()
    }

    fn method_types(
        &mut self,
        method: &MethodStub,
        owner: GenericOwner,
        class_vars: &TypeVarScope,
    ) -> Result<(Vec<TypeVarId>, Vec<Type>, Type)> {
        if let Some(sig) = method.signature.as_deref() {
            let sig = parse_method_signature(sig)?;
            let mut method_vars = TypeVarScope::new();
            let type_params =
                self.declare_type_params(&sig.type_parameters, owner, class_vars, &mut method_vars)?;
            let params = sig
                .parameters
                .iter()
                .map(|p| self.type_signature(p, class_vars, &method_vars))
                .collect::<Result<Vec<_>>>()?;
            let return_type = match &sig.return_type {
                Some(rt) => self.type_signature(rt, class_vars, &method_vars)?,
                None => Type::Class(self.well_known_void()),
            };
            return Ok((type_params, params, return_type));
        }

        let desc = parse_method_descriptor(&method.descriptor)?;
        let params = desc.params.iter().map(|p| self.field_type(p)).collect();
        let return_type = match &desc.return_type {
            ReturnType::Void => Type::Class(self.well_known_void()),
            ReturnType::Type(ty) => self.field_type(ty),
        };
        Ok((Vec::new(), params, return_type))
    }

    /// Two-pass allocation so self-referential bounds (`T extends Comparable<T>`) resolve.
    fn declare_type_params(
        &mut self,
        params: &[TypeParameter],
        owner: GenericOwner,
        outer: &TypeVarScope,
        scope: &mut TypeVarScope,
    ) -> Result<Vec<TypeVarId>> {
        let object = Type::Class(self.well_known_object());
        let mut ids = Vec::with_capacity(params.len());
        for tp in params {
            let id = self.add_type_param(tp.name.clone(), vec![object.clone()], owner);
            scope.insert(tp.name.clone(), id);
            ids.push(id);
        }

        for (tp, id) in params.iter().zip(ids.iter().copied()) {
            let mut upper_bounds = Vec::with_capacity(1 + tp.interface_bounds.len());
            if let Some(bound) = &tp.class_bound {
                upper_bounds.push(self.type_signature(bound, outer, scope)?);
            }
            for bound in &tp.interface_bounds {
                upper_bounds.push(self.type_signature(bound, outer, scope)?);
            }
            if upper_bounds.is_empty() {
                upper_bounds.push(object.clone());
            }
            self.define_type_param(
                id,
                TypeParamDef {
                    name: tp.name.clone(),
                    upper_bounds,
                    owner,
                },
            );
        }

        Ok(ids)
    }

    fn type_signature(
        &mut self,
        sig: &TypeSignature,
        outer: &TypeVarScope,
        scope: &TypeVarScope,
    ) -> Result<Type> {
        match sig {
            TypeSignature::Base(base) => Ok(Type::Class(self.well_known_primitive(*base))),
            TypeSignature::Array(component) => {
                Ok(Type::array(self.type_signature(component, outer, scope)?))
            }
            TypeSignature::Class(cls) => self.class_type_signature(cls, outer, scope),
            TypeSignature::TypeVariable(name) => scope
                .get(name)
                .or_else(|| outer.get(name))
                .copied()
                .map(Type::TypeVar)
                .ok_or_else(|| TypeError::InvalidSignature(format!("unbound type variable {name}"))),
        }
    }

    fn class_type_signature(
        &mut self,
        sig: &ClassTypeSignature,
        outer: &TypeVarScope,
        scope: &TypeVarScope,
    ) -> Result<Type> {
        // Each segment names a class nested in the previous one; arguments may appear on any
        // segment (`Outer<T>.Inner<U>`).
        let mut internal = String::new();
        let mut current: Option<Type> = None;
        for seg in &sig.segments {
            if !internal.is_empty() {
                internal.push('$');
            }
            internal.push_str(&seg.name);
            let id = self.intern_class_id(&internal.replace('/', "."));

            let args = seg
                .type_arguments
                .iter()
                .map(|arg| self.type_argument(arg, outer, scope))
                .collect::<Result<Vec<_>>>()?;

            let owner = current.take().filter(|ty| matches!(ty, Type::Parameterized(_)));
            current = Some(if args.is_empty() && owner.is_none() {
                Type::Class(id)
            } else {
                Type::Parameterized(ParameterizedType {
                    raw: id,
                    owner: owner.map(Box::new),
                    args,
                })
            });
        }
        current.ok_or_else(|| TypeError::InvalidSignature(sig.internal_name()))
    }

    fn type_argument(
        &mut self,
        arg: &TypeArgument,
        outer: &TypeVarScope,
        scope: &TypeVarScope,
    ) -> Result<Type> {
        Ok(match arg {
            TypeArgument::Any => Type::Wildcard(WildcardType {
                upper_bounds: vec![Type::Class(self.well_known_object())],
                lower_bounds: Vec::new(),
            }),
            TypeArgument::Exact(ty) => self.type_signature(ty, outer, scope)?,
            TypeArgument::Extends(ty) => Type::Wildcard(WildcardType {
                upper_bounds: vec![self.type_signature(ty, outer, scope)?],
                lower_bounds: Vec::new(),
            }),
            TypeArgument::Super(ty) => Type::Wildcard(WildcardType {
                upper_bounds: vec![Type::Class(self.well_known_object())],
                lower_bounds: vec![self.type_signature(ty, outer, scope)?],
            }),
        })
    }

    fn field_type(&mut self, ty: &FieldType) -> Type {
        match ty {
            FieldType::Base(base) => Type::Class(self.well_known_primitive(*base)),
            FieldType::Array(component) => Type::array(self.field_type(component)),
            FieldType::Object(internal) => Type::Class(self.intern_class_id(&internal.replace('/', "."))),
        }
    }

    fn well_known_object(&self) -> ClassId {
        crate::ClassEnv::well_known(self).object
    }

    fn well_known_void(&self) -> ClassId {
        crate::ClassEnv::well_known(self).void
    }

    fn well_known_primitive(&self, base: crate::BaseType) -> ClassId {
        crate::ClassEnv::well_known(self).primitive(base)
    }
}

/// Member ids are `u32`; the next index into a member list of length `len`.
fn member_index(len: usize, class: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| TypeError::TooManyMembers(class.to_string()))
}
