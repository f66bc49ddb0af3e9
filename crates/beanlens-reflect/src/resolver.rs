//! Generic type resolution of member types against a concrete class.
//!
//! A member declared on `Base<T>` and seen through `class Sub extends Base<String>` has `T`
//! bound to `String`. The resolver walks from the concrete source type up to the member's
//! declaring class, carrying type arguments along the way.

use std::collections::HashMap;

use beanlens_types::{
    erasure, format_type, is_subclass, ClassDef, ClassEnv, ClassId, ClassRef, FieldId, GenericOwner,
    MethodId, ParameterizedType, Type, TypeParamDef, TypeVarId, WildcardType,
};

use crate::error::{ReflectionError, Result};

/// Resolved return type of `method` as seen from `src`.
pub fn resolve_return_type(env: &dyn ClassEnv, method: MethodId, src: &Type) -> Result<Type> {
    let def = env.method(method).ok_or_else(|| missing_member(env, method.owner, "method"))?;
    resolve_type(env, &def.return_type, src, method.owner)
}

/// Resolved parameter types of `method` as seen from `src`.
pub fn resolve_param_types(
    env: &dyn ClassEnv,
    method: MethodId,
    src: &Type,
) -> Result<Vec<Type>> {
    let def = env.method(method).ok_or_else(|| missing_member(env, method.owner, "method"))?;
    def.params
        .iter()
        .map(|param| resolve_type(env, param, src, method.owner))
        .collect()
}

/// Resolved type of `field` as seen from `src`.
pub fn resolve_field_type(env: &dyn ClassEnv, field: FieldId, src: &Type) -> Result<Type> {
    let def = env.field(field).ok_or_else(|| missing_member(env, field.owner, "field"))?;
    resolve_type(env, &def.ty, src, field.owner)
}

/// Collapse a type expression to a runtime class.
///
/// Type variables and wildcards collapse to their first upper bound; anything the environment
/// cannot answer collapses to `java.lang.Object`.
pub fn type_to_class(env: &dyn ClassEnv, ty: &Type) -> ClassRef {
    erasure(env, ty).unwrap_or_else(|_| ClassRef::Class(env.well_known().object))
}

fn resolve_type(env: &dyn ClassEnv, ty: &Type, src: &Type, declaring: ClassId) -> Result<Type> {
    match ty {
        Type::Class(_) => Ok(ty.clone()),
        Type::TypeVar(var) => resolve_type_var(env, *var, src, declaring),
        Type::Parameterized(p) => {
            let owner = match &p.owner {
                Some(owner) => Some(Box::new(resolve_type(env, owner, src, declaring)?)),
                None => None,
            };
            let args = p
                .args
                .iter()
                .map(|arg| resolve_type(env, arg, src, declaring))
                .collect::<Result<Vec<_>>>()?;
            Ok(Type::Parameterized(ParameterizedType {
                raw: p.raw,
                owner,
                args,
            }))
        }
        Type::Array(component) => Ok(Type::array(resolve_type(env, component, src, declaring)?)),
        Type::Wildcard(w) => {
            let resolve_all = |bounds: &[Type]| {
                bounds
                    .iter()
                    .map(|bound| resolve_type(env, bound, src, declaring))
                    .collect::<Result<Vec<_>>>()
            };
            Ok(Type::Wildcard(WildcardType {
                upper_bounds: resolve_all(&w.upper_bounds)?,
                lower_bounds: resolve_all(&w.lower_bounds)?,
            }))
        }
    }
}

fn resolve_type_var(
    env: &dyn ClassEnv,
    var: TypeVarId,
    src: &Type,
    declaring: ClassId,
) -> Result<Type> {
    let def = env
        .type_param(var)
        .ok_or_else(|| {
            ReflectionError::UnresolvableGenerics(format!("dangling type variable {var:?}"))
        })?;

    // Method and constructor type parameters have no binding on any class.
    if !matches!(def.owner, GenericOwner::Class(_)) {
        return Ok(first_bound(env, def));
    }

    let clazz = match src {
        Type::Class(id) => *id,
        Type::Parameterized(p) => p.raw,
        other => {
            return Err(ReflectionError::UnresolvableGenerics(format!(
                "cannot scan {} for type variable {}",
                format_type(env, other),
                def.name
            )))
        }
    };
    if clazz == declaring {
        return Ok(first_bound(env, def));
    }

    let clazz_def = class_def(env, clazz)?;
    for supertype in clazz_def.direct_supertypes() {
        if let Some(found) = scan_super_type(env, var, src, declaring, clazz_def, supertype)? {
            return Ok(found);
        }
    }
    Ok(Type::Class(env.well_known().object))
}

fn scan_super_type(
    env: &dyn ClassEnv,
    var: TypeVarId,
    src: &Type,
    declaring: ClassId,
    clazz_def: &ClassDef,
    supertype: &Type,
) -> Result<Option<Type>> {
    match supertype {
        Type::Parameterized(parent) => {
            let parent = match src {
                Type::Parameterized(src) => translate_parent_type_vars(src, clazz_def, parent)?,
                _ => parent.clone(),
            };
            if parent.raw == declaring {
                let parent_def = class_def(env, parent.raw)?;
                if let Some(pos) = parent_def.type_params.iter().position(|p| *p == var) {
                    check_arity(parent_def, parent.args.len())?;
                    return Ok(Some(parent.args[pos].clone()));
                }
            }
            if is_subclass(env, parent.raw, declaring) {
                return resolve_type_var(env, var, &Type::Parameterized(parent), declaring).map(Some);
            }
            Ok(None)
        }
        Type::Class(raw) if is_subclass(env, *raw, declaring) => {
            resolve_type_var(env, var, supertype, declaring).map(Some)
        }
        _ => Ok(None),
    }
}

/// Rewrite `parent`'s type arguments in terms of `src`'s arguments, where `src` is a
/// parameterization of the class whose supertype `parent` is.
fn translate_parent_type_vars(
    src: &ParameterizedType,
    clazz_def: &ClassDef,
    parent: &ParameterizedType,
) -> Result<ParameterizedType> {
    check_arity(clazz_def, src.args.len())?;
    let bindings: HashMap<TypeVarId, &Type> = clazz_def
        .type_params
        .iter()
        .copied()
        .zip(src.args.iter())
        .collect();
    Ok(ParameterizedType {
        raw: parent.raw,
        owner: parent
            .owner
            .as_ref()
            .map(|owner| Box::new(substitute(owner, &bindings))),
        args: parent
            .args
            .iter()
            .map(|arg| substitute(arg, &bindings))
            .collect(),
    })
}

fn substitute(ty: &Type, bindings: &HashMap<TypeVarId, &Type>) -> Type {
    match ty {
        Type::TypeVar(var) => bindings
            .get(var)
            .map(|bound| (*bound).clone())
            .unwrap_or_else(|| ty.clone()),
        Type::Class(_) => ty.clone(),
        Type::Parameterized(p) => Type::Parameterized(ParameterizedType {
            raw: p.raw,
            owner: p
                .owner
                .as_ref()
                .map(|owner| Box::new(substitute(owner, bindings))),
            args: p.args.iter().map(|arg| substitute(arg, bindings)).collect(),
        }),
        Type::Array(component) => Type::array(substitute(component, bindings)),
        Type::Wildcard(w) => Type::Wildcard(WildcardType {
            upper_bounds: w.upper_bounds.iter().map(|b| substitute(b, bindings)).collect(),
            lower_bounds: w.lower_bounds.iter().map(|b| substitute(b, bindings)).collect(),
        }),
    }
}

fn first_bound(env: &dyn ClassEnv, def: &TypeParamDef) -> Type {
    def.upper_bounds
        .first()
        .cloned()
        .unwrap_or(Type::Class(env.well_known().object))
}

fn check_arity(def: &ClassDef, args: usize) -> Result<()> {
    if def.type_params.len() == args {
        return Ok(());
    }
    Err(ReflectionError::UnresolvableGenerics(format!(
        "{} declares {} type parameter(s) but was given {args} argument(s)",
        def.name,
        def.type_params.len()
    )))
}

fn class_def(env: &dyn ClassEnv, id: ClassId) -> Result<&ClassDef> {
    env.class(id).ok_or_else(|| {
        ReflectionError::UnresolvableGenerics(format!(
            "class {} is not defined",
            env.class_name(id).unwrap_or("<unknown>")
        ))
    })
}

fn missing_member(env: &dyn ClassEnv, owner: ClassId, kind: &str) -> ReflectionError {
    ReflectionError::UnresolvableGenerics(format!(
        "{kind} handle into {} does not resolve",
        env.class_name(owner).unwrap_or("<unknown>")
    ))
}
