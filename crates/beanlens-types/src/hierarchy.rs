use std::collections::{HashSet, VecDeque};

use crate::error::{Result, TypeError};
use crate::{ClassEnv, ClassId, ClassRef, Type, TypeVarId};

/// Erase a type expression to its runtime class (JLS 4.6).
///
/// Type variables erase to the erasure of their leftmost bound, wildcards to their first upper
/// bound. Fails only when a type variable id is not known to `env`.
pub fn erasure(env: &dyn ClassEnv, ty: &Type) -> Result<ClassRef> {
    fn inner(env: &dyn ClassEnv, ty: &Type, seen: &mut HashSet<TypeVarId>) -> Result<ClassRef> {
        match ty {
            Type::Class(id) => Ok(ClassRef::Class(*id)),
            Type::Parameterized(p) => Ok(ClassRef::Class(p.raw)),
            Type::Array(component) => Ok(ClassRef::array_of(inner(env, component, seen)?)),
            Type::TypeVar(id) => {
                let def = env.type_param(*id).ok_or(TypeError::UnknownTypeParam(*id))?;
                if !seen.insert(*id) {
                    return Ok(ClassRef::Class(env.well_known().object));
                }
                let out = match def.upper_bounds.first() {
                    Some(bound) => inner(env, bound, seen),
                    None => Ok(ClassRef::Class(env.well_known().object)),
                };
                seen.remove(id);
                out
            }
            Type::Wildcard(w) => match w.upper_bounds.first() {
                Some(bound) => inner(env, bound, seen),
                None => Ok(ClassRef::Class(env.well_known().object)),
            },
        }
    }

    inner(env, ty, &mut HashSet::new())
}

/// Returns `true` if `sub` is `sup` or inherits from it through any chain of superclasses and
/// superinterfaces. Every non-primitive class is a subclass of `java.lang.Object`.
///
/// Missing class definitions are treated as dead ends rather than errors.
pub fn is_subclass(env: &dyn ClassEnv, sub: ClassId, sup: ClassId) -> bool {
    if sub == sup {
        return true;
    }

    let Some(sub_def) = env.class(sub) else {
        return false;
    };
    if sub_def.is_primitive() {
        return false;
    }
    if sup == env.well_known().object {
        return true;
    }

    let mut queue: VecDeque<ClassId> = VecDeque::new();
    let mut seen: HashSet<ClassId> = HashSet::new();
    queue.push_back(sub);

    while let Some(current) = queue.pop_front() {
        if !seen.insert(current) {
            continue;
        }
        if current == sup {
            return true;
        }
        let Some(def) = env.class(current) else {
            continue;
        };
        for supertype in def.direct_supertypes() {
            if let Some(id) = supertype.raw_class() {
                queue.push_back(id);
            }
        }
    }

    false
}

/// JVM `to.isAssignableFrom(from)`: can a value of runtime class `from` be stored in a slot of
/// runtime class `to`?
pub fn is_assignable(env: &dyn ClassEnv, from: &ClassRef, to: &ClassRef) -> bool {
    if from == to {
        return true;
    }

    let wk = env.well_known();
    match (from, to) {
        (ClassRef::Class(from), ClassRef::Class(to)) => is_subclass(env, *from, *to),
        (ClassRef::Array(_), ClassRef::Class(to)) => {
            *to == wk.object || *to == wk.cloneable || *to == wk.serializable
        }
        (ClassRef::Array(from), ClassRef::Array(to)) => {
            // Primitive arrays are only assignable to themselves, which `from == to` covered.
            if is_primitive(env, from) || is_primitive(env, to) {
                return false;
            }
            is_assignable(env, from, to)
        }
        (ClassRef::Class(_), ClassRef::Array(_)) => false,
    }
}

fn is_primitive(env: &dyn ClassEnv, class: &ClassRef) -> bool {
    match class {
        ClassRef::Class(id) => env.class(*id).is_some_and(|def| def.is_primitive()),
        ClassRef::Array(_) => false,
    }
}
