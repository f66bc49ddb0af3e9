use std::fmt;

use crate::ClassEnv;

/// Dense id of a class (or interface, or primitive) interned in a [`crate::ClassStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

/// Dense id of a declared type parameter (`T` in `class Box<T>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVarId(u32);

impl TypeVarId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

/// A generic type expression as declared in source (or in a classfile signature).
///
/// This is the closed universe the host reflection facility hands out: raw classes,
/// parameterized types, arrays, type variables and wildcards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// A raw or non-generic class, including primitives and `void`.
    Class(ClassId),
    Parameterized(ParameterizedType),
    /// An array type. When the component is itself free of type variables and parameterized
    /// types this denotes a plain array class (`String[]`), otherwise a generic array (`T[]`).
    Array(Box<Type>),
    TypeVar(TypeVarId),
    Wildcard(WildcardType),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterizedType {
    pub raw: ClassId,
    /// Enclosing instance type for inner classes (`Outer<T>.Inner<U>`).
    pub owner: Option<Box<Type>>,
    pub args: Vec<Type>,
}

/// `?`, `? extends U` or `? super L`.
///
/// An empty `upper_bounds` list is equivalent to `? extends Object`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WildcardType {
    pub upper_bounds: Vec<Type>,
    pub lower_bounds: Vec<Type>,
}

impl Type {
    pub fn class(id: ClassId) -> Type {
        Type::Class(id)
    }

    pub fn parameterized(raw: ClassId, args: Vec<Type>) -> Type {
        Type::Parameterized(ParameterizedType {
            raw,
            owner: None,
            args,
        })
    }

    pub fn array(component: Type) -> Type {
        Type::Array(Box::new(component))
    }

    pub fn wildcard() -> Type {
        Type::Wildcard(WildcardType::default())
    }

    pub fn wildcard_extends(bound: Type) -> Type {
        Type::Wildcard(WildcardType {
            upper_bounds: vec![bound],
            lower_bounds: Vec::new(),
        })
    }

    pub fn wildcard_super(bound: Type) -> Type {
        Type::Wildcard(WildcardType {
            upper_bounds: Vec::new(),
            lower_bounds: vec![bound],
        })
    }

    /// The class a `Class` or `Parameterized` type names, if any.
    pub fn raw_class(&self) -> Option<ClassId> {
        match self {
            Type::Class(id) => Some(*id),
            Type::Parameterized(p) => Some(p.raw),
            _ => None,
        }
    }

    /// Returns `true` when the type mentions no type variables, wildcards or type arguments,
    /// i.e. it already denotes a single runtime class.
    pub fn is_reified_class(&self) -> bool {
        match self {
            Type::Class(_) => true,
            Type::Array(component) => component.is_reified_class(),
            _ => false,
        }
    }
}

impl From<ClassId> for Type {
    fn from(id: ClassId) -> Self {
        Type::Class(id)
    }
}

/// A runtime class: either a nominal class or an array of a runtime class.
///
/// This is what a [`Type`] erases to, and what property types are reported as.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassRef {
    Class(ClassId),
    Array(Box<ClassRef>),
}

impl ClassRef {
    pub fn array_of(component: ClassRef) -> ClassRef {
        ClassRef::Array(Box::new(component))
    }

    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            ClassRef::Class(id) => Some(*id),
            ClassRef::Array(_) => None,
        }
    }

    pub fn component(&self) -> Option<&ClassRef> {
        match self {
            ClassRef::Class(_) => None,
            ClassRef::Array(component) => Some(component),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ClassRef::Array(_))
    }

    pub fn to_type(&self) -> Type {
        match self {
            ClassRef::Class(id) => Type::Class(*id),
            ClassRef::Array(component) => Type::array(component.to_type()),
        }
    }

    /// JVM `Class.getName()` spelling: `java.lang.String`, `int`, `[I`, `[Ljava.lang.String;`.
    pub fn binary_name(&self, env: &dyn ClassEnv) -> String {
        match self {
            ClassRef::Class(id) => env.class_name(*id).unwrap_or("<unknown>").to_string(),
            ClassRef::Array(_) => {
                let mut out = String::new();
                let mut current = self;
                while let ClassRef::Array(component) = current {
                    out.push('[');
                    current = component;
                }
                let ClassRef::Class(id) = current else {
                    unreachable!("array nesting always ends in a class");
                };
                let wk = env.well_known();
                let code = match *id {
                    id if id == wk.boolean => Some('Z'),
                    id if id == wk.byte => Some('B'),
                    id if id == wk.char => Some('C'),
                    id if id == wk.short => Some('S'),
                    id if id == wk.int => Some('I'),
                    id if id == wk.long => Some('J'),
                    id if id == wk.float => Some('F'),
                    id if id == wk.double => Some('D'),
                    _ => None,
                };
                match code {
                    Some(code) => out.push(code),
                    None => {
                        out.push('L');
                        out.push_str(env.class_name(*id).unwrap_or("<unknown>"));
                        out.push(';');
                    }
                }
                out
            }
        }
    }

    /// Source-like rendering (`java.lang.String[]`) for diagnostics.
    pub fn display<'a>(&'a self, env: &'a dyn ClassEnv) -> impl fmt::Display + 'a {
        DisplayClassRef { class: self, env }
    }
}

impl From<ClassId> for ClassRef {
    fn from(id: ClassId) -> Self {
        ClassRef::Class(id)
    }
}

struct DisplayClassRef<'a> {
    class: &'a ClassRef,
    env: &'a dyn ClassEnv,
}

impl fmt::Display for DisplayClassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            ClassRef::Class(id) => f.write_str(self.env.class_name(*id).unwrap_or("<unknown>")),
            ClassRef::Array(component) => {
                write!(f, "{}[]", component.display(self.env))
            }
        }
    }
}
