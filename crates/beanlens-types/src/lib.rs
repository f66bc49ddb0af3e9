//! Class model used by beanlens introspection.
//!
//! This crate plays the part of a JVM-style reflection facility: it stores classes,
//! interfaces, members and generic type expressions, and answers hierarchy questions
//! (erasure, subclassing, assignability) over them. Models are built either directly from
//! [`ClassDef`]s or from classfile-level [`ClassStub`]s carrying descriptors and generic
//! signatures.

#![forbid(unsafe_code)]

mod descriptor;
mod error;
mod format;
mod hierarchy;
mod jdk;
mod loader;
mod model;
mod signature;
mod store;
mod ty;

pub use crate::descriptor::{
    parse_field_descriptor, parse_method_descriptor, BaseType, FieldType, MethodDescriptor,
    ReturnType,
};
pub use crate::error::{Result, TypeError};
pub use crate::format::format_type;
pub use crate::hierarchy::{erasure, is_assignable, is_subclass};
pub use crate::loader::{ClassStub, FieldStub, MethodStub};
pub use crate::model::{
    ClassDef, ClassKind, ConstructorDef, ConstructorId, FieldDef, FieldId, GenericOwner,
    MethodDef, MethodId, TypeParamDef, ACC_ABSTRACT, ACC_BRIDGE, ACC_FINAL, ACC_INTERFACE,
    ACC_PRIVATE, ACC_PROTECTED, ACC_PUBLIC, ACC_STATIC, ACC_SYNTHETIC, ACC_VARARGS,
};
pub use crate::signature::{
    parse_class_signature, parse_field_signature, parse_method_signature, ClassSignature,
    ClassTypeSignature, MethodSignature, SimpleClassTypeSignature, TypeArgument, TypeParameter,
    TypeSignature,
};
pub use crate::store::{ClassEnv, ClassStore, WellKnownClasses};
pub use crate::ty::{ClassId, ClassRef, ParameterizedType, Type, TypeVarId, WildcardType};
