//! Bean introspection over a [`beanlens_types::ClassEnv`].
//!
//! [`Reflector`] turns a class into a map from property name to the accessor that reads or
//! writes it and the property's resolved type. Getters, setters and fields are discovered
//! through the whole class hierarchy; overridden and covariant accessors are reconciled and
//! generic member types are resolved against the concrete class.
//!
//! [`ReflectorFactory`] caches reflectors per class and [`MetaClass`] navigates dotted property
//! paths through them.

#![forbid(unsafe_code)]

mod accessor;
mod error;
mod factory;
mod meta_class;
pub mod namer;
mod reflector;
pub mod resolver;
mod tokenizer;

pub use crate::accessor::{Accessor, ObjectAccess};
pub use crate::error::{ReflectionError, Result};
pub use crate::factory::ReflectorFactory;
pub use crate::meta_class::MetaClass;
pub use crate::reflector::Reflector;
pub use crate::tokenizer::{PropertyTokenizer, Segments};
