use beanlens_types::TypeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReflectionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    /// Two candidate accessors for one property with no way to prefer either.
    #[error("ambiguous accessors for property '{property}' in class {class}: {detail}")]
    AmbiguousProperty {
        property: String,
        class: String,
        detail: String,
    },
    #[error("'{0}' is not a getter or setter method name")]
    InvalidAccessorName(String),
    #[error("unresolvable generic type: {0}")]
    UnresolvableGenerics(String),
    #[error("class {0} has no default constructor")]
    NoDefaultConstructor(String),
    #[error("there is no getter for property named '{property}' in '{class}'")]
    NoSuchReader { property: String, class: String },
    #[error("there is no setter for property named '{property}' in '{class}'")]
    NoSuchWriter { property: String, class: String },
    #[error("class {0} is not defined")]
    UnknownClass(String),
    #[error("could not invoke accessor: {0}")]
    Invocation(String),
    #[error(transparent)]
    Type(#[from] TypeError),
}
