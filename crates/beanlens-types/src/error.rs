use thiserror::Error;

use crate::{ClassId, TypeVarId};

pub type Result<T> = std::result::Result<T, TypeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("class {name} (id {id:?}) has no definition")]
    UnknownClass { id: ClassId, name: String },
    #[error("unknown type parameter {0:?}")]
    UnknownTypeParam(TypeVarId),
    #[error("unknown member {member} of {class}")]
    UnknownMember { class: String, member: String },
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    #[error("class {0} declares more members than a member id can address")]
    TooManyMembers(String),
}
