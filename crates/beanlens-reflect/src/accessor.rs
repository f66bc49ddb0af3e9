use beanlens_types::{ClassEnv, ClassId, FieldId, MethodId};

use crate::error::ReflectionError;

/// How one direction of a property is realised on a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// A getter (no arguments) or setter (one argument).
    MethodCall(MethodId),
    FieldRead(FieldId),
    FieldWrite(FieldId),
}

/// The object host that accessors are invoked against.
///
/// The class model only describes members; reading and writing live objects belongs to whoever
/// owns them. Host errors are returned from [`Accessor::invoke`] unchanged.
pub trait ObjectAccess {
    type Object: ?Sized;
    type Value;
    type Error: From<ReflectionError>;

    fn call_method(
        &self,
        target: &mut Self::Object,
        method: MethodId,
        args: Vec<Self::Value>,
    ) -> Result<Option<Self::Value>, Self::Error>;

    fn read_field(&self, target: &Self::Object, field: FieldId) -> Result<Self::Value, Self::Error>;

    fn write_field(
        &self,
        target: &mut Self::Object,
        field: FieldId,
        value: Self::Value,
    ) -> Result<(), Self::Error>;
}

impl Accessor {
    /// Class declaring the bound member.
    pub fn declaring_class(&self) -> ClassId {
        match self {
            Accessor::MethodCall(id) => id.owner,
            Accessor::FieldRead(id) | Accessor::FieldWrite(id) => id.owner,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Accessor::MethodCall(_))
    }

    /// Name of the bound member, if `env` knows it.
    pub fn member_name<'a>(&self, env: &'a dyn ClassEnv) -> Option<&'a str> {
        match self {
            Accessor::MethodCall(id) => env.method(*id).map(|m| m.name.as_str()),
            Accessor::FieldRead(id) | Accessor::FieldWrite(id) => {
                env.field(*id).map(|f| f.name.as_str())
            }
        }
    }

    /// Run the accessor on `target`.
    ///
    /// Field reads return `Some(value)` and take no arguments; field writes take exactly one
    /// argument and return `None`. Method calls pass `args` through and return whatever the host
    /// returns.
    pub fn invoke<H: ObjectAccess>(
        &self,
        host: &H,
        target: &mut H::Object,
        args: Vec<H::Value>,
    ) -> Result<Option<H::Value>, H::Error> {
        match *self {
            Accessor::MethodCall(method) => host.call_method(target, method, args),
            Accessor::FieldRead(field) => {
                if !args.is_empty() {
                    return Err(ReflectionError::Invocation(format!(
                        "field read takes no arguments, got {}",
                        args.len()
                    ))
                    .into());
                }
                host.read_field(target, field).map(Some)
            }
            Accessor::FieldWrite(field) => {
                let count = args.len();
                let mut args = args.into_iter();
                match (args.next(), args.next()) {
                    (Some(value), None) => host.write_field(target, field, value).map(|()| None),
                    _ => Err(ReflectionError::Invocation(format!(
                        "field write takes exactly one argument, got {count}"
                    ))
                    .into()),
                }
            }
        }
    }
}
