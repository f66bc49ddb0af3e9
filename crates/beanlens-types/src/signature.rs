//! Generic signatures (JVMS 4.7.9.1).
//!
//! Only the structure is recovered here; turning names into [`crate::ClassId`]s and type
//! variable names into [`crate::TypeVarId`]s is the loader's job.

use crate::descriptor::BaseType;
use crate::error::{Result, TypeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub type_parameters: Vec<TypeParameter>,
    pub super_class: ClassTypeSignature,
    pub interfaces: Vec<ClassTypeSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<TypeSignature>,
    /// `None` for `void`.
    pub return_type: Option<TypeSignature>,
    pub throws: Vec<TypeSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub class_bound: Option<TypeSignature>,
    pub interface_bounds: Vec<TypeSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
    Base(BaseType),
    Array(Box<TypeSignature>),
    Class(ClassTypeSignature),
    TypeVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTypeSignature {
    /// The first segment carries the package prefix (`java/util/Map`); later segments are
    /// inner classes (`Entry`).
    pub segments: Vec<SimpleClassTypeSignature>,
}

impl ClassTypeSignature {
    /// Internal name of the referenced class, e.g. `java/util/Map$Entry`.
    pub fn internal_name(&self) -> String {
        self.segments
            .iter()
            .map(|seg| seg.name.as_str())
            .collect::<Vec<_>>()
            .join("$")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleClassTypeSignature {
    pub name: String,
    pub type_arguments: Vec<TypeArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    /// `*`
    Any,
    Exact(TypeSignature),
    Extends(TypeSignature),
    Super(TypeSignature),
}

pub fn parse_class_signature(sig: &str) -> Result<ClassSignature> {
    let mut parser = Parser::new(sig);
    let type_parameters = parser.type_parameters()?;
    let super_class = parser.class_type_signature()?;
    let mut interfaces = Vec::new();
    while !parser.at_end() {
        interfaces.push(parser.class_type_signature()?);
    }
    Ok(ClassSignature {
        type_parameters,
        super_class,
        interfaces,
    })
}

pub fn parse_method_signature(sig: &str) -> Result<MethodSignature> {
    let mut parser = Parser::new(sig);
    let type_parameters = parser.type_parameters()?;
    parser.expect(b'(')?;
    let mut parameters = Vec::new();
    while parser.peek() != Some(b')') {
        parameters.push(parser.java_type_signature()?);
    }
    parser.expect(b')')?;
    let return_type = if parser.eat(b'V') {
        None
    } else {
        Some(parser.java_type_signature()?)
    };
    let mut throws = Vec::new();
    while parser.eat(b'^') {
        throws.push(parser.reference_type_signature()?);
    }
    parser.finish()?;
    Ok(MethodSignature {
        type_parameters,
        parameters,
        return_type,
        throws,
    })
}

/// Parses a field signature, which is always a reference type.
pub fn parse_field_signature(sig: &str) -> Result<TypeSignature> {
    let mut parser = Parser::new(sig);
    let ty = parser.reference_type_signature()?;
    parser.finish()?;
    Ok(ty)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self) -> TypeError {
        TypeError::InvalidSignature(self.input.to_string())
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn finish(&self) -> Result<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// Reads up to (not including) the first byte in `stops`.
    fn identifier(&mut self, stops: &[u8]) -> Result<&'a str> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if stops.contains(&b) {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error());
        }
        Ok(&self.input[start..self.pos])
    }

    fn type_parameters(&mut self) -> Result<Vec<TypeParameter>> {
        let mut out = Vec::new();
        if !self.eat(b'<') {
            return Ok(out);
        }
        while !self.eat(b'>') {
            let name = self.identifier(b":>;")?.to_string();
            self.expect(b':')?;
            let class_bound = match self.peek() {
                Some(b'L' | b'T' | b'[') => Some(self.reference_type_signature()?),
                _ => None,
            };
            let mut interface_bounds = Vec::new();
            while self.eat(b':') {
                interface_bounds.push(self.reference_type_signature()?);
            }
            out.push(TypeParameter {
                name,
                class_bound,
                interface_bounds,
            });
            if self.at_end() {
                return Err(self.error());
            }
        }
        if out.is_empty() {
            return Err(self.error());
        }
        Ok(out)
    }

    fn java_type_signature(&mut self) -> Result<TypeSignature> {
        match self.peek().and_then(BaseType::from_code) {
            Some(base) => {
                self.pos += 1;
                Ok(TypeSignature::Base(base))
            }
            None => self.reference_type_signature(),
        }
    }

    fn reference_type_signature(&mut self) -> Result<TypeSignature> {
        match self.peek() {
            Some(b'L') => Ok(TypeSignature::Class(self.class_type_signature()?)),
            Some(b'T') => {
                self.pos += 1;
                let name = self.identifier(b";<>.:/")?.to_string();
                self.expect(b';')?;
                Ok(TypeSignature::TypeVariable(name))
            }
            Some(b'[') => {
                self.pos += 1;
                Ok(TypeSignature::Array(Box::new(self.java_type_signature()?)))
            }
            _ => Err(self.error()),
        }
    }

    fn class_type_signature(&mut self) -> Result<ClassTypeSignature> {
        self.expect(b'L')?;
        let mut segments = vec![self.simple_class_type_signature()?];
        while self.eat(b'.') {
            segments.push(self.simple_class_type_signature()?);
        }
        self.expect(b';')?;
        Ok(ClassTypeSignature { segments })
    }

    fn simple_class_type_signature(&mut self) -> Result<SimpleClassTypeSignature> {
        let name = self.identifier(b"<.;")?.to_string();
        let mut type_arguments = Vec::new();
        if self.eat(b'<') {
            while !self.eat(b'>') {
                if self.at_end() {
                    return Err(self.error());
                }
                type_arguments.push(self.type_argument()?);
            }
            if type_arguments.is_empty() {
                return Err(self.error());
            }
        }
        Ok(SimpleClassTypeSignature {
            name,
            type_arguments,
        })
    }

    fn type_argument(&mut self) -> Result<TypeArgument> {
        if self.eat(b'*') {
            Ok(TypeArgument::Any)
        } else if self.eat(b'+') {
            Ok(TypeArgument::Extends(self.reference_type_signature()?))
        } else if self.eat(b'-') {
            Ok(TypeArgument::Super(self.reference_type_signature()?))
        } else {
            Ok(TypeArgument::Exact(self.reference_type_signature()?))
        }
    }
}
