use std::sync::Arc;

use beanlens_types::{ClassEnv, ClassRef, Type};

use crate::accessor::Accessor;
use crate::error::Result;
use crate::factory::ReflectorFactory;
use crate::reflector::Reflector;
use crate::tokenizer::PropertyTokenizer;

/// Property-path navigation over classes, e.g. `order.customer.name` or `orders[0].total`.
///
/// Each intermediate segment moves to the class its reader resolves to, pulling that class's
/// [`Reflector`] from the factory.
#[derive(Clone)]
pub struct MetaClass<'a> {
    env: &'a dyn ClassEnv,
    factory: &'a ReflectorFactory,
    reflector: Arc<Reflector>,
}

impl<'a> MetaClass<'a> {
    pub fn for_class(
        env: &'a dyn ClassEnv,
        factory: &'a ReflectorFactory,
        class: &ClassRef,
    ) -> Result<Self> {
        Ok(Self {
            env,
            factory,
            reflector: factory.find_for_class(env, class)?,
        })
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// MetaClass of the class that property `name`'s reader resolves to.
    pub fn meta_class_for_property(&self, name: &str) -> Result<MetaClass<'a>> {
        let class = self.reflector.reader_type(name)?;
        MetaClass::for_class(self.env, self.factory, class)
    }

    /// Resolve `name` to declared property casing segment by segment, ignoring case.
    ///
    /// With `use_camel_case_mapping`, underscores are removed first so `user_name` finds
    /// `userName`. Returns `None` when the first segment is not a property. Indexes are dropped
    /// from the result.
    pub fn find_property(&self, name: &str, use_camel_case_mapping: bool) -> Result<Option<String>> {
        let mapped;
        let name = if use_camel_case_mapping {
            mapped = name.replace('_', "");
            mapped.as_str()
        } else {
            name
        };

        let mut out = String::new();
        self.build_property(name, &mut out)?;
        Ok((!out.is_empty()).then_some(out))
    }

    /// [`MetaClass::find_property`] with camel-case mapping taken from the factory's
    /// configuration, for matching result column names to properties.
    pub fn find_property_for_column(&self, column: &str) -> Result<Option<String>> {
        self.find_property(column, self.factory.map_underscore_to_camel_case())
    }

    fn build_property(&self, name: &str, out: &mut String) -> Result<()> {
        let prop = PropertyTokenizer::new(name);
        match prop.children() {
            Some(children) => {
                if let Some(property) = self.reflector.find_property_by_case_insensitive_name(prop.name()) {
                    out.push_str(property);
                    out.push('.');
                    self.meta_class_for_property(property)?
                        .build_property(children, out)?;
                }
            }
            None => {
                if let Some(property) = self.reflector.find_property_by_case_insensitive_name(name) {
                    out.push_str(property);
                }
            }
        }
        Ok(())
    }

    pub fn getter_names(&self) -> &[String] {
        self.reflector.readable_property_names()
    }

    pub fn setter_names(&self) -> &[String] {
        self.reflector.writable_property_names()
    }

    pub fn setter_type(&self, name: &str) -> Result<ClassRef> {
        let prop = PropertyTokenizer::new(name);
        match prop.children() {
            Some(children) => self
                .meta_class_for_property(prop.name())?
                .setter_type(children),
            None => self.reflector.writer_type(prop.name()).cloned(),
        }
    }

    pub fn getter_type(&self, name: &str) -> Result<ClassRef> {
        let prop = PropertyTokenizer::new(name);
        match prop.children() {
            Some(children) => self.meta_class_for_segment(&prop)?.getter_type(children),
            None => self.segment_getter_type(&prop),
        }
    }

    pub fn has_setter(&self, name: &str) -> Result<bool> {
        let prop = PropertyTokenizer::new(name);
        match prop.children() {
            Some(children) if self.reflector.has_writer(prop.name()) => self
                .meta_class_for_property(prop.name())?
                .has_setter(children),
            Some(_) => Ok(false),
            None => Ok(self.reflector.has_writer(prop.name())),
        }
    }

    pub fn has_getter(&self, name: &str) -> Result<bool> {
        let prop = PropertyTokenizer::new(name);
        match prop.children() {
            Some(children) if self.reflector.has_reader(prop.name()) => {
                self.meta_class_for_segment(&prop)?.has_getter(children)
            }
            Some(_) => Ok(false),
            None => Ok(self.reflector.has_reader(prop.name())),
        }
    }

    pub fn get_reader(&self, name: &str) -> Result<Accessor> {
        self.reflector.get_reader(name)
    }

    pub fn get_writer(&self, name: &str) -> Result<Accessor> {
        self.reflector.get_writer(name)
    }

    pub fn has_default_constructor(&self) -> bool {
        self.reflector.has_default_constructor()
    }

    fn meta_class_for_segment(&self, prop: &PropertyTokenizer<'_>) -> Result<MetaClass<'a>> {
        let class = self.segment_getter_type(prop)?;
        MetaClass::for_class(self.env, self.factory, &class)
    }

    /// Reader type of one segment. An indexed segment over a collection yields the element
    /// type when the reader's generic type has exactly one type argument.
    fn segment_getter_type(&self, prop: &PropertyTokenizer<'_>) -> Result<ClassRef> {
        let class = self.reflector.reader_type(prop.name())?.clone();
        if prop.index().is_none() || !self.is_collection(&class) {
            return Ok(class);
        }

        let element = match self.reflector.reader_generic_type(prop.name())? {
            Type::Parameterized(p) if p.args.len() == 1 => match &p.args[0] {
                Type::Class(id) => Some(ClassRef::Class(*id)),
                Type::Parameterized(arg) => Some(ClassRef::Class(arg.raw)),
                _ => None,
            },
            _ => None,
        };
        Ok(element.unwrap_or(class))
    }

    fn is_collection(&self, class: &ClassRef) -> bool {
        let collection = ClassRef::Class(self.env.well_known().collection);
        beanlens_types::is_assignable(self.env, class, &collection)
    }
}

impl std::fmt::Debug for MetaClass<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaClass")
            .field("class", &self.reflector.get_type())
            .finish_non_exhaustive()
    }
}
