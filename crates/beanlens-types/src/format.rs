use std::fmt::Write as _;

use crate::{ClassEnv, Type};

/// Render a type expression the way Java source would spell it, with fully qualified class
/// names (`java.util.List<? extends T>`, `int[]`).
///
/// Unknown ids render as `<unknown>` rather than failing; this is only used for messages.
pub fn format_type(env: &dyn ClassEnv, ty: &Type) -> String {
    let mut out = String::new();
    write_type(env, ty, &mut out);
    out
}

fn write_type(env: &dyn ClassEnv, ty: &Type, out: &mut String) {
    match ty {
        Type::Class(id) => out.push_str(&source_name(env.class_name(*id))),
        Type::Parameterized(p) => {
            match &p.owner {
                Some(owner) => {
                    write_type(env, owner, out);
                    out.push('.');
                    let name = env.class_name(p.raw).unwrap_or("<unknown>");
                    out.push_str(name.rsplit('$').next().unwrap_or(name));
                }
                None => out.push_str(&source_name(env.class_name(p.raw))),
            }
            out.push('<');
            for (idx, arg) in p.args.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                write_type(env, arg, out);
            }
            out.push('>');
        }
        Type::Array(component) => {
            write_type(env, component, out);
            out.push_str("[]");
        }
        Type::TypeVar(id) => match env.type_param(*id) {
            Some(def) => out.push_str(&def.name),
            None => {
                let _ = write!(out, "<tv#{}>", id.to_raw());
            }
        },
        Type::Wildcard(w) => {
            out.push('?');
            if let Some(lower) = w.lower_bounds.first() {
                out.push_str(" super ");
                write_type(env, lower, out);
            } else if let Some(upper) = w.upper_bounds.first() {
                if upper.raw_class() != Some(env.well_known().object) {
                    out.push_str(" extends ");
                    write_type(env, upper, out);
                }
            }
        }
    }
}

fn source_name(binary: Option<&str>) -> String {
    binary.unwrap_or("<unknown>").replace('$', ".")
}
