use crate::special_forms::SpecialForm;
use crate::types::LispObject;
use itertools::Itertools;

/// Renders a value as source text. Closures print as an opaque marker
/// showing only their parameter count.
pub fn unparse(object: &LispObject) -> String {
    match object {
        LispObject::Integer(value) => value.to_string(),
        LispObject::Bool(true) => String::from("#t"),
        LispObject::Bool(false) => String::from("#f"),
        LispObject::Symbol(name) => name.to_string(),
        LispObject::List(elements) => match elements.as_slice() {
            [LispObject::Symbol(head), quoted] if head.as_str() == SpecialForm::Quote.name() => {
                format!("'{}", unparse(quoted))
            }
            _ => format!("({})", elements.iter().map(unparse).join(" ")),
        },
        LispObject::Closure(closure) => format!("<closure/{}>", closure.parameters.len()),
    }
}
