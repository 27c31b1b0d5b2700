use crate::types::{LispObject, LispSymbol};
use itertools::Itertools;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub struct UndefinedSymbol(pub LispSymbol);

#[derive(Debug, PartialEq, Eq)]
pub struct AlreadyDefined(pub LispSymbol);

/// A flat scope of variable bindings.
///
/// There is no parent chain: `extend` copies every binding of the receiver into
/// the new scope at the moment it is called. The only environment that keeps
/// changing after it has been extended is the top-level one, which closures
/// share through an `Rc`.
#[derive(Debug, Default)]
pub struct Environment {
    variables: RefCell<HashMap<LispSymbol, LispObject>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings<I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (LispSymbol, LispObject)>,
    {
        Self {
            variables: RefCell::new(bindings.into_iter().collect()),
        }
    }

    pub fn lookup(&self, key: &LispSymbol) -> Result<LispObject, UndefinedSymbol> {
        self.variables
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| UndefinedSymbol(key.clone()))
    }

    /// A new scope holding the receiver's current bindings overlaid with `bindings`.
    pub fn extend<I>(&self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (LispSymbol, LispObject)>,
    {
        let mut variables = self.variables.borrow().clone();
        variables.extend(bindings);
        Self {
            variables: RefCell::new(variables),
        }
    }

    pub fn set<T>(&self, key: T, value: LispObject) -> Result<(), AlreadyDefined>
    where
        T: Into<LispSymbol>,
    {
        let key = key.into();
        let mut variables = self.variables.borrow_mut();
        if variables.contains_key(&key) {
            return Err(AlreadyDefined(key));
        }
        variables.insert(key, value);
        Ok(())
    }

    pub fn contains(&self, key: &LispSymbol) -> bool {
        self.variables.borrow().contains_key(key)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variables = self.variables.borrow();
        let names = variables.keys().map(|key| key.as_str()).sorted();
        write!(f, "Environment{{{}}}", names.format(", "))
    }
}
