//! Interned, cheaply-clonable symbols used as the flat string namespace for
//! terms: object names, type names, predicate/fluent heads and action names.

use hashbrown::HashMap;
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// A symbol drawn from a flat string namespace (spec.md §3 "Term").
///
/// Cloning a `Sym` only bumps a reference count; equality and hashing are
/// by string content, so two `Sym`s built independently from the same text
/// still compare equal.
#[derive(Clone, Eq)]
pub struct Sym(Arc<str>);

impl Sym {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Sym {
    fn from(value: &str) -> Self {
        Sym(Arc::from(value))
    }
}

impl From<String> for Sym {
    fn from(value: String) -> Self {
        Sym(Arc::from(value.as_str()))
    }
}

impl From<&Sym> for Sym {
    fn from(value: &Sym) -> Self {
        value.clone()
    }
}

impl AsRef<str> for Sym {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Sym {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Sym {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}

impl std::hash::Hash for Sym {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.as_ref().hash(state)
    }
}

impl PartialOrd for Sym {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Sym {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.as_ref().cmp(other.0.as_ref())
    }
}

impl Debug for Sym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl Display for Sym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mapping from a type name to its ordered sequence of object terms
/// (spec.md §3 "Object pool"). Types are purely nominal: no subtyping.
#[derive(Clone, Debug, Default)]
pub struct ObjectPool {
    by_type: HashMap<Sym, Vec<Sym>>,
}

impl ObjectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `object` as an instance of `tpe`, appending to the type's
    /// object list in insertion order (grounding iterates pools in this
    /// order, which is part of the determinism contract of spec.md §5).
    pub fn add(&mut self, tpe: impl Into<Sym>, object: impl Into<Sym>) {
        self.by_type.entry(tpe.into()).or_default().push(object.into());
    }

    pub fn objects_of(&self, tpe: &Sym) -> Option<&[Sym]> {
        self.by_type.get(tpe).map(Vec::as_slice)
    }
}
