//! Type canonicalization
//!
//! Variable types arrive as source-like strings (`java.util.List<String>`, `Foo[][]`, `Bar...`).
//! Before they can be used to look up a naming family they are reduced to a [TypeKey] by
//! [canonicalize], and classified structurally by [TypeShape].

use std::fmt;

const GENERIC_OPEN: char = '<';
const QUALIFIER: char = '.';
const VARARGS: &str = "...";
const ARRAY: &str = "[]";
const NESTED_ARRAY: &str = "[][]";

/// The type the decompiler assigns to the method receiver
pub const RECEIVER: &str = "this";

/// A canonical type string
///
/// Only [canonicalize] creates these, so a key never carries generic arguments, package
/// qualifiers, varargs markers or nested array markers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_receiver(&self) -> bool {
        self.0 == RECEIVER
    }

    pub fn shape(&self) -> TypeShape<'_> {
        TypeShape::classify(&self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reduce a surface type to its lookup key
///
/// - generic arguments are cut off: `List<String>` becomes `List`
/// - a trailing varargs marker becomes an array marker: `Bar...` becomes `Bar[]`
/// - package and outer class qualifiers are dropped: `java.io.File` becomes `File`
/// - nested array markers collapse: `int[][][]` becomes `int[]`
///
/// Applying it to its own output changes nothing.
pub fn canonicalize(raw: &str) -> TypeKey {
    let mut typ = match raw.find(GENERIC_OPEN) {
        Some(at) => &raw[..at],
        None => raw,
    };

    let varargs = typ.ends_with(VARARGS);
    if varargs {
        typ = &typ[..typ.len() - VARARGS.len()];
    }

    if let Some(at) = typ.rfind(QUALIFIER) {
        typ = &typ[at + QUALIFIER.len_utf8()..];
    }

    let mut key = String::from(typ);
    if varargs {
        key.push_str(ARRAY);
    }
    while key.contains(NESTED_ARRAY) {
        key = key.replace(NESTED_ARRAY, ARRAY);
    }

    TypeKey(key)
}

/// Structural category of a canonical type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape<'a> {
    /// Lowercase names: the JVM primitives, and anything else we know nothing about
    Primitive(&'a str),

    /// Capitalized names, i.e. classes
    Reference(&'a str),

    /// Array of the given element type
    Array { element: &'a str },
}

impl<'a> TypeShape<'a> {
    pub fn classify(key: &'a str) -> Self {
        if let Some(at) = key.find('[') {
            return TypeShape::Array {
                element: &key[..at],
            };
        }

        match key.chars().next() {
            Some(c) if c.is_ascii_uppercase() => TypeShape::Reference(key),
            _ => TypeShape::Primitive(key),
        }
    }

    /// Base name of a family minted on first sight of this type
    ///
    /// Primitives get no family of their own.
    pub fn family_name(&self) -> Option<String> {
        match self {
            TypeShape::Primitive(_) => None,
            TypeShape::Reference(name) => Some(strip_qualifiers(&name.to_lowercase())),
            TypeShape::Array { element } => {
                Some(format!("a{}", strip_qualifiers(&element.to_lowercase())))
            }
        }
    }
}

fn strip_qualifiers(name: &str) -> String {
    name.replace(QUALIFIER, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> String {
        canonicalize(raw).as_str().to_owned()
    }

    #[test]
    fn generics_are_cut() {
        assert_eq!(key("List<String>"), "List");
        assert_eq!(key("java.util.Map<java.lang.String, java.util.List<Integer>>"), "Map");
    }

    #[test]
    fn qualifiers_are_dropped() {
        assert_eq!(key("java.io.File"), "File");
        assert_eq!(key("Outer.Inner"), "Inner");
        assert_eq!(key("int"), "int");
    }

    #[test]
    fn arrays_collapse() {
        assert_eq!(key("int[][]"), "int[]");
        assert_eq!(key("java.lang.String[][][]"), "String[]");
        assert_eq!(key("Foo[]"), "Foo[]");
    }

    #[test]
    fn varargs_become_arrays() {
        assert_eq!(key("Bar..."), "Bar[]");
        assert_eq!(key("pkg.Bar..."), "Bar[]");
        assert_eq!(key("int[]..."), "int[]");
    }

    #[test]
    fn idempotent() {
        for raw in [
            "",
            "this",
            "int",
            "long",
            "java.util.List<String>",
            "Foo[][][]",
            "a.b.C...",
            "x....",
            "Map<K, V>[]",
            "Outer.Inner[][]",
            "[][][]",
            ".",
        ] {
            let once = canonicalize(raw);
            let twice = canonicalize(once.as_str());
            assert_eq!(once, twice, "canonicalize is not idempotent for {raw:?}");
        }
    }

    #[test]
    fn receiver() {
        assert!(canonicalize("this").is_receiver());
        assert!(!canonicalize("This").is_receiver());
    }

    #[test]
    fn shapes() {
        assert_eq!(TypeShape::classify("int"), TypeShape::Primitive("int"));
        assert_eq!(TypeShape::classify("Foo"), TypeShape::Reference("Foo"));
        assert_eq!(
            TypeShape::classify("int[]"),
            TypeShape::Array { element: "int" }
        );
        assert_eq!(TypeShape::classify(""), TypeShape::Primitive(""));
    }

    #[test]
    fn family_names() {
        assert_eq!(TypeShape::classify("int").family_name(), None);
        assert_eq!(
            TypeShape::classify("HashMap").family_name(),
            Some(String::from("hashmap"))
        );
        assert_eq!(
            TypeShape::classify("Foo[]").family_name(),
            Some(String::from("afoo"))
        );
        assert_eq!(
            TypeShape::classify("int[]").family_name(),
            Some(String::from("aint"))
        );
    }
}
