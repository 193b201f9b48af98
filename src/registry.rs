//! Naming families
//!
//! A [CounterRegistry] maps type keys to [CounterState]s. Each state knows which names it can
//! hand out and how many it has handed out so far; [CounterRegistry::next_name] resolves a type to
//! its family (creating one for previously unseen class and array types) and mints the next name.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::types::TypeKey;

/// Counter for one family of names
///
/// There is always at least one candidate name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    index: usize,
    skip_zero: bool,
    candidates: Vec<String>,
}

impl CounterState {
    /// A family cycling through `first` and then `rest`
    pub fn new(index: usize, skip_zero: bool, first: &str, rest: &[&str]) -> Self {
        let mut candidates = Vec::with_capacity(rest.len() + 1);
        candidates.push(String::from(first));
        candidates.extend(rest.iter().map(|name| String::from(*name)));

        Self {
            index,
            skip_zero,
            candidates,
        }
    }

    /// Family for a type first seen during naming
    pub fn fresh(name: String) -> Self {
        Self {
            index: 0,
            skip_zero: true,
            candidates: vec![name],
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn skip_zero(&self) -> bool {
        self.skip_zero
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The name [CounterState::advance] would return next
    pub fn peek(&self) -> String {
        let count = self.candidates.len();
        let (base, suffix, first_round) = if count == 1 {
            (&self.candidates[0], self.index, self.index == 0)
        } else {
            (
                &self.candidates[self.index % count],
                self.index / count,
                self.index < count,
            )
        };

        if first_round && self.skip_zero {
            base.clone()
        } else {
            format!("{base}{suffix}")
        }
    }

    pub fn advance(&mut self) -> String {
        let name = self.peek();
        self.index += 1;
        name
    }
}

/// Aliases that put one type into another type's family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapTable(HashMap<String, String>);

impl RemapTable {
    pub fn insert(&mut self, from: &str, to: &str) {
        self.0.insert(String::from(from), String::from(to));
    }

    pub fn get(&self, from: &str) -> Option<&str> {
        self.0.get(from).map(String::as_str)
    }

    /// All aliases, sorted by source type
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .0
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }
}

/// All naming families of one scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRegistry {
    families: HashMap<String, CounterState>,
    remap: RemapTable,
}

impl Default for CounterRegistry {
    /// The built-in families every method starts out with
    fn default() -> Self {
        let families = [
            ("int", CounterState::new(0, true, "i", &["j", "k", "l"])),
            ("byte", CounterState::new(0, false, "b", &[])),
            ("char", CounterState::new(0, false, "c", &[])),
            ("short", CounterState::new(1, false, "short", &[])),
            ("boolean", CounterState::new(0, true, "flag", &[])),
            ("double", CounterState::new(0, false, "d", &[])),
            ("float", CounterState::new(0, true, "f", &[])),
            ("File", CounterState::new(1, true, "file", &[])),
            ("String", CounterState::new(0, true, "s", &[])),
            ("Class", CounterState::new(0, true, "oclass", &[])),
            ("Long", CounterState::new(0, true, "olong", &[])),
            ("Byte", CounterState::new(0, true, "obyte", &[])),
            ("Short", CounterState::new(0, true, "oshort", &[])),
            ("Boolean", CounterState::new(0, true, "obool", &[])),
            ("Package", CounterState::new(0, true, "opackage", &[])),
            ("Enum", CounterState::new(0, true, "oenum", &[])),
        ];

        let mut remap = RemapTable::default();
        remap.insert("long", "int");

        Self {
            families: families
                .into_iter()
                .map(|(key, state)| (String::from(key), state))
                .collect(),
            remap,
        }
    }
}

impl CounterRegistry {
    pub fn empty() -> Self {
        Self {
            families: HashMap::new(),
            remap: RemapTable::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CounterState> {
        self.families.get(key)
    }

    pub fn register(&mut self, key: &str, state: CounterState) {
        self.families.insert(String::from(key), state);
    }

    /// Let `from` share the family registered under `to`
    pub fn alias(&mut self, from: &str, to: &str) {
        self.remap.insert(from, to);
    }

    pub fn remap(&self) -> &RemapTable {
        &self.remap
    }

    /// All families, sorted by key
    pub fn families(&self) -> Vec<(&str, &CounterState)> {
        let mut families: Vec<_> = self
            .families
            .iter()
            .map(|(key, state)| (key.as_str(), state))
            .collect();
        families.sort_unstable_by_key(|(key, _)| *key);
        families
    }

    /// Find the family for a type, minting one for unseen classes and arrays
    ///
    /// Lookup order: the key itself, its lowercase form, an alias. Aliases are looked up by the
    /// canonical key as is, not lowercased, so an alias for `long` does not apply to `Long`.
    /// Returns the registry key of the family, or `None` if the type has no family and cannot get
    /// one.
    pub fn resolve(&mut self, key: &TypeKey) -> Option<String> {
        let typ = key.as_str();
        if self.families.contains_key(typ) {
            return Some(String::from(typ));
        }

        let lower = typ.to_lowercase();
        if self.families.contains_key(&lower) {
            return Some(lower);
        }

        if let Some(target) = self.remap.get(typ) {
            return Some(String::from(target));
        }

        let name = key.shape().family_name()?;
        debug!(typ, family = %lower, base = %name, "new naming family");
        self.families.insert(lower.clone(), CounterState::fresh(name));
        Some(lower)
    }

    /// Next name for a variable of the given type
    ///
    /// Types without a family are named after themselves, in lowercase, without any counter. Two
    /// such variables of the same type end up with the same name.
    pub fn next_name(&mut self, key: &TypeKey) -> String {
        let state = self
            .resolve(key)
            .and_then(|family| self.families.get_mut(&family));

        let name = match state {
            Some(state) => state.advance(),
            None => key.as_str().to_lowercase(),
        };
        trace!(typ = %key, minted = %name, "next name");
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::canonicalize;

    fn mint(registry: &mut CounterRegistry, typ: &str, count: usize) -> Vec<String> {
        let key = canonicalize(typ);
        (0..count).map(|_| registry.next_name(&key)).collect()
    }

    #[test]
    fn single_candidate_with_skip_zero() {
        let mut state = CounterState::new(0, true, "s", &[]);
        assert_eq!(state.advance(), "s");
        assert_eq!(state.advance(), "s1");
        assert_eq!(state.advance(), "s2");
        assert_eq!(state.index(), 3);
    }

    #[test]
    fn single_candidate_without_skip_zero() {
        let mut state = CounterState::new(0, false, "b", &[]);
        assert_eq!(state.advance(), "b0");
        assert_eq!(state.advance(), "b1");
    }

    #[test]
    fn cycling_candidates() {
        let mut state = CounterState::new(0, true, "i", &["j", "k", "l"]);
        let names: Vec<_> = (0..9).map(|_| state.advance()).collect();
        assert_eq!(names, ["i", "j", "k", "l", "i1", "j1", "k1", "l1", "i2"]);
    }

    #[test]
    fn cycling_candidates_without_skip_zero() {
        let mut state = CounterState::new(0, false, "x", &["y"]);
        let names: Vec<_> = (0..3).map(|_| state.advance()).collect();
        assert_eq!(names, ["x0", "y0", "x1"]);
    }

    #[test]
    fn peek_does_not_advance() {
        let state = CounterState::new(2, true, "i", &["j", "k", "l"]);
        assert_eq!(state.peek(), "k");
        assert_eq!(state.peek(), "k");
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn baseline_offsets() {
        let mut registry = CounterRegistry::default();
        assert_eq!(mint(&mut registry, "short", 2), ["short1", "short2"]);
        assert_eq!(mint(&mut registry, "java.io.File", 2), ["file1", "file2"]);
        assert_eq!(mint(&mut registry, "byte", 2), ["b0", "b1"]);
        assert_eq!(mint(&mut registry, "boolean", 2), ["flag", "flag1"]);
    }

    #[test]
    fn long_shares_int_family() {
        let mut registry = CounterRegistry::default();
        assert_eq!(mint(&mut registry, "int", 1), ["i"]);
        assert_eq!(mint(&mut registry, "long", 1), ["j"]);
        assert_eq!(mint(&mut registry, "int", 1), ["k"]);
    }

    #[test]
    fn lowercase_lookup() {
        let mut registry = CounterRegistry::default();
        registry.register("widget", CounterState::new(0, true, "w", &[]));
        assert_eq!(mint(&mut registry, "Widget", 2), ["w", "w1"]);
    }

    #[test]
    fn unseen_class_gets_a_family() {
        let mut registry = CounterRegistry::default();
        assert_eq!(
            mint(&mut registry, "java.util.HashMap<K, V>", 2),
            ["hashmap", "hashmap1"]
        );

        let state = registry.get("hashmap").unwrap();
        assert_eq!(state.candidates(), ["hashmap"]);
        assert_eq!(state.index(), 2);
        assert!(state.skip_zero());
    }

    #[test]
    fn unseen_array_gets_a_family() {
        let mut registry = CounterRegistry::default();
        assert_eq!(mint(&mut registry, "Foo[][]", 2), ["afoo", "afoo1"]);
        assert_eq!(mint(&mut registry, "int[]", 1), ["aint"]);
        assert_eq!(mint(&mut registry, "Foo...", 1), ["afoo2"]);
        assert!(registry.get("foo[]").is_some());
    }

    #[test]
    fn unknown_primitive_is_not_counted() {
        let mut registry = CounterRegistry::default();
        let before = registry.clone();
        assert_eq!(mint(&mut registry, "var", 2), ["var", "var"]);
        assert_eq!(registry, before);
    }

    #[test]
    fn alias_to_missing_family_falls_back() {
        let mut registry = CounterRegistry::empty();
        registry.alias("long", "int");
        assert_eq!(mint(&mut registry, "long", 2), ["long", "long"]);
    }

    #[test]
    fn families_are_sorted() {
        let registry = CounterRegistry::default();
        let keys: Vec<_> = registry.families().into_iter().map(|(key, _)| key).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 16);
        assert_eq!(registry.remap().entries(), [("long", "int")]);
    }

    #[test]
    fn aliases_match_the_canonical_key() {
        let mut registry = CounterRegistry::default();
        registry.alias("Vec[]", "int");

        // qualifiers and nesting are gone before the alias is looked up
        assert_eq!(mint(&mut registry, "java.util.Vec[][]", 1), ["i"]);

        // but case is not folded
        assert_eq!(mint(&mut registry, "vec[]", 1), ["avec"]);
        assert_eq!(mint(&mut registry, "Long", 1), ["olong"]);
    }
}
