use std::collections::{BTreeMap, HashMap};
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::{MethodInfo, NameProvider, NamingFactory};
use crate::descriptor::{DescriptorError, MethodDescriptor};
use crate::registry::CounterRegistry;
use crate::types::canonicalize;
use crate::{AccessFlags, VarVersion};

/// Names variables after their types, the way JAD did
///
/// `int`s become `i`, `j`, `k`, `l`, `i1`, ..., `String`s become `s`, `s1`, ..., and classes
/// nobody thought of become their lowercased simple name. Arrays get an `a` prefix.
///
/// All state sits behind one lock, so every operation is atomic with respect to the others.
#[derive(Debug)]
pub struct JadNameProvider {
    method: MethodInfo,
    rename_parameters: bool,
    state: Mutex<NamingState>,
}

#[derive(Debug, Default)]
struct NamingState {
    registry: CounterRegistry,

    /// Parameter names by slot, computed at most once
    parameters: HashMap<u32, String>,
}

impl NamingState {
    fn parameter_name(&mut self, slot: u32, typ: &str) -> String {
        let NamingState {
            registry,
            parameters,
        } = self;
        parameters
            .entry(slot)
            .or_insert_with(|| registry.next_name(&canonicalize(typ)))
            .clone()
    }
}

impl JadNameProvider {
    pub fn new(method: MethodInfo, rename_parameters: bool) -> Self {
        Self {
            method,
            rename_parameters,
            state: Mutex::default(),
        }
    }

    pub fn method(&self) -> &MethodInfo {
        &self.method
    }

    pub fn renames_parameters(&self) -> bool {
        self.rename_parameters
    }

    pub fn snapshot(&self) -> CounterRegistry {
        self.state().registry.clone()
    }

    fn state(&self) -> MutexGuard<'_, NamingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NameProvider for JadNameProvider {
    fn rename(
        &self,
        variables: &HashMap<VarVersion, String>,
    ) -> Result<BTreeMap<VarVersion, String>, DescriptorError> {
        let params = MethodDescriptor::parse(&self.method.descriptor)?
            .parameter_slots(self.method.flags);

        let mut sorted: Vec<_> = variables.iter().collect();
        sorted.sort_unstable_by_key(|(var, _)| **var);

        let mut state = self.state();
        let mut names = BTreeMap::new();
        for (var, typ) in sorted {
            let key = canonicalize(typ);
            if key.is_receiver() {
                continue;
            }

            if var.slot >= params {
                names.insert(*var, state.registry.next_name(&key));
            } else if self.rename_parameters {
                names.insert(*var, state.parameter_name(var.slot, typ));
            }
        }

        debug!(params, named = names.len(), "renamed variables");
        Ok(names)
    }

    fn adopt(&self, parent: &Self) {
        if ptr::eq(self, parent) {
            return;
        }

        // never hold both locks at once
        let registry = parent.snapshot();
        debug!(families = registry.families().len(), "adopting parent context");
        self.state().registry = registry;
    }

    fn rename_parameter(&self, flags: AccessFlags, typ: &str, name: &str, index: u32) -> String {
        if !self.rename_parameters {
            return self.keep_parameter(flags, name, index);
        }
        self.state().parameter_name(index, typ)
    }
}

/// Creates a [JadNameProvider] per method
#[derive(Debug, Clone, Copy, Default)]
pub struct JadNameProviderFactory {
    pub rename_parameters: bool,
}

impl JadNameProviderFactory {
    pub fn new(rename_parameters: bool) -> Self {
        Self { rename_parameters }
    }
}

impl NamingFactory for JadNameProviderFactory {
    type Provider = JadNameProvider;

    fn create(&self, method: MethodInfo) -> JadNameProvider {
        JadNameProvider::new(method, self.rename_parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(flags: AccessFlags, descriptor: &str, rename_parameters: bool) -> JadNameProvider {
        JadNameProviderFactory::new(rename_parameters).create(MethodInfo::new(flags, descriptor))
    }

    fn variables(vars: &[(u32, u32, &str)]) -> HashMap<VarVersion, String> {
        vars.iter()
            .map(|&(slot, version, typ)| (VarVersion::new(slot, version), String::from(typ)))
            .collect()
    }

    fn names(result: &BTreeMap<VarVersion, String>) -> Vec<&str> {
        result.values().map(String::as_str).collect()
    }

    #[test]
    fn names_follow_slot_then_version() {
        let provider = provider(AccessFlags::STATIC, "()V", false);
        let result = provider
            .rename(&variables(&[(1, 0, "int"), (0, 3, "int"), (0, 1, "int")]))
            .unwrap();

        assert_eq!(
            result.into_iter().collect::<Vec<_>>(),
            vec![
                (VarVersion::new(0, 1), String::from("i")),
                (VarVersion::new(0, 3), String::from("j")),
                (VarVersion::new(1, 0), String::from("k")),
            ]
        );
    }

    #[test]
    fn receiver_is_skipped() {
        let provider = provider(AccessFlags::PUBLIC, "()V", true);
        let result = provider
            .rename(&variables(&[(0, 0, "this"), (1, 0, "int")]))
            .unwrap();
        assert_eq!(names(&result), ["i"]);
        assert!(!result.contains_key(&VarVersion::new(0, 0)));
    }

    #[test]
    fn parameters_kept_unless_enabled() {
        let vars = variables(&[(0, 0, "int"), (1, 0, "String"), (2, 0, "int")]);

        let keep = provider(AccessFlags::STATIC, "(ILjava/lang/String;)V", false);
        let result = keep.rename(&vars).unwrap();
        assert_eq!(result.keys().copied().collect::<Vec<_>>(), [VarVersion::new(2, 0)]);
        assert_eq!(names(&result), ["i"]);

        let rename = provider(AccessFlags::STATIC, "(ILjava/lang/String;)V", true);
        assert_eq!(names(&rename.rename(&vars).unwrap()), ["i", "s", "j"]);
    }

    #[test]
    fn parameter_versions_share_a_name() {
        let provider = provider(AccessFlags::STATIC, "(I)V", true);
        let result = provider
            .rename(&variables(&[(0, 0, "int"), (0, 1, "int"), (1, 0, "int")]))
            .unwrap();
        assert_eq!(names(&result), ["i", "i", "j"]);
    }

    #[test]
    fn wide_parameters_take_two_slots() {
        let provider = provider(AccessFlags::STATIC, "(JD)V", false);
        let result = provider
            .rename(&variables(&[
                (0, 0, "long"),
                (2, 0, "double"),
                (3, 0, "double"),
                (4, 0, "double"),
            ]))
            .unwrap();
        assert_eq!(names(&result), ["d0"]);
    }

    #[test]
    fn bad_descriptor() {
        let provider = provider(AccessFlags::STATIC, "I", false);
        assert!(provider.rename(&variables(&[(0, 0, "int")])).is_err());
    }

    #[test]
    fn parameter_cache_is_shared() {
        let provider = provider(AccessFlags::STATIC, "(Ljava/lang/String;)V", true);
        assert_eq!(
            provider.rename_parameter(AccessFlags::STATIC, "java.lang.String", "arg0", 0),
            "s"
        );

        let result = provider
            .rename(&variables(&[(0, 0, "String"), (1, 0, "String")]))
            .unwrap();
        assert_eq!(names(&result), ["s", "s1"]);
    }

    #[test]
    fn disabled_parameter_renaming_keeps_names() {
        let provider = provider(AccessFlags::ABSTRACT, "(I)V", false);
        assert_eq!(
            provider.rename_parameter(AccessFlags::ABSTRACT, "int", "count", 1),
            "count"
        );
        assert_eq!(
            provider.rename_parameter(AccessFlags::PUBLIC, "int", "count", 1),
            "count"
        );
    }

    #[test]
    fn adopting_self_is_a_no_op() {
        let provider = provider(AccessFlags::STATIC, "()V", false);
        provider.rename(&variables(&[(0, 0, "int")])).unwrap();
        provider.adopt(&provider);
        assert_eq!(provider.snapshot().get("int").unwrap().index(), 1);
    }
}
