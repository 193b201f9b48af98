//! Variable name providers
//!
//! A [NameProvider] names the local variables of one method. The decompiler creates one provider
//! per method through a [NamingFactory], optionally lets it [adopt](NameProvider::adopt) the state
//! of the enclosing method's provider, and then asks it for names.
//!
//! [JadNameProvider] is the conventional implementation, naming variables after their types.

use std::collections::{BTreeMap, HashMap};

use crate::{AccessFlags, DescriptorError, VarVersion};

mod jad;

pub use jad::{JadNameProvider, JadNameProviderFactory};

/// The method a provider names variables for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub flags: AccessFlags,
    pub descriptor: String,
}

impl MethodInfo {
    pub fn new(flags: AccessFlags, descriptor: &str) -> Self {
        Self {
            flags,
            descriptor: String::from(descriptor),
        }
    }
}

/// What to do with a parameter name when parameters are not renamed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterHook {
    Passthrough,

    /// The method has no body, ask [NameProvider::rename_abstract_parameter]
    Bodiless,
}

impl ParameterHook {
    pub fn for_flags(flags: AccessFlags) -> Self {
        if flags.is_bodiless() {
            ParameterHook::Bodiless
        } else {
            ParameterHook::Passthrough
        }
    }
}

pub trait NameProvider {
    /// Name a method's variables given their types
    ///
    /// Variables typed as the receiver are left out, and so are parameters unless the provider
    /// renames those as well. Counters keep running across calls, so a second call with the same
    /// variables hands out different names.
    fn rename(
        &self,
        variables: &HashMap<VarVersion, String>,
    ) -> Result<BTreeMap<VarVersion, String>, DescriptorError>;

    /// Continue naming where `parent` currently stands
    ///
    /// Replaces this provider's families and aliases with a copy of the parent's.
    fn adopt(&self, parent: &Self)
    where
        Self: Sized;

    /// Name of a parameter of an abstract or native method
    fn rename_abstract_parameter(&self, name: &str, _index: u32) -> String {
        String::from(name)
    }

    /// Name of the parameter in slot `index`, given its original name
    fn rename_parameter(&self, flags: AccessFlags, _typ: &str, name: &str, index: u32) -> String {
        self.keep_parameter(flags, name, index)
    }

    /// Parameter name when parameters are not renamed
    fn keep_parameter(&self, flags: AccessFlags, name: &str, index: u32) -> String {
        match ParameterHook::for_flags(flags) {
            ParameterHook::Bodiless => self.rename_abstract_parameter(name, index),
            ParameterHook::Passthrough => String::from(name),
        }
    }
}

/// Creates one provider per method
pub trait NamingFactory {
    type Provider: NameProvider;

    fn create(&self, method: MethodInfo) -> Self::Provider;
}
