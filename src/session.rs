//! Naming a whole listing
//!
//! Drives one provider per method in listing order, the way a decompiler would: a method that
//! inherits from another adopts that method's state as it stands after its own renaming.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{info, warn};

use crate::listing::{MethodListing, ParameterRequest};
use crate::provider::{
    JadNameProvider, JadNameProviderFactory, MethodInfo, NameProvider, NamingFactory,
};
use crate::{CounterRegistry, DescriptorError, VarVersion};

/// Names chosen for one method
#[derive(Debug, Clone)]
pub struct RenamedMethod {
    pub name: String,
    pub variables: BTreeMap<VarVersion, String>,
    pub parameters: Vec<(ParameterRequest, String)>,

    /// Families as they stand after naming
    pub registry: CounterRegistry,
}

impl fmt::Display for RenamedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "method {}", self.name)?;
        for (var, name) in &self.variables {
            writeln!(f, "  {var} {name}")?;
        }
        for (request, name) in &self.parameters {
            writeln!(f, "  param {} {} -> {name}", request.slot, request.name)?;
        }
        Ok(())
    }
}

/// Name every method of a listing
pub fn rename_listing(
    methods: &[MethodListing],
    factory: JadNameProviderFactory,
) -> Result<Vec<RenamedMethod>, DescriptorError> {
    let mut providers: HashMap<&str, JadNameProvider> = HashMap::new();
    let mut renamed = Vec::with_capacity(methods.len());

    for method in methods {
        let provider = factory.create(MethodInfo::new(method.flags, &method.descriptor));

        if let Some(parent) = &method.parent {
            match providers.get(parent.as_str()) {
                Some(parent) => provider.adopt(parent),
                None => warn!(method = %method.name, parent = %parent, "unknown parent method"),
            }
        }

        let variables = method.variables.iter().cloned().collect();
        let names = provider.rename(&variables)?;

        let parameters = method
            .parameters
            .iter()
            .map(|request| {
                let name = provider.rename_parameter(
                    method.flags,
                    &request.typ,
                    &request.name,
                    request.slot,
                );
                (request.clone(), name)
            })
            .collect();

        info!(method = %method.name, variables = names.len(), "named method");
        renamed.push(RenamedMethod {
            name: method.name.clone(),
            variables: names,
            parameters,
            registry: provider.snapshot(),
        });
        providers.insert(&method.name, provider);
    }

    Ok(renamed)
}
