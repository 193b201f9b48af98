#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};

use jadnames::{
    AccessFlags, JadNameProvider, JadNameProviderFactory, MethodInfo, NamingFactory,
    RenamedMethod, VarVersion,
};

pub fn provider(flags: AccessFlags, descriptor: &str, rename_parameters: bool) -> JadNameProvider {
    JadNameProviderFactory::new(rename_parameters).create(MethodInfo::new(flags, descriptor))
}

/// A static method without parameters: every slot is a local
pub fn locals_only() -> JadNameProvider {
    provider(AccessFlags::STATIC, "()V", false)
}

pub fn variables(vars: &[(u32, u32, &str)]) -> HashMap<VarVersion, String> {
    vars.iter()
        .map(|&(slot, version, typ)| (VarVersion::new(slot, version), String::from(typ)))
        .collect()
}

/// One version per slot, slots counting up from 0
pub fn locals(types: &[&str]) -> HashMap<VarVersion, String> {
    types
        .iter()
        .enumerate()
        .map(|(slot, typ)| (VarVersion::new(slot as u32, 0), String::from(*typ)))
        .collect()
}

pub fn names(result: &BTreeMap<VarVersion, String>) -> Vec<String> {
    result.values().cloned().collect()
}

pub fn run_pipeline(src: &str, rename_parameters: bool) -> Vec<RenamedMethod> {
    let methods = jadnames::listing::parse(src).unwrap();
    jadnames::rename_listing(&methods, JadNameProviderFactory::new(rename_parameters)).unwrap()
}
