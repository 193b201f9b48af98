//! JAD-style variable naming
//!
//! Given the typed local variables of a decompiled method, hand out short, readable and
//! deterministic names: `i`, `j`, `k` for ints, `s` for strings, `afoo` for a `Foo[]`, and so on.
//! Start with [JadNameProviderFactory] and the [NameProvider] trait.

mod common;
mod descriptor;
mod provider;
mod registry;
mod session;
mod types;

pub mod listing;
pub mod tree;

pub use common::{AccessFlags, Span, VarVersion};
pub use descriptor::{DescriptorError, JvmType, MethodDescriptor};
pub use provider::{
    JadNameProvider, JadNameProviderFactory, MethodInfo, NameProvider, NamingFactory,
    ParameterHook,
};
pub use registry::{CounterRegistry, CounterState, RemapTable};
pub use session::{rename_listing, RenamedMethod};
pub use types::{canonicalize, TypeKey, TypeShape, RECEIVER};
