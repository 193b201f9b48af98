use std::fmt;

/// One version of a local variable slot
///
/// Ordering is by slot first and version second, which is the order names are handed out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarVersion {
    pub slot: u32,
    pub version: u32,
}

impl VarVersion {
    pub const fn new(slot: u32, version: u32) -> Self {
        Self { slot, version }
    }
}

impl fmt::Display for VarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.slot, self.version)
    }
}

impl From<(u32, u32)> for VarVersion {
    fn from((slot, version): (u32, u32)) -> Self {
        Self { slot, version }
    }
}
