use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// JVM method access flags
    ///
    /// Naming only ever looks at [AccessFlags::STATIC], [AccessFlags::ABSTRACT] and
    /// [AccessFlags::NATIVE]; the rest are kept so a listing can spell out a full modifier list.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
    }
}

impl AccessFlags {
    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    /// Methods without a body: their parameters only ever appear in a signature
    pub fn is_bodiless(self) -> bool {
        self.intersects(Self::ABSTRACT | Self::NATIVE)
    }

    /// Look up a single modifier keyword, as written in Java source
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.bytes().any(|b| b.is_ascii_uppercase()) {
            return None;
        }
        Self::from_name(&keyword.to_ascii_uppercase())
    }
}

impl fmt::Display for AccessFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self
            .iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect();
        f.write_str(&names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodiless() {
        assert!(AccessFlags::ABSTRACT.is_bodiless());
        assert!((AccessFlags::PUBLIC | AccessFlags::NATIVE).is_bodiless());
        assert!(!(AccessFlags::PUBLIC | AccessFlags::STATIC).is_bodiless());
    }

    #[test]
    fn keywords() {
        assert_eq!(AccessFlags::from_keyword("static"), Some(AccessFlags::STATIC));
        assert_eq!(AccessFlags::from_keyword("Static"), None);
        assert_eq!(AccessFlags::from_keyword("STATIC"), None);
        assert_eq!(AccessFlags::from_keyword("volatile"), None);

        let flags = AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL;
        assert_eq!(flags.to_string(), "public static final");
    }

    #[test]
    fn bit_values() {
        let flags = AccessFlags::from_bits_truncate(0x0409);
        assert_eq!(flags, AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::ABSTRACT);
        assert_eq!(flags.bits(), 0x0409);
        assert!(flags.is_static());
        assert!(flags.is_bodiless());
        assert_eq!(AccessFlags::empty().to_string(), "");
    }
}
