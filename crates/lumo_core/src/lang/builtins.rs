//! Builtin global vocabulary.
//!
//! This module lists the globals a stock Lua 5.2 interpreter predefines: base library
//! functions (`print`, `pairs`, ...), standard library modules (`string`, `table`, ...),
//! and special values (`_G`, `_VERSION`).
//!
//! The model builder uses this registry to classify a global reference as *builtin*
//! (environment-provided) versus *user-defined* (assigned somewhere in the project), so
//! outline/index consumers can filter interpreter noise out of "unknown global"
//! reports.
//!
//! ## Notes
//! - `require` is technically installed by the `package` library but is listed here as
//!   a base function since it is always a global in practice, and the model builder
//!   treats calls to it specially (module references).
//! - Globals removed in 5.2 but common in 5.1 code (`unpack`, `loadstring`, `module`)
//!   are kept with [`Stability::Deprecated`] so references to them still classify as
//!   builtin.

use super::registry::{LuaVersion, Stability};

/// Kind of builtin global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    /// A base-library function (`print`, `pcall`, ...).
    Function,
    /// A standard library module table (`string`, `table`, ...).
    Module,
    /// A special global value (`_G`, `_VERSION`).
    Value,
}

/// Metadata for a builtin global.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinInfo {
    pub name: &'static str,
    pub kind: BuiltinKind,
    pub introduced_in: LuaVersion,
    pub stability: Stability,
}

/// Registry of predefined globals.
pub const BUILTINS: &[BuiltinInfo] = &[
    // Base library functions
    func("assert"),
    func("collectgarbage"),
    func("dofile"),
    func("error"),
    func("getmetatable"),
    func("ipairs"),
    func("load"),
    func("loadfile"),
    func("next"),
    func("pairs"),
    func("pcall"),
    func("print"),
    func("rawequal"),
    func("rawget"),
    func("rawset"),
    func("require"),
    func("select"),
    func("setmetatable"),
    func("tonumber"),
    func("tostring"),
    func("type"),
    func("xpcall"),
    BuiltinInfo {
        name: "rawlen",
        kind: BuiltinKind::Function,
        introduced_in: LuaVersion::Lua52,
        stability: Stability::Stable,
    },
    // 5.1 leftovers, removed or renamed in 5.2
    deprecated("unpack", BuiltinKind::Function),
    deprecated("loadstring", BuiltinKind::Function),
    deprecated("module", BuiltinKind::Function),
    deprecated("setfenv", BuiltinKind::Function),
    deprecated("getfenv", BuiltinKind::Function),
    // Standard library modules
    module("coroutine"),
    module("package"),
    module("string"),
    module("table"),
    module("math"),
    module("io"),
    module("os"),
    module("debug"),
    BuiltinInfo {
        name: "bit32",
        kind: BuiltinKind::Module,
        introduced_in: LuaVersion::Lua52,
        stability: Stability::Stable,
    },
    // Special values
    value("_G"),
    value("_VERSION"),
];

/// Lookup by name.
pub fn from_str(name: &str) -> Option<&'static BuiltinInfo> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// Return `true` if `name` is a predefined global.
pub fn is_builtin(name: &str) -> bool {
    from_str(name).is_some()
}

// --- helpers -----------------------------------------------------------------

const fn func(name: &'static str) -> BuiltinInfo {
    BuiltinInfo {
        name,
        kind: BuiltinKind::Function,
        introduced_in: LuaVersion::Lua51,
        stability: Stability::Stable,
    }
}

const fn module(name: &'static str) -> BuiltinInfo {
    BuiltinInfo {
        name,
        kind: BuiltinKind::Module,
        introduced_in: LuaVersion::Lua51,
        stability: Stability::Stable,
    }
}

const fn value(name: &'static str) -> BuiltinInfo {
    BuiltinInfo {
        name,
        kind: BuiltinKind::Value,
        introduced_in: LuaVersion::Lua51,
        stability: Stability::Stable,
    }
}

const fn deprecated(name: &'static str, kind: BuiltinKind) -> BuiltinInfo {
    BuiltinInfo {
        name,
        kind,
        introduced_in: LuaVersion::Lua51,
        stability: Stability::Deprecated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert!(is_builtin("print"));
        assert!(is_builtin("string"));
        assert!(is_builtin("_G"));
        assert!(!is_builtin("my_helper"));
    }

    #[test]
    fn test_require_is_a_function() {
        let info = from_str("require").expect("require registered");
        assert_eq!(info.kind, BuiltinKind::Function);
    }

    #[test]
    fn test_deprecated_still_classify() {
        let info = from_str("unpack").expect("unpack registered");
        assert_eq!(info.stability, Stability::Deprecated);
    }
}
