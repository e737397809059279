/// The module registry every format starts with.
pub const RUNTIME: &str = include_str!("./runtime.js");

/// Helpers for formats whose consumers hand externals over through `require` or globals.
pub const INTEROP: &str = include_str!("./interop.js");
