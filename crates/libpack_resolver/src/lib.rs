// A wrapper around the `oxc_resolver` crate to provide a more libpack-specific API.

mod resolver;

pub use crate::resolver::{DEFAULT_EXTENSIONS, ResolveReturn, Resolver};

pub use oxc_resolver::ResolveError;
