pub mod bundle_output;

use std::sync::Arc;

use libpack_common::NormalizedBundlerOptions;
use libpack_resolver::Resolver;

pub type SharedResolver = Arc<Resolver>;
pub type SharedOptions = Arc<NormalizedBundlerOptions>;
