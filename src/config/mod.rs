//! Configuration blueprints.
//!
//! [`PairConfig`] describes a pair to create; [`RegistryConfig`] bounds the
//! registry's pagination.  Both follow the `new` → `validate` pattern:
//! construction validates, and `validate` can be re-run on values that
//! arrive by other routes (e.g. deserialization).

mod pair_config;
mod registry_config;

pub use pair_config::PairConfig;
pub use registry_config::RegistryConfig;
