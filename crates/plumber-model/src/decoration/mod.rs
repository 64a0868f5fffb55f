mod config;
pub use config::DecorationConfig;

mod validate;
pub use validate::{DecorationValidator, GraceWithinTimeout, Permissive};
