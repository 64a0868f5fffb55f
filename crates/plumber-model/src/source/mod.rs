mod pull;
pub use pull::Pull;

mod refs;
pub use refs::Refs;
