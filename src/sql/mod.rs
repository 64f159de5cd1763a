//! Safe SQL builder: identifiers from the allow-list or catalog only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
