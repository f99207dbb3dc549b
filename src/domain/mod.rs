//! Domain logic - pure version taxonomy rules independent of any tag source

pub mod branch;
pub mod requirements;
pub mod transform;
pub mod version;

pub use requirements::BuildRequirements;
pub use version::{Edition, ReleaseType};
