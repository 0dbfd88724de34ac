//! The two tools
//!
//! Each submodule holds one tool's run logic together with the helpers only it uses

pub mod distiller;
pub mod gatherer;

pub use distiller::Distiller;
pub use gatherer::Gatherer;
