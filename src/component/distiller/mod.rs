//! Every-Nth image distiller
//!
//! Lists each input folder in name order, keeps every Nth image from an offset and
//! copies the selection into a single output folder

mod error;
mod main;
mod selection;

pub use error::DistillError;
pub use main::{DistillRequest, DistillResult, Distiller};
pub use selection::Selection;
