//! Spec documents: owned content, title extraction and the per-spec input model.

mod content;
mod model;
mod title;
mod types;

pub use content::SpecContent;
pub use model::{SpecInputModel, SpecInputModelBuilder};
pub use title::{document_flavor, extract_title, DocumentFlavor};
pub use types::SpecReference;
