//! Document Adapters
//!
//! - **MarkerDocument** - In-process `DocumentRoot` backed by a marker set

mod marker_document;

pub use marker_document::MarkerDocument;
