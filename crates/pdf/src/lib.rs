//! PDF page layout backend.
//!
//! Loads documents through a dynamically bound pdfium library, reports
//! each page's text segments as layout boxes and renders the page to a
//! JPEG at the requested zoom.

pub mod layout;
pub mod raster;

pub use layout::PdfiumLayout;
pub use raster::encode_jpeg;
