//! I/O operations for pdfmerge.
//!
//! This module handles all file I/O the shell needs:
//! - Reading the selected files concurrently, in selection order
//! - Delivering the merged document as a download, atomically
//!
//! The merge itself never touches the file system.

pub mod download;
pub mod reader;

pub use download::{Delivery, Downloader};
pub use reader::FileReader;
