//! Integration tests for error handling and edge cases.

use pdfmerge::config::{Config, OverwriteMode};
use pdfmerge::error::{ErrorKind, PdfMergeError};
use pdfmerge::io::{Downloader, FileReader};
use pdfmerge::merge::merge_pdfs;
use rstest::rstest;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{pdf_with_widths, write_file};

#[tokio::test]
async fn test_single_document_is_rejected() {
    let err = merge_pdfs(&[pdf_with_widths(&[400])]).await.unwrap_err();

    assert_eq!(err.to_string(), "Please provide at least two PDFs to merge.");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_empty_input_is_rejected() {
    let inputs: Vec<Vec<u8>> = Vec::new();

    let err = merge_pdfs(&inputs).await.unwrap_err();

    assert!(matches!(err, PdfMergeError::NotEnoughInputs { provided: 0 }));
    assert_eq!(err.to_string(), "Please provide at least two PDFs to merge.");
}

#[rstest]
#[case::plain_text(b"hello world".to_vec())]
#[case::empty(Vec::new())]
#[tokio::test]
async fn test_undecodable_input_fails(#[case] garbage: Vec<u8>) {
    let err = merge_pdfs(&[pdf_with_widths(&[100]), garbage])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(matches!(err, PdfMergeError::Decode { index: 1, .. }));
    assert!(!err.to_string().is_empty());
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_first_undecodable_input_wins() {
    let err = merge_pdfs(&[b"bad".to_vec(), b"worse".to_vec()])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfMergeError::Decode { index: 0, .. }));
}

#[tokio::test]
async fn test_read_nonexistent_file() {
    let err = FileReader::new()
        .read_all(&[PathBuf::from("/nonexistent/file.pdf")])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfMergeError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_no_clobber_keeps_existing_download() {
    let temp_dir = TempDir::new().unwrap();
    let existing = write_file(temp_dir.path(), "merged.pdf", b"keep me");
    let config = Config {
        output_dir: temp_dir.path().to_path_buf(),
        overwrite_mode: OverwriteMode::NoClobber,
        ..Config::default()
    };

    let err = Downloader::from_config(&config)
        .deliver(b"new".to_vec(), "merged.pdf")
        .await
        .unwrap_err();

    assert!(matches!(err, PdfMergeError::OutputExists { .. }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(std::fs::read(existing).unwrap(), b"keep me");
}

#[test]
fn test_config_without_inputs_is_invalid() {
    let config = Config::default();
    assert!(config.validate().is_err());
}
