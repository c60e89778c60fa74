//! Integration tests for the merge shell, end to end through the file system.

use pdfmerge::config::{CompressionLevel, Config, OverwriteMode};
use pdfmerge::io::Downloader;
use pdfmerge::shell::{
    FALLBACK_ERROR_MESSAGE, MERGING_MESSAGE, MergeShell, MergeStatus, SelectedFile,
};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{assert_widths, page_widths, write_file, write_pdf};

struct Workspace {
    inputs: TempDir,
    downloads: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            inputs: TempDir::new().unwrap(),
            downloads: TempDir::new().unwrap(),
        }
    }

    fn pdf(&self, name: &str, widths: &[i64]) -> PathBuf {
        write_pdf(self.inputs.path(), name, widths)
    }

    fn config(&self, inputs: Vec<PathBuf>) -> Config {
        Config {
            inputs,
            output_dir: self.downloads.path().to_path_buf(),
            ..Config::default()
        }
    }

    fn download(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.downloads.path().join(name)).unwrap()
    }
}

#[tokio::test]
async fn test_enablement_follows_selection() {
    let ws = Workspace::new();
    let one = ws.pdf("one.pdf", &[100]);
    let two = ws.pdf("two.pdf", &[200]);
    let mut shell = MergeShell::new();

    shell.select_paths(&[one.clone()]).await.unwrap();
    assert!(!shell.can_merge());

    shell.select_paths(&[one.clone(), two]).await.unwrap();
    assert!(shell.can_merge());

    shell.select_paths(&[one]).await.unwrap();
    assert!(!shell.can_merge());
}

#[tokio::test]
async fn test_full_flow_from_config() {
    let ws = Workspace::new();
    let cover = ws.pdf("cover.pdf", &[400]);
    let body = ws.pdf("body.pdf", &[380, 360]);
    let config = Config {
        compression: CompressionLevel::Maximum,
        ..ws.config(vec![cover, body])
    };
    let mut shell = MergeShell::from_config(&config);
    shell.select_paths(config.inputs()).await.unwrap();

    let delivery = shell
        .merge(&Downloader::from_config(&config))
        .await
        .expect("action enabled")
        .expect("merge succeeds");

    assert_eq!(shell.status(), MergeStatus::Success);
    assert_eq!(delivery.mime_type, "application/pdf");
    assert_eq!(delivery.file_name(), "merged.pdf");
    assert_widths(&page_widths(&ws.download("merged.pdf")), &[400.0, 380.0, 360.0]);
}

#[tokio::test]
async fn test_reselect_after_error_returns_to_idle() {
    let ws = Workspace::new();
    let good = ws.pdf("good.pdf", &[100]);
    let bad = write_file(ws.inputs.path(), "bad.pdf", b"plain text");
    let mut shell = MergeShell::new();
    let downloader = Downloader::new(ws.downloads.path());

    shell.select_paths(&[good.clone(), bad]).await.unwrap();
    shell.merge(&downloader).await.unwrap().unwrap_err();
    assert_eq!(shell.status(), MergeStatus::Error);
    assert!(!shell.message().is_empty());
    assert_ne!(shell.message(), FALLBACK_ERROR_MESSAGE);

    let other = ws.pdf("other.pdf", &[200]);
    shell.select_paths(&[good, other]).await.unwrap();

    assert_eq!(shell.status(), MergeStatus::Idle);
    assert_eq!(shell.message(), "");

    shell.merge(&downloader).await.unwrap().unwrap();
    assert_eq!(shell.status(), MergeStatus::Success);
}

#[tokio::test]
async fn test_selection_during_merge_discards_stale_result() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", &[100]);
    let b = ws.pdf("b.pdf", &[200]);
    let mut shell = MergeShell::new();
    shell.select_paths(&[a.clone(), b]).await.unwrap();

    let job = shell.start_merge().expect("action enabled");
    assert_eq!(shell.message(), MERGING_MESSAGE);

    // The host reports a new selection before the merge settles.
    shell.select_paths(&[a]).await.unwrap();
    let outcome = job.run(&Downloader::new(ws.downloads.path())).await;
    assert!(outcome.is_success());

    assert!(!shell.finish_merge(outcome));
    assert_eq!(shell.status(), MergeStatus::Idle);
    assert!(shell.message().is_empty());
}

#[tokio::test]
async fn test_repeated_merges_keep_every_download() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", &[100]);
    let b = ws.pdf("b.pdf", &[200]);
    let config = ws.config(vec![a, b]);
    let downloader = Downloader::from_config(&config);
    let mut shell = MergeShell::from_config(&config);
    shell.select_paths(config.inputs()).await.unwrap();

    for _ in 0..3 {
        shell.merge(&downloader).await.unwrap().unwrap();
    }

    ws.download("merged.pdf");
    ws.download("merged (1).pdf");
    ws.download("merged (2).pdf");
}

#[tokio::test]
async fn test_force_replaces_previous_download() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", &[100]);
    let b = ws.pdf("b.pdf", &[200]);
    let c = ws.pdf("c.pdf", &[300]);
    let config = Config {
        overwrite_mode: OverwriteMode::Force,
        ..ws.config(vec![])
    };
    let downloader = Downloader::from_config(&config);
    let mut shell = MergeShell::from_config(&config);

    shell.select_paths(&[a.clone(), b]).await.unwrap();
    shell.merge(&downloader).await.unwrap().unwrap();
    shell.select_paths(&[a, c]).await.unwrap();
    shell.merge(&downloader).await.unwrap().unwrap();

    assert_widths(&page_widths(&ws.download("merged.pdf")), &[100.0, 300.0]);
    assert_eq!(std::fs::read_dir(ws.downloads.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_selection_reports_names_and_sizes() {
    let ws = Workspace::new();
    let path = write_file(ws.inputs.path(), "report.pdf", &vec![0u8; 12_595]);
    let mut shell = MergeShell::new();

    shell.select_paths(&[path.clone()]).await.unwrap();

    assert_eq!(
        shell.selected_files(),
        &[SelectedFile {
            name: "report.pdf".to_string(),
            path,
            size: 12_595,
        }]
    );
    assert_eq!(shell.selected_files()[0].size_label(), "12.3 KB");
}

#[tokio::test]
async fn test_snapshot_json_shape() {
    let ws = Workspace::new();
    let a = ws.pdf("a.pdf", &[100]);
    let mut shell = MergeShell::new();
    shell.select_paths(&[a]).await.unwrap();

    let json = serde_json::to_value(shell.snapshot()).unwrap();

    assert_eq!(json["status"], "idle");
    assert_eq!(json["message"], "");
    assert_eq!(json["canMerge"], false);
    assert_eq!(json["mergeButtonLabel"], "Merge");
    assert_eq!(json["selectedFiles"][0]["name"], "a.pdf");
}
