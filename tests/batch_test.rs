mod common;

use std::fs;
use std::path::PathBuf;

use common::{write_sized, FakeToolbox, RecordingReporter, Script};
use pdf_shrink::cli::SkippedPolicy;
use pdf_shrink::engine::{Arbiter, BatchDriver, Policy};
use pdf_shrink::error::BatchError;
use pdf_shrink::model::{BatchReport, CompressionMethod, CompressionOptions, MethodSelection};
use tempfile::TempDir;

fn qpdf_only() -> Policy {
    let method = CompressionMethod::StructuralOptimize;
    Policy::Explicit(MethodSelection::Single(method))
}

#[test]
fn test_mirrors_directory_structure() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");
    write_sized(&root.join("a.pdf"), 1000);
    write_sized(&root.join("sub/b.pdf"), 2000);

    let toolbox = FakeToolbox::uniform(Script::Size(500));
    let reporter = RecordingReporter::default();
    let report = BatchDriver::new(Arbiter::new(&toolbox, &reporter))
        .process_directory(
            &root,
            Some(&out),
            qpdf_only(),
            &CompressionOptions::default(),
        )
        .unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.bytes_saved, 500 + 1500);
    assert!(report.failed_paths.is_empty());
    assert_eq!(fs::metadata(out.join("a.pdf")).unwrap().len(), 500);
    assert_eq!(fs::metadata(out.join("sub/b.pdf")).unwrap().len(), 500);
    // Inputs are read-only in batch mode
    assert_eq!(fs::metadata(root.join("a.pdf")).unwrap().len(), 1000);
}

#[test]
fn test_missing_output_dir_fails_before_any_work() {
    let tmp = TempDir::new().unwrap();
    write_sized(&tmp.path().join("a.pdf"), 1000);

    let toolbox = FakeToolbox::uniform(Script::Size(500));
    let reporter = RecordingReporter::default();
    let err = BatchDriver::new(Arbiter::new(&toolbox, &reporter))
        .process_directory(
            tmp.path(),
            None,
            qpdf_only(),
            &CompressionOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(err, BatchError::MissingOutputDir));
    let calls = toolbox.calls(CompressionMethod::StructuralOptimize);
    assert!(calls.is_empty());
    assert!(reporter.lines().is_empty());
}

#[test]
fn test_empty_directory_gives_empty_report() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("readme.txt"), b"no pdfs here").unwrap();

    let toolbox = FakeToolbox::uniform(Script::Size(500));
    let reporter = RecordingReporter::default();
    let report = BatchDriver::new(Arbiter::new(&toolbox, &reporter))
        .process_directory(
            &root,
            Some(&tmp.path().join("out")),
            qpdf_only(),
            &CompressionOptions::default(),
        )
        .unwrap();

    assert_eq!(report, BatchReport::default());
    assert_eq!(report.failed_paths, Vec::<PathBuf>::new());
    assert_eq!(reporter.lines(), vec!["no inputs"]);
}

#[test]
fn test_input_must_be_a_directory() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("a.pdf");
    write_sized(&file, 1000);

    let toolbox = FakeToolbox::uniform(Script::Size(500));
    let reporter = RecordingReporter::default();
    let err = BatchDriver::new(Arbiter::new(&toolbox, &reporter))
        .process_directory(
            &file,
            Some(&tmp.path().join("out")),
            qpdf_only(),
            &CompressionOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(err, BatchError::InputNotDirectory(_)));
}

#[test]
fn test_failures_are_recorded_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");
    write_sized(&root.join("a.pdf"), 1000);
    write_sized(&root.join("b/c.pdf"), 1000);
    write_sized(&root.join("d.pdf"), 1000);

    let toolbox = FakeToolbox::uniform(Script::Reject);
    let reporter = RecordingReporter::default();
    let report = BatchDriver::new(Arbiter::new(&toolbox, &reporter))
        .process_directory(
            &root,
            Some(&out),
            qpdf_only(),
            &CompressionOptions::default(),
        )
        .unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 0);
    assert_eq!(
        report.failed_paths,
        vec![
            PathBuf::from("a.pdf"),
            PathBuf::from("b/c.pdf"),
            PathBuf::from("d.pdf")
        ]
    );
    assert!(!out.join("a.pdf").exists());
    assert!(reporter.lines().contains(&"finished 3".to_string()));
}

#[test]
fn test_skipped_file_copied_through_by_default() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");
    write_sized(&root.join("a.pdf"), 1000);

    let toolbox = FakeToolbox::uniform(Script::Size(1000));
    let reporter = RecordingReporter::default();
    let report = BatchDriver::new(Arbiter::new(&toolbox, &reporter))
        .process_directory(
            &root,
            Some(&out),
            qpdf_only(),
            &CompressionOptions::default(),
        )
        .unwrap();

    assert_eq!(report.total, 1);
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.skipped, 1);
    assert!(report.failed_paths.is_empty());
    assert_eq!(report.bytes_saved, 0);
    assert_eq!(
        fs::read(out.join("a.pdf")).unwrap(),
        fs::read(root.join("a.pdf")).unwrap()
    );
}

#[test]
fn test_skipped_file_omitted_when_requested() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");
    write_sized(&root.join("a.pdf"), 1000);

    let toolbox = FakeToolbox::uniform(Script::Size(1200));
    let reporter = RecordingReporter::default();
    let report = BatchDriver::new(Arbiter::new(&toolbox, &reporter))
        .skipped_policy(SkippedPolicy::Omit)
        .process_directory(
            &root,
            Some(&out),
            qpdf_only(),
            &CompressionOptions::default(),
        )
        .unwrap();

    assert_eq!(report.skipped, 1);
    assert!(!out.join("a.pdf").exists());
}

#[test]
fn test_parallel_jobs_match_sequential_report() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    for i in 0..12 {
        let path = root.join(format!("dir{}/file{:02}.pdf", i % 3, i));
        write_sized(&path, 1000 + i * 10);
    }

    let script = [(CompressionMethod::StructuralOptimize, Script::Size(1050))];
    let toolbox = FakeToolbox::new(&script);
    let reporter = RecordingReporter::default();
    let arbiter = Arbiter::new(&toolbox, &reporter);

    let sequential = BatchDriver::new(arbiter)
        .process_directory(
            &root,
            Some(&tmp.path().join("seq")),
            qpdf_only(),
            &CompressionOptions::default(),
        )
        .unwrap();
    let parallel = BatchDriver::new(arbiter)
        .jobs(4)
        .process_directory(
            &root,
            Some(&tmp.path().join("par")),
            qpdf_only(),
            &CompressionOptions::default(),
        )
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(parallel.total, 12);
    // Files of 1060 bytes and more shrink to 1050
    assert_eq!(parallel.succeeded, 6);
    assert_eq!(parallel.skipped, 6);
}

#[test]
fn test_race_in_batch_mode() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");
    write_sized(&root.join("scan.pdf"), 1000);

    let toolbox = FakeToolbox::new(&[
        (CompressionMethod::PostScriptOptimize, Script::Size(900)),
        (CompressionMethod::OcrOptimize, Script::Size(300)),
    ]);
    let reporter = RecordingReporter::default();
    let report = BatchDriver::new(Arbiter::new(&toolbox, &reporter))
        .process_directory(
            &root,
            Some(&out),
            Policy::Explicit(MethodSelection::All),
            &CompressionOptions::default(),
        )
        .unwrap();

    assert_eq!(report.bytes_saved, 700);
    assert_eq!(fs::metadata(out.join("scan.pdf")).unwrap().len(), 300);
    assert_eq!(common::dir_entries(&out), vec!["scan.pdf"]);
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    let out = tmp.path().join("out");
    let locked = root.join("locked");
    write_sized(&root.join("a.pdf"), 1000);
    write_sized(&locked.join("b.pdf"), 1000);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // Permission bits are not enforced for this user
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let toolbox = FakeToolbox::uniform(Script::Size(500));
    let reporter = RecordingReporter::default();
    let result = BatchDriver::new(Arbiter::new(&toolbox, &reporter)).process_directory(
        &root,
        Some(&out),
        qpdf_only(),
        &CompressionOptions::default(),
    );
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let report = result.unwrap();
    assert_eq!(report.total, 1);
    assert_eq!(report.succeeded, 1);
    assert_eq!(fs::metadata(out.join("a.pdf")).unwrap().len(), 500);
    assert!(reporter.lines().contains(&"unreadable".to_string()));
}
