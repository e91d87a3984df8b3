//! End-to-end test for the autostatic plugin.
//!
//! Builds a temporary content tree laid out per the site settings, scans a
//! document's metadata, and verifies that exactly the referenced assets
//! land in the output tree.

use std::fs;

use devnotes_autostatic::{scan_document, CopyStats, ReferenceCopier};
use devnotes_core::Config;
use tempfile::TempDir;

const DOCUMENT: &str = r#"---
title: Profiling allocators
date: 2019-06-02
tags: rust, perf
statics:
  - '{static 'images/heap-flame.png'}'
  - '{static 'extra/report.pdf' output=downloads/report.pdf}'
  - '{static 'images/missing.png'}'
---

A walk through heap profiling, with the flame graph shown as
{static 'images/heap-flame.png'} in the rendered page.
"#;

#[test]
fn document_references_are_copied() {
    let root = TempDir::new().expect("site root");
    let config = Config::default();

    let content_dir = root.path().join(&config.content.path);
    let output_dir = root.path().join(&config.content.output_path);

    for (rel, bytes) in [
        ("images/heap-flame.png", b"png bytes".as_slice()),
        ("images/unreferenced.png", b"unused".as_slice()),
        ("extra/report.pdf", b"pdf bytes".as_slice()),
    ] {
        let path = content_dir.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(path, bytes).expect("write asset");
    }

    let references = scan_document(DOCUMENT);
    assert_eq!(references.len(), 3);
    assert_eq!(references[0].path, "images/heap-flame.png");
    assert_eq!(references[1].path, "extra/report.pdf");
    assert_eq!(
        references[1].extra.as_deref(),
        Some("output=downloads/report.pdf")
    );
    assert_eq!(references[2].path, "images/missing.png");

    let copier = ReferenceCopier::new(&content_dir, &output_dir);
    let (manifest, stats) = copier.copy_references(&references).expect("copy");

    assert_eq!(stats, CopyStats { copied: 2, missing: 1 });

    assert!(output_dir.join("images/heap-flame.png").is_file());
    assert!(output_dir.join("downloads/report.pdf").is_file());

    // Only declared references are emitted.
    assert!(!output_dir.join("images/unreferenced.png").exists());
    assert!(!output_dir.join("images/missing.png").exists());

    assert_eq!(
        manifest.get("images/heap-flame.png"),
        Some("/images/heap-flame.png")
    );
    assert_eq!(
        manifest.get("extra/report.pdf"),
        Some("/downloads/report.pdf")
    );
}
