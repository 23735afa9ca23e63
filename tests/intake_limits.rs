//! Intake acceptance rules: media type, size ceiling, batch ceiling, and
//! removal semantics.

use moment_trace::intake::{format_size, ImageIntake, RawFile, RejectReason, MAX_IMAGES};

fn jpeg(name: &str) -> RawFile {
    RawFile::from_bytes(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02])
}

#[tokio::test]
async fn accepts_supported_types_and_rejects_the_rest() {
    let intake = ImageIntake::new();
    let outcome = intake
        .submit(vec![
            jpeg("a.jpg"),
            RawFile::from_bytes("b.png", "image/png", vec![1, 2, 3]),
            RawFile::from_bytes("notes.txt", "text/plain", vec![4, 5]),
            RawFile::from_bytes("clip.webp", "image/webp", vec![6]),
        ])
        .await;

    assert_eq!(outcome.accepted, 3);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].name, "notes.txt");
    assert_eq!(outcome.rejected[0].reason, RejectReason::UnsupportedType);
    assert_eq!(intake.count(), 3);
}

#[tokio::test]
async fn rejects_oversized_file_but_keeps_siblings() {
    let intake = ImageIntake::new();
    let oversized = vec![0u8; (10 * 1024 * 1024) + 1];
    let outcome = intake
        .submit(vec![
            jpeg("ok1.jpg"),
            RawFile::from_bytes("huge.png", "image/png", oversized),
            jpeg("ok2.jpg"),
        ])
        .await;

    assert_eq!(outcome.accepted, 2);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].reason, RejectReason::FileTooLarge);
    assert_eq!(intake.count(), 2);
}

#[tokio::test]
async fn truncates_at_the_batch_ceiling() {
    let intake = ImageIntake::new();
    let files: Vec<RawFile> = (0..25).map(|i| jpeg(&format!("img{i}.jpg"))).collect();
    let outcome = intake.submit(files).await;

    assert_eq!(outcome.accepted, MAX_IMAGES);
    assert_eq!(outcome.truncated, 5);
    assert_eq!(
        outcome
            .rejected
            .iter()
            .filter(|r| r.reason == RejectReason::BatchFull)
            .count(),
        5
    );
    assert_eq!(intake.count(), MAX_IMAGES);
}

#[tokio::test]
async fn batch_never_exceeds_ceiling_under_concurrent_submits() {
    let intake = ImageIntake::new();
    let batch_a: Vec<RawFile> = (0..15).map(|i| jpeg(&format!("a{i}.jpg"))).collect();
    let batch_b: Vec<RawFile> = (0..15).map(|i| jpeg(&format!("b{i}.jpg"))).collect();

    let (out_a, out_b) = tokio::join!(intake.submit(batch_a), intake.submit(batch_b));

    assert_eq!(out_a.accepted + out_b.accepted, MAX_IMAGES);
    assert_eq!(out_a.truncated + out_b.truncated, 10);
    assert_eq!(intake.count(), MAX_IMAGES);
}

#[tokio::test]
async fn read_failure_does_not_abort_sibling_decodes() {
    let intake = ImageIntake::new();
    let outcome = intake
        .submit(vec![
            jpeg("good.jpg"),
            RawFile::from_path(
                "missing.png",
                "image/png",
                std::path::PathBuf::from("/nonexistent/missing.png"),
            ),
            jpeg("also-good.jpg"),
        ])
        .await;

    assert_eq!(intake.count(), 2);
    let read_failures: Vec<_> = outcome
        .rejected
        .iter()
        .filter(|r| matches!(r.reason, RejectReason::ReadFailure(_)))
        .collect();
    assert_eq!(read_failures.len(), 1);
    assert_eq!(read_failures[0].name, "missing.png");
}

#[tokio::test]
async fn preserves_upload_order() {
    let intake = ImageIntake::new();
    intake
        .submit(vec![jpeg("first.jpg"), jpeg("second.jpg"), jpeg("third.jpg")])
        .await;

    let names: Vec<String> = intake.images().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["first.jpg", "second.jpg", "third.jpg"]);
}

#[tokio::test]
async fn encodes_to_data_uri_with_declared_type() {
    let intake = ImageIntake::new();
    intake
        .submit(vec![RawFile::from_bytes("shot.png", "image/png", vec![9, 8, 7])])
        .await;

    let images = intake.images();
    assert_eq!(images.len(), 1);
    assert!(images[0].data_uri.starts_with("data:image/png;base64,"));
    assert_eq!(images[0].size_bytes, 3);
}

#[tokio::test]
async fn remove_is_idempotent() {
    let intake = ImageIntake::new();
    intake.submit(vec![jpeg("only.jpg")]).await;
    let id = intake.images()[0].id;

    intake.remove(id);
    assert_eq!(intake.count(), 0);
    // Second removal of the same id is a no-op.
    intake.remove(id);
    assert_eq!(intake.count(), 0);
}

#[test]
fn format_size_is_human_readable() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(2048), "2.0 KB");
    assert_eq!(format_size(10 * 1024 * 1024), "10.0 MB");
}
