//! End-to-end tests writing a real session log and real images.

use std::sync::Arc;

use tempfile::TempDir;

use fileconv_core::{
    create_report_system,
    testing::{fixtures, MockConverter},
    ConversionOutcome, ConversionWorker, ConverterConfig, ConverterSet, Decision,
    FileSessionReporter, SessionReporter, WorkerEvent,
};

async fn answer_all(handle: &mut fileconv_core::WorkerHandle, decision: Decision) {
    while let Some(event) = handle.next_event().await {
        if let WorkerEvent::DecisionRequired(request) = event {
            request.respond(decision);
        }
    }
}

#[tokio::test]
async fn test_session_log_contents() {
    let dir = TempDir::new().unwrap();
    let sources = fixtures::write_files(dir.path(), &["a.png", "b.docx"]);
    let log_dir = dir.path().join("logs");

    let reporter = Arc::new(FileSessionReporter::new(&log_dir));
    let log_path = reporter.log_path().to_path_buf();
    let (report, writer) =
        create_report_system(reporter.clone() as Arc<dyn SessionReporter>, 16);
    let writer_task = tokio::spawn(writer.run());

    let converter = MockConverter::new();
    let mut staged = fixtures::staged(&sources[..1]);
    staged.extend(fixtures::staged(&sources[1..]));

    let mut handle = ConversionWorker::new(fixtures::registry(), fixtures::converters(&converter))
        .with_report(report)
        .start(staged, "jpg");
    answer_all(&mut handle, Decision::Keep).await;
    handle.wait().await.unwrap();
    writer_task.await.unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    let messages: Vec<&str> = content
        .lines()
        .map(|l| l.splitn(3, " | ").nth(2).unwrap())
        .collect();

    assert_eq!(messages[1], "File Conversion Session Started");
    assert!(messages.contains(&"SUCCESS | a.png -> a.jpg | original kept"));
    assert!(messages.contains(&"SKIPPED | b.docx | No conversion route from .docx to .jpg"));
    assert!(messages.contains(&"Session Summary:"));
    assert!(messages.contains(&"  Success: 1"));
    assert!(messages.contains(&"  Skipped: 1"));
    assert!(messages.contains(&"  Errors: 0"));
    assert!(log_path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("converter_"));
}

#[tokio::test]
async fn test_real_image_conversion_and_delete() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("photo.png");
    fixtures::write_png(&source, 16, 8);

    let converters = Arc::new(ConverterSet::new(ConverterConfig::default()));
    let mut handle = ConversionWorker::new(fixtures::registry(), converters)
        .start(fixtures::staged(&[&source]), "jpg");

    let mut outcome = None;
    let mut warned = false;
    while let Some(event) = handle.next_event().await {
        match event {
            WorkerEvent::Warning { .. } => warned = true,
            WorkerEvent::DecisionRequired(request) => {
                assert!(request.output.exists());
                request.respond(Decision::Delete);
            }
            WorkerEvent::ItemFinished { outcome: o, .. } => outcome = Some(o),
            _ => {}
        }
    }

    assert!(warned, "png -> jpg is lossy");
    assert!(!source.exists());
    match outcome.unwrap() {
        ConversionOutcome::Success {
            output_path, kept, ..
        } => {
            assert!(!kept);
            let decoded = image::open(&output_path).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (16, 8));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}
