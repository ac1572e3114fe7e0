use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use anyhow::Context;

use crate::api::{read_parts, ApiError, Backend};
use crate::data::model::{ClassificationResult, ClassifiedRecord};

// ---------------------------------------------------------------------------
// Progress stages of a classification run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    ReadingFiles,
    AnalyzingData,
    CategorizingFindings,
    GeneratingReport,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::ReadingFiles,
        Stage::AnalyzingData,
        Stage::CategorizingFindings,
        Stage::GeneratingReport,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::ReadingFiles => "Reading Files",
            Stage::AnalyzingData => "Analyzing Data",
            Stage::CategorizingFindings => "Categorizing Findings",
            Stage::GeneratingReport => "Generating Report",
        }
    }

    /// Fill fraction of the progress bar once this stage is reached.
    pub fn progress(self) -> f32 {
        (self.index() + 1) as f32 / Self::ALL.len() as f32
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Messages from worker threads to the UI thread
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum JobMessage {
    Stage(Stage),
    Classified(Result<ClassificationResult, ApiError>),
    Exported(anyhow::Result<PathBuf>),
}

/// Wakes the UI after a message is sent; egui passes `request_repaint`.
pub type Repaint = Arc<dyn Fn() + Send + Sync>;

fn send(tx: &Sender<JobMessage>, repaint: &Repaint, message: JobMessage) {
    // The receiver is gone only when the app is shutting down.
    let _ = tx.send(message);
    repaint();
}

/// Run one classification on a worker thread.
///
/// Stages 0 and 1 are reported before the request goes out and stage 2
/// once the response has arrived; the UI thread reports stage 3 itself
/// right before presenting the result.
pub fn spawn_classification(
    backend: Arc<dyn Backend>,
    files: Vec<PathBuf>,
    repaint: Repaint,
) -> Receiver<JobMessage> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        send(&tx, &repaint, JobMessage::Stage(Stage::ReadingFiles));
        let result = read_parts(&files).and_then(|parts| {
            send(&tx, &repaint, JobMessage::Stage(Stage::AnalyzingData));
            backend.classify(parts)
        });
        if result.is_ok() {
            send(&tx, &repaint, JobMessage::Stage(Stage::CategorizingFindings));
        }
        send(&tx, &repaint, JobMessage::Classified(result));
    });
    rx
}

/// Request the workbook for `records` and write it to `destination`.
pub fn spawn_export(
    backend: Arc<dyn Backend>,
    records: Vec<ClassifiedRecord>,
    destination: PathBuf,
    repaint: Repaint,
) -> Receiver<JobMessage> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = backend
            .export(&records)
            .context("export request failed")
            .and_then(|bytes| {
                fs::write(&destination, bytes)
                    .with_context(|| format!("writing {}", destination.display()))?;
                Ok(destination)
            });
        send(&tx, &repaint, JobMessage::Exported(result));
    });
    rx
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::api::UploadPart;
    use crate::data::model::tests::record;
    use crate::data::model::{Category, Priority};

    /// In-memory backend that records what it was asked to do.
    #[derive(Default)]
    pub(crate) struct FakeBackend {
        pub classify_calls: AtomicUsize,
        pub export_calls: AtomicUsize,
        pub uploaded_names: Mutex<Vec<String>>,
        pub exported_records: Mutex<Vec<ClassifiedRecord>>,
        pub fail_classify: bool,
        pub fail_export: bool,
    }

    pub(crate) fn sample_result() -> ClassificationResult {
        let records = vec![
            record(Priority::Level(1), "Field length extension", Category::Mandatory, 90.0),
            record(Priority::Label("Low".into()), "Obsolete statement", Category::Optional, 60.0),
        ];
        ClassificationResult {
            records,
            total: 2,
            by_category: [("Mandatory".to_string(), 1), ("Optional".to_string(), 1)]
                .into_iter()
                .collect(),
            avg_confidence: 75.0,
        }
    }

    impl Backend for FakeBackend {
        fn classify(&self, parts: Vec<UploadPart>) -> Result<ClassificationResult, ApiError> {
            self.classify_calls.fetch_add(1, Ordering::SeqCst);
            self.uploaded_names
                .lock()
                .unwrap()
                .extend(parts.into_iter().map(|p| p.file_name));
            if self.fail_classify {
                return Err(ApiError::Status(422));
            }
            Ok(sample_result())
        }

        fn export(&self, records: &[ClassifiedRecord]) -> Result<Vec<u8>, ApiError> {
            self.export_calls.fetch_add(1, Ordering::SeqCst);
            *self.exported_records.lock().unwrap() = records.to_vec();
            if self.fail_export {
                return Err(ApiError::Transport("connection reset".into()));
            }
            Ok(b"PK\x03\x04workbook".to_vec())
        }
    }

    pub(crate) fn no_repaint() -> Repaint {
        Arc::new(|| {})
    }

    pub(crate) fn temp_upload(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("atc-smart-pro-{}-{name}", std::process::id()));
        fs::write(&path, b"Priority,Check Title\n1,Syntax error\n").unwrap();
        path
    }

    #[test]
    fn classification_reports_stages_in_order() {
        let backend = Arc::new(FakeBackend::default());
        let file = temp_upload("stages.csv");
        let rx = spawn_classification(backend.clone(), vec![file.clone()], no_repaint());
        let messages: Vec<JobMessage> = rx.iter().collect();
        fs::remove_file(file).unwrap();

        let stages: Vec<Stage> = messages
            .iter()
            .filter_map(|m| match m {
                JobMessage::Stage(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(
            stages,
            vec![Stage::ReadingFiles, Stage::AnalyzingData, Stage::CategorizingFindings]
        );
        assert!(matches!(messages.last(), Some(JobMessage::Classified(Ok(_)))));
        assert_eq!(backend.classify_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unreadable_file_never_reaches_the_backend() {
        let backend = Arc::new(FakeBackend::default());
        let missing = std::env::temp_dir().join("atc-smart-pro-does-not-exist.xlsx");
        let rx = spawn_classification(backend.clone(), vec![missing], no_repaint());
        let messages: Vec<JobMessage> = rx.iter().collect();

        assert!(matches!(
            messages.last(),
            Some(JobMessage::Classified(Err(ApiError::Read { .. })))
        ));
        assert_eq!(backend.classify_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn export_writes_returned_bytes() {
        let backend = Arc::new(FakeBackend::default());
        let destination = std::env::temp_dir().join(format!("atc-smart-pro-{}-out.xlsx", std::process::id()));
        let rx = spawn_export(backend.clone(), sample_result().records, destination.clone(), no_repaint());

        match rx.recv().unwrap() {
            JobMessage::Exported(Ok(path)) => assert_eq!(path, destination),
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(fs::read(&destination).unwrap(), b"PK\x03\x04workbook");
        fs::remove_file(destination).unwrap();
        assert_eq!(backend.exported_records.lock().unwrap().len(), 2);
    }

    #[test]
    fn stage_progress_fills_the_bar() {
        assert_eq!(Stage::ReadingFiles.progress(), 0.25);
        assert_eq!(Stage::GeneratingReport.progress(), 1.0);
        assert_eq!(Stage::CategorizingFindings.label(), "Categorizing Findings");
    }
}
