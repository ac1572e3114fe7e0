use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

use crate::api::Backend;
use crate::config::Config;
use crate::data::filter::{filtered_indices, FilterState};
use crate::data::model::{Category, ClassificationResult};
use crate::data::upload::UploadSet;
use crate::jobs::{self, JobMessage, Repaint, Stage};

pub const PROCESS_FAILED_MESSAGE: &str =
    "Failed to process files. Please ensure files are valid .xlsx or .csv ATC exports.";
pub const EXPORT_FAILED_MESSAGE: &str = "Export failed";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    backend: Arc<dyn Backend>,

    /// Files queued for the next classification run.
    pub uploads: UploadSet,

    /// Result of the last successful run.
    pub result: Option<ClassificationResult>,

    /// Table filters and page window.
    pub filter: FilterState,

    /// Indices into `result.records` passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Current progress stage; `None` while idle.
    pub loading_stage: Option<Stage>,

    /// Whether an export request is in flight.
    pub exporting: bool,

    /// Blocking notification shown in a modal until dismissed.
    pub notification: Option<String>,

    /// Non-blocking status line (e.g. where the export was saved).
    pub status_message: Option<String>,

    pub dark_mode: bool,

    job: Option<Receiver<JobMessage>>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Self {
        Self {
            config,
            backend,
            uploads: UploadSet::default(),
            result: None,
            filter: FilterState::default(),
            visible_indices: Vec::new(),
            loading_stage: None,
            exporting: false,
            notification: None,
            status_message: None,
            dark_mode: false,
            job: None,
        }
    }

    /// A job is running; new ones are refused until it reports back.
    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    pub fn can_start_classification(&self) -> bool {
        !self.is_busy() && !self.uploads.is_empty()
    }

    pub fn can_export(&self) -> bool {
        !self.is_busy() && self.result.as_ref().is_some_and(|r| !r.is_empty())
    }

    // -- Submission ---------------------------------------------------------

    /// Send the queued files for classification. No-op without files.
    pub fn start_classification(&mut self, repaint: Repaint) {
        if !self.can_start_classification() {
            return;
        }
        log::info!("Submitting {} file(s) for classification", self.uploads.len());
        self.loading_stage = Some(Stage::ReadingFiles);
        self.status_message = None;
        self.job = Some(jobs::spawn_classification(
            self.backend.clone(),
            self.uploads.files().to_vec(),
            repaint,
        ));
    }

    // -- Export -------------------------------------------------------------

    /// Export the full, unfiltered record list to `destination`.
    pub fn start_export(&mut self, destination: PathBuf, repaint: Repaint) {
        if !self.can_export() {
            return;
        }
        let Some(result) = &self.result else {
            return;
        };
        log::info!(
            "Exporting {} records to {}",
            result.len(),
            destination.display()
        );
        self.exporting = true;
        self.job = Some(jobs::spawn_export(
            self.backend.clone(),
            result.records.clone(),
            destination,
            repaint,
        ));
    }

    // -- Job polling --------------------------------------------------------

    /// Drain messages from the running job. Called once per frame.
    ///
    /// `GeneratingReport` is shown for the frame that presents a new result;
    /// the following poll returns the progress bar to idle.
    pub fn poll_jobs(&mut self) {
        if self.job.is_none() && self.loading_stage == Some(Stage::GeneratingReport) {
            self.loading_stage = None;
            return;
        }
        loop {
            let Some(rx) = &self.job else {
                return;
            };
            match rx.try_recv() {
                Ok(message) => self.handle_message(message),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.job = None;
                    self.abort_interrupted_job();
                    return;
                }
            }
        }
    }

    fn handle_message(&mut self, message: JobMessage) {
        match message {
            JobMessage::Stage(stage) => {
                log::debug!("Classification stage: {stage}");
                self.loading_stage = Some(stage);
            }
            JobMessage::Classified(Ok(result)) => {
                self.job = None;
                self.loading_stage = Some(Stage::GeneratingReport);
                log::info!(
                    "Classified {} findings (average confidence {})",
                    result.len(),
                    result.avg_confidence
                );
                self.set_result(result);
            }
            JobMessage::Classified(Err(e)) => {
                self.job = None;
                log::error!("Classification failed: {e:#}");
                self.loading_stage = None;
                self.notification = Some(PROCESS_FAILED_MESSAGE.to_string());
            }
            JobMessage::Exported(Ok(path)) => {
                self.job = None;
                self.exporting = false;
                log::info!("Saved export to {}", path.display());
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            JobMessage::Exported(Err(e)) => {
                self.job = None;
                self.exporting = false;
                log::error!("Export failed: {e:#}");
                self.notification = Some(EXPORT_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// The worker hung up without a final message.
    fn abort_interrupted_job(&mut self) {
        if self.loading_stage.take().is_some() {
            log::error!("Classification worker exited without a result");
            self.notification = Some(PROCESS_FAILED_MESSAGE.to_string());
        }
        if self.exporting {
            self.exporting = false;
            log::error!("Export worker exited without a result");
            self.notification = Some(EXPORT_FAILED_MESSAGE.to_string());
        }
    }

    // -- Result store -------------------------------------------------------

    /// Replace the current result wholesale. Filters carry over and are
    /// applied to the new records.
    pub fn set_result(&mut self, result: ClassificationResult) {
        self.result = Some(result);
        self.refilter();
        let page = self.filter.page();
        self.filter.set_page(page, self.visible_indices.len());
    }

    /// Drop the result and the queued files.
    pub fn clear_results(&mut self) {
        self.result = None;
        self.visible_indices.clear();
        self.filter = FilterState::default();
        self.uploads.clear();
        self.status_message = None;
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    // -- Filters ------------------------------------------------------------

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(result) = &self.result {
            self.visible_indices = filtered_indices(&result.records, &self.filter);
        }
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filter.set_category(category);
        self.refilter();
    }

    pub fn set_priority(&mut self, priority: Option<String>) {
        self.filter.set_priority(priority);
        self.refilter();
    }

    pub fn set_min_confidence(&mut self, threshold: Option<u8>) {
        self.filter.set_min_confidence(threshold);
        self.refilter();
    }

    pub fn set_keyword(&mut self, keyword: String) {
        self.filter.set_keyword(keyword);
        self.refilter();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.filter.set_page_size(page_size);
    }

    pub fn next_page(&mut self) {
        self.filter.next_page(self.visible_indices.len());
    }

    pub fn prev_page(&mut self) {
        self.filter.prev_page(self.visible_indices.len());
    }

    /// Indices of the records shown on the current page.
    pub fn page_indices(&self) -> &[usize] {
        let window = self.filter.page_window(self.visible_indices.len());
        &self.visible_indices[window]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::Ordering;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    use crate::jobs::tests::{no_repaint, sample_result, temp_upload, FakeBackend};

    fn state_with(backend: Arc<FakeBackend>) -> AppState {
        AppState::new(Config::default(), backend)
    }

    fn wait_for_idle(state: &mut AppState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while state.is_busy() {
            assert!(Instant::now() < deadline, "job did not finish");
            state.poll_jobs();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn empty_upload_set_never_calls_the_backend() {
        let backend = Arc::new(FakeBackend::default());
        let mut state = state_with(backend.clone());
        state.start_classification(no_repaint());
        assert!(!state.is_busy());
        assert_eq!(state.loading_stage, None);
        assert_eq!(backend.classify_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn successful_run_stores_result_and_returns_to_idle() {
        let backend = Arc::new(FakeBackend::default());
        let mut state = state_with(backend.clone());
        let file = temp_upload("success.csv");
        state.uploads.add_dropped(vec![file.clone()]);

        state.start_classification(no_repaint());
        assert_eq!(state.loading_stage, Some(Stage::ReadingFiles));
        wait_for_idle(&mut state);
        fs::remove_file(file).unwrap();

        assert_eq!(state.loading_stage, Some(Stage::GeneratingReport));
        state.poll_jobs();
        assert_eq!(state.loading_stage, None);
        assert_eq!(state.result.as_ref().map(|r| r.len()), Some(2));
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert!(state.notification.is_none());
        assert_eq!(backend.uploaded_names.lock().unwrap().len(), 1);
    }

    #[test]
    fn failed_run_resets_progress_and_keeps_no_result() {
        let backend = Arc::new(FakeBackend {
            fail_classify: true,
            ..FakeBackend::default()
        });
        let mut state = state_with(backend.clone());
        let file = temp_upload("failure.csv");
        state.uploads.add_dropped(vec![file.clone()]);

        state.start_classification(no_repaint());
        wait_for_idle(&mut state);
        fs::remove_file(file).unwrap();

        assert_eq!(state.loading_stage, None);
        assert!(state.result.is_none());
        assert_eq!(state.notification.as_deref(), Some(PROCESS_FAILED_MESSAGE));
        assert_eq!(backend.classify_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stages_advance_on_the_ui_thread_until_the_result_is_shown() {
        let mut state = state_with(Arc::new(FakeBackend::default()));
        let (tx, rx) = mpsc::channel();
        state.job = Some(rx);
        state.loading_stage = Some(Stage::ReadingFiles);

        tx.send(JobMessage::Stage(Stage::AnalyzingData)).unwrap();
        state.poll_jobs();
        assert_eq!(state.loading_stage, Some(Stage::AnalyzingData));

        tx.send(JobMessage::Stage(Stage::CategorizingFindings)).unwrap();
        state.poll_jobs();
        assert_eq!(state.loading_stage, Some(Stage::CategorizingFindings));
        assert!(state.result.is_none());

        tx.send(JobMessage::Classified(Ok(sample_result()))).unwrap();
        state.poll_jobs();
        assert_eq!(state.loading_stage, Some(Stage::GeneratingReport));
        assert!(state.result.is_some());
        assert!(!state.is_busy());

        state.poll_jobs();
        assert_eq!(state.loading_stage, None);
        assert!(state.notification.is_none());
    }

    #[test]
    fn new_result_keeps_filters_and_refilters() {
        let mut state = state_with(Arc::new(FakeBackend::default()));
        state.set_result(sample_result());
        state.set_category(Some(Category::Optional));
        assert_eq!(state.visible_indices, vec![1]);

        state.set_result(sample_result());
        assert_eq!(state.filter.category(), Some(Category::Optional));
        assert_eq!(state.visible_indices, vec![1]);
        assert_eq!(state.page_indices(), &[1]);
    }

    #[test]
    fn new_result_clamps_a_page_past_the_end() {
        let mut state = state_with(Arc::new(FakeBackend::default()));
        let mut long = sample_result();
        let template = long.records[0].clone();
        long.records = vec![template; 25];
        state.set_result(long);
        state.next_page();
        state.next_page();
        assert_eq!(state.filter.page(), 3);

        state.set_result(sample_result());
        assert_eq!(state.filter.page(), 1);
        assert_eq!(state.page_indices(), &[0, 1]);
    }

    #[test]
    fn export_sends_all_records_regardless_of_filter() {
        let backend = Arc::new(FakeBackend::default());
        let mut state = state_with(backend.clone());
        state.set_result(sample_result());
        state.set_keyword("obsolete".into());
        assert_eq!(state.visible_indices.len(), 1);

        let destination = std::env::temp_dir().join(format!("atc-smart-pro-{}-state.xlsx", std::process::id()));
        state.start_export(destination.clone(), no_repaint());
        assert!(state.exporting);
        wait_for_idle(&mut state);
        fs::remove_file(destination).unwrap();

        assert!(!state.exporting);
        assert_eq!(backend.exported_records.lock().unwrap().len(), 2);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn failed_export_raises_one_notification() {
        let backend = Arc::new(FakeBackend {
            fail_export: true,
            ..FakeBackend::default()
        });
        let mut state = state_with(backend.clone());
        state.set_result(sample_result());
        let destination = std::env::temp_dir().join("atc-smart-pro-never-written.xlsx");
        state.start_export(destination.clone(), no_repaint());
        wait_for_idle(&mut state);

        assert_eq!(state.notification.as_deref(), Some(EXPORT_FAILED_MESSAGE));
        assert!(!destination.exists());
        assert_eq!(backend.export_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn export_without_records_is_a_no_op() {
        let backend = Arc::new(FakeBackend::default());
        let mut state = state_with(backend.clone());
        state.start_export(PathBuf::from("unused.xlsx"), no_repaint());
        assert!(!state.is_busy());
        assert_eq!(backend.export_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn clear_drops_result_and_uploads() {
        let mut state = state_with(Arc::new(FakeBackend::default()));
        state.uploads.add_dropped(vec![PathBuf::from("a.xlsx")]);
        state.set_result(sample_result());
        state.clear_results();
        assert!(state.result.is_none());
        assert!(state.uploads.is_empty());
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn page_indices_follow_the_filter_window() {
        let mut state = state_with(Arc::new(FakeBackend::default()));
        let mut result = sample_result();
        let template = result.records[0].clone();
        result.records = vec![template; 25];
        state.set_result(result);

        assert_eq!(state.page_indices().len(), 10);
        state.next_page();
        state.next_page();
        assert_eq!(state.page_indices(), &(20..25).collect::<Vec<_>>()[..]);
        state.set_page_size(50);
        assert_eq!(state.filter.page(), 1);
        assert_eq!(state.page_indices().len(), 25);
    }
}
