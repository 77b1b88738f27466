use crate::error::{ConvertError, SessionError};
use crate::upload::client::ConvertBackend;
use crate::upload::columns::TargetColumns;
use crate::upload::types::{
    ConversionMode, ConvertPayload, ConvertRequest, SelectedFile, SessionStatus,
};
use crate::utils::download;
use derivative::Derivative;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Result of one request, tagged with the generation that issued it.
#[derive(Debug)]
struct Completion {
    generation: u64,
    outcome: Result<ConvertPayload, ConvertError>,
}

/// One conversion widget's state: the chosen file, the request in flight and
/// its outcome.
///
/// Requests run on the tokio runtime and report back over a channel that
/// [`UploadSession::poll`] drains on the UI thread. Each submission bumps the
/// generation; a completion from an older generation is dropped.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct UploadSession {
    mode: ConversionMode,
    selected_file: Option<SelectedFile>,
    uploading: bool,
    result: Option<ConvertPayload>,
    error: Option<String>,
    pub target_columns: TargetColumns,
    /// Text box backing the column editor.
    pub column_input: String,
    pub column_editor_visible: bool,
    generation: u64,
    #[derivative(Debug = "ignore")]
    completion_sender: Sender<Completion>,
    #[derivative(Debug = "ignore")]
    completion_receiver: Receiver<Completion>,
    #[derivative(Debug = "ignore")]
    task: Option<JoinHandle<()>>,
}

impl UploadSession {
    pub fn new(mode: ConversionMode) -> Self {
        let (completion_sender, completion_receiver) = channel();
        Self {
            mode,
            selected_file: None,
            uploading: false,
            result: None,
            error: None,
            target_columns: TargetColumns::new(),
            column_input: String::new(),
            column_editor_visible: false,
            generation: 0,
            completion_sender,
            completion_receiver,
            task: None,
        }
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    pub fn status(&self) -> SessionStatus {
        if self.uploading {
            SessionStatus::Uploading
        } else if self.result.is_some() {
            SessionStatus::Succeeded
        } else if self.error.is_some() {
            SessionStatus::Failed
        } else {
            SessionStatus::Idle
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    /// Raw response text of the last successful conversion.
    pub fn result_text(&self) -> Option<&str> {
        self.result.as_ref().map(ConvertPayload::text)
    }

    pub fn payload(&self) -> Option<&ConvertPayload> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the selected file. Extension and size are not checked here.
    pub fn select_file(&mut self, file: SelectedFile) {
        info!("[{}] Selected file: {}", self.mode, file.name);
        self.selected_file = Some(file);
    }

    pub fn add_target_column(&mut self, name: &str) -> bool {
        self.target_columns.add(name)
    }

    /// Add whatever is in the column text box and clear it.
    pub fn add_column_from_input(&mut self) -> bool {
        self.target_columns.add_from_input(&mut self.column_input)
    }

    pub fn remove_target_column(&mut self, index: usize) -> Option<String> {
        self.target_columns.remove(index)
    }

    pub fn toggle_column_editor(&mut self) {
        self.column_editor_visible = !self.column_editor_visible;
    }

    /// Start converting the selected file.
    ///
    /// Refused while a request is still in flight; call [`cancel`](Self::cancel) first
    /// to start over.
    pub fn submit(
        &mut self,
        backend: Arc<dyn ConvertBackend>,
        runtime: &Handle,
    ) -> Result<(), SessionError> {
        if self.uploading {
            return Err(SessionError::InFlight);
        }
        let file = self
            .selected_file
            .clone()
            .ok_or(SessionError::NoFileSelected)?;

        let columns = if self.mode.supports_columns() {
            self.target_columns.as_slice().to_vec()
        } else {
            Vec::new()
        };

        self.generation += 1;
        self.uploading = true;
        self.result = None;
        self.error = None;

        info!(
            "[{}] Starting conversion #{} of '{}'",
            self.mode, self.generation, file.name
        );

        let request = ConvertRequest {
            mode: self.mode,
            file,
            columns,
        };
        let generation = self.generation;
        let sender = self.completion_sender.clone();

        self.task = Some(runtime.spawn(async move {
            let outcome = backend.convert(request).await;
            // The session may be gone by now; nothing to report to then.
            let _ = sender.send(Completion {
                generation,
                outcome,
            });
        }));

        Ok(())
    }

    /// Apply finished requests. Returns `true` if the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_receiver.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation || !self.uploading {
            debug!(
                "[{}] Discarding stale completion #{} (current #{})",
                self.mode, completion.generation, self.generation
            );
            return false;
        }

        self.uploading = false;
        self.task = None;

        match completion.outcome {
            Ok(payload) => {
                info!(
                    "[{}] Conversion #{} succeeded ({} bytes)",
                    self.mode,
                    completion.generation,
                    payload.text().len()
                );
                self.result = Some(payload);
                self.error = None;
            }
            Err(e) => {
                warn!(
                    "[{}] Conversion #{} failed: {:?}",
                    self.mode, completion.generation, e
                );
                self.result = None;
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Abandon the request in flight and go back to idle.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if self.uploading {
            info!("[{}] Cancelled conversion #{}", self.mode, self.generation);
            self.generation += 1;
            self.uploading = false;
        }
    }

    /// Write the converted text to `dir` as `converted-<millis>.csv`.
    pub fn download(&self, dir: &Path) -> Result<PathBuf, SessionError> {
        let text = self.result_text().ok_or(SessionError::NothingToDownload)?;
        Ok(download::save_csv_in(dir, text)?)
    }

    /// Write the converted text to an exact path picked by the user.
    pub fn download_to(&self, path: &Path) -> Result<(), SessionError> {
        let text = self.result_text().ok_or(SessionError::NothingToDownload)?;
        Ok(download::save_csv_to(path, text)?)
    }
}

impl Drop for UploadSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};
    use tokio::runtime::Runtime;

    type Respond = Box<dyn Fn(&ConvertRequest) -> Result<ConvertPayload, ConvertError> + Send + Sync>;

    struct StubBackend {
        respond: Respond,
        delay: Duration,
        requests: Mutex<Vec<ConvertRequest>>,
        finished: Arc<AtomicBool>,
    }

    impl StubBackend {
        fn new(delay: Duration, respond: Respond) -> Arc<Self> {
            Arc::new(Self {
                respond,
                delay,
                requests: Mutex::new(Vec::new()),
                finished: Arc::new(AtomicBool::new(false)),
            })
        }

        fn csv(body: &'static str) -> Arc<Self> {
            Self::new(
                Duration::from_millis(20),
                Box::new(move |_| Ok(ConvertPayload::Csv(body.to_string()))),
            )
        }

        fn failing(status: u16) -> Arc<Self> {
            Self::new(
                Duration::from_millis(20),
                Box::new(move |_| Err(ConvertError::Rejected { status })),
            )
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl ConvertBackend for StubBackend {
        fn convert(
            &self,
            request: ConvertRequest,
        ) -> BoxFuture<'_, Result<ConvertPayload, ConvertError>> {
            let outcome = (self.respond)(&request);
            self.requests.lock().unwrap().push(request);
            let delay = self.delay;
            let finished = self.finished.clone();
            async move {
                tokio::time::sleep(delay).await;
                finished.store(true, Ordering::SeqCst);
                outcome
            }
            .boxed()
        }
    }

    fn pdf() -> SelectedFile {
        SelectedFile::from_bytes("statement.pdf", b"%PDF-1.4".to_vec())
    }

    fn wait_until_settled(session: &mut UploadSession) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            session.poll();
            if !session.is_uploading() {
                return;
            }
            assert!(Instant::now() < deadline, "session never settled");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn new_session_is_idle() {
        let session = UploadSession::new(ConversionMode::Ai);
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.selected_file().is_none());
        assert!(session.result_text().is_none());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn success_goes_through_uploading() {
        let rt = Runtime::new().unwrap();
        let backend = StubBackend::csv("a,b\n1,2");
        let mut session = UploadSession::new(ConversionMode::Standard);
        session.select_file(pdf());
        assert_eq!(session.status(), SessionStatus::Idle);

        session.submit(backend.clone(), rt.handle()).unwrap();
        assert_eq!(session.status(), SessionStatus::Uploading);

        wait_until_settled(&mut session);
        assert_eq!(session.status(), SessionStatus::Succeeded);
        assert_eq!(session.result_text(), Some("a,b\n1,2"));
        assert!(session.error_message().is_none());
    }

    #[test]
    fn download_writes_result_verbatim() {
        let rt = Runtime::new().unwrap();
        let mut session = UploadSession::new(ConversionMode::Ai);
        session.select_file(pdf());
        session.submit(StubBackend::csv("a,b\n1,2"), rt.handle()).unwrap();
        wait_until_settled(&mut session);

        let dir = tempfile::tempdir().unwrap();
        let path = session.download(dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("converted-") && name.ends_with(".csv"), "got: {name}");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "a,b\n1,2");
    }

    #[test]
    fn server_error_fails_with_message() {
        let rt = Runtime::new().unwrap();
        let mut session = UploadSession::new(ConversionMode::Standard);
        session.select_file(pdf());
        session.submit(StubBackend::failing(500), rt.handle()).unwrap();
        wait_until_settled(&mut session);

        assert_eq!(session.status(), SessionStatus::Failed);
        assert_eq!(session.error_message(), Some("Conversion failed"));
        assert!(session.result_text().is_none());
    }

    #[test]
    fn download_requires_success() {
        let session = UploadSession::new(ConversionMode::Standard);
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            session.download(dir.path()),
            Err(SessionError::NothingToDownload)
        ));
    }

    #[test]
    fn submit_without_file_is_refused() {
        let rt = Runtime::new().unwrap();
        let backend = StubBackend::csv("x");
        let mut session = UploadSession::new(ConversionMode::Ai);

        let err = session.submit(backend.clone(), rt.handle()).unwrap_err();
        assert!(matches!(err, SessionError::NoFileSelected));
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(backend.request_count(), 0);
    }

    #[test]
    fn resubmit_while_uploading_is_refused() {
        let rt = Runtime::new().unwrap();
        let backend = StubBackend::new(
            Duration::from_millis(100),
            Box::new(|_| Ok(ConvertPayload::Csv("x".into()))),
        );
        let mut session = UploadSession::new(ConversionMode::Ai);
        session.select_file(pdf());
        session.submit(backend.clone(), rt.handle()).unwrap();

        let err = session.submit(backend.clone(), rt.handle()).unwrap_err();
        assert!(matches!(err, SessionError::InFlight));

        wait_until_settled(&mut session);
        assert_eq!(backend.request_count(), 1);
        assert_eq!(session.generation, 1);
    }

    #[test]
    fn resubmit_clears_previous_outcome() {
        let rt = Runtime::new().unwrap();
        let mut session = UploadSession::new(ConversionMode::Standard);
        session.select_file(pdf());
        session.submit(StubBackend::failing(422), rt.handle()).unwrap();
        wait_until_settled(&mut session);
        assert_eq!(session.status(), SessionStatus::Failed);

        session.submit(StubBackend::csv("a"), rt.handle()).unwrap();
        assert_eq!(session.status(), SessionStatus::Uploading);
        assert!(session.error_message().is_none());
        assert!(session.result_text().is_none());

        wait_until_settled(&mut session);
        assert_eq!(session.status(), SessionStatus::Succeeded);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut session = UploadSession::new(ConversionMode::Ai);
        session.generation = 3;
        session.uploading = true;

        let applied = session.apply(Completion {
            generation: 2,
            outcome: Ok(ConvertPayload::Csv("old".into())),
        });
        assert!(!applied);
        assert_eq!(session.status(), SessionStatus::Uploading);

        let applied = session.apply(Completion {
            generation: 3,
            outcome: Ok(ConvertPayload::Csv("new".into())),
        });
        assert!(applied);
        assert_eq!(session.result_text(), Some("new"));
    }

    #[test]
    fn cancel_returns_to_idle_and_drops_late_result() {
        let rt = Runtime::new().unwrap();
        let backend = StubBackend::new(
            Duration::from_millis(100),
            Box::new(|_| Ok(ConvertPayload::Csv("late".into()))),
        );
        let mut session = UploadSession::new(ConversionMode::Standard);
        session.select_file(pdf());
        session.submit(backend.clone(), rt.handle()).unwrap();

        session.cancel();
        assert_eq!(session.status(), SessionStatus::Idle);

        std::thread::sleep(Duration::from_millis(250));
        session.poll();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.result_text().is_none());
        assert!(!backend.finished.load(Ordering::SeqCst));
    }

    #[test]
    fn dropping_session_aborts_request() {
        let rt = Runtime::new().unwrap();
        let backend = StubBackend::new(
            Duration::from_millis(100),
            Box::new(|_| Ok(ConvertPayload::Csv("x".into()))),
        );
        let mut session = UploadSession::new(ConversionMode::Ai);
        session.select_file(pdf());
        session.submit(backend.clone(), rt.handle()).unwrap();
        drop(session);

        std::thread::sleep(Duration::from_millis(250));
        assert!(!backend.finished.load(Ordering::SeqCst));
    }

    #[test]
    fn columns_only_sent_in_ai_mode() {
        let rt = Runtime::new().unwrap();

        let ai_backend = StubBackend::csv("x");
        let mut ai = UploadSession::new(ConversionMode::Ai);
        ai.add_target_column("Date");
        ai.add_target_column("Amount");
        ai.select_file(pdf());
        ai.submit(ai_backend.clone(), rt.handle()).unwrap();
        wait_until_settled(&mut ai);

        let standard_backend = StubBackend::csv("x");
        let mut standard = UploadSession::new(ConversionMode::Standard);
        standard.add_target_column("Date");
        standard.select_file(pdf());
        standard.submit(standard_backend.clone(), rt.handle()).unwrap();
        wait_until_settled(&mut standard);

        assert_eq!(ai_backend.requests.lock().unwrap()[0].columns, ["Date", "Amount"]);
        assert!(standard_backend.requests.lock().unwrap()[0].columns.is_empty());
    }

    #[test]
    fn column_editor_input_round() {
        let mut session = UploadSession::new(ConversionMode::Ai);
        session.column_input = "  Date ".to_string();
        assert!(session.add_column_from_input());
        assert!(session.column_input.is_empty());
        assert!(!session.add_target_column("   "));
        assert_eq!(session.target_columns.as_slice(), ["Date"]);
        assert_eq!(session.remove_target_column(3), None);

        assert!(!session.column_editor_visible);
        session.toggle_column_editor();
        assert!(session.column_editor_visible);
    }

    #[test]
    fn sessions_do_not_interfere() {
        let rt = Runtime::new().unwrap();
        let mut ai = UploadSession::new(ConversionMode::Ai);
        let mut standard = UploadSession::new(ConversionMode::Standard);
        ai.select_file(pdf());
        standard.select_file(pdf());

        ai.submit(StubBackend::csv("ai,result"), rt.handle()).unwrap();
        standard.submit(StubBackend::failing(503), rt.handle()).unwrap();
        assert_eq!(ai.status(), SessionStatus::Uploading);
        assert_eq!(standard.status(), SessionStatus::Uploading);

        wait_until_settled(&mut ai);
        wait_until_settled(&mut standard);

        assert_eq!(ai.status(), SessionStatus::Succeeded);
        assert_eq!(ai.result_text(), Some("ai,result"));
        assert!(ai.error_message().is_none());

        assert_eq!(standard.status(), SessionStatus::Failed);
        assert!(standard.result_text().is_none());
        assert!(standard.error_message().is_some());
    }
}
