mod content;
mod state;
mod ui;

use crate::config::AppConfig;
use crate::subscribe::{SubscribeClient, SubscriptionForm};
use crate::upload::{ConversionMode, ConvertBackend, ConvertPayload, SelectedFile, ACCEPTED_EXTENSIONS};
use crate::utils::download;
use eframe::{egui, App};
use rfd::FileDialog;
use state::{DropZones, PageState};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Something the user did inside one upload panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    PickFile,
    Retry,
    Cancel,
    Download,
    AddColumn,
    RemoveColumn(usize),
    ToggleColumns,
}

/// Section the page should scroll to on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Upload,
    Subscribe,
}

pub struct DocToDataApp {
    config: AppConfig,
    backend: Arc<dyn ConvertBackend>,
    runtime: Handle,
    state: PageState,
    /// Upload zones, used to route files dropped onto the window.
    drop_zones: DropZones,
    scroll_to: Option<ScrollTarget>,
}

impl DocToDataApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        backend: Arc<dyn ConvertBackend>,
        runtime: Handle,
        notifier: Option<SubscribeClient>,
    ) -> Self {
        info!("Initializing {} converter", content::PRODUCT_NAME);
        let subscription = SubscriptionForm::new(config.subscribe_reset_delay(), notifier);
        Self {
            config,
            backend,
            runtime,
            state: PageState::new(subscription),
            drop_zones: DropZones::default(),
            scroll_to: None,
        }
    }

    /// Select `file` and immediately send it for conversion.
    pub fn start_conversion(&mut self, mode: ConversionMode, file: SelectedFile) {
        if self.state.session(mode).is_uploading() {
            self.state
                .set_error("Please wait for the current conversion to finish");
            return;
        }
        self.state.session_mut(mode).select_file(file);
        self.submit(mode);
    }

    fn submit(&mut self, mode: ConversionMode) {
        let backend = self.backend.clone();
        let session = self.state.session_mut(mode);
        if let Err(e) = session.submit(backend, &self.runtime) {
            warn!("[{}] Could not start conversion: {}", mode, e);
            self.state.set_error(e.to_string());
        }
    }

    fn download(&mut self, mode: ConversionMode) {
        let session = self.state.session(mode);
        let Some(payload) = session.payload() else {
            return;
        };

        let outcome = match payload {
            ConvertPayload::DownloadUrl { url, .. } => {
                info!("Opening download link {}", url);
                open::that(url)
                    .map(|_| Some(format!("Opened {}", url)))
                    .map_err(|e| format!("Could not open {}: {}", url, e))
            }
            ConvertPayload::Csv(_) => match &self.config.download_dir {
                Some(dir) => session
                    .download(dir)
                    .map(|path| Some(format!("Saved {}", path.display())))
                    .map_err(|e| e.to_string()),
                None => match FileDialog::new()
                    .set_file_name(&download::suggested_file_name_now())
                    .add_filter("CSV", &["csv"])
                    .save_file()
                {
                    Some(path) => session
                        .download_to(&path)
                        .map(|_| Some(format!("Saved {}", path.display())))
                        .map_err(|e| e.to_string()),
                    None => Ok(None),
                },
            },
        };

        match outcome {
            Ok(Some(message)) => self.state.set_info(message),
            Ok(None) => debug!("Save dialog dismissed"),
            Err(message) => {
                warn!("[{}] Download failed: {}", mode, message);
                self.state.set_error(message);
            }
        }
    }

    pub fn apply_panel_action(&mut self, mode: ConversionMode, action: PanelAction) {
        match action {
            PanelAction::PickFile => {
                if let Some(path) = FileDialog::new()
                    .add_filter("Documents", &ACCEPTED_EXTENSIONS[..])
                    .pick_file()
                {
                    self.start_conversion(mode, SelectedFile::from_path(path));
                }
            }
            PanelAction::Retry => self.submit(mode),
            PanelAction::Cancel => self.state.session_mut(mode).cancel(),
            PanelAction::Download => self.download(mode),
            PanelAction::AddColumn => {
                self.state.session_mut(mode).add_column_from_input();
            }
            PanelAction::RemoveColumn(index) => {
                self.state.session_mut(mode).remove_target_column(index);
            }
            PanelAction::ToggleColumns => self.state.session_mut(mode).toggle_column_editor(),
        }
    }

    pub fn submit_subscription(&mut self) {
        if let Err(e) = self.state.subscription.submit(&self.runtime) {
            debug!("Subscription not submitted: {}", e);
        }
    }

    fn route_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        let pointer = ctx.input(|i| i.pointer.hover_pos().or(i.pointer.latest_pos()));
        let Some(mode) = self.drop_zones.take_target(pointer) else {
            self.state
                .set_error("Drop the file onto one of the upload areas");
            return;
        };
        if dropped.len() > 1 {
            debug!("{} files dropped, using the first", dropped.len());
        }
        match first_dropped_file(&dropped) {
            Some(file) => self.start_conversion(mode, file),
            None => debug!("Dropped entry carried no file, ignoring"),
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.state.poll() {
            ctx.request_repaint();
        }

        self.route_dropped_files(ctx);

        if self.state.has_pending_work() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Only the first file of a multi-file drop is used.
pub fn first_dropped_file(files: &[egui::DroppedFile]) -> Option<SelectedFile> {
    files
        .first()
        .and_then(|f| SelectedFile::from_dropped(&f.name, f.path.clone(), f.bytes.clone()))
}

impl App for DocToDataApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn empty_drop_is_ignored() {
        assert!(first_dropped_file(&[]).is_none());
        let hollow = egui::DroppedFile {
            name: "ghost.pdf".into(),
            ..Default::default()
        };
        assert!(first_dropped_file(&[hollow]).is_none());
    }

    #[test]
    fn only_first_of_many_is_used() {
        let files = vec![
            egui::DroppedFile {
                path: Some(PathBuf::from("/tmp/first.pdf")),
                ..Default::default()
            },
            egui::DroppedFile {
                path: Some(PathBuf::from("/tmp/second.pdf")),
                ..Default::default()
            },
        ];
        let picked = first_dropped_file(&files).unwrap();
        assert_eq!(picked.name, "first.pdf");
    }

    #[test]
    fn in_memory_drop_keeps_its_name() {
        let files = vec![egui::DroppedFile {
            name: "scan.png".into(),
            bytes: Some(Arc::from(&b"\x89PNG"[..])),
            ..Default::default()
        }];
        let picked = first_dropped_file(&files).unwrap();
        assert_eq!(picked.name, "scan.png");
        assert_eq!(picked.size, Some(4));
    }
}
