use crate::subscribe::SubscriptionForm;
use crate::upload::{ConversionMode, UploadSession};
use eframe::egui::{Pos2, Rect};

/// Transient message shown in the status strip at the bottom of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug)]
pub struct PageState {
    pub ai: UploadSession,
    pub standard: UploadSession,
    pub subscription: SubscriptionForm,
    pub notice: Option<Notice>,
}

impl PageState {
    pub fn new(subscription: SubscriptionForm) -> Self {
        Self {
            ai: UploadSession::new(ConversionMode::Ai),
            standard: UploadSession::new(ConversionMode::Standard),
            subscription,
            notice: None,
        }
    }

    pub fn session(&self, mode: ConversionMode) -> &UploadSession {
        match mode {
            ConversionMode::Ai => &self.ai,
            ConversionMode::Standard => &self.standard,
        }
    }

    pub fn session_mut(&mut self, mode: ConversionMode) -> &mut UploadSession {
        match mode {
            ConversionMode::Ai => &mut self.ai,
            ConversionMode::Standard => &mut self.standard,
        }
    }

    /// Drain every background completion. Returns `true` if anything changed.
    pub fn poll(&mut self) -> bool {
        let ai = self.ai.poll();
        let standard = self.standard.poll();
        let form = self.subscription.poll();
        ai || standard || form
    }

    /// Whether something is still running and the UI should keep repainting.
    pub fn has_pending_work(&self) -> bool {
        self.ai.is_uploading() || self.standard.is_uploading() || self.subscription.is_pending()
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::Info(text.into()));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::Error(text.into()));
    }
}

/// Where each upload zone was last drawn, and which one the pointer was over.
///
/// Some platforms send no pointer motion during an OS file drag, so the drop
/// position is checked against the recorded rects before falling back to the
/// last hovered zone.
#[derive(Debug, Default)]
pub struct DropZones {
    rects: Vec<(ConversionMode, Rect)>,
    hovered: Option<ConversionMode>,
}

impl DropZones {
    pub fn record(&mut self, mode: ConversionMode, rect: Rect, pointer_inside: bool) {
        match self.rects.iter_mut().find(|(m, _)| *m == mode) {
            Some(entry) => entry.1 = rect,
            None => self.rects.push((mode, rect)),
        }
        if pointer_inside {
            self.hovered = Some(mode);
        } else if self.hovered == Some(mode) {
            self.hovered = None;
        }
    }

    pub fn hovered(&self) -> Option<ConversionMode> {
        self.hovered
    }

    /// Resolve and forget the zone a drop at `pointer` belongs to.
    pub fn take_target(&mut self, pointer: Option<Pos2>) -> Option<ConversionMode> {
        let hovered = self.hovered.take();
        pointer
            .and_then(|pos| {
                self.rects
                    .iter()
                    .find(|(_, rect)| rect.contains(pos))
                    .map(|(mode, _)| *mode)
            })
            .or(hovered)
    }
}
