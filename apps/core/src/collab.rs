use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::clipboard::ClipboardError;
use crate::model::ClipboardTicket;

pub trait IconRenderer {
    fn replace_icons(&mut self);
}

pub trait ModalHost {
    fn is_open(&self, modal_id: &str) -> bool;
    fn show(&mut self, modal_id: &str);
    fn hide(&mut self, modal_id: &str);
}

pub trait TooltipHost {
    fn init_tooltips(&mut self) -> usize;
}

pub trait ClipboardHost {
    fn is_secure_context(&self) -> bool;
    /// Starts an asynchronous write. The outcome is reported later through
    /// `PageController::clipboard_settled` with the same ticket. An `Err`
    /// here means the write was rejected before it started.
    fn begin_write(&mut self, ticket: ClipboardTicket, text: &str) -> Result<(), ClipboardError>;
}

pub struct Collaborators {
    pub icons: Box<dyn IconRenderer>,
    pub modals: Box<dyn ModalHost>,
    pub tooltips: Box<dyn TooltipHost>,
    pub clipboard: Box<dyn ClipboardHost>,
}

impl Collaborators {
    pub fn headless() -> Self {
        Self {
            icons: Box::new(RecordingIcons::default()),
            modals: Box::new(RecordingModals::default()),
            tooltips: Box::new(RecordingTooltips::default()),
            clipboard: Box::new(RecordingClipboard::insecure()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingIcons {
    calls: Rc<RefCell<usize>>,
}

impl RecordingIcons {
    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl IconRenderer for RecordingIcons {
    fn replace_icons(&mut self) {
        *self.calls.borrow_mut() += 1;
    }
}

#[derive(Debug, Default)]
struct ModalLog {
    open: BTreeSet<String>,
    shown: Vec<String>,
    hidden: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingModals {
    log: Rc<RefCell<ModalLog>>,
}

impl RecordingModals {
    pub fn open(&self, modal_id: &str) {
        self.log.borrow_mut().open.insert(modal_id.to_string());
    }

    pub fn shown(&self) -> Vec<String> {
        self.log.borrow().shown.clone()
    }

    pub fn hidden(&self) -> Vec<String> {
        self.log.borrow().hidden.clone()
    }
}

impl ModalHost for RecordingModals {
    fn is_open(&self, modal_id: &str) -> bool {
        self.log.borrow().open.contains(modal_id)
    }

    fn show(&mut self, modal_id: &str) {
        let mut log = self.log.borrow_mut();
        log.open.insert(modal_id.to_string());
        log.shown.push(modal_id.to_string());
    }

    fn hide(&mut self, modal_id: &str) {
        let mut log = self.log.borrow_mut();
        log.open.remove(modal_id);
        log.hidden.push(modal_id.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingTooltips {
    calls: Rc<RefCell<usize>>,
}

impl RecordingTooltips {
    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl TooltipHost for RecordingTooltips {
    fn init_tooltips(&mut self) -> usize {
        *self.calls.borrow_mut() += 1;
        0
    }
}

#[derive(Debug, Default)]
struct ClipboardLog {
    writes: Vec<(ClipboardTicket, String)>,
}

#[derive(Debug, Clone)]
pub struct RecordingClipboard {
    secure: bool,
    reject_writes: bool,
    log: Rc<RefCell<ClipboardLog>>,
}

impl RecordingClipboard {
    pub fn secure() -> Self {
        Self {
            secure: true,
            reject_writes: false,
            log: Rc::default(),
        }
    }

    pub fn insecure() -> Self {
        Self {
            secure: false,
            ..Self::secure()
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject_writes: true,
            ..Self::secure()
        }
    }

    pub fn writes(&self) -> Vec<(ClipboardTicket, String)> {
        self.log.borrow().writes.clone()
    }
}

impl ClipboardHost for RecordingClipboard {
    fn is_secure_context(&self) -> bool {
        self.secure
    }

    fn begin_write(&mut self, ticket: ClipboardTicket, text: &str) -> Result<(), ClipboardError> {
        if self.reject_writes {
            return Err(ClipboardError::Rejected("write permission denied".to_string()));
        }
        self.log.borrow_mut().writes.push((ticket, text.to_string()));
        Ok(())
    }
}
