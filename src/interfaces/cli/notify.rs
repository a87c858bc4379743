use std::io::Write;
use std::sync::Mutex;

use chrono::Local;
use tracing::{error, info, warn};

const MAX_TOASTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Info => "info",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        }
    }
}

/// A transient notice about the outcome of one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub time: String,
    pub level: ToastLevel,
    pub source: String,
    pub message: String,
}

/// Notices raised while a page runs; printed once the command finishes.
#[derive(Default)]
pub struct Toasts {
    entries: Mutex<Vec<Toast>>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, level: ToastLevel, source: &str, message: &str) -> Toast {
        match level {
            ToastLevel::Error => error!(source, "{}", message),
            ToastLevel::Warning => warn!(source, "{}", message),
            _ => info!(source, "{}", message),
        }
        let toast = Toast {
            time: Local::now().format("%H:%M:%S").to_string(),
            level,
            source: source.to_string(),
            message: message.to_string(),
        };
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.push(toast.clone());
        if entries.len() > MAX_TOASTS {
            entries.remove(0);
        }
        toast
    }

    pub fn success(&self, source: &str, message: &str) {
        self.push(ToastLevel::Success, source, message);
    }

    pub fn info(&self, source: &str, message: &str) {
        self.push(ToastLevel::Info, source, message);
    }

    pub fn warning(&self, source: &str, message: &str) {
        self.push(ToastLevel::Warning, source, message);
    }

    pub fn error(&self, source: &str, message: &str) {
        self.push(ToastLevel::Error, source, message);
    }

    pub fn drain(&self) -> Vec<Toast> {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        std::mem::take(&mut *entries)
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn flush(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for toast in self.drain() {
            writeln!(
                out,
                "[{}] {:<7} {}",
                toast.time,
                toast.level.as_str(),
                toast.message
            )?;
        }
        Ok(())
    }
}
