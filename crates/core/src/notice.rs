//! Inline notices (alerts) shown in place of, or above, the detection list.

use serde::Serialize;

/// How long error notices stay up before dismissing themselves.
pub const ERROR_AUTO_DISMISS_MS: u64 = 3000;

/// Severity of a notice; maps one-to-one onto alert styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Secondary line rendered in small print below the message.
    pub detail: Option<String>,
    pub dismissible: bool,
    pub auto_dismiss_ms: Option<u64>,
}

impl Notice {
    /// Persistent informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            detail: None,
            dismissible: false,
            auto_dismiss_ms: None,
        }
    }

    /// Dismissible warning that clears itself after [`ERROR_AUTO_DISMISS_MS`].
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
            detail: None,
            dismissible: true,
            auto_dismiss_ms: Some(ERROR_AUTO_DISMISS_MS),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
