use thiserror::Error;

use crate::engine::RawStatus;

/// Failures surfaced by a synthesis run.
///
/// Each variant carries the contextual label of the failing operation,
/// the engine's raw status code, and the message the engine's own
/// status lookup resolved it to. Nothing in this crate retries: a
/// single nonzero status aborts the run, and whatever audio was
/// already collected stays in the caller's buffer for inspection.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("{context}: engine status {status}: {message}")]
    Feed {
        context: &'static str,
        status: RawStatus,
        message: String,
    },

    #[error("{context}: engine status {status}: {message}")]
    Drain {
        context: &'static str,
        status: RawStatus,
        message: String,
    },
}

impl SynthesisError {
    pub(crate) fn feed(context: &'static str, status: RawStatus, message: String) -> Self {
        Self::Feed {
            context,
            status,
            message,
        }
    }

    pub(crate) fn drain(context: &'static str, status: RawStatus, message: String) -> Self {
        Self::Drain {
            context,
            status,
            message,
        }
    }

    /// The engine's raw status code.
    pub fn status(&self) -> RawStatus {
        match self {
            Self::Feed { status, .. } | Self::Drain { status, .. } => *status,
        }
    }

    /// Label of the operation that failed.
    pub fn context(&self) -> &'static str {
        match self {
            Self::Feed { context, .. } | Self::Drain { context, .. } => context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context_status_and_message() {
        let err = SynthesisError::feed("synthesize: feed text", -10, "out of memory".into());
        assert_eq!(
            err.to_string(),
            "synthesize: feed text: engine status -10: out of memory"
        );
        assert_eq!(err.status(), -10);
        assert_eq!(err.context(), "synthesize: feed text");
    }
}
