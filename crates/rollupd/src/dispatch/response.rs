//! Verdicts and outputs produced by dispatching a request.

use std::fmt;

use serde::Serialize;

use crate::address::Address;

/// Consensus verdict for an advance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The request's effects stand.
    Accept,
    /// The request is discarded.
    Reject,
}

impl fmt::Display for Verdict {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        };
        formatter.write_str(label)
    }
}

/// Output kinds, named after the sequencer endpoint that collects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Advisory, non-consensus output.
    Report,
    /// Consensus-recorded advisory output.
    Notice,
    /// Deferred external call.
    Voucher,
}

impl OutputKind {
    /// Endpoint path segment for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Notice => "notice",
            Self::Voucher => "voucher",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Output destined for the sequencer. Payloads are raw bytes; the transport
/// hex-encodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Diagnostic text or inspect answer.
    Report {
        /// Raw payload.
        payload: Vec<u8>,
    },
    /// Result of an accepted advance request.
    Notice {
        /// Raw payload.
        payload: Vec<u8>,
    },
    /// Call to execute on `destination` once the epoch is settled.
    Voucher {
        /// Contract that will receive the call.
        destination: Address,
        /// ABI-encoded call data.
        payload: Vec<u8>,
    },
}

impl Output {
    /// Creates a report.
    pub fn report(payload: impl Into<Vec<u8>>) -> Self {
        Self::Report {
            payload: payload.into(),
        }
    }

    /// Creates a notice.
    pub fn notice(payload: impl Into<Vec<u8>>) -> Self {
        Self::Notice {
            payload: payload.into(),
        }
    }

    /// Kind of the output.
    #[must_use]
    pub fn kind(&self) -> OutputKind {
        match self {
            Self::Report { .. } => OutputKind::Report,
            Self::Notice { .. } => OutputKind::Notice,
            Self::Voucher { .. } => OutputKind::Voucher,
        }
    }

    /// Raw payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Report { payload } | Self::Notice { payload } | Self::Voucher { payload, .. } => {
                payload
            }
        }
    }

    /// Voucher destination, if this is a voucher.
    #[must_use]
    pub fn destination(&self) -> Option<&Address> {
        match self {
            Self::Voucher { destination, .. } => Some(destination),
            Self::Report { .. } | Self::Notice { .. } => None,
        }
    }
}

/// Everything dispatching one request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Verdict for advance requests; `None` for inspect requests.
    pub verdict: Option<Verdict>,
    /// Outputs to submit, in order.
    pub outputs: Vec<Output>,
}

impl DispatchOutcome {
    /// Accepted advance request.
    #[must_use]
    pub fn accepted(outputs: Vec<Output>) -> Self {
        Self {
            verdict: Some(Verdict::Accept),
            outputs,
        }
    }

    /// Rejected advance request, explained by a single report.
    pub fn rejected(reason: impl fmt::Display) -> Self {
        Self {
            verdict: Some(Verdict::Reject),
            outputs: vec![Output::report(reason.to_string())],
        }
    }

    /// Inspect answer; carries no verdict.
    #[must_use]
    pub fn informational(outputs: Vec<Output>) -> Self {
        Self {
            verdict: None,
            outputs,
        }
    }
}
