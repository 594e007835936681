use std::fmt;

/// The closed taxonomy of result/error codes used across the address-space, browse and
/// subscription services. Unlike most of the wider OPC UA status code table (which is a
/// 32-bit bitmask with severity and sub-code bits) this crate only needs the handful of
/// codes the core services actually produce, so they are modeled as a plain enum rather
/// than a bitmask newtype.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum StatusCode {
    Good,
    BadNothingToDo,
    BadSessionNotActivated,
    BadSecurityChecksFailed,
    BadSubscriptionIdInvalid,
    BadMonitoredItemIdInvalid,
    BadAttributeIdInvalid,
    BadNodeIdUnknown,
    BadOutOfMemory,
    BadNoContinuationPoints,
    BadContinuationPointInvalid,
    BadSequenceNumberUnknown,
    BadMessageNotAvailable,
    BadNotImplemented,
    BadInternalError,
    BadInvalidArgument,
    BadNoMatch,
}

impl StatusCode {
    pub fn is_good(self) -> bool {
        self == StatusCode::Good
    }

    pub fn is_bad(self) -> bool {
        !self.is_good()
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::Good
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
