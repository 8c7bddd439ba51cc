use super::{StepRecord, TraceRecorder};

/// A recorder that ignores any record. Used when tracing is disabled.
pub struct NullTraceRecorder {}

impl TraceRecorder for NullTraceRecorder {
    /// Discard the given record.
    fn write(&mut self, _record: StepRecord) {}
}
