use super::StepRecord;

/// Receives per-step telemetry during an episode with [`TraceRecorder::write`].
pub trait TraceRecorder {
    /// Write a record to the [`TraceRecorder`].
    fn write(&mut self, record: StepRecord);
}
