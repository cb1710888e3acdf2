use seed_jsonrpc_types::{
    events::{EventLog, EventParseError},
    FinalExecutionOutcomeView,
};

#[derive(Debug, thiserror::Error)]
pub enum LogParseError {
    #[error("outcome has no receipt")]
    MissingReceipts,
    #[error("log line {index}: {source}")]
    InvalidLine {
        index: usize,
        #[source]
        source: EventParseError,
    },
}

/// Events of the first receipt. One unparsable line fails the whole set.
pub fn extract_event_logs(
    outcome: &FinalExecutionOutcomeView,
) -> Result<Vec<EventLog>, LogParseError> {
    let receipt = outcome
        .receipts_outcome
        .first()
        .ok_or(LogParseError::MissingReceipts)?;
    receipt
        .outcome
        .logs
        .iter()
        .enumerate()
        .map(|(index, line)| {
            EventLog::from_log_line(line).map_err(|source| LogParseError::InvalidLine { index, source })
        })
        .collect()
}
