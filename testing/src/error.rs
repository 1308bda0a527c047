use crate::negotiation_record::NegotiationRecord;

#[derive(thiserror::Error)]
#[error("{error}\nNegotiation traceback:\n\n{negotiation_traceback}")]
pub struct FrameworkError {
    error: anyhow::Error,
    negotiation_traceback: NegotiationRecord,
}

impl FrameworkError {
    pub fn from(error: impl Into<anyhow::Error>, record: &NegotiationRecord) -> FrameworkError {
        FrameworkError {
            error: error.into(),
            negotiation_traceback: record.clone(),
        }
    }

    pub fn record(&self) -> &NegotiationRecord {
        &self.negotiation_traceback
    }
}

impl std::fmt::Debug for FrameworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
