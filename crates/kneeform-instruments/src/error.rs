use thiserror::Error;

use crate::scoring::AnswerIssue;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("invalid answer: {0}")]
    Answer(#[from] AnswerIssue),
}
