// Event types for async communication

use crate::error::GenerateError;
use crate::models::{BackendStatus, GenerationResponse};

#[derive(Debug)]
pub enum AppEvent {
    /// The generation request finished, one way or another
    GenerationFinished(Result<GenerationResponse, GenerateError>),
    /// The copy confirmation timer with this token ran out
    CopyLabelExpired(u64),
    /// Result of the startup health probe
    BackendChecked(BackendStatus),
}
