use serde::{Deserialize, Serialize};
use crate::models::domain::RankedVenue;

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<RankedVenue>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub venues: usize,
    #[serde(rename = "corpusSize")]
    pub corpus_size: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response after recording feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitFeedbackResponse {
    pub success: bool,
    #[serde(rename = "feedbackId")]
    pub feedback_id: String,
}

/// Response after appending a historical event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddHistoryResponse {
    pub success: bool,
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "corpusSize")]
    pub corpus_size: usize,
}
