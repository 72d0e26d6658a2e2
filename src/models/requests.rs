use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::EventRequest;

/// Request to recommend venues for an event
///
/// Either `eventId` (resolved against the stored event requests) or an
/// inline `event` must be present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(alias = "event_id", rename = "eventId", default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub event: Option<EventRequest>,
    #[validate(range(min = 1))]
    #[serde(alias = "top_n", rename = "topN", default)]
    pub top_n: Option<u16>,
}

/// Request to record feedback for a venue
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitFeedbackRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "venue_id", rename = "venueId")]
    pub venue_id: String,
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Request to append a historical event to the retrieval corpus
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddHistoryRequest {
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    #[serde(alias = "venue_id", rename = "venueId")]
    pub venue_id: String,
    pub rating: f64,
}
