// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgentWeights, EventRequest, FeedbackRecord, HistoricalEvent, HybridWeights, RankedVenue,
    Ranking, RatingScale, ScoreBreakdown, Venue,
};
pub use requests::{AddHistoryRequest, RecommendRequest, SubmitFeedbackRequest};
pub use responses::{
    AddHistoryResponse, ErrorResponse, HealthResponse, RecommendResponse, SubmitFeedbackResponse,
};
