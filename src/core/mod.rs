// Core engine exports
pub mod agents;
pub mod feedback;
pub mod ranker;
pub mod retrieval;

pub use agents::{aggregate, score_all, AttributeAgent, DimensionScore, DimensionScores};
pub use feedback::{feedback_score, NEUTRAL_FEEDBACK};
pub use ranker::{EngineError, Recommender};
pub use retrieval::{tokenize, RetrievedEvent, TfIdfIndex};
