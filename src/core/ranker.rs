use thiserror::Error;

use crate::core::agents::{aggregate, score_all};
use crate::core::feedback::feedback_score;
use crate::core::retrieval::TfIdfIndex;
use crate::models::{
    AgentWeights, EventRequest, FeedbackRecord, HybridWeights, RankedVenue, Ranking, RatingScale,
    ScoreBreakdown, Venue,
};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Errors produced by the scoring engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid event request: {0}")]
    InvalidEvent(String),
}

/// Hybrid recommendation engine
///
/// Combines the attribute agent score, the retrieval score and the feedback
/// score per venue under a fixed weighting scheme, and returns a ranked,
/// explainable result list.
#[derive(Debug, Clone)]
pub struct Recommender {
    hybrid_weights: HybridWeights,
    agent_weights: AgentWeights,
    rating_scale: RatingScale,
    neutral_feedback: f64,
    retrieval_k: usize,
}

impl Recommender {
    /// Build a recommender, validating every configurable up front
    ///
    /// Weight mappings that do not sum to 1.0 are a configuration error,
    /// never silently normalized.
    pub fn new(
        hybrid_weights: HybridWeights,
        agent_weights: AgentWeights,
        rating_scale: RatingScale,
        neutral_feedback: f64,
        retrieval_k: usize,
    ) -> Result<Self, EngineError> {
        if (hybrid_weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidConfig(format!(
                "hybrid weights must sum to 1.0, got {}",
                hybrid_weights.sum()
            )));
        }
        if hybrid_weights.agent < 0.0 || hybrid_weights.rag < 0.0 || hybrid_weights.feedback < 0.0
        {
            return Err(EngineError::InvalidConfig(
                "hybrid weights must be non-negative".to_string(),
            ));
        }
        if (agent_weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidConfig(format!(
                "agent weights must sum to 1.0, got {}",
                agent_weights.sum()
            )));
        }
        if [
            agent_weights.capacity,
            agent_weights.amenity,
            agent_weights.location,
            agent_weights.cost,
            agent_weights.special,
        ]
        .iter()
        .any(|w| *w < 0.0)
        {
            return Err(EngineError::InvalidConfig(
                "agent weights must be non-negative".to_string(),
            ));
        }
        if rating_scale.max <= rating_scale.min {
            return Err(EngineError::InvalidConfig(format!(
                "rating scale max ({}) must exceed min ({})",
                rating_scale.max, rating_scale.min
            )));
        }
        if !(0.0..=1.0).contains(&neutral_feedback) {
            return Err(EngineError::InvalidConfig(format!(
                "neutral feedback value must be in [0, 1], got {}",
                neutral_feedback
            )));
        }
        if retrieval_k == 0 {
            return Err(EngineError::InvalidConfig(
                "retrieval k must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            hybrid_weights,
            agent_weights,
            rating_scale,
            neutral_feedback,
            retrieval_k,
        })
    }

    pub fn with_defaults() -> Self {
        Self {
            hybrid_weights: HybridWeights::default(),
            agent_weights: AgentWeights::default(),
            rating_scale: RatingScale::default(),
            neutral_feedback: crate::core::feedback::NEUTRAL_FEEDBACK,
            retrieval_k: 5,
        }
    }

    pub fn retrieval_k(&self) -> usize {
        self.retrieval_k
    }

    /// Rank candidate venues for an event
    ///
    /// Malformed venue records are skipped with a warning surfaced in the
    /// result so partial output stays available. An empty candidate set is
    /// a valid outcome and yields an empty ranking.
    pub fn recommend(
        &self,
        event: &EventRequest,
        venues: &[Venue],
        feedback: &[FeedbackRecord],
        index: &TfIdfIndex,
        top_n: usize,
    ) -> Result<Ranking, EngineError> {
        if top_n == 0 {
            return Err(EngineError::InvalidConfig(
                "topN must be at least 1".to_string(),
            ));
        }
        validate_event(event)?;

        if venues.is_empty() {
            return Ok(Ranking::empty());
        }

        let rag_scores = index.venue_scores(&event.description, self.retrieval_k);

        let mut warnings = Vec::new();
        let mut entries: Vec<RankedVenue> = Vec::with_capacity(venues.len());

        for venue in venues {
            if let Err(reason) = validate_venue(venue) {
                tracing::warn!("Skipping venue {}: {}", venue.venue_id, reason);
                warnings.push(format!("Skipped venue {}: {}", venue.venue_id, reason));
                continue;
            }

            let dims = score_all(event, venue);
            let agent_total = clamp_score("agentTotal", &venue.venue_id,
                aggregate(&dims, &self.agent_weights));

            let rag = clamp_score(
                "rag",
                &venue.venue_id,
                rag_scores.get(&venue.venue_id).copied().unwrap_or(0.0),
            );

            let fb = clamp_score(
                "feedback",
                &venue.venue_id,
                feedback_score(
                    &venue.venue_id,
                    feedback,
                    &self.rating_scale,
                    self.neutral_feedback,
                ),
            );

            let hybrid = clamp_score(
                "hybrid",
                &venue.venue_id,
                self.hybrid_weights.agent * agent_total
                    + self.hybrid_weights.rag * rag
                    + self.hybrid_weights.feedback * fb,
            );

            entries.push(RankedVenue {
                venue_id: venue.venue_id.clone(),
                venue_name: venue.name.clone(),
                region: venue.region.clone(),
                scores: ScoreBreakdown {
                    capacity: dims.capacity.value,
                    amenity: dims.amenity.value,
                    location: dims.location.value,
                    cost: dims.cost.value,
                    special: dims.special.value,
                    agent_total,
                    rag,
                    feedback: fb,
                    hybrid,
                    reasons: dims.reasons(),
                },
            });
        }

        // Total order: hybrid, then agent total, then rag, then venue id
        entries.sort_by(|a, b| {
            b.scores
                .hybrid
                .partial_cmp(&a.scores.hybrid)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.scores
                        .agent_total
                        .partial_cmp(&a.scores.agent_total)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| {
                    b.scores
                        .rag
                        .partial_cmp(&a.scores.rag)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.venue_id.cmp(&b.venue_id))
        });

        // topN beyond the candidate count clamps, never pads
        entries.truncate(top_n);

        Ok(Ranking {
            entries,
            total_candidates: venues.len(),
            warnings,
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn validate_event(event: &EventRequest) -> Result<(), EngineError> {
    if event.attendee_count == 0 {
        return Err(EngineError::InvalidEvent(
            "attendee count must be at least 1".to_string(),
        ));
    }
    if !event.budget.is_finite() || event.budget <= 0.0 {
        return Err(EngineError::InvalidEvent(format!(
            "budget must be a positive amount, got {}",
            event.budget
        )));
    }
    Ok(())
}

fn validate_venue(venue: &Venue) -> Result<(), String> {
    if venue.venue_id.is_empty() {
        return Err("missing venue id".to_string());
    }
    if venue.max_capacity == 0 {
        return Err("capacity must be at least 1".to_string());
    }
    if !venue.estimated_cost.is_finite() || venue.estimated_cost < 0.0 {
        return Err(format!(
            "estimated cost must be non-negative, got {}",
            venue.estimated_cost
        ));
    }
    Ok(())
}

/// Clamp a signal into [0, 1], logging any out-of-range value as a defect
#[inline]
fn clamp_score(signal: &str, venue_id: &str, value: f64) -> f64 {
    if !(0.0..=1.0).contains(&value) {
        tracing::warn!(
            "Signal {} for venue {} out of range ({}), clamping",
            signal,
            venue_id,
            value
        );
        return value.clamp(0.0, 1.0);
    }
    value
}
