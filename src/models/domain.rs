use serde::{Deserialize, Serialize};

/// Incoming event request to find venues for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "attendeeCount")]
    pub attendee_count: u32,
    #[serde(rename = "requiredAmenities", default)]
    pub required_amenities: Vec<String>,
    #[serde(rename = "preferredRegion")]
    pub preferred_region: String,
    pub budget: f64,
    #[serde(rename = "specialRequirements", default)]
    pub special_requirements: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Candidate venue with capacity, amenity and pricing data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    #[serde(rename = "venueId")]
    pub venue_id: String,
    pub name: String,
    #[serde(rename = "maxCapacity")]
    pub max_capacity: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub region: String,
    #[serde(rename = "estimatedCost")]
    pub estimated_cost: f64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Past event with the venue that hosted it and how it went
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalEvent {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub description: String,
    #[serde(rename = "venueId")]
    pub venue_id: String,
    pub rating: f64,
}

/// Feedback left for a venue after an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "feedbackId")]
    pub feedback_id: String,
    #[serde(rename = "venueId")]
    pub venue_id: String,
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Per-signal score breakdown for one ranked venue
///
/// Every value is in [0, 1]. The reasons list carries one human-readable
/// line per attribute agent, in agent order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub capacity: f64,
    pub amenity: f64,
    pub location: f64,
    pub cost: f64,
    pub special: f64,
    #[serde(rename = "agentTotal")]
    pub agent_total: f64,
    pub rag: f64,
    pub feedback: f64,
    pub hybrid: f64,
    pub reasons: Vec<String>,
}

/// One entry of a ranking: a venue plus its full score breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedVenue {
    #[serde(rename = "venueId")]
    pub venue_id: String,
    #[serde(rename = "venueName")]
    pub venue_name: String,
    pub region: String,
    pub scores: ScoreBreakdown,
}

/// Ranked recommendation list, descending by hybrid score
///
/// Warnings carry skip reasons for malformed candidate records so partial
/// results stay explainable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ranking {
    pub entries: Vec<RankedVenue>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Ranking {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            total_candidates: 0,
            warnings: Vec::new(),
        }
    }
}

/// Weights for combining the three hybrid signals
#[derive(Debug, Clone, Copy)]
pub struct HybridWeights {
    pub agent: f64,
    pub rag: f64,
    pub feedback: f64,
}

impl HybridWeights {
    pub fn sum(&self) -> f64 {
        self.agent + self.rag + self.feedback
    }
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            agent: 0.45,
            rag: 0.45,
            feedback: 0.10,
        }
    }
}

/// Weights for combining the five attribute agent scores
#[derive(Debug, Clone, Copy)]
pub struct AgentWeights {
    pub capacity: f64,
    pub amenity: f64,
    pub location: f64,
    pub cost: f64,
    pub special: f64,
}

impl AgentWeights {
    pub fn sum(&self) -> f64 {
        self.capacity + self.amenity + self.location + self.cost + self.special
    }
}

impl Default for AgentWeights {
    fn default() -> Self {
        // Uniform mean over the five dimensions
        Self {
            capacity: 0.20,
            amenity: 0.20,
            location: 0.20,
            cost: 0.20,
            special: 0.20,
        }
    }
}

/// Bounds of the rating scale used by history and feedback records
#[derive(Debug, Clone, Copy)]
pub struct RatingScale {
    pub min: f64,
    pub max: f64,
}

impl RatingScale {
    pub fn contains(&self, rating: f64) -> bool {
        rating.is_finite() && rating >= self.min && rating <= self.max
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}
