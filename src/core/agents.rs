use crate::models::{AgentWeights, EventRequest, Venue};

/// Score produced by one attribute agent: a value in [0, 1] plus the
/// reasoning behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    pub value: f64,
    pub reason: String,
}

/// The five rule-based attribute agents
///
/// The agent set is fixed by design, so dispatch is a closed enum rather
/// than open-ended plugins. Every agent is pure and total for validated
/// inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeAgent {
    Capacity,
    Amenity,
    Location,
    Cost,
    Special,
}

impl AttributeAgent {
    pub const ALL: [AttributeAgent; 5] = [
        AttributeAgent::Capacity,
        AttributeAgent::Amenity,
        AttributeAgent::Location,
        AttributeAgent::Cost,
        AttributeAgent::Special,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AttributeAgent::Capacity => "capacity",
            AttributeAgent::Amenity => "amenity",
            AttributeAgent::Location => "location",
            AttributeAgent::Cost => "cost",
            AttributeAgent::Special => "special",
        }
    }

    /// Score a single venue against a single event on this dimension
    pub fn score(&self, event: &EventRequest, venue: &Venue) -> DimensionScore {
        match self {
            AttributeAgent::Capacity => capacity_score(event, venue),
            AttributeAgent::Amenity => amenity_score(event, venue),
            AttributeAgent::Location => location_score(event, venue),
            AttributeAgent::Cost => cost_score(event, venue),
            AttributeAgent::Special => special_score(event, venue),
        }
    }
}

/// All five dimension scores for one (event, venue) pair
#[derive(Debug, Clone)]
pub struct DimensionScores {
    pub capacity: DimensionScore,
    pub amenity: DimensionScore,
    pub location: DimensionScore,
    pub cost: DimensionScore,
    pub special: DimensionScore,
}

impl DimensionScores {
    pub fn reasons(&self) -> Vec<String> {
        vec![
            self.capacity.reason.clone(),
            self.amenity.reason.clone(),
            self.location.reason.clone(),
            self.cost.reason.clone(),
            self.special.reason.clone(),
        ]
    }
}

/// Run all five agents for one (event, venue) pair
pub fn score_all(event: &EventRequest, venue: &Venue) -> DimensionScores {
    DimensionScores {
        capacity: capacity_score(event, venue),
        amenity: amenity_score(event, venue),
        location: location_score(event, venue),
        cost: cost_score(event, venue),
        special: special_score(event, venue),
    }
}

/// Combine the five dimension values into one agent score
///
/// Weights are validated to sum to 1.0 when the recommender is built, so
/// the dot product stays in [0, 1].
pub fn aggregate(scores: &DimensionScores, weights: &AgentWeights) -> f64 {
    scores.capacity.value * weights.capacity
        + scores.amenity.value * weights.amenity
        + scores.location.value * weights.location
        + scores.cost.value * weights.cost
        + scores.special.value * weights.special
}

/// Calculate capacity score (0-1)
///
/// Full score when the venue fits everyone, otherwise the fraction of
/// attendees it can hold, so near-misses stay distinguishable from gross
/// mismatches.
#[inline]
fn capacity_score(event: &EventRequest, venue: &Venue) -> DimensionScore {
    let value = if event.attendee_count == 0 {
        1.0
    } else if venue.max_capacity >= event.attendee_count {
        1.0
    } else {
        venue.max_capacity as f64 / event.attendee_count as f64
    };

    DimensionScore {
        value,
        reason: format!(
            "Venue capacity {} vs requested {}",
            venue.max_capacity, event.attendee_count
        ),
    }
}

/// Calculate amenity score (0-1)
///
/// Fraction of required amenities the venue offers; an empty requirement
/// set always scores full.
#[inline]
fn amenity_score(event: &EventRequest, venue: &Venue) -> DimensionScore {
    let (value, matched, missing) = coverage(&event.required_amenities, &venue.amenities);

    let reason = if event.required_amenities.is_empty() {
        "No required amenities".to_string()
    } else {
        format!("Matched amenities: {:?}, missing: {:?}", matched, missing)
    };

    DimensionScore { value, reason }
}

/// Calculate location score (0-1)
///
/// Exact region match, case-insensitive.
#[inline]
fn location_score(event: &EventRequest, venue: &Venue) -> DimensionScore {
    let value = if venue
        .region
        .eq_ignore_ascii_case(&event.preferred_region)
    {
        1.0
    } else {
        0.0
    };

    DimensionScore {
        value,
        reason: format!(
            "Venue in {}, preferred {}",
            venue.region, event.preferred_region
        ),
    }
}

/// Calculate cost score (0-1)
///
/// Full score within budget, otherwise the budget-to-cost ratio, mirroring
/// the graceful decay of the capacity score.
#[inline]
fn cost_score(event: &EventRequest, venue: &Venue) -> DimensionScore {
    let value = if venue.estimated_cost <= event.budget {
        1.0
    } else if event.budget <= 0.0 {
        0.0
    } else {
        event.budget / venue.estimated_cost
    };

    DimensionScore {
        value,
        reason: format!(
            "Estimated cost ${:.2} vs budget ${:.2}",
            venue.estimated_cost, event.budget
        ),
    }
}

/// Calculate special-requirements score (0-1)
///
/// Requirements are matched against the venue's features and amenities
/// combined.
#[inline]
fn special_score(event: &EventRequest, venue: &Venue) -> DimensionScore {
    let mut offered: Vec<String> = venue.features.clone();
    offered.extend(venue.amenities.iter().cloned());

    let (value, matched, missing) = coverage(&event.special_requirements, &offered);

    let reason = if event.special_requirements.is_empty() {
        "No special requirements".to_string()
    } else {
        format!(
            "Matched special requirements: {:?}, missing: {:?}",
            matched, missing
        )
    };

    DimensionScore { value, reason }
}

/// Fraction of `required` entries present in `available`, with the matched
/// and missing entries in requirement order. Duplicate requirements count
/// once.
fn coverage(required: &[String], available: &[String]) -> (f64, Vec<String>, Vec<String>) {
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for req in required {
        if matched.contains(req) || missing.contains(req) {
            continue;
        }
        if available.iter().any(|a| a == req) {
            matched.push(req.clone());
        } else {
            missing.push(req.clone());
        }
    }

    let total = matched.len() + missing.len();
    let value = if total == 0 {
        1.0
    } else {
        matched.len() as f64 / total as f64
    };

    (value, matched, missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event() -> EventRequest {
        EventRequest {
            event_id: "ev_1".to_string(),
            attendee_count: 100,
            required_amenities: vec!["wifi".to_string(), "parking".to_string()],
            preferred_region: "East".to_string(),
            budget: 5000.0,
            special_requirements: vec!["wheelchair access".to_string()],
            description: "annual tech conference".to_string(),
        }
    }

    fn test_venue() -> Venue {
        Venue {
            venue_id: "v_1".to_string(),
            name: "Grand Hall".to_string(),
            max_capacity: 150,
            amenities: vec![
                "wifi".to_string(),
                "parking".to_string(),
                "stage".to_string(),
            ],
            region: "East".to_string(),
            estimated_cost: 4500.0,
            features: vec!["wheelchair access".to_string()],
            description: "Large conference hall".to_string(),
        }
    }

    #[test]
    fn test_capacity_full_score_at_exact_fit() {
        let mut event = test_event();
        let mut venue = test_venue();
        event.attendee_count = 150;
        venue.max_capacity = 150;

        let score = AttributeAgent::Capacity.score(&event, &venue);
        assert_eq!(score.value, 1.0);
    }

    #[test]
    fn test_capacity_decays_on_shortfall() {
        let mut event = test_event();
        let mut venue = test_venue();
        event.attendee_count = 100;
        venue.max_capacity = 80;

        let score = AttributeAgent::Capacity.score(&event, &venue);
        assert!((score.value - 0.8).abs() < 1e-9);
        assert!(score.reason.contains("80"));
        assert!(score.reason.contains("100"));
    }

    #[test]
    fn test_amenity_partial_match() {
        let mut venue = test_venue();
        venue.amenities = vec!["wifi".to_string()];

        let score = AttributeAgent::Amenity.score(&test_event(), &venue);
        assert!((score.value - 0.5).abs() < 1e-9);
        assert!(score.reason.contains("wifi"));
        assert!(score.reason.contains("parking"));
    }

    #[test]
    fn test_amenity_empty_requirements_full_score() {
        let mut event = test_event();
        event.required_amenities = vec![];

        let score = AttributeAgent::Amenity.score(&event, &test_venue());
        assert_eq!(score.value, 1.0);
    }

    #[test]
    fn test_location_case_insensitive() {
        let mut venue = test_venue();
        venue.region = "EAST".to_string();

        let score = AttributeAgent::Location.score(&test_event(), &venue);
        assert_eq!(score.value, 1.0);
    }

    #[test]
    fn test_location_mismatch_zero() {
        let mut venue = test_venue();
        venue.region = "West".to_string();

        let score = AttributeAgent::Location.score(&test_event(), &venue);
        assert_eq!(score.value, 0.0);
        assert!(score.reason.contains("West"));
        assert!(score.reason.contains("East"));
    }

    #[test]
    fn test_cost_within_budget_full_score() {
        let score = AttributeAgent::Cost.score(&test_event(), &test_venue());
        assert_eq!(score.value, 1.0);
    }

    #[test]
    fn test_cost_monotonic_above_budget() {
        let event = test_event();
        let mut venue = test_venue();

        venue.estimated_cost = 6000.0;
        let over = AttributeAgent::Cost.score(&event, &venue);

        venue.estimated_cost = 10000.0;
        let far_over = AttributeAgent::Cost.score(&event, &venue);

        assert!(over.value < 1.0);
        assert!(far_over.value < over.value);
    }

    #[test]
    fn test_special_matches_features_and_amenities() {
        let mut event = test_event();
        event.special_requirements = vec![
            "wheelchair access".to_string(),
            "stage".to_string(),
        ];

        let score = AttributeAgent::Special.score(&event, &test_venue());
        assert_eq!(score.value, 1.0);
    }

    #[test]
    fn test_all_scores_within_range() {
        let event = test_event();
        let venue = test_venue();

        for agent in AttributeAgent::ALL {
            let score = agent.score(&event, &venue);
            assert!(
                (0.0..=1.0).contains(&score.value),
                "{} out of range: {}",
                agent.name(),
                score.value
            );
        }
    }

    #[test]
    fn test_aggregate_uniform_is_mean() {
        let scores = score_all(&test_event(), &test_venue());
        let weights = AgentWeights::default();

        let total = aggregate(&scores, &weights);
        let mean = (scores.capacity.value
            + scores.amenity.value
            + scores.location.value
            + scores.cost.value
            + scores.special.value)
            / 5.0;

        assert!((total - mean).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_requirements_count_once() {
        let mut event = test_event();
        event.required_amenities =
            vec!["wifi".to_string(), "wifi".to_string(), "pool".to_string()];

        let score = AttributeAgent::Amenity.score(&event, &test_venue());
        assert!((score.value - 0.5).abs() < 1e-9);
    }
}
