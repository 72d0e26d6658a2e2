// Unit tests for Venue Algo

use venue_algo::core::{feedback_score, score_all, tokenize, AttributeAgent, NEUTRAL_FEEDBACK};
use venue_algo::models::{EventRequest, FeedbackRecord, RatingScale, Venue};

fn create_event(
    attendees: u32,
    amenities: &[&str],
    region: &str,
    budget: f64,
) -> EventRequest {
    EventRequest {
        event_id: "ev_test".to_string(),
        attendee_count: attendees,
        required_amenities: amenities.iter().map(|s| s.to_string()).collect(),
        preferred_region: region.to_string(),
        budget,
        special_requirements: vec![],
        description: "quarterly planning offsite".to_string(),
    }
}

fn create_venue(
    id: &str,
    capacity: u32,
    amenities: &[&str],
    region: &str,
    cost: f64,
) -> Venue {
    Venue {
        venue_id: id.to_string(),
        name: format!("Venue {}", id),
        max_capacity: capacity,
        amenities: amenities.iter().map(|s| s.to_string()).collect(),
        region: region.to_string(),
        estimated_cost: cost,
        features: vec![],
        description: String::new(),
    }
}

#[test]
fn test_capacity_exact_fit_scores_full() {
    let event = create_event(100, &[], "East", 5000.0);
    let venue = create_venue("v1", 100, &[], "East", 4000.0);

    let score = AttributeAgent::Capacity.score(&event, &venue);
    assert_eq!(score.value, 1.0);
}

#[test]
fn test_capacity_shortfall_is_proportional() {
    let event = create_event(200, &[], "East", 5000.0);
    let venue = create_venue("v1", 50, &[], "East", 4000.0);

    let score = AttributeAgent::Capacity.score(&event, &venue);
    assert!((score.value - 0.25).abs() < 1e-9);
}

#[test]
fn test_empty_amenity_requirement_scores_full() {
    let event = create_event(100, &[], "East", 5000.0);
    let venue = create_venue("v1", 100, &["pool"], "East", 4000.0);

    let score = AttributeAgent::Amenity.score(&event, &venue);
    assert_eq!(score.value, 1.0);
}

#[test]
fn test_cost_score_never_increases_with_cost() {
    let event = create_event(100, &[], "East", 5000.0);

    let mut previous = f64::INFINITY;
    for cost in [4000.0, 5000.0, 5001.0, 7500.0, 10000.0, 50000.0] {
        let venue = create_venue("v1", 100, &[], "East", cost);
        let score = AttributeAgent::Cost.score(&event, &venue).value;
        assert!(
            score <= previous,
            "cost score increased from {} to {} at cost {}",
            previous,
            score,
            cost
        );
        previous = score;
    }
}

#[test]
fn test_every_dimension_in_unit_range() {
    let event = create_event(500, &["wifi", "catering"], "North", 100.0);
    let venue = create_venue("v1", 20, &["parking"], "South", 99999.0);

    let dims = score_all(&event, &venue);
    for value in [
        dims.capacity.value,
        dims.amenity.value,
        dims.location.value,
        dims.cost.value,
        dims.special.value,
    ] {
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn test_tokenize_consistency() {
    // Same policy for indexing and querying: repeated calls agree
    let first = tokenize("Annual Tech Conference in the city");
    let second = tokenize("Annual Tech Conference in the city");
    assert_eq!(first, second);
    assert!(!first.contains(&"the".to_string()));
    assert!(!first.contains(&"in".to_string()));
}

#[test]
fn test_feedback_neutral_without_records() {
    let score = feedback_score("v_unknown", &[], &RatingScale::default(), NEUTRAL_FEEDBACK);
    assert_eq!(score, NEUTRAL_FEEDBACK);
}

#[test]
fn test_feedback_scale_bounds() {
    let scale = RatingScale::default();
    let records = vec![
        FeedbackRecord {
            feedback_id: "f1".to_string(),
            venue_id: "v1".to_string(),
            rating: 1.0,
            comment: None,
            created_at: None,
        },
        FeedbackRecord {
            feedback_id: "f2".to_string(),
            venue_id: "v1".to_string(),
            rating: 5.0,
            comment: None,
            created_at: None,
        },
    ];

    // Mean 3.0 on a 1-5 scale lands on the midpoint
    let score = feedback_score("v1", &records, &scale, NEUTRAL_FEEDBACK);
    assert!((score - 0.5).abs() < 1e-9);
}
