use crate::models::{FeedbackRecord, RatingScale};

/// Neutral score for venues with no feedback, so absence of feedback never
/// penalizes new venues
pub const NEUTRAL_FEEDBACK: f64 = 0.5;

/// Calculate the feedback score (0-1) for one venue
///
/// Mean of the venue's ratings normalized onto [0, 1] with the configured
/// scale bounds. Records with ratings outside the scale are ignored; a
/// venue with no usable records gets the neutral value.
pub fn feedback_score(
    venue_id: &str,
    feedback: &[FeedbackRecord],
    scale: &RatingScale,
    neutral: f64,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for record in feedback.iter().filter(|r| r.venue_id == venue_id) {
        if !scale.contains(record.rating) {
            tracing::warn!(
                "Ignoring feedback {} for venue {}: rating {} outside scale [{}, {}]",
                record.feedback_id,
                venue_id,
                record.rating,
                scale.min,
                scale.max
            );
            continue;
        }
        sum += record.rating;
        count += 1;
    }

    if count == 0 {
        return neutral;
    }

    let mean = sum / count as f64;
    let span = scale.max - scale.min;
    if span <= 0.0 {
        return neutral;
    }

    // Boundary ratings land exactly on 0.0 / 1.0; clamp guards rounding
    ((mean - scale.min) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(venue: &str, rating: f64) -> FeedbackRecord {
        FeedbackRecord {
            feedback_id: format!("fb_{}_{}", venue, rating),
            venue_id: venue.to_string(),
            rating,
            comment: None,
            created_at: None,
        }
    }

    #[test]
    fn test_no_feedback_returns_neutral() {
        let score = feedback_score("v_1", &[], &RatingScale::default(), NEUTRAL_FEEDBACK);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_mean_rating_normalized() {
        let feedback = vec![record("v_1", 4.0), record("v_1", 5.0)];
        let score = feedback_score("v_1", &feedback, &RatingScale::default(), NEUTRAL_FEEDBACK);

        // Mean 4.5 on a 1-5 scale
        assert!((score - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_ratings_do_not_overflow() {
        let scale = RatingScale::default();

        let lowest = feedback_score("v_1", &[record("v_1", 1.0)], &scale, NEUTRAL_FEEDBACK);
        let highest = feedback_score("v_1", &[record("v_1", 5.0)], &scale, NEUTRAL_FEEDBACK);

        assert_eq!(lowest, 0.0);
        assert_eq!(highest, 1.0);
    }

    #[test]
    fn test_other_venue_feedback_ignored() {
        let feedback = vec![record("v_2", 1.0)];
        let score = feedback_score("v_1", &feedback, &RatingScale::default(), NEUTRAL_FEEDBACK);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_out_of_scale_rating_skipped() {
        let feedback = vec![record("v_1", 99.0), record("v_1", 3.0)];
        let score = feedback_score("v_1", &feedback, &RatingScale::default(), NEUTRAL_FEEDBACK);

        // Only the valid rating counts: (3 - 1) / 4
        assert!((score - 0.5).abs() < 1e-9);
    }
}
