use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tokio::sync::RwLock;
use validator::Validate;

use crate::core::{EngineError, Recommender, TfIdfIndex};
use crate::models::{
    AddHistoryRequest, AddHistoryResponse, ErrorResponse, EventRequest, FeedbackRecord,
    HealthResponse, HistoricalEvent, RatingScale, RecommendRequest, RecommendResponse,
    SubmitFeedbackRequest, SubmitFeedbackResponse,
};
use crate::services::DataStore;

/// Application state shared across all handlers
///
/// The retrieval index is an immutable snapshot behind a lock: readers
/// clone the inner Arc and score against it lock-free; corpus updates
/// build a fresh index and swap the Arc atomically.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub index: Arc<RwLock<Arc<TfIdfIndex>>>,
    pub recommender: Recommender,
    pub rating_scale: RatingScale,
    pub default_top_n: usize,
    pub max_top_n: usize,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/venues/recommend", web::post().to(recommend))
        .route("/feedback", web::post().to(submit_feedback))
        .route("/history", web::post().to(add_history));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let corpus_size = state.index.read().await.len();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        venues: state.store.venues().len(),
        corpus_size,
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend venues endpoint
///
/// POST /api/v1/venues/recommend
///
/// Request body:
/// ```json
/// {
///   "eventId": "string",
///   "topN": 3
/// }
/// ```
/// or an inline event:
/// ```json
/// {
///   "event": { "eventId": "...", "attendeeCount": 100, ... },
///   "topN": 3
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Resolve the event: stored request by id, or inline
    let event: EventRequest = match (&req.event_id, &req.event) {
        (Some(event_id), _) => match state.store.find_event(event_id) {
            Some(event) => event.clone(),
            None => {
                return HttpResponse::NotFound().json(ErrorResponse {
                    error: "Event request not found".to_string(),
                    message: format!("No stored event request with id {}", event_id),
                    status_code: 404,
                });
            }
        },
        (None, Some(event)) => event.clone(),
        (None, None) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing event".to_string(),
                message: "Either eventId or an inline event is required".to_string(),
                status_code: 400,
            });
        }
    };

    let top_n = req
        .top_n
        .map(|n| n as usize)
        .unwrap_or(state.default_top_n)
        .min(state.max_top_n);

    tracing::info!(
        "Recommending venues for event {}, topN: {}",
        event.event_id,
        top_n
    );

    let feedback = state.store.feedback_snapshot().await;
    // Clone the snapshot Arc out so scoring never holds the lock
    let index = state.index.read().await.clone();

    let ranking = match state.recommender.recommend(
        &event,
        state.store.venues(),
        &feedback,
        &index,
        top_n,
    ) {
        Ok(ranking) => ranking,
        Err(e @ EngineError::InvalidEvent(_)) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid event request".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
        Err(e @ EngineError::InvalidConfig(_)) => {
            tracing::error!("Engine configuration error during request: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Engine configuration error".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::info!(
        "Returning {} recommendations for event {} (from {} candidates)",
        ranking.entries.len(),
        event.event_id,
        ranking.total_candidates
    );

    HttpResponse::Ok().json(RecommendResponse {
        recommendations: ranking.entries,
        total_candidates: ranking.total_candidates,
        warnings: ranking.warnings,
    })
}

/// Record feedback endpoint
///
/// POST /api/v1/feedback
async fn submit_feedback(
    state: web::Data<AppState>,
    req: web::Json<SubmitFeedbackRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if !state.rating_scale.contains(req.rating) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid rating".to_string(),
            message: format!(
                "Rating must be within [{}, {}]",
                state.rating_scale.min, state.rating_scale.max
            ),
            status_code: 400,
        });
    }

    let record = FeedbackRecord {
        feedback_id: uuid::Uuid::new_v4().to_string(),
        venue_id: req.venue_id.clone(),
        rating: req.rating,
        comment: req.comment.clone(),
        created_at: Some(chrono::Utc::now()),
    };
    let feedback_id = record.feedback_id.clone();

    state.store.add_feedback(record).await;

    tracing::debug!("Recorded feedback {} for venue {}", feedback_id, req.venue_id);

    HttpResponse::Ok().json(SubmitFeedbackResponse {
        success: true,
        feedback_id,
    })
}

/// Append a historical event and rebuild the retrieval index
///
/// POST /api/v1/history
async fn add_history(
    state: web::Data<AppState>,
    req: web::Json<AddHistoryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if !state.rating_scale.contains(req.rating) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid rating".to_string(),
            message: format!(
                "Rating must be within [{}, {}]",
                state.rating_scale.min, state.rating_scale.max
            ),
            status_code: 400,
        });
    }

    let event = HistoricalEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        description: req.description.clone(),
        venue_id: req.venue_id.clone(),
        rating: req.rating,
    };
    let event_id = event.event_id.clone();

    let corpus_size = state.store.add_history(event).await;

    // Rebuild on the full corpus and swap the snapshot atomically; in-flight
    // scoring keeps its old Arc
    let snapshot = state.store.history_snapshot().await;
    let rebuilt = Arc::new(TfIdfIndex::build(snapshot));
    *state.index.write().await = rebuilt;

    tracing::info!(
        "Indexed historical event {} (corpus size now {})",
        event_id,
        corpus_size
    );

    HttpResponse::Ok().json(AddHistoryResponse {
        success: true,
        event_id,
        corpus_size,
    })
}
