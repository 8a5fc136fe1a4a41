use crate::api::error::AppError;
use crate::services::session::Session;
use crate::services::store::filter_owner;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use std::convert::Infallible;

/// Live student listing for the admin view. Each event carries the full,
/// name-ordered current set. The watch receiver is dropped when the client
/// disconnects, which tears the subscription down.
#[utoipa::path(
    get,
    path = "/events/students",
    responses(
        (status = 200, description = "SSE stream of full student listings"),
        (status = 401, description = "Admin session required")
    ),
    tag = "events"
)]
pub async fn student_events(
    State(state): State<crate::AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.store.subscribe_students();

    let stream = async_stream::stream! {
        loop {
            let records = rx.borrow_and_update().clone();
            if let Ok(event) = Event::default().json_data(&*records) {
                yield Ok(event);
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Live media feed. Admins get the full newest-first set; a logged-in
/// student gets the feed filtered to their own records.
#[utoipa::path(
    get,
    path = "/events/media",
    responses(
        (status = 200, description = "SSE stream of full media listings"),
        (status = 401, description = "No session")
    ),
    tag = "events"
)]
pub async fn media_events(
    State(state): State<crate::AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let owner = match state.session.current() {
        Session::Admin => None,
        Session::Student { student_id, .. } => Some(student_id),
        Session::Anonymous => {
            return Err(AppError::Unauthorized("Login required".to_string()));
        }
    };

    let mut rx = state.store.subscribe_media();

    let stream = async_stream::stream! {
        loop {
            let records = rx.borrow_and_update().clone();
            let visible = filter_owner((*records).clone(), owner.as_deref());
            if let Ok(event) = Event::default().json_data(&visible) {
                yield Ok(event);
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
