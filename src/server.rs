use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Form, Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use log::info;
use rusqlite::Connection;
use serde::Deserialize;

use crate::error::AppError;
use crate::{ops, render};

/// Shared handler state: the single database connection, constructed in main
/// and injected here.
pub struct AppState {
    conn: Mutex<Connection>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    // A poisoned lock still guards a usable connection; nothing behind it
    // panics mid-write.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/add", post(add))
        .route("/update/{id}", get(toggle))
        .route("/delete/{id}", get(delete))
        .with_state(state)
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let tasks = ops::list_tasks(&state.conn())?;
    Ok(Html(render::index_page(&tasks)))
}

#[derive(Deserialize)]
struct AddForm {
    // A missing field folds to "" so absent and empty titles hit the same
    // validation path instead of a body-rejection.
    #[serde(default)]
    title: String,
}

async fn add(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddForm>,
) -> Result<Redirect, AppError> {
    let task = ops::insert_task(&state.conn(), &form.title)?;
    info!("added task {}", task.id);
    Ok(Redirect::to("/"))
}

async fn toggle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    ops::toggle_complete(&state.conn(), id)?;
    info!("toggled task {id}");
    Ok(Redirect::to("/"))
}

async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    ops::delete_task(&state.conn(), id)?;
    info!("deleted task {id}");
    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(db::open_memory().unwrap()))
    }

    #[tokio::test]
    async fn add_then_home_shows_task() {
        let state = state();
        add(
            State(state.clone()),
            Form(AddForm {
                title: "Buy milk".into(),
            }),
        )
        .await
        .unwrap();

        let Html(html) = home(State(state)).await.unwrap();
        assert!(html.contains("Buy milk"));
    }

    #[tokio::test]
    async fn add_empty_title_is_validation_error() {
        let state = state();
        let err = add(State(state.clone()), Form(AddForm { title: String::new() }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let Html(html) = home(State(state)).await.unwrap();
        assert!(html.contains("No tasks yet."));
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_not_found() {
        let err = toggle(State(state()), Path(9999)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(9999)));
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let err = delete(State(state()), Path(9999)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(9999)));
    }

    #[tokio::test]
    async fn toggle_round_trip() {
        let state = state();
        let task = ops::insert_task(&state.conn(), "t").unwrap();

        toggle(State(state.clone()), Path(task.id)).await.unwrap();
        assert!(ops::get_task(&state.conn(), task.id).unwrap().unwrap().complete);

        toggle(State(state.clone()), Path(task.id)).await.unwrap();
        assert!(!ops::get_task(&state.conn(), task.id).unwrap().unwrap().complete);
    }
}
