//! Deck, card, review, settings and progress endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use flashdeck_algo::{
    check_daily_completion, Action, Card, DailyProgress, Grade, Remaining, Settings,
    SettingsPatch, Stats,
};
use serde::{Deserialize, Serialize};

use crate::response::{ok, ok_persisted, AppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddDeckRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddCardRequest {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub deck_name: String,
    pub card_id: u64,
    /// `again` / `hard` / `good` / `easy`
    pub grade: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub card: Card,
    pub stats: Stats,
    pub daily_progress: DailyProgress,
    pub daily_complete: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub daily_progress: DailyProgress,
    pub remaining: Remaining,
    pub daily_complete: bool,
    pub streak_days: u32,
    pub accuracy: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueCardsResponse {
    pub deck_name: String,
    pub due: Vec<Card>,
    pub new_cards: usize,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

pub async fn add_deck(
    State(state): State<AppState>,
    payload: Result<Json<AddDeckRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = body(payload)?;
    let name = req.name.trim().to_string();
    let out = state
        .session()
        .dispatch(Action::AddDeck { name: name.clone() })
        .await?;

    let deck = out.document.deck(&name)?.clone();
    Ok(ok_persisted(deck, out.persisted))
}

pub async fn add_card(
    State(state): State<AppState>,
    Path(deck_name): Path<String>,
    payload: Result<Json<AddCardRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = body(payload)?;
    let out = state
        .session()
        .dispatch(Action::AddCard {
            deck_name: deck_name.clone(),
            front: req.front,
            back: req.back,
        })
        .await?;

    let card = out
        .document
        .deck(&deck_name)?
        .cards
        .last()
        .cloned()
        .ok_or_else(|| AppError::internal("card missing after insert"))?;

    tracing::info!(deck = %deck_name, card_id = card.id, "card added");
    Ok(ok_persisted(card, out.persisted))
}

pub async fn due_cards(
    State(state): State<AppState>,
    Path(deck_name): Path<String>,
) -> Result<Response, AppError> {
    let session = state.session();
    let today = session.today();
    let doc = session.snapshot().await;
    let deck = doc.deck(&deck_name)?;

    Ok(ok(DueCardsResponse {
        deck_name: deck.name.clone(),
        due: deck.due_cards(today).into_iter().cloned().collect(),
        new_cards: deck.new_card_count(),
    }))
}

pub async fn review(
    State(state): State<AppState>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = body(payload)?;
    let grade: Grade = req.grade.parse()?;

    let out = state
        .session()
        .dispatch(Action::ReviewCard {
            deck_name: req.deck_name.clone(),
            card_id: req.card_id,
            grade,
        })
        .await?;

    let doc = out.document;
    let card = doc.card(&req.deck_name, req.card_id)?.clone();
    let daily_complete = check_daily_completion(&doc.daily_progress, &doc.settings);

    tracing::info!(
        deck = %req.deck_name,
        card_id = req.card_id,
        %grade,
        interval = card.interval,
        ease = card.ease,
        next_review = %card.next_review,
        "card reviewed"
    );

    Ok(ok_persisted(
        ReviewResponse {
            card,
            stats: doc.stats,
            daily_progress: doc.daily_progress,
            daily_complete,
        },
        out.persisted,
    ))
}

pub async fn get_settings(State(state): State<AppState>) -> Response {
    ok(state.session().snapshot().await.settings)
}

pub async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<SettingsPatch>, JsonRejection>,
) -> Result<Response, AppError> {
    let patch = body(payload)?;
    let out = state
        .session()
        .dispatch(Action::UpdateSettings(patch))
        .await?;

    let settings: Settings = out.document.settings;
    tracing::info!(?settings, "settings updated");
    Ok(ok_persisted(settings, out.persisted))
}

pub async fn progress(State(state): State<AppState>) -> Response {
    let doc = state.session().current().await;
    ok(progress_response(doc.daily_progress, &doc.settings, &doc.stats))
}

pub async fn reset_progress(State(state): State<AppState>) -> Result<Response, AppError> {
    let out = state
        .session()
        .dispatch(Action::ResetDailyProgress)
        .await?;
    let doc = out.document;
    Ok(ok_persisted(
        progress_response(doc.daily_progress, &doc.settings, &doc.stats),
        out.persisted,
    ))
}

fn progress_response(
    daily_progress: DailyProgress,
    settings: &Settings,
    stats: &Stats,
) -> ProgressResponse {
    ProgressResponse {
        remaining: daily_progress.remaining(settings),
        daily_complete: check_daily_completion(&daily_progress, settings),
        daily_progress,
        streak_days: stats.streak_days,
        accuracy: stats.accuracy(),
    }
}
