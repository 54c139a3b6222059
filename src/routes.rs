use axum::{
    Router,
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{
    AppState, csrf,
    error::{AppError, AppResult},
    models::{
        AddForm, EditForm, IdQuery, MoviePatch, NewMovie, SelectQuery, non_blank, parse_rating,
    },
    ranking,
    templates::{self, FormState},
};

const CSRF_ERROR: &str = "The form expired. Please submit it again.";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/edit", get(edit_form).post(edit_submit))
        .route("/del", get(delete))
        .route("/add", get(add_form).post(add_submit))
        .route("/select", get(select))
        .with_state(state)
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let movies = ranking::rerank(&state.store).await?;
    Ok(Html(templates::list_page(&movies)))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let movie = state.store.get(q.id).await?;
    let (jar, token) = csrf::issue(jar);

    let form = FormState {
        rating: movie.rating.map(|r| r.to_string()).unwrap_or_default(),
        review: movie.review.clone().unwrap_or_default(),
        ..Default::default()
    };
    Ok((jar, Html(templates::edit_page(&movie, &form, &token))))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
    jar: SignedCookieJar,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let movie = state.store.get(q.id).await?;

    match validate_edit(&form, csrf::verify(&jar, &form.csrf_token)) {
        Ok((rating, review)) => {
            let patch = MoviePatch { rating: Some(rating), review: Some(review) };
            state.store.update(movie.id, patch).await?;
            tracing::info!(movie_id = movie.id, rating, "movie rating updated");
            Ok(Redirect::to("/").into_response())
        },
        Err(errors) => {
            tracing::debug!(movie_id = movie.id, ?errors, "edit form rejected");
            let (jar, token) = csrf::issue(jar);
            let echoed =
                FormState { rating: form.rating, review: form.review, errors, ..Default::default() };
            let body = templates::edit_page(&movie, &echoed, &token);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response())
        },
    }
}

fn validate_edit(form: &EditForm, csrf_ok: bool) -> Result<(f64, String), Vec<String>> {
    let mut errors = Vec::new();
    if !csrf_ok {
        errors.push(CSRF_ERROR.to_string());
    }

    let rating = match parse_rating(&form.rating) {
        Ok(Some(rating)) => Some(rating),
        Ok(None) => {
            errors.push("Rating is required.".to_string());
            None
        },
        Err(err) => {
            errors.push(format!("Rating: {err}."));
            None
        },
    };

    let review = non_blank(&form.review);
    if review.is_none() {
        errors.push("Review is required.".to_string());
    }

    match (rating, review) {
        (Some(rating), Some(review)) if errors.is_empty() => Ok((rating, review)),
        _ => Err(errors),
    }
}

pub async fn delete(State(state): State<AppState>, Query(q): Query<IdQuery>) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    Ok(Redirect::to("/"))
}

pub async fn add_form(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let (jar, token) = csrf::issue(jar);
    (jar, Html(templates::add_page(&FormState::default(), &token)))
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AddForm>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    if !csrf::verify(&jar, &form.csrf_token) {
        errors.push(CSRF_ERROR.to_string());
    }
    let title = non_blank(&form.title);
    if title.is_none() {
        errors.push("Movie title is required.".to_string());
    }
    let rating = parse_rating(&form.rating).unwrap_or_else(|err| {
        errors.push(format!("Rating: {err}."));
        None
    });

    let Some(title) = title.filter(|_| errors.is_empty()) else {
        tracing::debug!(?errors, "add form rejected");
        let (jar, token) = csrf::issue(jar);
        let echoed = FormState { title: form.title, rating: form.rating, review: form.review, errors };
        let body = templates::add_page(&echoed, &token);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response());
    };

    let results = state.tmdb.search_movie(&title).await?;
    let rating = rating.map(|r| r.to_string()).unwrap_or_default();
    let review = non_blank(&form.review).unwrap_or_default();

    Ok(Html(templates::select_page(&title, &results, &rating, &review)).into_response())
}

pub async fn select(
    State(state): State<AppState>,
    Query(q): Query<SelectQuery>,
) -> AppResult<Redirect> {
    let rating = parse_rating(&q.rating).map_err(AppError::Validation)?;
    let review = non_blank(&q.review);

    let details = state.tmdb.get_movie_details(q.id).await?;
    let year = details.year()?;
    let img_url = details.poster_url(&state.config.tmdb_image_base_url)?;

    let movie = state
        .store
        .insert(NewMovie {
            title: details.title,
            year,
            description: details.overview.unwrap_or_default(),
            rating,
            review,
            img_url,
        })
        .await?;
    tracing::debug!(movie_id = movie.id, tmdb_id = q.id, "movie added from TMDB");

    Ok(Redirect::to("/"))
}
