use crate::errors::{AppError, ClientError};
use crate::models::{ActionForm, GalleryFilters, ListFilters, ReturnQuery, SummaryResponse};
use crate::state::AppState;
use crate::stats::build_summary;
use crate::ui::{
    render_confirm, render_detail, render_form, render_gallery, render_list, render_notice,
    ConfirmKind, FormPage, ListPage,
};
use crate::validation::{FieldErrors, FormAction, PlanForm};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::{error, info, warn};

const LOAD_PLANS_FAILED: &str = "Failed to load plans.";
const LOAD_PLAN_FAILED: &str = "Failed to load plan.";
const PLAN_NOT_FOUND: &str = "Plan not found.";
const SUBMIT_FAILED: &str = "Server error - please try again.";
const ACTION_FAILED: &str = "Action failed - please try again.";

pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<ListFilters>,
) -> Html<String> {
    let (plans, failure) = match state.client.list(&filters.to_query()).await {
        Ok(plans) => (plans, None),
        Err(err) => {
            error!("failed to load plans: {err}");
            (Vec::new(), Some(LOAD_PLANS_FAILED))
        }
    };

    let summary = build_summary(&plans);
    Html(render_list(&ListPage {
        filters: &filters,
        plans: &plans,
        summary: &summary,
        error: failure,
    }))
}

pub async fn gallery(
    State(state): State<AppState>,
    Query(filters): Query<GalleryFilters>,
) -> Html<String> {
    match state.client.list(&filters.to_query()).await {
        Ok(plans) => Html(render_gallery(&filters, &plans, None)),
        Err(err) => {
            error!("failed to load gallery: {err}");
            Html(render_gallery(&filters, &[], Some(LOAD_PLANS_FAILED)))
        }
    }
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.client.get(&id).await {
        Ok(plan) => Html(render_detail(&plan)).into_response(),
        Err(err) => plan_unavailable(&id, err),
    }
}

pub async fn new_form() -> Html<String> {
    let form = PlanForm::blank();
    Html(render_form(&FormPage {
        form: &form,
        errors: &FieldErrors::default(),
        plan_id: None,
        banner: None,
    }))
}

/// A plan that cannot be loaded gets the notice page instead of a blank form,
/// so nothing can be saved over it.
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let plan = match state.client.get(&id).await {
        Ok(plan) => plan,
        Err(err) => return plan_unavailable(&id, err),
    };

    let form = PlanForm::from_plan(&plan);
    Html(render_form(&FormPage {
        form: &form,
        errors: &FieldErrors::default(),
        plan_id: Some(&id),
        banner: None,
    }))
    .into_response()
}

pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    submit(&state, None, pairs).await
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    submit(&state, Some(&id), pairs).await
}

/// Validates the posted form and, only when it is clean, issues exactly one
/// create or update call.
async fn submit(state: &AppState, plan_id: Option<&str>, pairs: Vec<(String, String)>) -> Response {
    let (mut form, action) = PlanForm::from_pairs(pairs);
    let render = |form: &PlanForm, errors: &FieldErrors, banner: Option<&str>| {
        Html(render_form(&FormPage {
            form,
            errors,
            plan_id,
            banner,
        }))
    };

    if action != FormAction::Save {
        form.apply(action);
        return render(&form, &FieldErrors::default(), None).into_response();
    }

    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(errors) => {
            info!(fields = errors.len(), "plan form rejected");
            return (StatusCode::UNPROCESSABLE_ENTITY, render(&form, &errors, None)).into_response();
        }
    };

    let saved = match plan_id {
        Some(id) => state.client.update(id, &draft).await,
        None => state.client.create(&draft).await,
    };

    match saved {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => {
            error!("failed to save plan: {err}");
            (
                StatusCode::BAD_GATEWAY,
                render(&form, &FieldErrors::default(), Some(SUBMIT_FAILED)),
            )
                .into_response()
        }
    }
}

pub async fn toggle_complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(action): Form<ActionForm>,
) -> Response {
    let back = safe_return(&action.return_to);
    match state.client.set_completed(&id, !action.completed).await {
        Ok(()) => Redirect::to(&back).into_response(),
        Err(err) => action_failed(&id, err, &back),
    }
}

pub async fn confirm_archive(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReturnQuery>,
) -> Html<String> {
    confirm_page(&state, ConfirmKind::Archive, &id, &query.return_to).await
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReturnQuery>,
) -> Html<String> {
    confirm_page(&state, ConfirmKind::Delete, &id, &query.return_to).await
}

pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(action): Form<ActionForm>,
) -> Response {
    let back = safe_return(&action.return_to);
    if !action.confirmed() {
        info!(id = %id, "archive not confirmed");
        return Redirect::to(&back).into_response();
    }
    match state.client.archive(&id).await {
        Ok(()) => Redirect::to(&back).into_response(),
        Err(err) => action_failed(&id, err, &back),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(action): Form<ActionForm>,
) -> Response {
    let back = safe_return(&action.return_to);
    if !action.confirmed() {
        info!(id = %id, "delete not confirmed");
        return Redirect::to(&back).into_response();
    }
    match state.client.delete(&id).await {
        Ok(()) => Redirect::to(&back).into_response(),
        Err(err) => action_failed(&id, err, &back),
    }
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(filters): Query<ListFilters>,
) -> Result<Json<SummaryResponse>, AppError> {
    let plans = state.client.list(&filters.to_query()).await?;
    Ok(Json(build_summary(&plans)))
}

pub async fn health() -> &'static str {
    "ok"
}

async fn confirm_page(state: &AppState, kind: ConfirmKind, id: &str, return_to: &str) -> Html<String> {
    // The title is only a courtesy; the confirmation works without it.
    let title = match state.client.get(id).await {
        Ok(plan) => Some(plan.title),
        Err(err) => {
            warn!(id, "could not load plan for confirmation: {err}");
            None
        }
    };
    Html(render_confirm(kind, id, title.as_deref(), &safe_return(return_to)))
}

fn plan_unavailable(id: &str, err: ClientError) -> Response {
    match err {
        ClientError::NotFound => {
            (StatusCode::NOT_FOUND, Html(render_notice(PLAN_NOT_FOUND, "/"))).into_response()
        }
        other => {
            error!(id, "failed to load plan: {other}");
            (StatusCode::BAD_GATEWAY, Html(render_notice(LOAD_PLAN_FAILED, "/"))).into_response()
        }
    }
}

fn action_failed(id: &str, err: ClientError, back: &str) -> Response {
    error!(id, "plan action failed: {err}");
    let status = match err {
        ClientError::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, Html(render_notice(ACTION_FAILED, back))).into_response()
}

/// Only local paths are followed after an action; anything else goes to the
/// list. Control characters would not fit in a `Location` header.
fn safe_return(target: &str) -> String {
    let target = target.trim();
    if target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(char::is_control)
    {
        target.to_string()
    } else {
        "/".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_targets_must_be_local() {
        assert_eq!(safe_return("/?subject=Go"), "/?subject=Go");
        assert_eq!(safe_return("//evil.example"), "/");
        assert_eq!(safe_return("https://evil.example"), "/");
        assert_eq!(safe_return("/\\evil.example"), "/");
        assert_eq!(safe_return(""), "/");
    }

    #[test]
    fn return_targets_reject_control_characters() {
        assert_eq!(safe_return("/\nX-Injected: 1"), "/");
        assert_eq!(safe_return("/?subject=a\rb"), "/");
        assert_eq!(safe_return("/?subject=a\u{7f}"), "/");

        let response = Redirect::to(&safe_return("/\nX-Injected: 1")).into_response();
        assert_eq!(response.headers()["location"], "/");
    }
}
