//! Settings route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use quickmart_core::{ColorScheme, ThemeMode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ThemeParams {
    /// The device color scheme; light when absent.
    pub system: Option<ColorScheme>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeUpdate {
    pub theme: String,
    pub system: Option<ColorScheme>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeView {
    pub theme: ThemeMode,
    pub is_dark: bool,
}

impl ThemeView {
    fn new(theme: ThemeMode, system: Option<ColorScheme>) -> Self {
        Self {
            theme,
            is_dark: theme.is_dark(system.unwrap_or_default()),
        }
    }
}

#[instrument(skip(state))]
pub async fn theme(
    State(state): State<AppState>,
    Query(params): Query<ThemeParams>,
) -> Json<ThemeView> {
    Json(ThemeView::new(state.theme().mode().await, params.system))
}

/// Change the theme preference. Responds with the mode in effect, which is
/// the previous one if it could not be saved.
#[instrument(skip(state))]
pub async fn set_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeUpdate>,
) -> Result<Json<ThemeView>> {
    let mode = ThemeMode::parse(&body.theme).ok_or_else(|| {
        AppError::BadRequest("theme must be one of light, dark, system".to_string())
    })?;
    let effective = state.theme().set(mode).await;
    Ok(Json(ThemeView::new(effective, body.system)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::tests::send;
    use crate::test_support::app_state;

    #[tokio::test]
    async fn test_system_theme_follows_device() {
        let state = app_state().await;
        let (_, light) = send(&state, "GET", "/api/settings/theme", None).await;
        assert_eq!(light["theme"], "system");
        assert_eq!(light["isDark"], false);

        let (_, dark) = send(&state, "GET", "/api/settings/theme?system=dark", None).await;
        assert_eq!(dark["isDark"], true);
    }

    #[tokio::test]
    async fn test_set_theme() {
        let state = app_state().await;
        let (status, body) =
            send(&state, "PUT", "/api/settings/theme", Some(json!({"theme": "dark"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["theme"], "dark");
        assert_eq!(body["isDark"], true);

        let (status, _) =
            send(&state, "PUT", "/api/settings/theme", Some(json!({"theme": "sepia"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (_, body) = send(&state, "GET", "/api/settings/theme", None).await;
        assert_eq!(body["theme"], "dark");
    }
}
