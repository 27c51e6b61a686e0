use axum::{extract::State, Json};

use crate::{error::AppError, models::Employee, state::AppState};

/// Employees a request can be assigned to, ordered by username.
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state.directory.list_employees().await?;
    Ok(Json(employees))
}
