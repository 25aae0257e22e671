use crate::models::PolicyInfo;
use axum::Json;

/// Static policy information. Not listed in the API document.
pub async fn get_policy() -> Json<PolicyInfo> {
    Json(PolicyInfo::current())
}
