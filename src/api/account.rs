//! Account API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{LoginRequest, NewOrder, Order, ProfileUpdate, PublicAccount, SignupRequest};
use crate::AppState;

/// POST /api/account/signup - Register a new account.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<PublicAccount> {
    let user = state.accounts.lock().await.signup(request).await?;
    success(PublicAccount::from(&user))
}

/// POST /api/account/login - Start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<PublicAccount> {
    let user = state
        .accounts
        .lock()
        .await
        .login(&request.email, &request.password)
        .await?;
    success(PublicAccount::from(&user))
}

/// POST /api/account/logout - End the session.
pub async fn logout(State(state): State<AppState>) -> ApiResult<()> {
    state.accounts.lock().await.logout().await?;
    success(())
}

/// GET /api/account - The logged-in account, or null.
pub async fn current_account(State(state): State<AppState>) -> ApiResult<Option<PublicAccount>> {
    let accounts = state.accounts.lock().await;
    success(accounts.current_user().map(PublicAccount::from))
}

/// PUT /api/account/:id - Update profile fields.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<PublicAccount> {
    let user = state
        .accounts
        .lock()
        .await
        .update_profile(&user_id, update)
        .await?;
    success(PublicAccount::from(&user))
}

/// POST /api/account/:id/orders - Place an order.
pub async fn add_order(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(order): Json<NewOrder>,
) -> ApiResult<Order> {
    let order = state
        .accounts
        .lock()
        .await
        .add_order(&user_id, order)
        .await?;
    success(order)
}
