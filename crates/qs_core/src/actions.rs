//! The client's three actions as typed requests.
//!
//! Each returns a [`ViewUpdate`] to apply, or the reason it couldn't.
//! None of them touch a [`ViewState`](crate::view::ViewState): call
//! [`ViewState::clear_message`](crate::view::ViewState::clear_message)
//! before spin/attack, and apply the update when it arrives.

use crate::{
    api::{Endpoint, GameApi},
    view::ViewUpdate,
    RequestError,
};

/// # Errors
/// If the request fails or the body doesn't parse.
pub async fn spin(api: &dyn GameApi, flag: bool) -> Result<ViewUpdate, RequestError> {
    api.spin(flag).await.map(ViewUpdate::Spin)
}

/// # Errors
/// If the request fails, the body doesn't parse,
/// or a successful attack comes without reels.
pub async fn attack(api: &dyn GameApi, flag: bool) -> Result<ViewUpdate, RequestError> {
    let attack = api.attack(flag).await?;
    if attack.status.is_success() && attack.result.is_none() {
        return Err(RequestError::MissingField {
            url: Endpoint::Attack.path().to_owned(),
            field: "result",
        });
    }
    Ok(ViewUpdate::Attack(attack))
}

/// # Errors
/// If the request fails or the body doesn't parse.
pub async fn poll_logs(api: &dyn GameApi) -> Result<ViewUpdate, RequestError> {
    api.console().await.map(ViewUpdate::Console)
}
