//! Sign-in and sign-out

use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    dto::LoginForm,
    error::{ShopError, ShopResult},
    security::{
        REMEMBER_ME_COOKIE, SESSION_COOKIE,
        middleware::{remember_me_cookie, removal_cookie, session_cookie},
    },
    session::{CurrentSession, SessionContext},
    state::AppState,
};

/// Check the credentials and move the visitor into a new session that keeps
/// their cart
pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> ShopResult<Response> {
    let user = match state
        .user_service
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(ShopError::Unauthorized) => return Ok(Redirect::to("/login?error").into_response()),
        Err(e) => return Err(e),
    };

    let signed_in = CurrentSession::with_context(SessionContext {
        cart: session.context.cart,
        user: Some(user.clone()),
    });
    state.sessions.delete(session.id).await?;
    state.sessions.save(&signed_in).await?;

    let mut jar = jar.add(session_cookie(signed_in.id));
    if form.remember_me() {
        let token = state.remember_me.issue(user.id)?;
        jar = jar.add(remember_me_cookie(token));
    }

    Ok((jar, Redirect::to("/home")).into_response())
}

/// Forget the session and both cookies
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    jar: CookieJar,
) -> ShopResult<impl IntoResponse> {
    state.sessions.delete(session.id).await?;

    let jar = jar
        .add(removal_cookie(SESSION_COOKIE))
        .add(removal_cookie(REMEMBER_ME_COOKIE));
    Ok((jar, Redirect::to("/login?logout")))
}
