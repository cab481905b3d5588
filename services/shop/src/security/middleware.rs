//! Session loading, remember-me sign-in and route protection

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::policy::{Decision, authorize};
use crate::{
    error::ShopError,
    models::AuthUser,
    session::CurrentSession,
    state::AppState,
};

pub const SESSION_COOKIE: &str = "SESSION";
pub const REMEMBER_ME_COOKIE: &str = "remember-me";

/// Session cookie: whole site, not readable from scripts
pub fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Remember-me cookie. The token inside carries its own expiry.
pub fn remember_me_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REMEMBER_ME_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .permanent()
        .build()
}

/// A cookie telling the browser to drop `name`
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name).path("/").build();
    cookie.make_removal();
    cookie
}

/// Resolve the session of every request, sign in remembered users, and
/// apply the route policy before the handler runs.
///
/// Handlers find the session as a [`CurrentSession`] request extension. A
/// new session is only stored, and its cookie only sent, when a remember-me
/// sign-in fills it; handlers that store one set their own cookie.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ShopError> {
    let mut session = None;
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        if let Some(context) = state.sessions.load(id).await? {
            session = Some(CurrentSession { id, context });
        }
    }

    let is_new = session.is_none();
    let mut session = session.unwrap_or_else(|| {
        debug!("Starting new session");
        CurrentSession::new()
    });

    let mut dirty = false;
    let mut forget_me = false;
    if session.context.user.is_none() {
        if let Some(cookie) = jar.get(REMEMBER_ME_COOKIE) {
            match remembered_user(&state, cookie.value()).await? {
                Some(user) => {
                    info!("Signed in remembered user {}", user.name);
                    session.context.user = Some(user);
                    dirty = true;
                }
                None => forget_me = true,
            }
        }
    }

    if dirty {
        state.sessions.save(&session).await?;
    }

    let path = req.uri().path().to_string();
    let mut response = match authorize(&path, session.user()) {
        Decision::Allow => {
            req.extensions_mut().insert(session.clone());
            next.run(req).await
        }
        Decision::Login => {
            debug!("{} requires a signed-in user", path);
            Redirect::to("/login").into_response()
        }
        Decision::Forbidden => {
            let name = session.user().map(|u| u.name.as_str()).unwrap_or_default();
            warn!("User {} may not access {}", name, path);
            ShopError::Forbidden.into_response()
        }
    };

    if is_new && dirty {
        append_cookie(&mut response, session_cookie(session.id))?;
    }
    if forget_me {
        append_cookie(&mut response, removal_cookie(REMEMBER_ME_COOKIE))?;
    }

    Ok(response)
}

/// The user a remember-me token belongs to, if the token is still good
async fn remembered_user(
    state: &AppState,
    token: &str,
) -> Result<Option<AuthUser>, ShopError> {
    let claims = match state.remember_me.verify(token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Ignoring remember-me token: {}", e);
            return Ok(None);
        }
    };

    state.user_service.load_by_id(claims.sub).await
}

/// Add a Set-Cookie header unless the handler already set that cookie
fn append_cookie(response: &mut Response, cookie: Cookie<'static>) -> Result<(), ShopError> {
    if sets_cookie(response, cookie.name()) {
        return Ok(());
    }

    let value = HeaderValue::from_str(&cookie.to_string()).map_err(|e| {
        error!("Invalid cookie header: {}", e);
        ShopError::Internal(e.into())
    })?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(())
}

fn sets_cookie(response: &Response, name: &str) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split_once('='))
        .any(|(cookie_name, _)| cookie_name.trim() == name)
}
