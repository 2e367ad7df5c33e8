//! Session persistence between invocations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use upline::store::{KeyValueStore, StoreError};
use upline_app::session::{BearerToken, Session, SessionUser};

/// Storage key the signed-in session is kept under.
pub(crate) const SESSION_STORAGE_KEY: &str = "session";

#[derive(Debug, Error)]
pub(crate) enum StateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("stored session is corrupt")]
    Corrupt(#[source] serde_json::Error),

    #[error("failed to encode session")]
    Encode(#[source] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user: Option<StoredUser>,
}

#[derive(Serialize, Deserialize)]
struct StoredUser {
    id: u64,
    username: String,
    email: Option<String>,
    role: Option<String>,
}

/// Restore the session saved by a previous `login`. A token given on the
/// command line or in the environment replaces the stored one.
pub(crate) fn load_session(
    store: &impl KeyValueStore,
    token_override: Option<&str>,
) -> Result<Session, StateError> {
    let stored = match store.get(SESSION_STORAGE_KEY)? {
        Some(json) if !json.trim().is_empty() => {
            Some(serde_json::from_str::<StoredSession>(&json).map_err(StateError::Corrupt)?)
        }
        _ => None,
    };

    let mut session = Session::new();

    match (stored, token_override) {
        (_, Some(token)) => session = Session::with_token(BearerToken::new(token)),
        (Some(stored), None) => match stored.user {
            Some(user) => session.begin(
                SessionUser {
                    id: user.id,
                    username: user.username,
                    email: user.email,
                    role: user.role,
                },
                BearerToken::new(stored.token),
            ),
            None => session = Session::with_token(BearerToken::new(stored.token)),
        },
        (None, None) => {}
    }

    Ok(session)
}

/// Save `session`, or clear the stored one when signed out.
pub(crate) fn save_session(
    store: &mut impl KeyValueStore,
    session: &Session,
) -> Result<(), StateError> {
    let json = match session.token() {
        Some(token) => serde_json::to_string(&StoredSession {
            token: token.expose().to_string(),
            user: session.user().map(|user| StoredUser {
                id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
                role: user.role.clone(),
            }),
        })
        .map_err(StateError::Encode)?,
        None => String::new(),
    };

    store.set(SESSION_STORAGE_KEY, json)?;

    Ok(())
}
