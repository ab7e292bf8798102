//! Auth slice
//!
//! Session token and signed-in profile. The network layer keeps its auth
//! header in sync with this slice through a store subscription set up once at
//! startup; the slice itself knows nothing about transports.

use serde::{Deserialize, Serialize};

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// User id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Phone number in E.164 form.
    pub phone: String,
}

/// Auth slice state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// Bearer token for API calls, when signed in.
    pub token: Option<String>,

    /// Signed-in profile.
    pub profile: Option<Profile>,
}

impl AuthState {
    /// Whether a session token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Auth slice actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// A sign-in (or OTP verification) completed.
    SignedIn {
        /// Session token.
        token: String,

        /// Profile returned alongside the token.
        profile: Profile,
    },

    /// The session token was refreshed.
    TokenRefreshed(String),

    /// The profile was updated server-side.
    ProfileUpdated(Profile),

    /// The user signed out.
    SignedOut,
}

pub(super) fn reduce(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::SignedIn { token, profile } => {
            state.token = Some(token);
            state.profile = Some(profile);
        }
        AuthAction::TokenRefreshed(token) => state.token = Some(token),
        AuthAction::ProfileUpdated(profile) => state.profile = Some(profile),
        AuthAction::SignedOut => *state = AuthState::default(),
    }
}
