/// Session lifecycle notifications broadcast by `ApiClient`.
///
/// The hosting application subscribes and decides what to do; for
/// `Terminated` that usually means sending the user back to login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    Refreshed,
    SignedOut,
    Terminated(TerminationReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// A request was rejected and there was no refresh token to recover with.
    MissingRefreshToken,
    /// The refresh call failed; carries the failure message.
    RefreshFailed(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::MissingRefreshToken => write!(f, "no refresh token available"),
            TerminationReason::RefreshFailed(msg) => write!(f, "token refresh failed: {}", msg),
        }
    }
}
