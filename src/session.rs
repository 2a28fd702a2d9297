use api_client::model::Authorization;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Holds the credentials of the signed-in user and can sign them out.
pub trait SessionController {
    /// `Authorization` header value for the next request.
    ///
    /// An invalidated session yields an empty value; the backend answers
    /// such requests with 401.
    fn authorization(&self) -> Authorization;

    fn invalidate(&self);
}

impl<S> SessionController for Arc<S>
where
    S: SessionController + ?Sized,
{
    fn authorization(&self) -> Authorization {
        (**self).authorization()
    }

    fn invalidate(&self) {
        (**self).invalidate()
    }
}

/// Session backed by a token handed in at start-up.
#[derive(Debug, Default)]
pub struct TokenSession {
    token: Mutex<Option<String>>,
}

impl TokenSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    pub fn is_active(&self) -> bool {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl SessionController for TokenSession {
    fn authorization(&self) -> Authorization {
        Authorization(
            self.token
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
                .unwrap_or_default(),
        )
    }

    fn invalidate(&self) {
        if self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
        {
            info!("session invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_clears_the_token() {
        let session = TokenSession::new("Bearer abc");
        assert_eq!(session.authorization(), Authorization("Bearer abc".to_owned()));

        session.invalidate();

        assert!(!session.is_active());
        assert_eq!(session.authorization(), Authorization(String::new()));
    }
}
