//! Session handling and the navigation guard
//!
//! The console is logged in exactly when a stored token was found (or just
//! issued) and the HTTP client is sending it. [`Console::verify_login`] is the
//! check the navigation guard runs before a protected view is entered.

mod session;
mod storage;
mod types;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::store::Mutation;
use crate::Console;

pub use session::*;
pub use storage::*;
pub use types::*;

const LOGIN_PATH: &str = "/auth/login/";
const LOGOUT_PATH: &str = "/auth/logout/";

impl Console {
    /// Log in with a username and password.
    ///
    /// The credentials are only used for this one request. The issued token
    /// is persisted together with its expiry and attached to every following
    /// request.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn run() -> mrgen_console::error::Result<()> {
    /// let console = mrgen_console::Console::new("http://localhost:8000")?;
    /// console.login_with_credentials("operator", "hunter2").await?;
    /// assert!(console.is_logged_in());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login_with_credentials(&self, username: &str, password: &str) -> Result<()> {
        let response: LoginResponse = self
            .api
            .post_with_basic_auth(LOGIN_PATH, username, password)
            .await
            .map_err(|err| match err.status() {
                Some(401) | Some(403) => Error::auth(format!("invalid credentials for '{}'", username)),
                _ => err,
            })?;

        let token = StoredToken::from(response);
        self.tokens.save(&token)?;
        self.api.set_token(&token.token);
        self.commit(Mutation::SetLoggedIn(true));

        info!(username, expiry = ?token.expiry, "logged in");
        Ok(())
    }

    /// Invalidate the session on the server, then forget it locally.
    ///
    /// The local token is only dropped once the server accepted the logout;
    /// when the request fails the console stays logged in.
    pub async fn logout(&self) -> Result<()> {
        self.api.post::<_, Value>(LOGOUT_PATH, &serde_json::json!({})).await?;

        self.tokens.clear()?;
        self.api.clear_token();
        self.commit(Mutation::SetLoggedIn(false));

        info!("logged out");
        Ok(())
    }

    /// Look for a stored token and arm or disarm the HTTP client accordingly.
    /// Returns whether the console is now logged in.
    pub fn verify_login(&self) -> Result<bool> {
        let token = match self.tokens.load()? {
            Some(token) if token.is_expired() => {
                warn!(expiry = ?token.expiry, "stored token has expired");
                self.tokens.clear()?;
                None
            }
            token => token,
        };

        let logged_in = match token {
            Some(token) => {
                self.api.set_token(&token.token);
                true
            }
            None => {
                self.api.clear_token();
                false
            }
        };

        self.commit(Mutation::SetLoggedIn(logged_in));
        Ok(logged_in)
    }

    /// Navigation guard: decide whether `route` may be entered.
    ///
    /// Public routes are always entered. Protected routes are entered when
    /// [`verify_login`](Self::verify_login) finds a session and otherwise
    /// redirect to the login view.
    pub fn authorize(&self, route: Route) -> Result<Navigation> {
        let logged_in = self.verify_login()?;

        if !route.requires_login() || logged_in {
            Ok(Navigation::Proceed(route))
        } else {
            info!(route = %route, "not logged in; redirecting to login");
            Ok(Navigation::Redirect(Route::Login))
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.read(|s| s.logged_in)
    }
}
