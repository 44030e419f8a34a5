//! MRGen console client
//!
//! A typed client for the MRGen customer reporting backend. [`Console`] owns
//! the application state an operator sees (paged customers, the selected
//! customer with its schedules and reports, modal flags and the login flag)
//! and exposes the actions that change it. Every action talks to the backend
//! first and then commits the result through [`store::ConsoleState::apply`].

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod store;

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::Client;

use crate::auth::{FileTokenStore, TokenStore};
use crate::config::ConsoleOptions;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::store::{ConsoleState, Mutation};

/// The main entry point: shared application state plus the actions that
/// mutate it.
///
/// Cloning is cheap and every clone shares the same state, so actions may be
/// run concurrently from several tasks. Concurrent reloads commit in the
/// order their responses arrive.
#[derive(Clone)]
pub struct Console {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    state: Arc<RwLock<ConsoleState>>,
    options: Arc<ConsoleOptions>,
}

impl Console {
    /// Create a console for `backend_url` with default options
    ///
    /// # Example
    ///
    /// ```
    /// use mrgen_console::Console;
    ///
    /// let console = Console::new("http://localhost:8000").unwrap();
    /// assert!(!console.state().logged_in);
    /// ```
    pub fn new(backend_url: &str) -> Result<Self> {
        Self::new_with_options(ConsoleOptions::default().with_backend_url(backend_url))
    }

    /// Create a console that persists its session token to `options.token_path`
    pub fn new_with_options(options: ConsoleOptions) -> Result<Self> {
        let tokens = Arc::new(FileTokenStore::new(&options.token_path));
        Self::with_token_store(options, tokens)
    }

    /// Create a console with a custom token store
    pub fn with_token_store(options: ConsoleOptions, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        options.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let api = ApiClient::new(&options.backend_url, builder.build()?);

        Ok(Self {
            api,
            tokens,
            state: Arc::new(RwLock::new(ConsoleState::default())),
            options: Arc::new(options),
        })
    }

    /// Create a console from `MRGEN_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new_with_options(ConsoleOptions::from_env()?)
    }

    /// The underlying HTTP client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn options(&self) -> &ConsoleOptions {
        &self.options
    }

    /// A snapshot of the current state
    pub fn state(&self) -> ConsoleState {
        self.read(Clone::clone)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub(crate) fn commit(&self, mutation: Mutation) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(mutation);
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{FileTokenStore, MemoryTokenStore, Navigation, Route, TokenStore};
    pub use crate::config::ConsoleOptions;
    pub use crate::error::{Error, Result};
    pub use crate::store::{
        ConsoleState, Customer, CustomerId, NewCustomer, Page, PeriodicTask, Report, Schedule,
        TaskType,
    };
    pub use crate::Console;
}
