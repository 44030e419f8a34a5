//! Configuration options for the console client

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::store::PeriodicTask;

/// Environment variable holding the backend base URL
pub const BACKEND_URL_VAR: &str = "MRGEN_BACKEND_URL";
/// Environment variable overriding where the session token is persisted
pub const TOKEN_PATH_VAR: &str = "MRGEN_TOKEN_PATH";
/// Environment variable overriding the page size of every paged list
pub const PAGE_SIZE_VAR: &str = "MRGEN_PAGE_SIZE";

/// Configuration options for the console client
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Base URL of the backend, without a trailing `/api`
    pub backend_url: String,

    /// Page size used when listing customers
    pub customers_per_page: u32,

    /// Page size used when listing schedules
    pub schedules_per_page: u32,

    /// Page size used when listing reports
    pub reports_per_page: u32,

    /// Descriptor used when a schedule is created without one
    pub default_periodic_task: PeriodicTask,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// File the session token is persisted to
    pub token_path: PathBuf,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            customers_per_page: 10,
            schedules_per_page: 10,
            reports_per_page: 10,
            default_periodic_task: PeriodicTask::default(),
            request_timeout: Some(Duration::from_secs(30)),
            token_path: PathBuf::from(".mrgen_token.json"),
        }
    }
}

impl ConsoleOptions {
    /// Read options from the process environment.
    ///
    /// `MRGEN_BACKEND_URL` is required; `MRGEN_TOKEN_PATH` and
    /// `MRGEN_PAGE_SIZE` are optional overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build options from an arbitrary key lookup
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup(BACKEND_URL_VAR).ok_or_else(|| {
            Error::config(format!("{} environment variable not found", BACKEND_URL_VAR))
        })?;

        let mut options = Self::default().with_backend_url(&backend_url);

        if let Some(path) = lookup(TOKEN_PATH_VAR) {
            options = options.with_token_path(path);
        }

        if let Some(raw) = lookup(PAGE_SIZE_VAR) {
            let size = raw.trim().parse::<u32>().map_err(|e| {
                Error::config(format!("{} must be a positive integer: {}", PAGE_SIZE_VAR, e))
            })?;
            options = options.with_page_size(size);
        }

        options.validate()?;
        Ok(options)
    }

    /// Check that the options describe a usable backend
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.backend_url)?;
        if self.customers_per_page == 0
            || self.schedules_per_page == 0
            || self.reports_per_page == 0
        {
            return Err(Error::config("page sizes must be greater than zero"));
        }
        Ok(())
    }

    /// Set the backend base URL
    pub fn with_backend_url(mut self, value: &str) -> Self {
        self.backend_url = value.trim_end_matches('/').to_string();
        self
    }

    /// Set the same page size for customers, schedules and reports
    pub fn with_page_size(mut self, value: u32) -> Self {
        self.customers_per_page = value;
        self.schedules_per_page = value;
        self.reports_per_page = value;
        self
    }

    /// Set the customer page size
    pub fn with_customers_per_page(mut self, value: u32) -> Self {
        self.customers_per_page = value;
        self
    }

    /// Set the schedule page size
    pub fn with_schedules_per_page(mut self, value: u32) -> Self {
        self.schedules_per_page = value;
        self
    }

    /// Set the report page size
    pub fn with_reports_per_page(mut self, value: u32) -> Self {
        self.reports_per_page = value;
        self
    }

    /// Set the descriptor used for schedules created without one
    pub fn with_default_periodic_task(mut self, value: PeriodicTask) -> Self {
        self.default_periodic_task = value;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set where the session token is persisted
    pub fn with_token_path<P: Into<PathBuf>>(mut self, value: P) -> Self {
        self.token_path = value.into();
        self
    }
}
