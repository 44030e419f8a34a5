//! Types exchanged with the backend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a customer
pub type CustomerId = i64;

/// Paginated result envelope returned by every list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The rows on this page
    pub results: Vec<T>,

    /// Total number of rows across all pages
    #[serde(default)]
    pub results_count: Option<u64>,

    /// The page number the server returned
    #[serde(default)]
    pub page: Option<u32>,

    /// Total number of pages
    #[serde(default)]
    pub page_count: Option<u32>,

    /// Page size the server applied
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Link to the next page
    #[serde(default, alias = "next")]
    pub page_next: Option<String>,

    /// Link to the previous page
    #[serde(default, alias = "previous")]
    pub page_previous: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            results_count: None,
            page: None,
            page_count: None,
            page_size: None,
            page_next: None,
            page_previous: None,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page_next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.page_previous.is_some()
    }
}

/// A customer as listed by `/api/customer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub pk: CustomerId,
    pub name: String,
    #[serde(default)]
    pub watchman_group_id: Option<String>,
    #[serde(default)]
    pub repairshopr_id: Option<String>,
}

/// Body of a customer creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub watchman_group_id: Option<String>,
    pub repairshopr_id: Option<String>,
}

impl NewCustomer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            watchman_group_id: None,
            repairshopr_id: None,
        }
    }

    pub fn with_watchman_group_id(mut self, id: &str) -> Self {
        self.watchman_group_id = Some(id.to_string());
        self
    }

    pub fn with_repairshopr_id(mut self, id: &str) -> Self {
        self.repairshopr_id = Some(id.to_string());
        self
    }
}

/// External service a schedule pulls data from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Watchman,
    Repairshopr,
}

impl TaskType {
    /// Every service a schedule can be created for
    pub const ALL: [TaskType; 2] = [TaskType::Watchman, TaskType::Repairshopr];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Watchman => "watchman",
            TaskType::Repairshopr => "repairshopr",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown task type '{}'", s))
    }
}

/// Crontab-style descriptor of when a schedule runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicTask {
    pub minute: String,
    pub hour: String,
    pub day_of_week: String,
    pub day_of_month: String,
    pub month_of_year: String,
}

impl Default for PeriodicTask {
    /// Daily at 02:00
    fn default() -> Self {
        Self::daily_at("0", "2")
    }
}

impl PeriodicTask {
    /// Run every day at `hour:minute`
    pub fn daily_at(minute: &str, hour: &str) -> Self {
        Self {
            minute: minute.to_string(),
            hour: hour.to_string(),
            day_of_week: "*".to_string(),
            day_of_month: "*".to_string(),
            month_of_year: "*".to_string(),
        }
    }
}

impl fmt::Display for PeriodicTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month_of_year, self.day_of_week
        )
    }
}

/// A maintenance schedule belonging to one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub pk: i64,
    pub customer: CustomerId,
    pub task_type: TaskType,
    pub periodic_task: PeriodicTask,
}

/// Body of a schedule creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSchedule {
    pub customer: CustomerId,
    pub task_type: TaskType,
    pub periodic_task: PeriodicTask,
}

/// A generated report covering `start_date..=end_date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub pk: i64,
    pub customer: CustomerId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Body of a report creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReport {
    pub customer: CustomerId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_decodes_backend_envelope() {
        let page: Page<Customer> = serde_json::from_value(json!({
            "results": [
                {"pk": 1, "name": "Acme", "watchman_group_id": "wm-1", "repairshopr_id": null}
            ],
            "results_count": 11,
            "page": 1,
            "page_count": 2,
            "page_size": 10,
            "page_next": "http://localhost:8000/api/customer?page=2&page_size=10",
            "page_previous": null
        }))
        .unwrap();

        assert_eq!(page.page, Some(1));
        assert_eq!(page.page_count, Some(2));
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.results[0].watchman_group_id.as_deref(), Some("wm-1"));
        assert_eq!(page.results[0].repairshopr_id, None);
    }

    #[test]
    fn page_accepts_bare_results() {
        let page: Page<Report> = serde_json::from_value(json!({
            "results": [],
            "next": null,
            "previous": "http://localhost:8000/api/report?page=1"
        }))
        .unwrap();

        assert!(page.is_empty());
        assert_eq!(page.page, None);
        assert!(page.has_previous());
    }

    #[test]
    fn default_periodic_task_is_daily_at_two() {
        assert_eq!(
            serde_json::to_value(PeriodicTask::default()).unwrap(),
            json!({
                "minute": "0",
                "hour": "2",
                "day_of_week": "*",
                "day_of_month": "*",
                "month_of_year": "*"
            })
        );
        assert_eq!(PeriodicTask::default().to_string(), "0 2 * * *");
    }

    #[test]
    fn task_type_parses_case_insensitively() {
        assert_eq!("Watchman".parse::<TaskType>(), Ok(TaskType::Watchman));
        assert_eq!("repairshopr".parse::<TaskType>(), Ok(TaskType::Repairshopr));
        assert!("nagios".parse::<TaskType>().is_err());
        assert_eq!(serde_json::to_value(TaskType::Repairshopr).unwrap(), json!("repairshopr"));
    }

    #[test]
    fn report_dates_use_iso_format() {
        let body = NewReport {
            customer: 5,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"customer": 5, "start_date": "2024-01-01", "end_date": "2024-01-31"})
        );
    }
}
