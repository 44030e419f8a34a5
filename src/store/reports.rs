use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, warn};

use super::state::{toggled, Mutation};
use super::types::{CustomerId, NewReport, Page, Report};
use crate::error::Result;
use crate::Console;

const REPORT_PATH: &str = "/api/report";

/// Path of a generated report's PDF, relative to the backend base URL
pub const REPORT_PDF_PATH: &str = "/api/report/detail";

impl Console {
    /// Load one page of `customer`'s reports. Without `page` the last loaded
    /// reports page is used.
    pub async fn load_reports(&self, customer: CustomerId, page: Option<u32>) -> Result<()> {
        let page = page.unwrap_or_else(|| self.read(|s| s.reports.current_page));
        let query = [
            ("customer", customer.to_string()),
            ("page", page.to_string()),
            ("page_size", self.options.reports_per_page.to_string()),
        ];

        let reports: Page<Report> = self.api.get(REPORT_PATH, &query).await?;
        self.commit(Mutation::SetReports {
            page: reports,
            requested_page: page,
        });
        Ok(())
    }

    /// Request a report for `customer` covering `start_date..=end_date`,
    /// then reload that customer's reports.
    pub async fn create_report(
        &self,
        customer: CustomerId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<()> {
        let body = NewReport {
            customer,
            start_date,
            end_date,
        };

        self.api.post::<_, Value>(REPORT_PATH, &body).await?;
        info!(customer, %start_date, %end_date, "created report");

        self.load_reports(customer, None).await
    }

    /// Delete a report, then reload the selected customer's reports at
    /// `page` (or the current reports page).
    pub async fn delete_report(&self, id: i64, page: Option<u32>) -> Result<()> {
        let page = page.unwrap_or_else(|| self.read(|s| s.reports.current_page));

        self.api
            .delete::<Value>(&format!("{}/{}", REPORT_PATH, id))
            .await?;
        info!(report = id, "deleted report");

        match self.read(|s| s.selected_customer_id()) {
            Some(customer) => self.load_reports(customer, Some(page)).await,
            None => {
                warn!(report = id, "no customer selected; reports not reloaded");
                Ok(())
            }
        }
    }

    /// Open, close or flip the "new report" modal. Returns the new value.
    pub fn toggle_new_report_modal(&self, open: Option<bool>) -> bool {
        let open = toggled(self.read(|s| s.new_report_modal_open), open);
        self.commit(Mutation::SetNewReportModalOpen(open));
        open
    }

    pub fn reports(&self) -> Page<Report> {
        self.read(|s| s.reports.envelope.clone())
    }

    /// Download link of a generated report
    pub fn report_pdf_url(&self, id: i64) -> String {
        self.api.url(&format!("{}/{}.pdf", REPORT_PDF_PATH, id))
    }
}
