use serde_json::Value;
use tracing::{info, warn};

use super::state::{toggled, Mutation};
use super::types::{Customer, CustomerId, NewCustomer, Page};
use crate::error::Result;
use crate::Console;

const CUSTOMER_PATH: &str = "/api/customer";

impl Console {
    /// Load one page of customers, replacing the loaded list.
    ///
    /// Without `page` the last loaded page is reloaded (page 1 at first).
    /// When nothing is selected afterwards, the first customer on the page
    /// is selected, which in turn loads its schedules and reports.
    pub async fn load_customers(&self, page: Option<u32>) -> Result<()> {
        let page = page.unwrap_or_else(|| self.read(|s| s.customers.current_page));
        let query = [
            ("page", page.to_string()),
            ("page_size", self.options.customers_per_page.to_string()),
        ];

        let customers: Page<Customer> = self.api.get(CUSTOMER_PATH, &query).await?;
        self.commit(Mutation::SetCustomers {
            page: customers,
            requested_page: page,
        });

        let first = self.read(|s| match s.selected_customer {
            Some(_) => None,
            None => s.customers.first().map(|c| c.pk),
        });
        if let Some(pk) = first {
            self.select_customer(Some(pk)).await?;
        }
        Ok(())
    }

    /// Select a customer from the loaded page, or clear the selection with `None`.
    ///
    /// Customers that are not on the loaded page are ignored and the
    /// selection stays as it was. A successful selection loads the
    /// customer's schedules and reports; a failure in one of them does not
    /// stop the other from being committed.
    pub async fn select_customer(&self, id: Option<CustomerId>) -> Result<()> {
        let Some(id) = id else {
            self.commit(Mutation::SetSelectedCustomer(None));
            return Ok(());
        };

        let Some(customer) = self.read(|s| s.customers.find(id).cloned()) else {
            warn!(customer = id, "customer is not on the loaded page; selection unchanged");
            return Ok(());
        };

        info!(customer = id, name = %customer.name, "selecting customer");
        self.commit(Mutation::SetSelectedCustomer(Some(customer)));

        // both loads run to completion and commit before any error is returned
        let (schedules, reports) =
            tokio::join!(self.load_schedules(id), self.load_reports(id, None));
        schedules?;
        reports?;
        Ok(())
    }

    /// Create a customer and reload the current page.
    ///
    /// With `select` the created customer becomes the selection directly,
    /// whether or not it shows up on the reloaded page.
    pub async fn create_customer(&self, customer: &NewCustomer, select: bool) -> Result<Customer> {
        let created: Customer = self.api.post(CUSTOMER_PATH, customer).await?;
        info!(customer = created.pk, name = %created.name, "created customer");

        if select {
            self.commit(Mutation::SetSelectedCustomer(Some(created.clone())));
        }
        self.load_customers(None).await?;
        Ok(created)
    }

    /// Delete a customer, then reload `page` (or the current page).
    ///
    /// The selection is cleared before the request is sent when it points
    /// at the customer being deleted.
    pub async fn delete_customer(&self, id: CustomerId, page: Option<u32>) -> Result<()> {
        let page = page.unwrap_or_else(|| self.read(|s| s.customers.current_page));

        if self.read(|s| s.selected_customer_id()) == Some(id) {
            self.select_customer(None).await?;
        }

        self.api
            .delete::<Value>(&format!("{}/{}", CUSTOMER_PATH, id))
            .await?;
        info!(customer = id, "deleted customer");

        self.load_customers(Some(page)).await
    }

    /// Delete whichever customer is selected. Does nothing without a selection.
    pub async fn delete_selected_customer(&self) -> Result<()> {
        match self.read(|s| s.selected_customer_id()) {
            Some(id) => self.delete_customer(id, None).await,
            None => {
                warn!("no customer selected; nothing to delete");
                Ok(())
            }
        }
    }

    /// Open, close or flip the "new customer" modal. Returns the new value.
    pub fn toggle_new_customer_modal(&self, open: Option<bool>) -> bool {
        let open = toggled(self.read(|s| s.new_customer_modal_open), open);
        self.commit(Mutation::SetNewCustomerModalOpen(open));
        open
    }

    pub fn selected_customer(&self) -> Option<Customer> {
        self.read(|s| s.selected_customer.clone())
    }

    pub fn customers(&self) -> Page<Customer> {
        self.read(|s| s.customers.envelope.clone())
    }
}
