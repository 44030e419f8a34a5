//! Application state and the reducer that is its only writer

use tracing::debug;

use super::types::{Customer, CustomerId, Page, Report, Schedule};

/// A paged list plus the page number the next reload should default to
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    pub envelope: Page<T>,
    pub current_page: u32,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            envelope: Page::default(),
            current_page: 1,
        }
    }
}

impl<T> PagedList<T> {
    pub fn results(&self) -> &[T] {
        &self.envelope.results
    }

    pub fn first(&self) -> Option<&T> {
        self.envelope.results.first()
    }

    /// Replace the whole list. The server's page number wins over the
    /// requested one when the envelope carries it.
    fn replace(&mut self, envelope: Page<T>, requested_page: u32) {
        self.current_page = envelope.page.unwrap_or(requested_page);
        self.envelope = envelope;
    }
}

impl PagedList<Customer> {
    /// Find a customer on the currently loaded page
    pub fn find(&self, pk: CustomerId) -> Option<&Customer> {
        self.envelope.results.iter().find(|c| c.pk == pk)
    }
}

/// Snapshot of everything the console shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleState {
    pub logged_in: bool,

    pub customers: PagedList<Customer>,
    pub selected_customer: Option<Customer>,
    pub new_customer_modal_open: bool,

    pub schedules: Page<Schedule>,
    pub new_schedule_modal_open: bool,

    pub reports: PagedList<Report>,
    pub new_report_modal_open: bool,
}

impl ConsoleState {
    pub fn selected_customer_id(&self) -> Option<CustomerId> {
        self.selected_customer.as_ref().map(|c| c.pk)
    }

    /// Apply one mutation. Every state change goes through here.
    pub fn apply(&mut self, mutation: Mutation) {
        debug!(mutation = mutation.name(), "commit");
        match mutation {
            Mutation::SetLoggedIn(logged_in) => self.logged_in = logged_in,
            Mutation::SetCustomers { page, requested_page } => {
                self.customers.replace(page, requested_page)
            }
            Mutation::SetSelectedCustomer(customer) => self.selected_customer = customer,
            Mutation::SetNewCustomerModalOpen(open) => self.new_customer_modal_open = open,
            Mutation::SetSchedules(page) => self.schedules = page,
            Mutation::SetNewScheduleModalOpen(open) => self.new_schedule_modal_open = open,
            Mutation::SetReports { page, requested_page } => {
                self.reports.replace(page, requested_page)
            }
            Mutation::SetNewReportModalOpen(open) => self.new_report_modal_open = open,
        }
    }
}

/// A single state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetLoggedIn(bool),
    SetCustomers {
        page: Page<Customer>,
        requested_page: u32,
    },
    SetSelectedCustomer(Option<Customer>),
    SetNewCustomerModalOpen(bool),
    SetSchedules(Page<Schedule>),
    SetNewScheduleModalOpen(bool),
    SetReports {
        page: Page<Report>,
        requested_page: u32,
    },
    SetNewReportModalOpen(bool),
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetLoggedIn(_) => "SET_LOGGED_IN",
            Mutation::SetCustomers { .. } => "SET_CUSTOMERS",
            Mutation::SetSelectedCustomer(_) => "SET_SELECTED_CUSTOMER",
            Mutation::SetNewCustomerModalOpen(_) => "SET_NEW_CUSTOMER_MODAL_OPEN",
            Mutation::SetSchedules(_) => "SET_SCHEDULES",
            Mutation::SetNewScheduleModalOpen(_) => "SET_NEW_SCHEDULE_MODAL_OPEN",
            Mutation::SetReports { .. } => "SET_REPORTS",
            Mutation::SetNewReportModalOpen(_) => "SET_NEW_REPORT_MODAL_OPEN",
        }
    }
}

/// Resolve a modal toggle: an explicit value wins, otherwise flip
pub(crate) fn toggled(current: bool, open: Option<bool>) -> bool {
    open.unwrap_or(!current)
}
