use serde_json::Value;
use tracing::{info, warn};

use super::state::{toggled, Mutation};
use super::types::{CustomerId, NewSchedule, Page, PeriodicTask, Schedule, TaskType};
use crate::error::Result;
use crate::Console;

const SCHEDULE_PATH: &str = "/api/schedule";

impl Console {
    /// Load the schedules of `customer`. Schedules are not paged: this
    /// always asks for page 1.
    pub async fn load_schedules(&self, customer: CustomerId) -> Result<()> {
        let query = [
            ("page", "1".to_string()),
            ("page_size", self.options.schedules_per_page.to_string()),
            ("customer", customer.to_string()),
        ];

        let schedules: Page<Schedule> = self.api.get(SCHEDULE_PATH, &query).await?;
        self.commit(Mutation::SetSchedules(schedules));
        Ok(())
    }

    /// Create a schedule and reload the customer's schedules.
    ///
    /// Without a descriptor the configured default is used (daily at 02:00
    /// unless overridden in [`ConsoleOptions`](crate::config::ConsoleOptions)).
    pub async fn create_schedule(
        &self,
        customer: CustomerId,
        task_type: TaskType,
        periodic_task: Option<PeriodicTask>,
    ) -> Result<()> {
        let body = NewSchedule {
            customer,
            task_type,
            periodic_task: periodic_task
                .unwrap_or_else(|| self.options.default_periodic_task.clone()),
        };

        self.api.post::<_, Value>(SCHEDULE_PATH, &body).await?;
        info!(customer, task_type = %task_type, when = %body.periodic_task, "created schedule");

        self.load_schedules(customer).await
    }

    /// Delete a schedule, then reload the schedules of the customer selected
    /// at the time the delete completes.
    pub async fn delete_schedule(&self, id: i64) -> Result<()> {
        self.api
            .delete::<Value>(&format!("{}/{}", SCHEDULE_PATH, id))
            .await?;
        info!(schedule = id, "deleted schedule");

        match self.read(|s| s.selected_customer_id()) {
            Some(customer) => self.load_schedules(customer).await,
            None => {
                warn!(schedule = id, "no customer selected; schedules not reloaded");
                Ok(())
            }
        }
    }

    /// Open, close or flip the "new schedule" modal. Returns the new value.
    pub fn toggle_new_schedule_modal(&self, open: Option<bool>) -> bool {
        let open = toggled(self.read(|s| s.new_schedule_modal_open), open);
        self.commit(Mutation::SetNewScheduleModalOpen(open));
        open
    }

    pub fn schedules(&self) -> Page<Schedule> {
        self.read(|s| s.schedules.clone())
    }
}
