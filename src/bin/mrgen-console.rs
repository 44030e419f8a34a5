use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mrgen_console::prelude::*;

#[derive(Parser)]
#[clap(
    name = "mrgen-console",
    version,
    about = "Operator console for the MRGen reporting backend"
)]
struct Cli {
    /// Backend base URL; read from MRGEN_BACKEND_URL when omitted
    #[clap(long)]
    backend_url: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and keep the session token for later commands
    Login { username: String, password: String },
    /// Invalidate the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    #[clap(subcommand)]
    Customers(CustomerCommand),
    #[clap(subcommand)]
    Schedules(ScheduleCommand),
    #[clap(subcommand)]
    Reports(ReportCommand),
}

#[derive(Subcommand)]
enum CustomerCommand {
    /// List one page of customers
    List {
        #[clap(long)]
        page: Option<u32>,
    },
    /// Create a customer
    Create {
        name: String,
        #[clap(long)]
        watchman_group_id: Option<String>,
        #[clap(long)]
        repairshopr_id: Option<String>,
    },
    /// Delete a customer
    Delete {
        id: CustomerId,
        #[clap(long)]
        page: Option<u32>,
    },
    /// Select a customer from the given page and show its schedules and reports
    Select {
        id: CustomerId,
        #[clap(long)]
        page: Option<u32>,
    },
}

#[derive(Subcommand)]
enum ScheduleCommand {
    /// List a customer's schedules
    List { customer: CustomerId },
    /// Schedule a task; runs daily at 02:00 unless --cron is given
    Create {
        customer: CustomerId,
        /// watchman or repairshopr
        task_type: TaskType,
        /// "minute hour day-of-month month day-of-week"
        #[clap(long)]
        cron: Option<String>,
    },
    /// Delete a schedule
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// List a customer's reports
    List {
        customer: CustomerId,
        #[clap(long)]
        page: Option<u32>,
    },
    /// Generate a report for a date range (YYYY-MM-DD)
    Create {
        customer: CustomerId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    /// Delete a report
    Delete { id: i64 },
    /// Print the download link of a report
    Pdf { id: i64 },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let options = match &cli.backend_url {
        Some(url) => ConsoleOptions::default().with_backend_url(url),
        None => ConsoleOptions::from_env()?,
    };
    let console = Console::new_with_options(options)?;

    match cli.command {
        Command::Login { username, password } => {
            console.login_with_credentials(&username, &password).await?;
            println!("logged in as {}", username);
        }
        Command::Logout => {
            console.verify_login()?;
            console.logout().await?;
            println!("logged out");
        }
        Command::Status => {
            if console.verify_login()? {
                println!("logged in");
            } else {
                println!("not logged in");
            }
        }
        Command::Customers(command) => {
            guard(&console, Route::Customers)?;
            customers(&console, command).await?;
        }
        Command::Schedules(command) => {
            guard(&console, Route::Customers)?;
            schedules(&console, command).await?;
        }
        Command::Reports(command) => {
            guard(&console, Route::Reports)?;
            reports(&console, command).await?;
        }
    }
    Ok(())
}

fn guard(console: &Console, route: Route) -> Result<()> {
    match console.authorize(route)? {
        Navigation::Proceed(_) => Ok(()),
        Navigation::Redirect(_) => Err(Error::auth("not logged in; run `mrgen-console login` first")),
    }
}

async fn customers(console: &Console, command: CustomerCommand) -> Result<()> {
    match command {
        CustomerCommand::List { page } => {
            console.load_customers(page).await?;
            print_customers(&console.state());
        }
        CustomerCommand::Create {
            name,
            watchman_group_id,
            repairshopr_id,
        } => {
            let customer = NewCustomer {
                name,
                watchman_group_id,
                repairshopr_id,
            };
            let created = console.create_customer(&customer, false).await?;
            println!("created customer {} ({})", created.pk, created.name);
        }
        CustomerCommand::Delete { id, page } => {
            console.load_customers(page).await?;
            console.delete_customer(id, page).await?;
            println!("deleted customer {}", id);
            print_customers(&console.state());
        }
        CustomerCommand::Select { id, page } => {
            console.load_customers(page).await?;
            console.select_customer(Some(id)).await?;
            match console.selected_customer() {
                Some(customer) if customer.pk == id => print_selection(console, &customer),
                _ => println!("customer {} is not on page {}", id, page.unwrap_or(1)),
            }
        }
    }
    Ok(())
}

async fn schedules(console: &Console, command: ScheduleCommand) -> Result<()> {
    match command {
        ScheduleCommand::List { customer } => {
            console.load_schedules(customer).await?;
            print_schedules(&console.schedules());
        }
        ScheduleCommand::Create {
            customer,
            task_type,
            cron,
        } => {
            let periodic_task = cron.as_deref().map(parse_cron).transpose()?;
            console
                .create_schedule(customer, task_type, periodic_task)
                .await?;
            print_schedules(&console.schedules());
        }
        ScheduleCommand::Delete { id } => {
            console.delete_schedule(id).await?;
            println!("deleted schedule {}", id);
        }
    }
    Ok(())
}

async fn reports(console: &Console, command: ReportCommand) -> Result<()> {
    match command {
        ReportCommand::List { customer, page } => {
            console.load_reports(customer, page).await?;
            print_reports(console, &console.reports());
        }
        ReportCommand::Create {
            customer,
            start_date,
            end_date,
        } => {
            console.create_report(customer, start_date, end_date).await?;
            print_reports(console, &console.reports());
        }
        ReportCommand::Delete { id } => {
            console.delete_report(id, None).await?;
            println!("deleted report {}", id);
        }
        ReportCommand::Pdf { id } => println!("{}", console.report_pdf_url(id)),
    }
    Ok(())
}

fn parse_cron(raw: &str) -> Result<PeriodicTask> {
    let fields: Vec<&str> = raw.split_whitespace().collect();
    match fields.as_slice() {
        [minute, hour, day_of_month, month_of_year, day_of_week] => Ok(PeriodicTask {
            minute: minute.to_string(),
            hour: hour.to_string(),
            day_of_week: day_of_week.to_string(),
            day_of_month: day_of_month.to_string(),
            month_of_year: month_of_year.to_string(),
        }),
        _ => Err(Error::config(format!(
            "expected five cron fields, got '{}'",
            raw
        ))),
    }
}

fn print_customers(state: &ConsoleState) {
    let page = &state.customers.envelope;
    println!(
        "page {} of {} ({} customers)",
        state.customers.current_page,
        page.page_count.unwrap_or(1),
        page.results_count.unwrap_or(page.results.len() as u64)
    );
    for customer in &page.results {
        let marker = if state.selected_customer_id() == Some(customer.pk) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:>5}  {:<30} watchman={} repairshopr={}",
            marker,
            customer.pk,
            customer.name,
            customer.watchman_group_id.as_deref().unwrap_or("-"),
            customer.repairshopr_id.as_deref().unwrap_or("-")
        );
    }
}

fn print_selection(console: &Console, customer: &Customer) {
    println!("{} ({})", customer.name, customer.pk);
    print_schedules(&console.schedules());
    print_reports(console, &console.reports());
}

fn print_schedules(schedules: &Page<Schedule>) {
    println!("schedules:");
    for schedule in &schedules.results {
        println!(
            "  {:>5}  {:<12} {}",
            schedule.pk, schedule.task_type, schedule.periodic_task
        );
    }
}

fn print_reports(console: &Console, reports: &Page<Report>) {
    println!("reports:");
    for report in &reports.results {
        println!(
            "  {:>5}  {} .. {}  {}",
            report.pk,
            report.start_date,
            report.end_date,
            console.report_pdf_url(report.pk)
        );
    }
}
