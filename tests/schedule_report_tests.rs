mod common;

use chrono::NaiveDate;
use common::*;
use mrgen_console::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Load customers 1 and 2 so that customer 1 is selected
async fn select_first_customer(server: &MockServer, console: &Console) {
    Mock::given(method("GET"))
        .and(path("/api/customer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_page(&[1, 2], 1)))
        .mount(server)
        .await;
    console.load_customers(None).await.unwrap();
    assert_eq!(console.selected_customer().map(|c| c.pk), Some(1));
}

#[tokio::test]
async fn test_create_schedule_uses_default_descriptor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/schedule"))
        .and(body_json(json!({
            "customer": 3,
            "task_type": "watchman",
            "periodic_task": {
                "minute": "0",
                "hour": "2",
                "day_of_week": "*",
                "day_of_month": "*",
                "month_of_year": "*"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/schedule"))
        .and(query_param("customer", "3"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    console
        .create_schedule(3, TaskType::Watchman, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_schedule_with_custom_descriptor() {
    let server = MockServer::start().await;
    mount_empty_details(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/schedule"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let console = console_for(&server);
    let weekly = PeriodicTask {
        minute: "30".to_string(),
        hour: "6".to_string(),
        day_of_week: "1".to_string(),
        day_of_month: "*".to_string(),
        month_of_year: "*".to_string(),
    };
    console
        .create_schedule(8, TaskType::Repairshopr, Some(weekly))
        .await
        .unwrap();

    let posts = requests_to(&server, "/api/schedule")
        .await
        .into_iter()
        .filter(|r| !r.body.is_empty())
        .collect::<Vec<_>>();
    assert_eq!(posts.len(), 1);
    let body = body_of(&posts[0]);
    assert_eq!(body["task_type"], "repairshopr");
    assert_eq!(body["periodic_task"]["minute"], "30");
    assert_eq!(body["periodic_task"]["day_of_week"], "1");
}

#[tokio::test]
async fn test_default_descriptor_is_configurable() {
    let server = MockServer::start().await;
    mount_empty_details(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/schedule"))
        .and(body_json(json!({
            "customer": 1,
            "task_type": "watchman",
            "periodic_task": {
                "minute": "15",
                "hour": "23",
                "day_of_week": "*",
                "day_of_month": "*",
                "month_of_year": "*"
            }
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let console = Console::with_token_store(
        ConsoleOptions::default()
            .with_backend_url(&server.uri())
            .with_default_periodic_task(PeriodicTask::daily_at("15", "23")),
        std::sync::Arc::new(MemoryTokenStore::new()),
    )
    .unwrap();

    console
        .create_schedule(1, TaskType::Watchman, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_schedules_always_load_page_one() {
    let server = MockServer::start().await;
    mount_empty_details(&server).await;

    let console = Console::with_token_store(
        ConsoleOptions::default()
            .with_backend_url(&server.uri())
            .with_schedules_per_page(50),
        std::sync::Arc::new(MemoryTokenStore::new()),
    )
    .unwrap();
    console.load_schedules(4).await.unwrap();

    let requests = requests_to(&server, "/api/schedule").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(query_value(&requests[0], "page").as_deref(), Some("1"));
    assert_eq!(query_value(&requests[0], "page_size").as_deref(), Some("50"));
    assert_eq!(query_value(&requests[0], "customer").as_deref(), Some("4"));
}

#[tokio::test]
async fn test_delete_schedule_reloads_selected_customer() {
    let server = MockServer::start().await;
    mount_empty_details(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/schedule/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    select_first_customer(&server, &console).await;
    let before = requests_to(&server, "/api/schedule").await.len();

    console.delete_schedule(9).await.unwrap();

    let reloads = requests_to(&server, "/api/schedule").await;
    assert_eq!(reloads.len(), before + 1);
    assert_eq!(
        query_value(reloads.last().unwrap(), "customer").as_deref(),
        Some("1")
    );
}

#[tokio::test]
async fn test_delete_schedule_without_selection_only_deletes() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/schedule/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    console.delete_schedule(9).await.unwrap();

    assert!(requests_to(&server, "/api/schedule").await.is_empty());
}

#[tokio::test]
async fn test_create_report_reloads_for_that_customer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/report"))
        .and(body_json(json!({
            "customer": 5,
            "start_date": "2024-01-01",
            "end_date": "2024-01-31"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/report"))
        .and(query_param("customer", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"pk": 12, "customer": 5, "start_date": "2024-01-01", "end_date": "2024-01-31"}
            ],
            "page": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    console
        .create_report(5, date(2024, 1, 1), date(2024, 1, 31))
        .await
        .unwrap();

    let reports = console.reports();
    assert_eq!(reports.results.len(), 1);
    assert_eq!(reports.results[0].end_date, date(2024, 1, 31));
}

#[tokio::test]
async fn test_load_reports_repeats_last_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "page": 3
        })))
        .mount(&server)
        .await;

    let console = console_for(&server);
    console.load_reports(5, Some(3)).await.unwrap();
    console.load_reports(5, None).await.unwrap();

    let requests = requests_to(&server, "/api/report").await;
    assert_eq!(requests.len(), 2);
    assert_eq!(query_value(&requests[1], "page").as_deref(), Some("3"));
    assert_eq!(console.state().reports.current_page, 3);
}

#[tokio::test]
async fn test_delete_report_reloads_selected_customer_at_page() {
    let server = MockServer::start().await;
    mount_empty_details(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/report/12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    select_first_customer(&server, &console).await;

    console.delete_report(12, Some(2)).await.unwrap();

    let reloads = requests_to(&server, "/api/report").await;
    let last = reloads.last().unwrap();
    assert_eq!(query_value(last, "customer").as_deref(), Some("1"));
    assert_eq!(query_value(last, "page").as_deref(), Some("2"));
}

#[tokio::test]
async fn test_delete_report_without_selection_only_deletes() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/report/12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server);
    console.delete_report(12, None).await.unwrap();

    assert!(requests_to(&server, "/api/report").await.is_empty());
}

#[tokio::test]
async fn test_report_modal_and_pdf_link() {
    let server = MockServer::start().await;
    let console = console_for(&server);

    assert!(console.toggle_new_report_modal(None));
    assert!(!console.toggle_new_report_modal(Some(false)));
    assert!(console.toggle_new_schedule_modal(None));

    assert_eq!(
        console.report_pdf_url(12),
        format!("{}/api/report/detail/12.pdf", server.uri())
    );
}
