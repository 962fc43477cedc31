// Integration test: upstream ticket failures degrade to an empty dataset.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::json;
use ticketlens::core::TicketSourceConfig;
use ticketlens::engine::{
    AnalysisPipeline, ReportError, ReportGenerator, ReportRequest, TicketApiClient,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct CountingReporter {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl ReportGenerator for CountingReporter {
    async fn generate(&self, _request: &ReportRequest) -> Result<String, ReportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("report".to_string())
    }
}

fn client_for(server: &MockServer) -> TicketApiClient {
    let config = TicketSourceConfig::from_lookup(|key| match key {
        "TICKETLENS_SOURCE_URL" => Some(format!("{}/getTicket_IncidenceData", server.uri())),
        "TICKETLENS_SOURCE_TOKEN" => Some("token".to_string()),
        _ => None,
    })
    .expect("config");
    TicketApiClient::new(&config, Duration::from_secs(5)).expect("client")
}

async fn run_against(response: ResponseTemplate) -> ticketlens::AnalysisRun {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getTicket_IncidenceData"))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = AnalysisPipeline::new(client_for(&server), CountingReporter::default());
    let run = pipeline
        .run(&["status 'Closed'".to_string(), "last 6 months".to_string()])
        .await
        .expect("run");
    assert_eq!(pipeline.reporter().calls.load(Ordering::SeqCst), 2);
    run
}

#[tokio::test]
async fn server_error_yields_empty_dataset() {
    let run = run_against(ResponseTemplate::new(500)).await;

    assert!(run.dataset.is_degraded());
    assert!(run.dataset.tickets.is_empty());
    let reason = run.dataset.fetch_error.as_deref().unwrap_or_default();
    assert!(reason.contains("500"), "unexpected reason: {reason}");
}

#[tokio::test]
async fn unexpected_shape_yields_empty_dataset() {
    let run = run_against(
        ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "message": "no data"})),
    )
    .await;

    assert!(run.dataset.is_degraded());
    assert_eq!(run.results.len(), 2);
}

#[tokio::test]
async fn every_prompt_still_gets_a_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = AnalysisPipeline::new(client_for(&server), CountingReporter::default());
    let run = pipeline
        .run(&[
            "customer name 'ABCD'".to_string(),
            "priority 'High'".to_string(),
            "show everything".to_string(),
        ])
        .await
        .expect("run");

    assert_eq!(run.results.len(), 3);
    for result in &run.results {
        assert!(result.outcome.tickets.is_empty());
        assert!(result.outcome.warnings.is_empty());
        assert_eq!(result.report.text(), Some("report"));
    }
    assert_eq!(pipeline.reporter().calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn empty_ticket_list_is_not_a_failure() {
    let run = run_against(
        ResponseTemplate::new(200).set_body_json(json!({"data": {"TICKET_LIST": []}})),
    )
    .await;

    assert!(!run.dataset.is_degraded());
    assert!(run.dataset.tickets.is_empty());
}
