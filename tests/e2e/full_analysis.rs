// End-to-end test running several prompts against mocked ticket and report APIs.
use std::time::Duration;

use serde_json::json;
use tempfile::tempdir;
use ticketlens::core::TicketLensConfig;
use ticketlens::engine::{
    AnalysisPipeline, ArtefactExporter, HistoryEntry, HistoryStore, OpenAiReportClient,
    ReportDetail, ReportStatus, TicketApiClient,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(tickets: &MockServer, reports: &MockServer) -> TicketLensConfig {
    let source_url = format!("{}/getTicket_IncidenceData", tickets.uri());
    let report_url = format!("{}/v1", reports.uri());
    TicketLensConfig::from_lookup(|key| match key {
        "TICKETLENS_SOURCE_URL" => Some(source_url.clone()),
        "TICKETLENS_SOURCE_TOKEN" => Some("token".to_string()),
        "TICKETLENS_REPORT_URL" => Some(report_url.clone()),
        "OPENAI_API_KEY" => Some("sk-test".to_string()),
        "TICKETLENS_HTTP_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .expect("config")
}

async fn ticket_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getTicket_IncidenceData"))
        .and(body_string_contains("\"TOKEN\":\"token\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": {"TICKET_LIST": [
                {
                    "TICKET_NO": 101,
                    "CUSTOMER_NAME": "ABCD Corp",
                    "CITY_NAME": "Pune",
                    "INCIDENCE_DATE": "2024-05-02 10:15:00",
                    "STATUS_MEANING": "Closed",
                    "INCIDENCE_LEVEL_MEANING": "High",
                    "PRODUCT_NAME": "Flosense water controller",
                    "INCIDENCE_DESCRIPTION": "Leakage"
                },
                {
                    "TICKET_NO": 102,
                    "CUSTOMER_NAME": "XYZ Co",
                    "CITY_NAME": "Mumbai",
                    "INCIDENCE_DATE": "2024-05-03 08:00:00",
                    "STATUS_MEANING": "Assigned",
                    "INCIDENCE_LEVEL_MEANING": "Low",
                    "PRODUCT_NAME": "Valve",
                    "INCIDENCE_DESCRIPTION": "No Flow"
                },
                {
                    "TICKET_NO": 103,
                    "CUSTOMER_NAME": "ABCD Corp",
                    "CITY_NAME": "Pune",
                    "INCIDENCE_DATE": "2024-05-03 09:30:00",
                    "STATUS_MEANING": "Assigned",
                    "INCIDENCE_LEVEL_MEANING": "High",
                    "PRODUCT_NAME": "Flosense water controller",
                    "INCIDENCE_DESCRIPTION": "Leakage"
                }
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

async fn report_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("XYZ Co"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream overloaded"))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Leakage is the most raised category."}}]
        })))
        .expect(2)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn report_failure_becomes_an_error_card_while_other_prompts_succeed() {
    let tickets = ticket_server().await;
    let reports = report_server().await;
    let config = config_for(&tickets, &reports);
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let pipeline = AnalysisPipeline::new(
        TicketApiClient::new(&config.source, timeout).expect("ticket client"),
        OpenAiReportClient::new(&config.report, timeout).expect("report client"),
    )
    .with_detail(ReportDetail::Brief);

    let prompts = vec![
        r#"customer name "ABCD" with product name 'flosense'"#.to_string(),
        "customer city 'Mumbai'".to_string(),
        "status 'Resolved'".to_string(),
    ];
    let run = pipeline.run(&prompts).await.expect("run");

    assert_eq!(run.dataset.tickets.len(), 3);
    assert_eq!(run.results.len(), 3);

    let first = &run.results[0];
    assert_eq!(first.outcome.tickets.len(), 2);
    assert_eq!(first.summary.most_raised_category().map(|e| e.label.as_str()), Some("Leakage"));
    assert_eq!(first.summary.daily.len(), 2);
    assert_eq!(
        first.report.text(),
        Some("Leakage is the most raised category.")
    );

    let second = &run.results[1];
    assert_eq!(second.outcome.tickets.len(), 1);
    assert!(matches!(
        &second.report,
        ReportStatus::Failed { reason } if reason.contains("500") && reason.contains("upstream overloaded")
    ));

    let third = &run.results[2];
    assert!(third.outcome.is_empty());
    assert!(third.report.is_generated());

    let dir = tempdir().expect("temp dir");
    let exporter = ArtefactExporter::new(dir.path().join("out"));
    let artefacts: Vec<_> = run
        .results
        .iter()
        .map(|result| exporter.export(result).expect("export"))
        .collect();

    let document = artefacts[0].document.as_ref().expect("document for first prompt");
    let contents = std::fs::read_to_string(document).expect("read document");
    assert!(contents.contains("**Prompt:** customer name \"ABCD\""));
    assert!(contents.contains("Leakage is the most raised category."));
    assert_eq!(artefacts[0].charts.len(), 3);
    assert!(artefacts[1].document.is_none());
    assert!(artefacts[2].charts.is_empty());
    assert!(artefacts[2].document.is_some());

    let mut history = HistoryStore::load(dir.path().join("history.json")).expect("history");
    history
        .append(
            run.results
                .iter()
                .map(|result| HistoryEntry::new(&result.prompt).with_matched(result.outcome.tickets.len())),
        )
        .expect("append history");
    let reloaded = HistoryStore::load(dir.path().join("history.json")).expect("reload");
    let matched: Vec<_> = reloaded
        .history()
        .entries()
        .iter()
        .map(|entry| entry.matched)
        .collect();
    assert_eq!(matched, vec![Some(2), Some(1), Some(0)]);
}
