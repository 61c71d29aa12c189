//! HTTP transport tests against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use time::macros::date;
use wiremock::matchers::{header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use workday_core::{
    bank_holiday_source_at, BankHolidayDivision, ContentOrigin, HttpClient, HttpOrigin,
    HttpRequest, ReqwestHttpClient, SourceErrorKind, WorkdayConfig, WorkingDaySource,
    WorkingDaySourceExt,
};

const FEED: &str = r#"{
    "england-and-wales": {
        "division": "england-and-wales",
        "events": [
            {"title": "Early May bank holiday", "date": "2018-05-07", "notes": "", "bunting": true},
            {"title": "Spring bank holiday", "date": "2018-05-28", "notes": "", "bunting": true}
        ]
    },
    "scotland": {
        "division": "scotland",
        "events": [
            {"title": "St Andrew's Day", "date": "2018-11-30", "notes": "", "bunting": true}
        ]
    }
}"#;

const UPDATED_FEED: &str = r#"{
    "england-and-wales": {
        "division": "england-and-wales",
        "events": [
            {"title": "Royal wedding", "date": "2018-05-19", "notes": "", "bunting": true}
        ]
    }
}"#;

fn client() -> Arc<dyn HttpClient> {
    Arc::new(ReqwestHttpClient::new())
}

#[tokio::test]
async fn reqwest_client_returns_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dates.txt"))
        .and(header("accept", "text/plain"))
        .and(header_regex("user-agent", "^workday/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("2018-05-14\n"))
        .expect(1)
        .mount(&server)
        .await;

    let response = client()
        .execute(
            HttpRequest::get(format!("{}/dates.txt", server.uri()))
                .with_header("Accept", "text/plain"),
        )
        .await
        .expect("request succeeds");

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "2018-05-14\n");
}

#[tokio::test]
async fn non_success_status_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let origin = HttpOrigin::new(
        client(),
        HttpRequest::get(format!("{}/missing.json", server.uri())),
    )
    .expect("valid request");
    let error = origin.fetch().await.expect_err("404 must fail");

    assert_eq!(error.kind(), SourceErrorKind::Unavailable);
    assert!(error.message().contains("404"));
}

#[tokio::test]
async fn slow_responses_hit_the_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("2018-05-14")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let error = client()
        .execute(HttpRequest::get(server.uri()).with_timeout_ms(200))
        .await
        .expect_err("request should time out");

    assert!(error.is_timeout(), "{error}");
}

#[tokio::test]
async fn bank_holiday_feed_is_fetched_and_refreshed() {
    // Given: the feed answers once with the published calendar, then with an update
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bank-holidays.json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bank-holidays.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(UPDATED_FEED))
        .mount(&server)
        .await;

    let source = bank_holiday_source_at(
        client(),
        &format!("{}/bank-holidays.json", server.uri()),
        BankHolidayDivision::EnglandAndWales,
        Duration::from_secs(3600),
    )
    .await
    .expect("feed loads");

    assert!(source.is_non_working_day(date!(2018 - 05 - 28)));
    assert!(source.is_working_day(date!(2018 - 11 - 30)));
    assert!(source.describe().ends_with("/bank-holidays.json"));

    // When
    source.refresh_now().await.expect("refresh succeeds");

    // Then
    assert!(source.is_working_day(date!(2018 - 05 - 28)));
    assert!(source.is_non_working_day(date!(2018 - 05 - 19)));
    assert_eq!(source.generation(), 1);
}

#[tokio::test]
async fn server_errors_after_load_keep_the_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = bank_holiday_source_at(
        client(),
        &server.uri(),
        BankHolidayDivision::Scotland,
        Duration::from_secs(3600),
    )
    .await
    .expect("feed loads");

    let error = source.refresh_now().await.expect_err("500 must fail");
    assert_eq!(error.kind(), SourceErrorKind::Unavailable);
    assert!(source.is_non_working_day(date!(2018 - 11 - 30)));
}

#[tokio::test]
async fn configured_feed_uses_the_mirror_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mirror/bank-holidays.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .expect(1)
        .mount(&server)
        .await;

    let config = WorkdayConfig::from_json_str(&format!(
        r#"{{"gov_uk": {{"url": "{}/mirror/bank-holidays.json"}}, "http_timeout_ms": 2000}}"#,
        server.uri()
    ))
    .expect("valid config");

    let service = config
        .into_builder(client())
        .await
        .expect("sources load")
        .build();

    // Weekend defaults plus the feed.
    assert_eq!(service.len(), 2);
    assert_eq!(
        service.add_working_days(date!(2018 - 05 - 04), 1).unwrap(),
        date!(2018 - 05 - 08)
    );
}
