mod common;

use common::{conditions_body, endpoint, stockholm_location};
use skyclock::{data::conditions::ConditionsClient, domain::weather::WeatherCategory};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

#[tokio::test]
async fn heavy_snow_code_classifies_as_heavy_snow() {
    let server = common::conditions_server(75).await;
    let client = ConditionsClient::with_base_url(endpoint(&server));

    let report = client
        .fetch(&stockholm_location())
        .await
        .expect("conditions");

    assert_eq!(report.weather_code, 75);
    assert_eq!(report.description, "Heavy snow");
    assert_eq!(report.category, WeatherCategory::HeavySnow);
    assert_eq!(report.location, stockholm_location());
}

#[tokio::test]
async fn request_carries_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "59.3293"))
        .and(query_param("longitude", "18.0686"))
        .and(query_param("timezone", "auto"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(conditions_body(3), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ConditionsClient::with_base_url(endpoint(&server));
    let report = client
        .fetch(&stockholm_location())
        .await
        .expect("conditions");
    assert_eq!(report.category, WeatherCategory::Overcast);
}

#[tokio::test]
async fn server_error_surfaces_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = ConditionsClient::with_base_url(endpoint(&server));
    let err = client
        .fetch(&stockholm_location())
        .await
        .expect_err("503 should fail");
    assert!(format!("{err:#}").contains("non-success"));
}

#[tokio::test]
async fn malformed_payload_surfaces_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"current":{}}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = ConditionsClient::with_base_url(endpoint(&server));
    let err = client
        .fetch(&stockholm_location())
        .await
        .expect_err("missing code should fail");
    assert!(format!("{err:#}").contains("parse"));
}
