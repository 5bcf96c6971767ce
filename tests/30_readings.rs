mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

async fn post_reading(server: &TestServer, payload: Value) -> Result<(StatusCode, Value)> {
    let res = server
        .client
        .post(server.url("/api/readings"))
        .json(&payload)
        .send()
        .await?;
    Ok((res.status(), res.json().await?))
}

#[tokio::test]
async fn empty_listing_has_zeroed_pagination() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .get(server.url("/api/readings?page=1&limit=10"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({
            "data": [],
            "pagination": { "page": 1, "limit": 10, "total": 0, "totalPages": 0 }
        })
    );
    Ok(())
}

#[tokio::test]
async fn listing_defaults_without_query() -> Result<()> {
    let server = common::spawn_server().await?;

    let body: Value = server.client.get(server.url("/api/readings")).send().await?.json().await?;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
    Ok(())
}

#[tokio::test]
async fn listing_rejects_out_of_range_pagination() -> Result<()> {
    let server = common::spawn_server().await?;

    for query in ["limit=0", "limit=101", "page=0", "page=-1"] {
        let res = server
            .client
            .get(server.url(&format!("/api/readings?{}", query)))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "query: {}", query);
        let body: Value = res.json().await?;
        assert_eq!(body["error"], "Invalid pagination parameters");
    }
    Ok(())
}

#[tokio::test]
async fn non_numeric_pagination_falls_back_to_defaults() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .get(server.url("/api/readings?page=abc&limit=20abc"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 20);

    let body: Value = server
        .client
        .get(server.url("/api/readings?page=1.5&limit=nope"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
    Ok(())
}

#[tokio::test]
async fn non_numeric_temperature_is_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = post_reading(&server, json!({ "temperature": "hot" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "temperature must be a number");

    let (status, _) = post_reading(&server, json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
        post_reading(&server, json!({ "temperature": 20, "threshold_value": "high" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "threshold_value must be a number");
    Ok(())
}

#[tokio::test]
async fn create_reading_without_threshold() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = post_reading(&server, json!({ "temperature": 21.5 })).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["temperature"].as_f64(), Some(21.5));
    assert!(body["threshold_value"].is_null());
    assert!(body["id"].is_number());
    assert!(body["recorded_at"].is_string());
    Ok(())
}

#[tokio::test]
async fn latest_is_null_when_empty() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/api/readings/latest")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert!(body.is_null());
    Ok(())
}

#[tokio::test]
async fn listing_pages_newest_first() -> Result<()> {
    let server = common::spawn_server().await?;

    for temperature in [18.0, 19.5, 21.0] {
        let (status, _) =
            post_reading(&server, json!({ "temperature": temperature, "threshold_value": 25 })).await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let body: Value = server
        .client
        .get(server.url("/api/readings?page=1&limit=2"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["pagination"], json!({ "page": 1, "limit": 2, "total": 3, "totalPages": 2 }));
    let temps: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["temperature"].as_f64())
        .collect();
    assert_eq!(temps, vec![21.0, 19.5]);

    let body: Value = server
        .client
        .get(server.url("/api/readings?page=2&limit=2"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["temperature"].as_f64(), Some(18.0));

    let latest: Value = server
        .client
        .get(server.url("/api/readings/latest"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(latest["temperature"].as_f64(), Some(21.0));
    assert_eq!(latest["threshold_value"].as_f64(), Some(25.0));
    Ok(())
}
