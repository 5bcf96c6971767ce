mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_threshold_requires_token() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/thresholds"))
        .json(&json!({ "threshold_value": 30 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Access token required");

    let res = server
        .client
        .post(server.url("/api/thresholds"))
        .bearer_auth("not.a.token")
        .json(&json!({ "threshold_value": 30 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Nothing was stored by the rejected calls
    let latest: Value = server
        .client
        .get(server.url("/api/thresholds/latest"))
        .send()
        .await?
        .json()
        .await?;
    assert!(latest.is_null());
    Ok(())
}

#[tokio::test]
async fn authenticated_threshold_becomes_latest() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;

    for value in [28.0, 30.5] {
        let res = server
            .client
            .post(server.url("/api/thresholds"))
            .bearer_auth(&token)
            .json(&json!({ "threshold_value": value }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = res.json().await?;
        assert_eq!(body["threshold_value"].as_f64(), Some(value));
    }

    let latest: Value = server
        .client
        .get(server.url("/api/thresholds/latest"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(latest["threshold_value"].as_f64(), Some(30.5));

    let listing: Value = server
        .client
        .get(server.url("/api/thresholds?limit=1"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(listing["pagination"]["total"], 2);
    assert_eq!(listing["pagination"]["totalPages"], 2);
    assert_eq!(listing["data"][0]["threshold_value"].as_f64(), Some(30.5));
    Ok(())
}

#[tokio::test]
async fn threshold_value_must_be_numeric() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;

    for payload in [json!({}), json!({ "threshold_value": "warm" }), json!({ "threshold_value": null })] {
        let res = server
            .client
            .post(server.url("/api/thresholds"))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
        let body: Value = res.json().await?;
        assert_eq!(body["error"], "threshold_value must be a number");
    }
    Ok(())
}

#[tokio::test]
async fn threshold_listing_validates_pagination() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/api/thresholds?limit=101")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
