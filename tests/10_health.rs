mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    // OK when the database answers, SERVICE_UNAVAILABLE when it does not
    let status = res.status();
    assert!(
        status == StatusCode::OK || status == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        status
    );

    let body = res.json::<serde_json::Value>().await?;
    if status == StatusCode::OK {
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["database"], "ok");
    } else {
        assert_eq!(body["status"], "fail");
        assert_eq!(body["data"]["status"], "degraded");
    }
    Ok(())
}

#[tokio::test]
async fn root_describes_the_api() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["name"], "Photogram API");
    assert!(body["data"]["endpoints"].is_object());
    Ok(())
}
