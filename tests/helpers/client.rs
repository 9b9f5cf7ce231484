use anyhow::Result;
use reqwest::{Client, ClientBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub fn build_http_client() -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(APP_USER_AGENT)
        .timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

pub fn cashier_body(email: &str, password: &str, display_name: &str) -> Value {
    json!({
        "data": {
            "email": email,
            "password": password,
            "displayName": display_name
        }
    })
}

pub async fn post_json(address: &str, body: &Value) -> Result<Response> {
    let client = build_http_client()?;
    let response = client.post(address).json(body).send().await?;
    Ok(response)
}

/// Sends `body` untouched with the given content type
pub async fn post_raw(address: &str, content_type: &str, body: &'static str) -> Result<Response> {
    let client = build_http_client()?;
    let response = client
        .post(address)
        .header("Content-Type", content_type)
        .body(body)
        .send()
        .await?;
    Ok(response)
}
