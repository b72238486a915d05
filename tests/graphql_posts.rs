use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use user_posts_api::infrastructure::store::Seed;


use test_harness::{build_app, first_error, graphql, sample_seed};

#[tokio::test]
async fn posts_are_listed_in_store_order() -> Result<()> {
    let app = build_app(sample_seed());

    let body = graphql(&app, "{ posts { id title } }", Value::Null).await?;

    assert_eq!(
        body["data"]["posts"],
        json!([
            { "id": "1", "title": "First" },
            { "id": "2", "title": "Second" },
            { "id": "3", "title": "Third" }
        ])
    );

    Ok(())
}

#[tokio::test]
async fn relationships_resolve_in_both_directions() -> Result<()> {
    let app = build_app(sample_seed());

    let body = graphql(
        &app,
        r#"{
            user(id: "1") { posts { id title } }
            post(id: "3") { description user { firstName } }
        }"#,
        Value::Null,
    )
    .await?;

    assert_eq!(
        body["data"]["user"]["posts"],
        json!([{ "id": "1", "title": "First" }, { "id": "2", "title": "Second" }])
    );
    assert_eq!(body["data"]["post"]["description"], "Third body");
    assert_eq!(body["data"]["post"]["user"]["firstName"], "Bob");

    Ok(())
}

#[tokio::test]
async fn missing_post_is_null_not_an_error() -> Result<()> {
    let app = build_app(sample_seed());

    let body = graphql(&app, r#"{ post(id: "77") { id } }"#, Value::Null).await?;

    assert!(body.get("errors").is_none(), "{body}");
    assert!(body["data"]["post"].is_null());

    Ok(())
}

#[tokio::test]
async fn deleting_an_author_keeps_posts_with_null_user() -> Result<()> {
    let app = build_app(sample_seed());

    graphql(&app, r#"mutation { deleteUser(id: "2") }"#, Value::Null).await?;
    let body = graphql(&app, r#"{ post(id: "3") { id user { id } } }"#, Value::Null).await?;

    assert_eq!(body["data"]["post"]["id"], "3");
    assert!(body["data"]["post"]["user"].is_null());

    Ok(())
}

#[tokio::test]
async fn add_post_links_the_owner() -> Result<()> {
    let app = build_app(sample_seed());

    let created = graphql(
        &app,
        r#"mutation { addPost(input: { title: "Fourth", user: "2" }) { id title user { id } } }"#,
        Value::Null,
    )
    .await?;
    assert_eq!(
        created["data"]["addPost"],
        json!({ "id": "4", "title": "Fourth", "user": { "id": "2" } })
    );

    let owner = graphql(&app, r#"{ user(id: "2") { posts { id } } }"#, Value::Null).await?;
    assert_eq!(
        owner["data"]["user"]["posts"],
        json!([{ "id": "3" }, { "id": "4" }])
    );

    Ok(())
}

#[tokio::test]
async fn add_post_for_unknown_owner_fails_with_code() -> Result<()> {
    let app = build_app(Seed::default());

    let body = graphql(
        &app,
        r#"mutation { addPost(input: { title: "Lost", user: "5" }) { id } }"#,
        Value::Null,
    )
    .await?;

    assert_eq!(first_error(&body), "user 5 not found");
    assert_eq!(body["errors"][0]["extensions"]["code"], "NOT_FOUND");

    let posts = graphql(&app, "{ posts { id } }", Value::Null).await?;
    assert_eq!(posts["data"]["posts"], json!([]));

    Ok(())
}

#[tokio::test]
async fn add_post_with_non_numeric_owner_is_bad_input() -> Result<()> {
    let app = build_app(sample_seed());

    let body = graphql(
        &app,
        r#"mutation { addPost(input: { title: "Lost", user: "abc" }) { id } }"#,
        Value::Null,
    )
    .await?;

    assert!(first_error(&body).contains("abc is not a valid id"));
    assert_eq!(body["errors"][0]["extensions"]["code"], "BAD_USER_INPUT");

    let posts = graphql(&app, "{ posts { id } }", Value::Null).await?;
    assert_eq!(posts["data"]["posts"].as_array().map(Vec::len), Some(3));

    Ok(())
}

#[tokio::test]
async fn batched_requests_get_batched_responses() -> Result<()> {
    let app = build_app(sample_seed());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!([
                        { "query": "{ users { id } }" },
                        { "query": "{ post(id: \"1\") { title } }" }
                    ])
                    .to_string(),
                ))
                .expect("failed to build batch request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), 1024 * 1024).await?)?;
    assert_eq!(body[0]["data"]["users"].as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["data"]["post"]["title"], "First");

    Ok(())
}

#[tokio::test]
async fn health_reports_store_sizes() -> Result<()> {
    let app = build_app(sample_seed());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .expect("failed to build health request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), 1024 * 1024).await?)?;
    assert_eq!(body, json!({ "status": "ok", "users": 2, "posts": 3 }));

    Ok(())
}

#[tokio::test]
async fn graphiql_page_and_fallback() -> Result<()> {
    let app = build_app(Seed::default());

    let page = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/graphql")
                .header("accept", "text/html")
                .body(Body::empty())
                .expect("failed to build graphiql request"),
        )
        .await
        .expect("service error");
    assert_eq!(page.status(), StatusCode::OK);
    let html = to_bytes(page.into_body(), 1024 * 1024).await?;
    assert!(String::from_utf8_lossy(&html).contains("graphiql"));

    let missing = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("service error");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn get_with_query_string_executes() -> Result<()> {
    let app = build_app(sample_seed());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/graphql?query=%7B%20users%20%7B%20firstName%20%7D%20%7D")
                .header("accept", "application/json")
                .body(Body::empty())
                .expect("failed to build query request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), 1024 * 1024).await?)?;
    assert_eq!(
        body["data"]["users"],
        json!([{ "firstName": "Ann" }, { "firstName": "Bob" }])
    );

    Ok(())
}

#[tokio::test]
async fn raw_graphql_document_body_executes() -> Result<()> {
    let app = build_app(sample_seed());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header("content-type", "application/graphql")
                .body(Body::from("{ post(id: 3) { title } }"))
                .expect("failed to build document request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), 1024 * 1024).await?)?;
    assert_eq!(body["data"]["post"]["title"], "Third");

    Ok(())
}

#[tokio::test]
async fn unreadable_body_gets_json_error_envelope() -> Result<()> {
    let app = build_app(sample_seed());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .expect("failed to build malformed request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), 1024 * 1024).await?)?;
    assert!(body["errors"][0]["message"].is_string());

    Ok(())
}
