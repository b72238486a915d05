//! GraphQL endpoint backed by async-graphql.

use std::sync::Arc;

use async_graphql::{
    extensions::Tracing, http::GraphiQLSource, BatchRequest, Context, EmptySubscription,
    ParseRequestError, Schema,
};
use async_graphql_axum::{GraphQLBatchRequest, GraphQLResponse};
use axum::{
    body::to_bytes,
    extract::{FromRequest, Request},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;

use crate::infrastructure::state::AppState;

pub mod mutation;
pub mod query;
pub mod scalars;
pub mod types;

pub use mutation::Mutation;
pub use query::Query;

pub const ENDPOINT: &str = "/graphql";

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(state: Arc<AppState>) -> AppSchema {
    let limits = state.config.graphql.clone();
    let mut builder = Schema::build(Query, Mutation, EmptySubscription)
        .data(state)
        .extension(Tracing);

    if let Some(depth) = limits.depth_limit {
        builder = builder.limit_depth(depth);
    }
    if let Some(complexity) = limits.complexity_limit {
        builder = builder.limit_complexity(complexity);
    }

    builder.finish()
}

/// Largest `application/graphql` body accepted, in bytes.
const MAX_QUERY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
struct Endpoint {
    schema: AppSchema,
    graphiql: bool,
}

/// Serves queries over `GET ?query=` and `POST` (JSON, single or batch, or a
/// raw `application/graphql` document). A browser `GET` without a query gets
/// GraphiQL when it is enabled.
pub fn router(schema: AppSchema, graphiql: bool) -> Router {
    Router::new()
        .route(ENDPOINT, get(handler).post(handler))
        .layer(Extension(Endpoint { schema, graphiql }))
}

async fn handler(Extension(endpoint): Extension<Endpoint>, request: Request) -> Response {
    if endpoint.graphiql && wants_graphiql(&request) {
        return Html(GraphiQLSource::build().endpoint(ENDPOINT).finish()).into_response();
    }

    match read_batch(request).await {
        Ok(batch) => {
            GraphQLResponse::from(endpoint.schema.execute_batch(batch).await).into_response()
        }
        Err(rejection) => rejection.into_response(),
    }
}

fn wants_graphiql(request: &Request) -> bool {
    request.method() == Method::GET
        && request.uri().query().map_or(true, str::is_empty)
        && header_contains(request, header::ACCEPT, "text/html")
}

fn header_contains(request: &Request, name: header::HeaderName, needle: &str) -> bool {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains(needle))
}

async fn read_batch(request: Request) -> Result<BatchRequest, BadRequest> {
    if request.method() == Method::POST
        && header_contains(&request, header::CONTENT_TYPE, "application/graphql")
    {
        let bytes = to_bytes(request.into_body(), MAX_QUERY_BYTES)
            .await
            .map_err(|err| BadRequest(err.to_string()))?;
        let query = String::from_utf8(bytes.to_vec())
            .map_err(|_| BadRequest("query document is not valid UTF-8".to_string()))?;
        return Ok(BatchRequest::Single(async_graphql::Request::new(query)));
    }

    GraphQLBatchRequest::<BadRequest>::from_request(request, &())
        .await
        .map(GraphQLBatchRequest::into_inner)
}

/// Unreadable request, reported in the GraphQL error envelope.
struct BadRequest(String);

impl From<ParseRequestError> for BadRequest {
    fn from(err: ParseRequestError) -> Self {
        BadRequest(err.to_string())
    }
}

impl IntoResponse for BadRequest {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "errors": [{ "message": self.0 }] })),
        )
            .into_response()
    }
}

pub(crate) fn app_state(ctx: &Context<'_>) -> async_graphql::Result<Arc<AppState>> {
    ctx.data::<Arc<AppState>>().map(Arc::clone)
}
