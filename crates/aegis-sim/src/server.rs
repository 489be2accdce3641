//! Axum HTTP API consumed by the dashboard.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::events::Event;
use crate::network::{Network, NodeStatus};
use crate::simulation::{Delivery, Message, RouterConfig, RoutingSimulator};

/// Node color for online nodes in graph data.
pub const ONLINE_COLOR: &str = "#4ade80";
/// Node color for offline nodes in graph data.
pub const OFFLINE_COLOR: &str = "#f87171";

/// Shared application state.
pub struct AppState {
    network: Arc<Network>,
    simulator: RoutingSimulator,
}

/// Dashboard API server.
pub struct AegisServer {
    state: Arc<AppState>,
}

impl AegisServer {
    /// Create a server over an existing network.
    pub fn new(network: Arc<Network>, router_config: RouterConfig) -> Self {
        let simulator = RoutingSimulator::new(network.clone(), router_config);
        Self {
            state: Arc::new(AppState { network, simulator }),
        }
    }

    /// Load the topology named by the config and build a server around it.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let topology = config.load_topology()?;
        let network = Arc::new(Network::new(topology, config.retention()));
        Ok(Self::new(
            network,
            RouterConfig {
                simulate_delays: config.simulate_delays,
            },
        ))
    }

    /// The shared network.
    pub fn network(&self) -> Arc<Network> {
        self.state.network.clone()
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/nodes", get(list_nodes))
            .route("/api/network/status", get(network_status))
            .route("/api/network/graph-data", get(graph_data))
            .route("/api/events", get(list_events))
            .route("/api/events/report.csv", get(event_report))
            .route("/api/node/{name}/{state}", post(toggle_node))
            .route("/api/network/path", post(shortest_path))
            .route("/api/network/route", post(route_message))
            .route("/api/network/direct", post(direct_message))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Aegis API listening on http://{}", addr);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

// --- Errors ---

/// JSON field carrying the error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorField {
    Error,
    Message,
}

/// An error rendered as a JSON body with a matching status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    text: String,
    failed_hop: Option<String>,
    field: ErrorField,
}

impl ApiError {
    fn from_error(err: Error, field: ErrorField) -> Self {
        let status = status_for(&err);
        let failed_hop = match &err {
            Error::HopOffline { hop, .. } => Some(hop.clone()),
            _ => None,
        };
        let text = if status.is_server_error() && failed_hop.is_none() {
            tracing::error!("request failed: {}", err);
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        Self {
            status,
            text,
            failed_hop,
            field,
        }
    }

    /// Error reported under an `error` field.
    fn error(err: Error) -> Self {
        Self::from_error(err, ErrorField::Error)
    }

    /// Error reported under a `message` field.
    fn message(err: Error) -> Self {
        Self::from_error(err, ErrorField::Message)
    }
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Unreachable { .. } | Error::NotNeighbors { .. } | Error::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        Error::HopOffline { .. } => StatusCode::SERVICE_UNAVAILABLE,
        Error::Internal(_) | Error::Config(_) | Error::Io(_) | Error::Csv(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let key = match self.field {
            ErrorField::Error => "error",
            ErrorField::Message => "message",
        };
        let mut body = serde_json::Map::new();
        body.insert(key.to_string(), self.text.into());
        if let Some(hop) = self.failed_hop {
            body.insert("failed_hop".to_string(), hop.into());
        }
        (self.status, Json(serde_json::Value::Object(body))).into_response()
    }
}

fn require_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn bad_body(rejection: JsonRejection) -> Error {
    Error::InvalidInput(rejection.body_text())
}

// --- Health ---

async fn health() -> &'static str {
    "OK"
}

// --- Topology reads ---

async fn list_nodes(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.network.list_nodes().await)
}

async fn network_status(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Json<Vec<NodeStatus>>, ApiError> {
    state
        .network
        .status()
        .await
        .map(Json)
        .map_err(|e| ApiError::error(Error::Internal(e.to_string())))
}

/// Node entry for the graph view.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub color: String,
    pub is_active: bool,
}

/// Edge entry for the graph view.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub latency: u64,
}

/// Graph in the shape the dashboard renders.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

async fn graph_data(State(state): State<Arc<AppState>>) -> Json<GraphData> {
    let snapshot = state.network.snapshot().await;
    let nodes = snapshot
        .nodes
        .into_iter()
        .map(|n| GraphNode {
            color: if n.is_active { ONLINE_COLOR } else { OFFLINE_COLOR }.to_string(),
            id: n.name.clone(),
            label: n.name,
            is_active: n.is_active,
        })
        .collect();
    let edges = snapshot
        .links
        .into_iter()
        .map(|l| GraphEdge {
            label: format!("{}ms", l.latency),
            from: l.from,
            to: l.to,
            latency: l.latency,
        })
        .collect();
    Json(GraphData { nodes, edges })
}

// --- Events ---

#[derive(Debug, Deserialize)]
struct EventsQuery {
    since: Option<u64>,
}

async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<Event>> {
    let events = match query.since {
        Some(seq) => state.network.events_since(seq).await,
        None => state.network.events().await,
    };
    Json(events)
}

async fn event_report(
    State(state): State<Arc<AppState>>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let mut body = Vec::new();
    state
        .network
        .write_report(&mut body)
        .await
        .map_err(ApiError::error)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"simulation_report.csv\"",
            ),
        ],
        body,
    ))
}

// --- Availability ---

#[derive(Debug, Serialize, Deserialize)]
struct ToggleResponse {
    success: bool,
    node: String,
    status: String,
    changed: bool,
}

async fn toggle_node(
    State(state): State<Arc<AppState>>,
    Path((name, state_word)): Path<(String, String)>,
) -> std::result::Result<Json<ToggleResponse>, ApiError> {
    require_name("node name", &name).map_err(ApiError::error)?;
    let active = match state_word.as_str() {
        "online" => true,
        "offline" => false,
        other => {
            return Err(ApiError::error(Error::InvalidInput(format!(
                "unknown node state '{}', expected 'online' or 'offline'",
                other
            ))))
        }
    };

    let change = state
        .network
        .set_availability(&name, active)
        .await
        .map_err(ApiError::error)?;

    Ok(Json(ToggleResponse {
        success: true,
        changed: change.changed(),
        status: if change.current { "online" } else { "offline" }.to_string(),
        node: change.node,
    }))
}

// --- Routing ---

#[derive(Debug, Deserialize)]
struct PathRequest {
    from_node: String,
    to_node: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct PathResponse {
    path: Vec<String>,
    latency: u64,
}

async fn shortest_path(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<PathRequest>, JsonRejection>,
) -> std::result::Result<Json<PathResponse>, ApiError> {
    let Json(req) = body.map_err(|r| ApiError::error(bad_body(r)))?;
    require_name("from_node", &req.from_node).map_err(ApiError::error)?;
    require_name("to_node", &req.to_node).map_err(ApiError::error)?;

    let path = state
        .network
        .find_path(&req.from_node, &req.to_node)
        .await
        .map_err(ApiError::error)?;

    Ok(Json(PathResponse {
        path: path.nodes,
        latency: path.latency,
    }))
}

#[derive(Debug, Deserialize)]
struct RouteRequest {
    from_node: String,
    to_node: String,
    payload: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RouteResponse {
    message: String,
    path: Vec<String>,
    latency: u64,
}

async fn route_message(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<RouteRequest>, JsonRejection>,
) -> std::result::Result<Json<RouteResponse>, ApiError> {
    let message = message_from(body)?;
    let delivery = state
        .simulator
        .route(message)
        .await
        .map_err(ApiError::message)?;
    Ok(Json(RouteResponse::from(delivery)))
}

async fn direct_message(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<RouteRequest>, JsonRejection>,
) -> std::result::Result<Json<RouteResponse>, ApiError> {
    let message = message_from(body)?;
    let delivery = state
        .simulator
        .send_direct(message)
        .await
        .map_err(ApiError::message)?;
    Ok(Json(RouteResponse::from(delivery)))
}

fn message_from(
    body: std::result::Result<Json<RouteRequest>, JsonRejection>,
) -> std::result::Result<Message, ApiError> {
    let Json(req) = body.map_err(|r| ApiError::message(bad_body(r)))?;
    require_name("from_node", &req.from_node).map_err(ApiError::message)?;
    require_name("to_node", &req.to_node).map_err(ApiError::message)?;
    if req.payload.is_empty() {
        return Err(ApiError::message(Error::InvalidInput(
            "message payload cannot be empty".into(),
        )));
    }
    Ok(Message::new(req.from_node, req.to_node, req.payload))
}

impl From<Delivery> for RouteResponse {
    fn from(delivery: Delivery) -> Self {
        Self {
            message: delivery.confirmation,
            path: delivery.path.nodes,
            latency: delivery.path.latency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventRetention, EventStatus};
    use aegis_topology::Topology;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_server() -> AegisServer {
        let mut topo = Topology::new();
        for name in ["Node-A", "Node-B", "Node-C"] {
            topo.add_node(name).unwrap();
        }
        topo.add_link("Node-A", "Node-B", 10).unwrap();
        topo.add_link("Node-B", "Node-C", 20).unwrap();
        topo.add_link("Node-A", "Node-C", 50).unwrap();
        let network = Arc::new(Network::new(topo, EventRetention::Unbounded));
        AegisServer::new(network, RouterConfig::default())
    }

    fn delayed_server() -> AegisServer {
        let server = test_server();
        AegisServer::new(server.network(), RouterConfig { simulate_delays: true })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = test_server().router();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn list_nodes_in_insertion_order() {
        let app = test_server().router();
        let (status, body) = send(&app, "GET", "/api/nodes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["Node-A", "Node-B", "Node-C"]));
    }

    #[tokio::test]
    async fn network_status_lists_neighbors() {
        let app = test_server().router();
        let (status, body) = send(&app, "GET", "/api/network/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Node-A");
        assert_eq!(body[0]["is_active"], true);
        assert_eq!(body[0]["neighbors"][0], json!({"name": "Node-B", "latency": 10}));
    }

    #[tokio::test]
    async fn graph_data_endpoint() {
        let app = test_server().router();
        let (status, body) = send(&app, "GET", "/api/network/graph-data", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(body["edges"].as_array().unwrap().len(), 3);
        assert_eq!(body["nodes"][0]["label"], "Node-A");
        assert_eq!(body["nodes"][0]["color"], ONLINE_COLOR);
        assert_eq!(body["edges"][0]["label"], "10ms");
    }

    #[tokio::test]
    async fn take_node_offline_endpoint() {
        let app = test_server().router();
        let (status, body) = send(&app, "POST", "/api/node/Node-A/offline", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], "offline");

        let (_, graph) = send(&app, "GET", "/api/network/graph-data", None).await;
        assert_eq!(graph["nodes"][0]["label"], "Node-A");
        assert_eq!(graph["nodes"][0]["color"], OFFLINE_COLOR);
        assert_eq!(graph["nodes"][0]["is_active"], false);

        let (_, events) = send(&app, "GET", "/api/events", None).await;
        assert_eq!(events[0]["status"], "INFO");
        assert_eq!(events[0]["details"], "Node 'Node-A' went offline.");
    }

    #[tokio::test]
    async fn toggle_unknown_node_is_404_without_event() {
        let server = test_server();
        let app = server.router();
        let (status, body) = send(&app, "POST", "/api/node/Ghost/offline", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Ghost"));
        assert_eq!(server.network().event_count().await, 0);
    }

    #[tokio::test]
    async fn toggle_rejects_unknown_state() {
        let app = test_server().router();
        let (status, body) = send(&app, "POST", "/api/node/Node-A/sideways", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn shortest_path_endpoint() {
        let app = test_server().router();
        let req = json!({"from_node": "Node-A", "to_node": "Node-C"});
        let (status, body) = send(&app, "POST", "/api/network/path", Some(req.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"path": ["Node-A", "Node-B", "Node-C"], "latency": 30}));

        send(&app, "POST", "/api/node/Node-B/offline", None).await;
        let (_, body) = send(&app, "POST", "/api/network/path", Some(req)).await;
        assert_eq!(body, json!({"path": ["Node-A", "Node-C"], "latency": 50}));
    }

    #[tokio::test]
    async fn shortest_path_errors() {
        let app = test_server().router();

        let (status, body) = send(
            &app,
            "POST",
            "/api/network/path",
            Some(json!({"from_node": "Node-A", "to_node": "Nowhere"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());

        send(&app, "POST", "/api/node/Node-C/offline", None).await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/network/path",
            Some(json!({"from_node": "Node-A", "to_node": "Node-C"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("No route"));

        let (status, body) = send(&app, "POST", "/api/network/path", Some(json!({"from_node": 3}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn route_message_endpoint() {
        let server = test_server();
        let app = server.router();
        let (status, body) = send(
            &app,
            "POST",
            "/api/network/route",
            Some(json!({"from_node": "Node-A", "to_node": "Node-C", "payload": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("Node-A -> Node-B -> Node-C"));
        assert_eq!(body["latency"], 30);

        let events = server.network().events().await;
        assert_eq!(events.last().map(|e| e.status), Some(EventStatus::Success));
    }

    #[tokio::test]
    async fn route_message_rejects_empty_payload() {
        let server = test_server();
        let app = server.router();
        let (status, body) = send(
            &app,
            "POST",
            "/api/network/route",
            Some(json!({"from_node": "Node-A", "to_node": "Node-C", "payload": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("payload"));
        assert_eq!(server.network().event_count().await, 0);
    }

    #[tokio::test]
    async fn route_message_without_route_logs_failure() {
        let server = test_server();
        let app = server.router();
        send(&app, "POST", "/api/node/Node-C/offline", None).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/network/route",
            Some(json!({"from_node": "Node-A", "to_node": "Node-C", "payload": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let (_, events) = send(&app, "GET", "/api/events?since=0", None).await;
        assert_eq!(events.as_array().unwrap().len(), 1);
        assert_eq!(events[0]["status"], "FAILED");
        assert_eq!(events[0]["event_type"], "MESSAGE_ROUTE");
    }

    #[tokio::test]
    async fn route_message_unknown_node_is_404() {
        let server = test_server();
        let app = server.router();
        let (status, body) = send(
            &app,
            "POST",
            "/api/network/route",
            Some(json!({"from_node": "Node-A", "to_node": "Ghost", "payload": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("Ghost"));
        assert!(body.get("failed_hop").is_none());

        let events = server.network().events().await;
        assert_eq!(events.last().map(|e| e.status), Some(EventStatus::Failed));
    }

    #[tokio::test(start_paused = true)]
    async fn route_message_hop_offline_mid_walk_is_503() {
        let server = delayed_server();
        let network = server.network();
        let app = server.router();

        let request = tokio::spawn(async move {
            send(
                &app,
                "POST",
                "/api/network/route",
                Some(json!({"from_node": "Node-A", "to_node": "Node-C", "payload": "race"})),
            )
            .await
        });

        // The walk is waiting on the 10ms Node-A to Node-B link
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        network.set_availability("Node-B", false).await.unwrap();

        let (status, body) = request.await.unwrap();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["failed_hop"], "Node-B");
        assert!(body["message"].as_str().unwrap().contains("Node-B"));

        let events = network.events().await;
        assert_eq!(events.last().map(|e| e.status), Some(EventStatus::Failed));
        assert_eq!(events.last().and_then(|e| e.path_taken.clone()), Some(vec!["Node-A".to_string()]));
    }

    #[tokio::test]
    async fn toggle_reports_resulting_state() {
        let app = test_server().router();
        let (_, body) = send(&app, "POST", "/api/node/Node-B/online", None).await;
        assert_eq!(body["status"], "online");
        assert_eq!(body["changed"], false);

        let (_, body) = send(&app, "POST", "/api/node/Node-B/offline", None).await;
        assert_eq!(body["status"], "offline");
        assert_eq!(body["changed"], true);
    }

    #[tokio::test]
    async fn direct_message_endpoint() {
        let app = test_server().router();
        let (status, body) = send(
            &app,
            "POST",
            "/api/network/direct",
            Some(json!({"from_node": "Node-A", "to_node": "Node-C", "payload": "hello"})),
        )
        .await;
        // Direct link, even though Node-B offers a cheaper route
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"], json!(["Node-A", "Node-C"]));
        assert_eq!(body["latency"], 50);
    }

    #[tokio::test]
    async fn direct_message_between_non_neighbors_is_400() {
        let mut topo = Topology::new();
        for name in ["Node-A", "Node-B", "Node-C"] {
            topo.add_node(name).unwrap();
        }
        topo.add_link("Node-A", "Node-B", 10).unwrap();
        topo.add_link("Node-B", "Node-C", 10).unwrap();
        let server = AegisServer::new(
            Arc::new(Network::new(topo, EventRetention::Unbounded)),
            RouterConfig::default(),
        );
        let app = server.router();

        let (status, body) = send(
            &app,
            "POST",
            "/api/network/direct",
            Some(json!({"from_node": "Node-A", "to_node": "Node-C", "payload": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("not neighbors"));
        assert_eq!(server.network().event_count().await, 1);
    }

    #[tokio::test]
    async fn event_report_is_csv() {
        let app = test_server().router();
        send(&app, "POST", "/api/node/Node-C/offline", None).await;
        send(
            &app,
            "POST",
            "/api/network/route",
            Some(json!({"from_node": "Node-A", "to_node": "Node-C", "payload": "hi"})),
        )
        .await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/events/report.csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,event_type,details,status,path_taken,total_latency_ms");
        assert!(lines[1].contains("NODE_OFFLINE"));
        assert!(lines[2].ends_with("FAILED,No path found,N/A"));
    }

    #[test]
    fn hop_failures_report_failed_hop() {
        let err = ApiError::message(Error::HopOffline {
            hop: "Node-B".into(),
            travelled: vec!["Node-A".into()],
        });
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.failed_hop.as_deref(), Some("Node-B"));
        assert!(err.text.contains("Node-B"));
    }

    #[test]
    fn internal_errors_hide_detail() {
        let err = ApiError::error(Error::Internal("lock poisoned at 0xdead".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.text, "Internal server error");
    }
}
