//! Local stand-in for the remote analysis service.
//!
//! Serves `POST /analyze_dataset/` with a scripted response, applies the
//! same upload checks as the real service, and records what it received.

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::domain::error::{AnalysisError, Result};

const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

const SAMPLE_REPORT: &str = r#"{
  "observaciones": [
    {"tipo_de_reporte": "observacion", "titulo": "Valores faltantes", "mensaje": "La columna amount tiene celdas vacias."}
  ],
  "metricas": {
    "porcentaje_valores_faltantes": 5,
    "porcentaje_filas_duplicadas": 0,
    "salud_del_dataset": 95
  },
  "sugerencias": [
    {"tipo_de_reporte": "sugerencia", "titulo": "Revisar faltantes", "mensaje": "Decide si completar o descartar las filas incompletas."}
  ]
}"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay_ms: Option<u64>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            body: SAMPLE_REPORT.to_string(),
            delay_ms: None,
        }
    }
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay_ms: None,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Reads a JSON file used verbatim as the response body.
    pub fn from_fixture(path: &Path, status: u16) -> Result<Self> {
        let body = fs::read_to_string(path)?;
        serde_json::from_str::<serde_json::Value>(&body).map_err(|err| {
            AnalysisError::validation(format!(
                "fixture {} is not valid JSON: {}",
                path.display(),
                err
            ))
        })?;
        Ok(Self::new(status, body))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

struct MockServiceState {
    response: Mutex<MockResponse>,
    request_count: AtomicUsize,
    last_request: Mutex<Option<RecordedRequest>>,
}

pub struct MockAnalysisService {
    state: Arc<MockServiceState>,
    handle: ServerHandle,
    addr: SocketAddr,
}

impl MockAnalysisService {
    /// Binds `127.0.0.1:port` (0 picks a free port) and serves in the background.
    pub async fn start(port: u16, response: MockResponse) -> Result<Self> {
        let state = Arc::new(MockServiceState {
            response: Mutex::new(response),
            request_count: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        });

        let server_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(server_state.clone()))
                .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
                .route("/analyze_dataset/", web::post().to(handle_analyze))
                .default_service(web::route().to(handle_not_found))
        })
        .workers(1)
        .bind(("127.0.0.1", port))?;

        let addr = server
            .addrs()
            .first()
            .copied()
            .ok_or_else(|| AnalysisError::Io {
                reason: "mock service did not bind an address".to_string(),
            })?;
        let server = server.run();
        let handle = server.handle();
        tokio::spawn(server);

        info!(url = %format!("http://{}", addr), "Mock analysis service started");

        Ok(Self {
            state,
            handle,
            addr,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_count(&self) -> usize {
        self.state.request_count.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_response(&self, response: MockResponse) {
        *self
            .state
            .response
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = response;
    }

    pub async fn stop(self) {
        let graceful = timeout(Duration::from_secs(2), self.handle.stop(true)).await;
        if graceful.is_err() {
            self.handle.stop(false).await;
            warn!("Mock analysis service forced stop after timeout");
        } else {
            info!("Mock analysis service stopped");
        }
    }
}

async fn handle_analyze(
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<Arc<MockServiceState>>,
) -> HttpResponse {
    data.request_count.fetch_add(1, Ordering::SeqCst);
    let content_type = req
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());
    *data
        .last_request
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(RecordedRequest {
        path: req.path().to_string(),
        content_type,
        body: body.to_vec(),
    });

    let file_name = match uploaded_file_name(&body) {
        Some(name) => name,
        None => {
            return HttpResponse::UnprocessableEntity().json(json!({
                "detail": [{"loc": ["body", "file"], "msg": "field required", "type": "value_error.missing"}]
            }))
        }
    };
    let lower = file_name.to_ascii_lowercase();
    if !lower.ends_with(".csv") && !lower.ends_with(".xlsx") {
        return HttpResponse::BadRequest().json(json!({
            "detail": "Unsupported file type. Please upload a .csv or .xlsx file"
        }));
    }

    let response = data
        .response
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    if let Some(delay_ms) = response.delay_ms.filter(|ms| *ms > 0) {
        sleep(Duration::from_millis(delay_ms)).await;
    }

    info!(
        file = %file_name,
        status = response.status,
        "Mock analysis response served"
    );

    HttpResponse::build(
        actix_web::http::StatusCode::from_u16(response.status)
            .unwrap_or(actix_web::http::StatusCode::OK),
    )
    .content_type("application/json")
    .body(response.body)
}

async fn handle_not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "detail": "Not Found",
        "method": req.method().as_str(),
        "path": req.path()
    }))
}

/// Pulls `filename="..."` out of the `file` part of a multipart body.
fn uploaded_file_name(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let disposition = text
        .lines()
        .find(|line| line.contains("name=\"file\"") && line.contains("filename=\""))?;
    let start = disposition.find("filename=\"")? + "filename=\"".len();
    let end = disposition[start..].find('"')? + start;
    let name = &disposition[start..end];
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
