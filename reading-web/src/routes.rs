//! Rotas HTTP do Reading Helper.
//!
//! Camada fina em volta do [`ReadingPipeline`]: recebe o upload, decodifica os
//! bytes como UTF-8, executa o pipeline e serializa o resultado como JSON.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, State},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use reading_core::{samples::demo_texts, AnnotatedToken, ReadingPipeline, Summary};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppError;

/// Folga para cabeçalhos e delimitadores do multipart além do conteúdo do arquivo.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Estado compartilhado da aplicação.
pub struct AppState {
    pub pipeline: ReadingPipeline,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(pipeline: ReadingPipeline, max_upload_bytes: usize) -> Self {
        Self {
            pipeline,
            max_upload_bytes,
        }
    }

    /// Limite do corpo inteiro da requisição.
    pub fn body_limit(&self) -> usize {
        self.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    processed_words: Vec<AnnotatedToken>,
    summary: Summary,
}

#[derive(Serialize)]
struct DocumentResponse {
    filename: Option<String>,
    processed_words: Vec<AnnotatedToken>,
    summary: Summary,
}

#[derive(Serialize)]
struct BatchResponse {
    documents: Vec<DocumentResponse>,
}

#[derive(Serialize)]
struct DemoText {
    title: &'static str,
    text: &'static str,
}

/// Um arquivo já lido e decodificado.
struct Upload {
    filename: Option<String>,
    text: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.body_limit();

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/process-text", post(process_text_handler))
        .route("/process-texts", post(process_texts_handler))
        .route("/analyze", post(analyze_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Retorna a página de leitura
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Reading Helper API is running!" }))
}

/// Anota um único arquivo enviado no campo `file`
async fn process_text_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<DocumentResponse>, AppError> {
    let upload = next_upload(&mut multipart, &state)
        .await?
        .ok_or(AppError::MissingFile)?;

    let analysis = state.pipeline.analyze(&upload.text);
    info!(
        filename = upload.filename.as_deref().unwrap_or("-"),
        tokens = analysis.summary.total_tokens,
        hard = analysis.summary.hard_count,
        "texto processado"
    );

    Ok(Json(DocumentResponse {
        filename: upload.filename,
        processed_words: analysis.tokens,
        summary: analysis.summary,
    }))
}

/// Anota vários arquivos (todos os campos `file`) em paralelo
async fn process_texts_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let mut uploads = Vec::new();
    while let Some(upload) = next_upload(&mut multipart, &state).await? {
        uploads.push(upload);
    }
    if uploads.is_empty() {
        return Err(AppError::MissingFile);
    }

    // O lote roda no rayon; fora do runtime async para não bloquear os workers
    let pipeline_state = Arc::clone(&state);
    let texts: Vec<String> = uploads.iter().map(|u| u.text.clone()).collect();
    let analyses = tokio::task::spawn_blocking(move || {
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        pipeline_state.pipeline.analyze_batch(&refs)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    info!(documents = uploads.len(), "lote processado");

    let documents = uploads
        .into_iter()
        .zip(analyses)
        .map(|(upload, analysis)| DocumentResponse {
            filename: upload.filename,
            processed_words: analysis.tokens,
            summary: analysis.summary,
        })
        .collect();

    Ok(Json(BatchResponse { documents }))
}

/// Análise de texto enviado diretamente como JSON
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(req) = payload?;
    if req.text.trim().is_empty() {
        return Err(AppError::EmptyText);
    }

    let analysis = state.pipeline.analyze(&req.text);
    Ok(Json(AnalyzeResponse {
        processed_words: analysis.tokens,
        summary: analysis.summary,
    }))
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<DemoText> = demo_texts()
        .into_iter()
        .map(|(title, text)| DemoText { title, text })
        .collect();
    Json(texts)
}

/// Lê o próximo campo `file` do multipart, ignorando os demais campos.
///
/// `Ok(None)` quando não há mais arquivos.
async fn next_upload(
    multipart: &mut Multipart,
    state: &AppState,
) -> Result<Option<Upload>, AppError> {
    let max_upload_bytes = state.max_upload_bytes;
    let multipart_error = |err| AppError::from_multipart(err, state.body_limit());

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        let display_name = filename.clone().unwrap_or_default();

        if bytes.len() > max_upload_bytes {
            return Err(AppError::PayloadTooLarge {
                filename: display_name,
                limit: max_upload_bytes,
            });
        }
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::InvalidEncoding { filename: display_name })?;

        return Ok(Some(Upload { filename, text }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use reading_core::FALLBACK_DEFINITION;
    use tower::ServiceExt;

    use super::*;

    const BOUNDARY: &str = "reading-helper-test-boundary";

    fn app(max_upload_bytes: usize) -> Router {
        router(Arc::new(AppState::new(ReadingPipeline::new(), max_upload_bytes)))
    }

    fn multipart_request(uri: &str, fields: &[(&str, &str, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, filename, content) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let resp = app(1024)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["message"], "Reading Helper API is running!");
    }

    #[tokio::test]
    async fn test_index_page() {
        let resp = app(1024)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("Reading Helper"));
    }

    #[tokio::test]
    async fn test_process_text_upload() {
        let req = multipart_request(
            "/process-text",
            &[("file", "story.txt", b"The cat is loquacious and extraordinary.")],
        );
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["filename"], "story.txt");
        let words = json["processed_words"].as_array().unwrap();
        assert_eq!(words.len(), 7);
        assert_eq!(words[3]["word"], "loquacious");
        assert_eq!(words[3]["is_hard"], true);
        assert_eq!(words[3]["definition"], "Tending to talk a great deal; talkative.");
        assert_eq!(words[1]["is_hard"], false);
        assert!(words[1]["definition"].is_null());
        assert_eq!(json["summary"]["hard_count"], 2);
    }

    #[tokio::test]
    async fn test_process_text_ignores_other_fields() {
        let req = multipart_request(
            "/process-text",
            &[("note", "ignored.txt", b"professor"), ("file", "real.txt", b"cat")],
        );
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["filename"], "real.txt");
        assert_eq!(json["processed_words"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_process_text_empty_file() {
        let req = multipart_request("/process-text", &[("file", "empty.txt", b"")]);
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert!(json["processed_words"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_text_missing_file() {
        let req = multipart_request("/process-text", &[("other", "x.txt", b"text")]);
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].as_str().unwrap().contains("file"));
    }

    #[tokio::test]
    async fn test_process_text_invalid_utf8() {
        let req = multipart_request("/process-text", &[("file", "bin.dat", &[0xff, 0xfe, 0xfd])]);
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].as_str().unwrap().contains("UTF-8"));
    }

    #[tokio::test]
    async fn test_process_text_too_large() {
        let big = vec![b'a'; 100];
        let req = multipart_request("/process-text", &[("file", "big.txt", &big)]);
        let resp = app(16).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_process_text_body_over_request_limit() {
        // maior que max_upload_bytes + folga do multipart: quem barra é o limite do corpo
        let big = vec![b'a'; MULTIPART_OVERHEAD_BYTES + 200 * 1024];
        let req = multipart_request("/process-text", &[("file", "huge.txt", &big)]);
        let resp = app(16).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let json = body_json(resp).await;
        let message = json["error"].as_str().unwrap();
        assert_eq!(
            message,
            format!("request exceeds the limit of {} bytes", 16 + MULTIPART_OVERHEAD_BYTES)
        );
    }

    #[tokio::test]
    async fn test_process_texts_batch() {
        let req = multipart_request(
            "/process-texts",
            &[
                ("file", "a.txt", b"cat"),
                ("file", "b.txt", b"extraordinarily, truly!"),
            ],
        );
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let docs = json["documents"].as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["filename"], "a.txt");
        assert_eq!(docs[0]["summary"]["hard_count"], 0);
        assert_eq!(docs[1]["filename"], "b.txt");
        assert_eq!(docs[1]["processed_words"][0]["definition"], FALLBACK_DEFINITION);
    }

    #[tokio::test]
    async fn test_process_texts_requires_a_file() {
        let req = multipart_request("/process-texts", &[]);
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_json() {
        let req = Request::post("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "Professor, please."}"#))
            .unwrap();
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["processed_words"][0]["word"], "Professor");
        assert_eq!(
            json["processed_words"][0]["definition"],
            "A university teacher of the highest rank."
        );
        assert_eq!(json["summary"]["total_tokens"], 4);
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_text() {
        let req = Request::post("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "   "}"#))
            .unwrap();
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_malformed_json_returns_json_error() {
        let req = Request::post("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{text: "unquoted key"}"#))
            .unwrap();
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().starts_with("invalid JSON request"));
    }

    #[tokio::test]
    async fn test_analyze_missing_content_type() {
        let req = Request::post("/analyze")
            .body(Body::from(r#"{"text": "professor"}"#))
            .unwrap();
        let resp = app(1024).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_demo_texts() {
        let resp = app(1024)
            .oneshot(Request::get("/demo-texts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let texts = json.as_array().unwrap();
        assert!(!texts.is_empty());
        assert!(texts[0]["title"].is_string());
        assert!(texts[0]["text"].is_string());
    }
}
