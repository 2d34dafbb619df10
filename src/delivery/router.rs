// src/delivery/router.rs
//
// Route registration and the request handlers. Each handler is a
// single-shot request/response; the repository behind AppState is the
// only shared state.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::delivery::api_server::AppState;
use crate::domain::services::keywords::{capitalize, extract_keywords};
use crate::domain::services::markdown::strip_markdown;
use crate::domain::services::summarizer::summarize;
use crate::domain::services::xml;
use crate::error::ApiError;

/// Hard cap on the stripped input length.
const MAX_TEXTO_LEN: usize = 3000;

const MSG_TEXTO_VAZIO: &str = "O texto anexado não pode ser vazio!!";
const MSG_TEXTO_LONGO: &str =
    "Texto muito longo, reduza a quantidade de caracteres para 3000.";
const MSG_RESUMO_NAO_ENCONTRADO: &str = "Resumo não encontrado.";
const MSG_SEM_PALAVRAS: &str = "Nenhuma palavra-chave encontrada no texto.";
const MSG_ERRO_INTERNO: &str = "Erro interno no servidor.";
const MSG_RESUMO_EXCLUIDO: &str = "Resumo excluído com sucesso.";

#[derive(Debug, Deserialize)]
pub struct TextoEntrada {
    pub texto: String,
}

#[derive(Debug, Serialize)]
pub struct PalavrasResponse {
    pub palavras: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MensagemResponse {
    pub mensagem: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/resumir/", web::post().to(criar_resumo))
        .route("/resumos/", web::get().to(listar_resumos))
        .route(
            "/resumos/{id}/palavras-chave",
            web::get().to(palavras_do_resumo),
        )
        .route("/resumos/{id}", web::put().to(atualizar_resumo))
        .route("/resumos/{id}", web::delete().to(deletar_resumo))
        .route("/palavras-chaves/", web::post().to(extrair_palavras))
        .route("/processar/", web::post().to(processar_texto));
}

/// Malformed request bodies get the XML-shaped 422 document instead of
/// the default error body.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("corpo de requisição inválido: {}", err);
    let doc = xml::render_erros(&[("body", err.to_string())]);
    let response = HttpResponse::UnprocessableEntity()
        .content_type("application/xml")
        .body(doc);
    InternalError::from_response(err, response).into()
}

/// Reject empty input (before or after stripping) and stripped text over
/// the length cap; return the stripped text otherwise.
fn validar_e_limpar(texto: &str) -> Result<String, ApiError> {
    if texto.trim().is_empty() {
        return Err(ApiError::Validation(MSG_TEXTO_VAZIO.to_string()));
    }
    let stripped = strip_markdown(texto);
    if stripped.is_empty() {
        return Err(ApiError::Validation(MSG_TEXTO_VAZIO.to_string()));
    }
    if stripped.chars().count() > MAX_TEXTO_LEN {
        return Err(ApiError::Validation(MSG_TEXTO_LONGO.to_string()));
    }
    Ok(stripped)
}

async fn criar_resumo(
    state: web::Data<AppState>,
    body: web::Json<TextoEntrada>,
) -> Result<HttpResponse, ApiError> {
    let stripped = validar_e_limpar(&body.texto)?;
    let resumo = summarize(&stripped);
    let keywords = extract_keywords(&stripped);

    let stored = state.repo.create(&resumo, &keywords).await?;
    info!("resumo {} criado ({} palavras-chave)", stored.id, keywords.len());
    Ok(HttpResponse::Ok().json(stored))
}

async fn listar_resumos(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let resumos = state.repo.list().await?;
    Ok(HttpResponse::Ok().json(resumos))
}

async fn palavras_do_resumo(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if state.repo.get(id).await?.is_none() {
        return Err(ApiError::NotFound(MSG_RESUMO_NAO_ENCONTRADO.to_string()));
    }
    let palavras = state
        .repo
        .keywords_for(id)
        .await?
        .iter()
        .map(|k| capitalize(&k.termo))
        .collect();
    Ok(HttpResponse::Ok().json(PalavrasResponse { palavras }))
}

async fn extrair_palavras(body: web::Json<TextoEntrada>) -> Result<HttpResponse, ApiError> {
    let stripped = validar_e_limpar(&body.texto)?;
    let keywords = extract_keywords(&stripped);
    if keywords.is_empty() {
        return Err(ApiError::Validation(MSG_SEM_PALAVRAS.to_string()));
    }
    let palavras = keywords.iter().map(|k| capitalize(&k.termo)).collect();
    Ok(HttpResponse::Ok().json(PalavrasResponse { palavras }))
}

async fn atualizar_resumo(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<TextoEntrada>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let stripped = validar_e_limpar(&body.texto)?;
    let resumo = summarize(&stripped);
    let keywords = extract_keywords(&stripped);

    match state.repo.update(id, &resumo, &keywords).await? {
        Some(updated) => {
            info!("resumo {} atualizado", id);
            Ok(HttpResponse::Ok().json(updated))
        }
        None => Err(ApiError::NotFound(MSG_RESUMO_NAO_ENCONTRADO.to_string())),
    }
}

async fn deletar_resumo(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !state.repo.delete(id).await? {
        return Err(ApiError::NotFound(MSG_RESUMO_NAO_ENCONTRADO.to_string()));
    }
    info!("resumo {} excluído", id);
    Ok(HttpResponse::Ok().json(MensagemResponse {
        mensagem: MSG_RESUMO_EXCLUIDO.to_string(),
    }))
}

/// Stateless full pipeline. Responses are always XML, including errors:
/// validation failures keep their message, anything else is downgraded to
/// a generic document so internals never leak.
async fn processar_texto(body: web::Json<TextoEntrada>) -> HttpResponse {
    match processar_pipeline(&body.texto) {
        Ok(doc) => HttpResponse::Ok().content_type("application/xml").body(doc),
        Err(ApiError::Validation(mensagem)) => HttpResponse::BadRequest()
            .content_type("application/xml")
            .body(xml::render_erro(&mensagem)),
        Err(err) => {
            error!("falha no processamento XML: {}", err);
            HttpResponse::InternalServerError()
                .content_type("application/xml")
                .body(xml::render_erro(MSG_ERRO_INTERNO))
        }
    }
}

fn processar_pipeline(texto: &str) -> Result<String, ApiError> {
    let stripped = validar_e_limpar(texto)?;
    let resumo = summarize(&stripped);
    let palavras: Vec<String> = extract_keywords(&stripped)
        .iter()
        .map(|k| capitalize(&k.termo))
        .collect();
    Ok(xml::render_resposta(&resumo, &palavras))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::domain::entities::Summary;
    use crate::infrastructure::repositories::SqliteSummaryRepository;

    async fn test_state() -> web::Data<AppState> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        let repo = SqliteSummaryRepository::from_pool(pool)
            .await
            .expect("migrations");
        web::Data::new(AppState {
            repo: Arc::new(repo),
        })
    }

    #[actix_web::test]
    async fn create_returns_first_three_sentences() {
        let app = test::init_service(
            App::new().app_data(test_state().await).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/resumir/")
            .set_json(serde_json::json!({
                "texto": "# Hello world. This is great! Markdown test? Another sentence."
            }))
            .to_request();
        let resumo: Summary = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resumo.texto, "Hello world. This is great! Markdown test?");
        assert!(resumo.id > 0);
    }

    #[actix_web::test]
    async fn create_rejects_empty_text() {
        let app = test::init_service(
            App::new().app_data(test_state().await).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/resumir/")
            .set_json(serde_json::json!({ "texto": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn create_rejects_text_over_cap() {
        let app = test::init_service(
            App::new().app_data(test_state().await).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/resumir/")
            .set_json(serde_json::json!({ "texto": "palavra ".repeat(500) }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn malformed_body_yields_xml_422() {
        let app = test::init_service(
            App::new().app_data(test_state().await).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/resumir/")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"campo_errado": "x"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(body.starts_with("<erro>"));
        assert!(body.contains("<local>body</local>"));
    }

    #[actix_web::test]
    async fn keywords_endpoint_rejects_stop_words_only() {
        let app = test::init_service(
            App::new().app_data(test_state().await).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/palavras-chaves/")
            .set_json(serde_json::json!({ "texto": "o a os de para" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn keywords_endpoint_returns_capitalized_terms() {
        let app = test::init_service(
            App::new().app_data(test_state().await).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/palavras-chaves/")
            .set_json(serde_json::json!({
                "texto": "banana banana laranja no mercado"
            }))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let palavras = resp["palavras"].as_array().expect("palavras array");
        assert_eq!(palavras[0], "Banana");
        assert!(palavras.iter().all(|p| {
            let p = p.as_str().expect("string term");
            p.chars().next().expect("non-empty term").is_uppercase()
        }));
    }

    #[actix_web::test]
    async fn processar_returns_xml_document() {
        let app = test::init_service(
            App::new().app_data(test_state().await).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/processar/")
            .set_json(serde_json::json!({
                "texto": "# Feira\nbanana banana laranja. Frutas frescas do dia."
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(body.starts_with("<resposta>"));
        assert!(body.contains("<palavra>Banana</palavra>"));
    }

    #[actix_web::test]
    async fn processar_rejects_empty_input_with_xml_error() {
        let app = test::init_service(
            App::new().app_data(test_state().await).configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/processar/")
            .set_json(serde_json::json!({ "texto": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(body.starts_with("<erro>"));
        assert!(!body.contains("<resposta>"));
    }

    #[actix_web::test]
    async fn unknown_id_yields_not_found() {
        let app = test::init_service(
            App::new().app_data(test_state().await).configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/resumos/999/palavras-chave")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri("/resumos/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri("/resumos/999")
            .set_json(serde_json::json!({ "texto": "Texto novo. Com frases." }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
