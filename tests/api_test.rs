// End-to-end flows over the full route table, against an in-memory
// database.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use sqlx::sqlite::SqlitePoolOptions;

use sumarize::delivery::api_server::AppState;
use sumarize::delivery::router::configure;
use sumarize::domain::entities::Summary;
use sumarize::infrastructure::repositories::SqliteSummaryRepository;

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
async fn create_list_fetch_round_trip() {
    let app =
        test::init_service(App::new().app_data(test_state().await).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/resumir/")
        .set_json(serde_json::json!({
            "texto": "# Feira\nA banana da feira é doce. A laranja também. Banana é fruta. Texto extra."
        }))
        .to_request();
    let criado: Summary = test::call_and_read_body_json(&app, req).await;
    // the heading text stays; only its marker is stripped
    assert_eq!(
        criado.texto,
        "Feira A banana da feira é doce. A laranja também. Banana é fruta."
    );

    let req = test::TestRequest::get().uri("/resumos/").to_request();
    let listados: Vec<Summary> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listados, vec![criado.clone()]);

    let req = test::TestRequest::get()
        .uri(&format!("/resumos/{}/palavras-chave", criado.id))
        .to_request();
    let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let palavras = resp["palavras"].as_array().expect("palavras array");
    assert!(palavras.iter().any(|p| p == "Banana"));
    assert!(palavras.iter().all(|p| {
        let termo = p.as_str().expect("string term");
        termo.chars().next().expect("non-empty term").is_uppercase()
    }));
}

#[actix_web::test]
async fn update_recomputes_keywords() {
    let app =
        test::init_service(App::new().app_data(test_state().await).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/resumir/")
        .set_json(serde_json::json!({ "texto": "Banana banana banana no mercado." }))
        .to_request();
    let criado: Summary = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/resumos/{}", criado.id))
        .set_json(serde_json::json!({ "texto": "Laranja laranja laranja madura." }))
        .to_request();
    let atualizado: Summary = test::call_and_read_body_json(&app, req).await;
    assert_eq!(atualizado.id, criado.id);
    assert_eq!(atualizado.texto, "Laranja laranja laranja madura.");

    let req = test::TestRequest::get()
        .uri(&format!("/resumos/{}/palavras-chave", criado.id))
        .to_request();
    let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let palavras = resp["palavras"].as_array().expect("palavras array");
    assert!(palavras.iter().any(|p| p == "Laranja"));
    // the old keyword is no longer associated
    assert!(!palavras.iter().any(|p| p == "Banana"));
}

#[actix_web::test]
async fn delete_removes_from_list_and_yields_not_found_after() {
    let app =
        test::init_service(App::new().app_data(test_state().await).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/resumir/")
        .set_json(serde_json::json!({ "texto": "Resumo para excluir depois." }))
        .to_request();
    let criado: Summary = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/resumos/{}", criado.id))
        .to_request();
    let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["mensagem"], "Resumo excluído com sucesso.");

    let req = test::TestRequest::get().uri("/resumos/").to_request();
    let listados: Vec<Summary> = test::call_and_read_body_json(&app, req).await;
    assert!(listados.is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/resumos/{}/palavras-chave", criado.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn not_found_body_carries_portuguese_detail() {
    let app =
        test::init_service(App::new().app_data(test_state().await).configure(configure)).await;

    let req = test::TestRequest::delete().uri("/resumos/123").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Resumo não encontrado.");
}
