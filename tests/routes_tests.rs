use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::json;

use token_optimizer::loader::{load_catalog, load_table};
use token_optimizer::models::{ApiError, ApiHero, ApiSolution};
use token_optimizer::routes::{self, AppState};
use token_optimizer::{HeroRecord, Optimizer, Outcome, RewardTable, TokenCatalog};

const HEROES_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/heroes.csv");
const ACTS_JSON: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/acts.json");

fn sample_state() -> web::Data<AppState> {
    let table = load_table(HEROES_CSV).expect("sample table should load");
    let catalog = load_catalog(ACTS_JSON).expect("sample catalog should load");
    web::Data::new(AppState::new(table, catalog, Optimizer::default().with_seed(7)))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .app_data(routes::json_config(1024 * 1024))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = app!(sample_state());
    let req = test::TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, web::Bytes::from_static(b"OK"));
}

#[actix_web::test]
async fn test_docs_and_root_redirect() {
    let app = app!(sample_state());

    let req = test::TestRequest::get().uri("/docs").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("<!DOCTYPE html"));
    assert!(body.contains("Token Optimizer API Documentation"));

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/docs");
}

#[actix_web::test]
async fn test_acts_endpoint() {
    let app = app!(sample_state());
    let req = test::TestRequest::get().uri("/acts").to_request();
    let catalog: TokenCatalog = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = catalog.acts().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Act I", "Act II"]);
}

#[actix_web::test]
async fn test_heroes_given_act_should_limit_tokens() {
    let app = app!(sample_state());
    let req = test::TestRequest::get().uri("/heroes?act=Act%20I").to_request();
    let heroes: Vec<ApiHero> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(heroes.len(), 15);
    let axe = heroes.iter().find(|h| h.id == "Axe").unwrap();
    assert_eq!(axe.cost, 100.0);
    assert_eq!(axe.tokens.get("Strength"), Some(&3));
    assert!(!axe.tokens.contains_key("Disabler"));
}

#[actix_web::test]
async fn test_heroes_given_unknown_act_should_return_400() {
    let app = app!(sample_state());
    let req = test::TestRequest::get().uri("/heroes?act=Act%20IX").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_cost() {
    let state = sample_state();
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri("/heroes/Crystal%20Maiden/cost")
        .set_json(json!({ "cost": 250.0 }))
        .to_request();
    let hero: ApiHero = test::call_and_read_body_json(&app, req).await;
    assert_eq!(hero.id, "Crystal Maiden");
    assert_eq!(hero.cost, 250.0);
    assert_eq!(state.table.read().cost("Crystal Maiden"), Some(250.0));

    let req = test::TestRequest::put()
        .uri("/heroes/Axe/cost")
        .set_json(json!({ "cost": -1.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.table.read().cost("Axe"), Some(100.0));

    let req = test::TestRequest::put()
        .uri("/heroes/Invoker/cost")
        .set_json(json!({ "cost": 10.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_solve_valid_request() {
    let app = app!(sample_state());
    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({
            "act": "Act I",
            "requirements": { "Strength": 6, "Ranged": 3, "Carry": 9 }
        }))
        .to_request();
    let solution: ApiSolution = test::call_and_read_body_json(&app, req).await;

    assert_eq!(solution.status, Outcome::Optimal);
    assert_eq!(solution.act.as_deref(), Some("Act I"));
    assert_eq!(solution.total_cost, 300.0);
    assert_eq!(solution.total_matches, 3);
    assert!(solution.token_totals["Strength"] >= 6);
    assert!(solution.token_totals["Ranged"] >= 3);
    assert!(!solution.token_totals.contains_key("Carry"));
    assert!(solution.message.is_none());

    let play_cost: f64 = solution.plays.iter().map(|p| p.cost).sum();
    assert_eq!(play_cost, solution.total_cost);
    let mut heroes: Vec<&str> = solution.plays.iter().map(|p| p.hero.as_str()).collect();
    let sorted = {
        let mut s = heroes.clone();
        s.sort();
        s
    };
    assert_eq!(heroes, sorted);
    heroes.dedup();
    assert_eq!(heroes.len(), solution.plays.len());
}

#[actix_web::test]
async fn test_solve_given_requirements_outside_act_should_need_nothing() {
    let app = app!(sample_state());
    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({ "act": "Act I", "requirements": { "Carry": 3 } }))
        .to_request();
    let solution: ApiSolution = test::call_and_read_body_json(&app, req).await;

    assert_eq!(solution.status, Outcome::NothingRequired);
    assert!(solution.plays.is_empty());
    assert_eq!(solution.total_cost, 0.0);
}

#[actix_web::test]
async fn test_solve_given_unreachable_token_should_ask_to_relax() {
    let table = RewardTable::new(vec![
        HeroRecord::new("A", 1.0).with_yield("X", 3.0).with_yield("Z", 0.0),
    ])
    .unwrap();
    let catalog = TokenCatalog::from_table(&table);
    let state = web::Data::new(AppState::new(table, catalog, Optimizer::default()));
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({ "requirements": { "X": 1, "Z": 5 } }))
        .to_request();
    let solution: ApiSolution = test::call_and_read_body_json(&app, req).await;

    assert_eq!(solution.status, Outcome::NoSolution);
    assert!(solution.plays.is_empty());
    assert!(solution.message.unwrap().contains("relax"));
}

#[actix_web::test]
async fn test_solve_invalid_json() {
    let app = app!(sample_state());
    let req = test::TestRequest::post()
        .uri("/solve")
        .insert_header(("content-type", "application/json"))
        .set_payload("invalid json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ApiError = test::read_body_json(resp).await;
    assert!(!body.error.is_empty());
}

#[actix_web::test]
async fn test_solve_given_negative_requirement_should_return_400() {
    let app = app!(sample_state());
    let req = test::TestRequest::post()
        .uri("/solve")
        .set_json(json!({ "requirements": { "Strength": -3 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
