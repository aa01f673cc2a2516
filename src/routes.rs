use actix_web::{web, HttpResponse, Responder};
use parking_lot::{Mutex, RwLock};

use crate::config::Config;
use crate::convert::{to_api_hero, to_api_solution};
use crate::domain::catalog::{Act, TokenCatalog};
use crate::domain::optimizer::Optimizer;
use crate::domain::table::RewardTable;
use crate::error::{DataError, Result};
use crate::loader::{load_catalog_or_default, load_table};
use crate::models::{ApiError, ApiHero, CostUpdate, HeroQuery, SolveRequest};

/// Shared service state. Cost edits take the table write lock; a solve
/// clones the table under the read lock and solves on that snapshot.
pub struct AppState {
    pub table: RwLock<RewardTable>,
    pub catalog: TokenCatalog,
    pub optimizer: Mutex<Optimizer>,
}

impl AppState {
    pub fn new(table: RewardTable, catalog: TokenCatalog, optimizer: Optimizer) -> Self {
        AppState {
            table: RwLock::new(table),
            catalog,
            optimizer: Mutex::new(optimizer),
        }
    }

    pub fn load(config: &Config) -> Result<Self> {
        let table = load_table(&config.heroes_path)?;
        let catalog = load_catalog_or_default(&config.acts_path, &table)?;

        let mut optimizer = Optimizer::new(config.solver.clone()).with_settings(config.solver_settings());
        if let Some(seed) = config.shuffle_seed {
            log::info!("Using fixed shuffle seed {}", seed);
            optimizer = optimizer.with_seed(seed);
        }

        Ok(AppState::new(table, catalog, optimizer))
    }

    fn resolve_act(&self, name: Option<&str>) -> std::result::Result<Option<&Act>, HttpResponse> {
        match name {
            None => Ok(None),
            Some(name) => self.catalog.act(name).map(Some).ok_or_else(|| {
                HttpResponse::BadRequest().json(ApiError::new(format!("Unknown act: {}", name)))
            }),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root_redirect))
        .route("/health", web::get().to(health_check))
        .route("/docs", web::get().to(docs))
        .route("/acts", web::get().to(acts))
        .route("/heroes", web::get().to(heroes))
        .route("/heroes/{id}/cost", web::put().to(update_cost))
        .route("/solve", web::post().to(solve));
}

/// JSON extractor config: size limit, and malformed bodies answered with a
/// `400` carrying the parse error.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _| {
            let err_string = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ApiError::new(err_string)),
            )
            .into()
        })
}

// ---------- Route handlers ----------

/// POST /solve
pub async fn solve(state: web::Data<AppState>, req: web::Json<SolveRequest>) -> HttpResponse {
    let act = match state.resolve_act(req.act.as_deref()) {
        Ok(act) => act,
        Err(response) => return response,
    };
    let requirements = match act {
        Some(act) => act.restrict(&req.requirements),
        None => req.requirements.clone(),
    };

    let table = state.table.read().clone();
    let solution = state.optimizer.lock().solve(&table, &requirements);

    HttpResponse::Ok().json(to_api_solution(&solution, &table, act))
}

/// GET /heroes
pub async fn heroes(state: web::Data<AppState>, query: web::Query<HeroQuery>) -> HttpResponse {
    let act = match state.resolve_act(query.act.as_deref()) {
        Ok(act) => act,
        Err(response) => return response,
    };

    let table = state.table.read();
    let rows: Vec<ApiHero> = table.heroes().map(|hero| to_api_hero(hero, act)).collect();
    HttpResponse::Ok().json(rows)
}

/// PUT /heroes/{id}/cost
pub async fn update_cost(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CostUpdate>,
) -> HttpResponse {
    let id = path.into_inner();
    let mut table = state.table.write();

    match table.set_cost(&id, body.cost) {
        Ok(()) => match table.hero(&id) {
            Some(hero) => {
                log::info!("Cost of {} set to {}", id, body.cost);
                HttpResponse::Ok().json(to_api_hero(hero, None))
            }
            None => HttpResponse::NotFound().json(ApiError::new(DataError::UnknownHero(id))),
        },
        Err(err @ DataError::UnknownHero(_)) => HttpResponse::NotFound().json(ApiError::new(err)),
        Err(err) => HttpResponse::BadRequest().json(ApiError::new(err)),
    }
}

/// GET /acts
pub async fn acts(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.catalog)
}

/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// GET /docs
pub async fn docs() -> impl Responder {
    let docs_html = include_str!("../static/docs.html");
    HttpResponse::Ok()
        .content_type("text/html")
        .body(docs_html)
}

/// GET / - Redirect to docs
pub async fn root_redirect() -> impl Responder {
    HttpResponse::Found()
        .append_header(("Location", "/docs"))
        .finish()
}
