use actix_cors::Cors;
use actix_files::NamedFile;
use actix_web::error::{ErrorNotFound, InternalError};
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use dishwise_core::{recommend, RecommendRequest, SuggestionContext};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Directory holding `index.html`, `style.css` and `script.js`
#[derive(Debug, Clone)]
pub struct StaticDir(pub PathBuf);

#[derive(Serialize)]
struct CategoriesResponse {
    categories: Vec<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        context: Arc<SuggestionContext>,
        static_dir: PathBuf,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(json_config())
                .app_data(web::Data::new(context.clone()))
                .app_data(web::Data::new(StaticDir(static_dir.clone())))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register all routes; expects `Arc<SuggestionContext>` and [`StaticDir`] app data
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/style.css", web::get().to(stylesheet))
        .route("/script.js", web::get().to(script))
        .route("/categories", web::get().to(list_categories))
        .route("/recommend", web::post().to(recommend_foods));
}

/// Malformed JSON bodies answer `400 {"error": ...}` like every other failure
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        warn!(error = %message, "rejected request body");
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
        )
        .into()
    })
}

async fn static_file(dir: &StaticDir, name: &str) -> ActixResult<NamedFile> {
    NamedFile::open_async(dir.0.join(name))
        .await
        .map_err(|e| ErrorNotFound(e.to_string()))
}

async fn index(dir: web::Data<StaticDir>) -> ActixResult<NamedFile> {
    static_file(&dir, "index.html").await
}

async fn stylesheet(dir: web::Data<StaticDir>) -> ActixResult<NamedFile> {
    static_file(&dir, "style.css").await
}

async fn script(dir: web::Data<StaticDir>) -> ActixResult<NamedFile> {
    static_file(&dir, "script.js").await
}

async fn list_categories(
    context: web::Data<Arc<SuggestionContext>>,
) -> ActixResult<HttpResponse> {
    let categories = context
        .registry()
        .keys()
        .into_iter()
        .map(|k| k.to_string())
        .collect();
    Ok(HttpResponse::Ok().json(CategoriesResponse { categories }))
}

async fn recommend_foods(
    context: web::Data<Arc<SuggestionContext>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let request_id = Uuid::new_v4();
    let request = req.into_inner();
    let context = context.get_ref().clone();

    let outcome = web::block(move || recommend(&context, &request)).await?;

    match outcome {
        Ok(recommendation) => {
            info!(
                %request_id,
                initial = recommendation.initial.len(),
                refined = ?recommendation.refined.as_ref().map(Vec::len),
                "recommendation served"
            );
            Ok(HttpResponse::Ok().json(recommendation))
        }
        Err(e) if e.is_client_error() => {
            warn!(%request_id, error = %e, "recommendation rejected");
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
        Err(e) => {
            error!(%request_id, error = %e, "recommendation failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}
