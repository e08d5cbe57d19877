// API server implementation
// Author: Gabriel Demetrios Lafis

use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::middleware::Condition;
use actix_web::{web, App, HttpServer};
use log::info;

use crate::data::PathCollector;
use crate::http::RequestExecutor;
use crate::storage::{KeyValueStore, PresetStore};

/// Preset store shared by the request handlers
pub type SharedStore = Box<dyn KeyValueStore + Send + Sync>;

/// State shared by the request handlers
pub struct AppState {
    pub presets: RwLock<PresetStore<SharedStore>>,
    pub executor: RequestExecutor,
    pub collector: PathCollector,
}

impl AppState {
    /// Create handler state
    pub fn new(presets: PresetStore<SharedStore>, executor: RequestExecutor, collector: PathCollector) -> Self {
        AppState {
            presets: RwLock::new(presets),
            executor,
            collector,
        }
    }
}

/// API server configuration
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: num_cpus::get(),
            enable_cors: false,
        }
    }
}

/// CORS layer for browser front-ends on other origins; a no-op when disabled
pub fn cors_middleware(enable_cors: bool) -> Condition<Cors> {
    let cors = Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    Condition::new(enable_cors, cors)
}

/// API server
pub struct Server {
    config: ServerConfig,
    state: web::Data<AppState>,
}

impl Server {
    /// Create a new API server
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        Server {
            config,
            state: web::Data::new(state),
        }
    }

    /// Run the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let addr = (self.config.host.clone(), self.config.port);
        let state = self.state.clone();
        let enable_cors = self.config.enable_cors;

        info!("Starting server at http://{}:{}", addr.0, addr.1);

        HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(cors_middleware(enable_cors))
                .configure(super::routes::configure)
        })
        .workers(self.config.workers)
        .bind(addr)?
        .run()
        .await
    }
}
