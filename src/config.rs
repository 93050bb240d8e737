// src/config.rs

use std::{env, path::PathBuf};

use crate::services::{
    assistant_service::AssistantService,
    dashboard_service::{DashboardService, OrderSource},
};

const DEFAULT_ORDERS_PATH: &str = "data/orders.csv";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub orders_path: PathBuf,
    pub bind_addr: String,
    pub ai_gateway_url: String,
    pub ai_api_key: Option<String>, // Sem chave = assistente desligado
    pub ai_model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `from_env` para os testes não mexerem no ambiente do processo
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            orders_path: var("ORDERS_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ORDERS_PATH)),
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            ai_gateway_url: var("AI_GATEWAY_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            ai_api_key: var("AI_GATEWAY_API_KEY"),
            ai_model: var("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub dashboard_service: DashboardService,
    pub assistant_service: AssistantService,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let dashboard_service = DashboardService::new(OrderSource::File(config.orders_path.clone()));
        let assistant_service = AssistantService::new(
            config.ai_gateway_url.clone(),
            config.ai_api_key.clone(),
            config.ai_model.clone(),
        )?;

        if config.ai_api_key.is_none() {
            tracing::warn!("⚠️ AI_GATEWAY_API_KEY ausente: o assistente DatIA ficará indisponível.");
        }
        tracing::info!("📄 Export de pedidos: {}", config.orders_path.display());

        Ok(Self {
            config,
            dashboard_service,
            assistant_service,
        })
    }
}
