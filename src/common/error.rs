use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // O export de pedidos não pôde ser lido (arquivo ausente, permissão, ...)
    #[error("Fonte de pedidos indisponível: {0}")]
    DataSourceUnavailable(#[from] std::io::Error),

    // O export não é texto UTF-8: única falha estrutural da ingestão
    #[error("Export de pedidos não é texto UTF-8 válido: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("AI_GATEWAY_API_KEY não configurada")]
    AssistantNotConfigured,

    #[error("Limite de requisições do gateway de IA excedido")]
    RateLimited,

    #[error("Pagamento necessário no gateway de IA")]
    PaymentRequired,

    #[error("Erro na API de IA: {0}")]
    UpstreamError(u16),

    #[error("Erro de HTTP: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DataSourceUnavailable(_) | AppError::AssistantNotConfigured => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::InvalidEncoding(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            AppError::UpstreamError(_) | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::RateLimited => {
                "Limite de requisições excedido. Tente novamente em alguns instantes.".to_string()
            }
            AppError::PaymentRequired => {
                "Pagamento necessário. Adicione créditos ao workspace do gateway de IA.".to_string()
            }
            AppError::InvalidEncoding(_) => "O export de pedidos não é texto UTF-8 válido.".to_string(),
            // Todo o resto é problema do servidor: loga o detalhe, devolve a mensagem curta.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                match e {
                    AppError::InternalServerError(_) => "Ocorreu um erro inesperado.".to_string(),
                    AppError::HttpClient(_) => "Falha ao contatar o gateway de IA.".to_string(),
                    other => other.to_string(),
                }
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_upstream_rejections() {
        assert_eq!(AppError::RateLimited.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(AppError::PaymentRequired.status_code(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(AppError::UpstreamError(500).status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn missing_export_is_service_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "orders.csv");
        let err = AppError::from(io);
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn http_client_failure_hides_gateway_address() {
        // Porta livre e sem ninguém escutando
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());
        drop(listener);

        let err = reqwest::Client::new().post(&url).send().await.unwrap_err();
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Falha ao contatar o gateway de IA.");
        assert!(!bytes.windows(9).any(|w| w == b"127.0.0.1"));
    }

    #[test]
    fn invalid_utf8_is_unprocessable() {
        let err = AppError::from(String::from_utf8(vec![0xff, 0xfe, 0x00]).unwrap_err());
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
