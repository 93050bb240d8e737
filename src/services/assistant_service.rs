// src/services/assistant_service.rs

use std::fmt::Write as _;

use anyhow::Context;
use reqwest::StatusCode;

use crate::{
    common::error::AppError,
    models::{
        assistant::{ChatMessage, ChatRole, CompletionRequest},
        dashboard::DashboardMetrics,
    },
};

#[derive(Clone)]
pub struct AssistantService {
    client: reqwest::Client,
    gateway_url: String,
    api_key: Option<String>,
    model: String,
}

impl AssistantService {
    pub fn new(gateway_url: String, api_key: Option<String>, model: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Falha ao criar o cliente HTTP do gateway de IA")?;

        Ok(Self {
            client,
            gateway_url,
            api_key,
            model,
        })
    }

    /// Envia a conversa ao gateway com o snapshot como contexto e devolve a
    /// resposta em streaming (SSE), sem consumir o corpo.
    pub async fn stream_analysis(
        &self,
        messages: Vec<ChatMessage>,
        metrics: &DashboardMetrics,
    ) -> Result<reqwest::Response, AppError> {
        let api_key = self.api_key.as_deref().ok_or(AppError::AssistantNotConfigured)?;

        let mut conversation = Vec::with_capacity(messages.len() + 1);
        conversation.push(ChatMessage {
            role: ChatRole::System,
            content: build_system_prompt(metrics)?,
        });
        conversation.extend(messages);

        let body = CompletionRequest {
            model: &self.model,
            messages: conversation,
            stream: true,
        };

        tracing::info!(model = %self.model, turns = body.messages.len() - 1, "🤖 Consultando a DatIA");

        let response = self
            .client
            .post(&self.gateway_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!("Erro da API de IA: {} {}", status, detail);
            return Err(upstream_error(status));
        }

        Ok(response)
    }
}

fn upstream_error(status: StatusCode) -> AppError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => AppError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => AppError::PaymentRequired,
        other => AppError::UpstreamError(other.as_u16()),
    }
}

/// Monta o prompt de sistema da DatIA com os números do dashboard.
pub fn build_system_prompt(metrics: &DashboardMetrics) -> Result<String, AppError> {
    let snapshot = serde_json::to_string_pretty(metrics).map_err(anyhow::Error::from)?;

    let mut prompt = String::new();
    // `write!` em String não falha
    let _ = write!(
        prompt,
        "Você é a DatIA, uma assistente de IA especializada em estratégia de mercado para a empresa Cannoli.

DADOS DO DASHBOARD ATUAL:
{snapshot}

Você tem acesso completo aos dados de vendas da Cannoli, incluindo:
- Total de Pedidos: {}
- Taxa de Cancelamento: {:.1}%
- Receita Total: R$ {}
- Ticket Médio: R$ {}
",
        metrics.total_orders,
        metrics.cancellation_rate,
        format_brl(metrics.total_revenue),
        format_brl(metrics.average_ticket),
    );

    prompt.push_str("\nCANAIS DE VENDA:\n");
    for ch in &metrics.orders_by_channel {
        let _ = writeln!(prompt, "- {}: {} pedidos", ch.channel, ch.count);
    }

    prompt.push_str("\nCANCELAMENTOS POR CANAL:\n");
    for ch in &metrics.cancellations_by_channel {
        let _ = writeln!(prompt, "- {}: {} total, {} cancelados", ch.channel, ch.total, ch.canceled);
    }

    prompt.push_str("\nSTATUS DOS PEDIDOS:\n");
    for st in &metrics.orders_by_status {
        let _ = writeln!(prompt, "- {}: {} pedidos", st.status, st.count);
    }

    prompt.push_str(
        "
Sua função é:
1. Analisar os dados e fornecer insights estratégicos de mercado
2. Responder perguntas sobre performance de vendas
3. Sugerir ações para melhorar resultados
4. Identificar padrões e oportunidades nos dados
5. Ser concisa e objetiva, focando em ações práticas

Sempre base suas respostas nos dados reais fornecidos acima. Seja profissional, mas amigável.",
    );

    Ok(prompt)
}

/// Valor monetário no formato brasileiro, com 2 a 3 casas decimais:
/// `1234.5` -> `1.234,50`, `1234.567` -> `1.234,567`.
pub fn format_brl(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "000"));
    let cents = fraction.strip_suffix('0').unwrap_or(fraction);

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.000" { "-" } else { "" };
    format!("{sign}{grouped},{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::metrics::calculate_metrics;
    use crate::models::orders::OrderRecord;

    fn sample_metrics() -> DashboardMetrics {
        let order = |channel: &str, status: &str, amount: f64| OrderRecord {
            sales_channel: channel.into(),
            status: status.into(),
            total_amount: amount,
            ..Default::default()
        };
        calculate_metrics(&[
            order("IFOOD", "CONCLUDED", 1500.0),
            order("IFOOD", "CANCELED", 30.0),
            order("SITE", "PENDING", 20.0),
        ])
    }

    #[test]
    fn formats_brazilian_currency() {
        assert_eq!(format_brl(0.0), "0,00");
        assert_eq!(format_brl(35.0), "35,00");
        assert_eq!(format_brl(1234.5), "1.234,50");
        assert_eq!(format_brl(1234.567), "1.234,567");
        assert_eq!(format_brl(1234567.891), "1.234.567,891");
        assert_eq!(format_brl(999.9996), "1.000,00");
        assert_eq!(format_brl(-999.999), "-999,999");
        assert_eq!(format_brl(-0.0001), "0,00");
    }

    #[test]
    fn prompt_summarizes_dashboard() {
        let prompt = build_system_prompt(&sample_metrics()).unwrap();

        assert!(prompt.starts_with("Você é a DatIA"));
        assert!(prompt.contains("- Total de Pedidos: 3"));
        assert!(prompt.contains("- Taxa de Cancelamento: 33.3%"));
        assert!(prompt.contains("- Receita Total: R$ 1.520,00"));
        assert!(prompt.contains("- Ticket Médio: R$ 760,00"));
        assert!(prompt.contains("- iFood: 2 pedidos"));
        assert!(prompt.contains("- iFood: 2 total, 1 cancelados"));
        assert!(prompt.contains("- Em Andamento: 1 pedidos"));
        assert!(prompt.contains("\"totalOrders\": 3"));
    }

    #[test]
    fn maps_gateway_statuses() {
        assert!(matches!(upstream_error(StatusCode::TOO_MANY_REQUESTS), AppError::RateLimited));
        assert!(matches!(upstream_error(StatusCode::PAYMENT_REQUIRED), AppError::PaymentRequired));
        assert!(matches!(upstream_error(StatusCode::BAD_GATEWAY), AppError::UpstreamError(502)));
    }

    #[tokio::test]
    async fn refuses_to_call_gateway_without_key() {
        let service = AssistantService::new("http://127.0.0.1:9".into(), None, "m".into()).unwrap();
        let messages = vec![ChatMessage { role: ChatRole::User, content: "oi".into() }];

        let err = service.stream_analysis(messages, &sample_metrics()).await.unwrap_err();
        assert!(matches!(err, AppError::AssistantNotConfigured));
    }
}
