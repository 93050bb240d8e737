// src/services/dashboard_service.rs

use std::path::PathBuf;

use crate::{
    common::error::AppError,
    models::{dashboard::DashboardMetrics, orders::OrderRecord},
    services::{metrics::calculate_metrics, order_parser::parse_orders},
};

// De onde vem o export de pedidos
#[derive(Debug, Clone)]
pub enum OrderSource {
    File(PathBuf),
    Inline(String),
}

#[derive(Clone)]
pub struct DashboardService {
    source: OrderSource,
}

impl DashboardService {
    pub fn new(source: OrderSource) -> Self {
        Self { source }
    }

    /// Lê o export inteiro e devolve os pedidos tipados.
    /// Falha só se a fonte não puder ser lida ou não for UTF-8.
    pub async fn load_orders(&self) -> Result<Vec<OrderRecord>, AppError> {
        let raw = match &self.source {
            OrderSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                String::from_utf8(bytes)?
            }
            OrderSource::Inline(text) => text.clone(),
        };

        Ok(parse_orders(&raw))
    }

    /// Recalcula o snapshot do zero a cada chamada (sem cache, sem estado).
    pub async fn load_metrics(&self) -> Result<DashboardMetrics, AppError> {
        let orders = self.load_orders().await?;
        let metrics = calculate_metrics(&orders);

        tracing::info!(
            records = orders.len(),
            cancellation_rate = metrics.cancellation_rate,
            "📊 Métricas do dashboard recalculadas"
        );

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn loads_metrics_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "\u{feff}id;saleschannel;status;totalamount;createdat\n1;IFOOD;CONCLUDED;50.00;2024-01-01\n"
        )
        .unwrap();

        let service = DashboardService::new(OrderSource::File(file.path().to_path_buf()));
        let metrics = service.load_metrics().await.unwrap();

        assert_eq!(metrics.total_orders, 1);
        assert_eq!(metrics.orders_by_channel[0].channel, "iFood");
    }

    #[tokio::test]
    async fn missing_file_propagates_io_error() {
        let service = DashboardService::new(OrderSource::File("/nonexistent/orders.csv".into()));

        let err = service.load_metrics().await.unwrap_err();
        assert!(matches!(err, AppError::DataSourceUnavailable(_)));
    }

    #[tokio::test]
    async fn non_utf8_export_is_rejected_without_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'i', b'd', 0xff, 0xfe, b'\n']).unwrap();

        let service = DashboardService::new(OrderSource::File(file.path().to_path_buf()));
        let err = service.load_metrics().await.unwrap_err();
        assert!(matches!(err, AppError::InvalidEncoding(_)));
    }

    #[tokio::test]
    async fn inline_source_is_recomputed_each_call() {
        let service = DashboardService::new(OrderSource::Inline(
            "id;saleschannel;status;totalamount;createdat\n1;SITE;PENDING;10;2024-01-01".into(),
        ));

        let first = service.load_metrics().await.unwrap();
        let second = service.load_metrics().await.unwrap();
        assert_eq!(first, second);
    }
}
