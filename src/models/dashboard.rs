// src/models/dashboard.rs

use serde::Serialize;

// O snapshot completo consumido pelo frontend (KPIs + gráficos) e pela DatIA.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_orders: usize,
    pub cancellation_rate: f64, // 0..=100, sem arredondamento
    pub total_revenue: f64,     // Só pedidos não cancelados
    pub average_ticket: f64,
    pub orders_by_channel: Vec<ChannelOrders>,
    pub cancellations_by_channel: Vec<ChannelCancellations>,
    pub orders_by_status: Vec<StatusOrders>,
}

// 1. Pedidos por canal (gráfico de barras)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelOrders {
    pub channel: String,
    pub count: usize,
}

// 2. Cancelamentos por canal (barras agrupadas)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelCancellations {
    pub channel: String,
    pub total: usize,
    pub canceled: usize,
}

// 3. Distribuição por status (pizza)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusOrders {
    pub status: String,
    pub count: usize,
}

/// Os três baldes fixos do gráfico de status, na ordem de exibição.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    Canceled,
    Concluded,
    InProgress,
}

impl StatusBucket {
    pub const ALL: [StatusBucket; 3] = [
        StatusBucket::Canceled,
        StatusBucket::Concluded,
        StatusBucket::InProgress,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusBucket::Canceled => "Cancelados",
            StatusBucket::Concluded => "Concluídos",
            StatusBucket::InProgress => "Em Andamento",
        }
    }
}
