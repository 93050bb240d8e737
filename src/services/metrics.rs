// src/services/metrics.rs

use std::collections::HashMap;

use crate::models::{
    dashboard::{ChannelCancellations, ChannelOrders, DashboardMetrics, StatusBucket, StatusOrders},
    orders::OrderRecord,
};

const CANCELED: &str = "CANCELED";
const CONCLUDED: &str = "CONCLUDED";
const IN_PROGRESS: [&str; 4] = ["CONFIRMED", "PENDING", "PLACED", "DISPATCHED"];

// Código do canal no export -> nome exibido no dashboard
const CHANNEL_LABELS: [(&str, &str); 7] = [
    ("IFOOD", "iFood"),
    ("ANOTAAI", "Anotaai"),
    ("WHATSAPP", "WhatsApp"),
    ("SITE", "Site"),
    ("99FOOD", "99Food"),
    ("DELIVERYVIP", "deliveryVIP"),
    ("EPADOCA", "Epadoca"),
];

/// Nome de exibição do canal; códigos desconhecidos passam como estão.
pub fn channel_label(code: &str) -> &str {
    CHANNEL_LABELS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

/// Balde do gráfico de status. `None` = status não classificado (fica fora do gráfico).
pub fn classify_status(status: &str) -> Option<StatusBucket> {
    match status {
        CANCELED => Some(StatusBucket::Canceled),
        CONCLUDED => Some(StatusBucket::Concluded),
        s if IN_PROGRESS.contains(&s) => Some(StatusBucket::InProgress),
        _ => None,
    }
}

#[derive(Default)]
struct ChannelTally {
    total: usize,
    canceled: usize,
}

/// Dobra a sequência de pedidos no snapshot do dashboard.
/// Função pura: a mesma entrada sempre gera o mesmo snapshot.
pub fn calculate_metrics(orders: &[OrderRecord]) -> DashboardMetrics {
    let total_orders = orders.len();

    // Taxa de cancelamento e receita (cancelados não entram na receita)
    let canceled_orders = orders.iter().filter(|o| o.status == CANCELED).count();
    let cancellation_rate = if total_orders > 0 {
        canceled_orders as f64 / total_orders as f64 * 100.0
    } else {
        0.0
    };

    let non_canceled = total_orders - canceled_orders;
    let total_revenue: f64 = orders
        .iter()
        .filter(|o| o.status != CANCELED)
        .map(|o| o.total_amount)
        .sum();
    let average_ticket = if non_canceled > 0 {
        total_revenue / non_canceled as f64
    } else {
        0.0
    };

    // Agrupamento por canal cru, na ordem em que o canal aparece
    let mut channel_order: Vec<&str> = Vec::new();
    let mut tallies: HashMap<&str, ChannelTally> = HashMap::new();
    for order in orders {
        let channel = order.sales_channel.as_str();
        let tally = tallies.entry(channel).or_insert_with(|| {
            channel_order.push(channel);
            ChannelTally::default()
        });
        tally.total += 1;
        if order.status == CANCELED {
            tally.canceled += 1;
        }
    }

    let mut orders_by_channel = Vec::with_capacity(channel_order.len());
    let mut cancellations_by_channel = Vec::with_capacity(channel_order.len());
    for channel in channel_order {
        let tally = &tallies[channel];
        let label = channel_label(channel).to_string();
        orders_by_channel.push(ChannelOrders {
            channel: label.clone(),
            count: tally.total,
        });
        cancellations_by_channel.push(ChannelCancellations {
            channel: label,
            total: tally.total,
            canceled: tally.canceled,
        });
    }

    // Status: três baldes fixos, sempre presentes
    let mut bucket_counts = [0usize; 3];
    for bucket in orders.iter().filter_map(|o| classify_status(&o.status)) {
        bucket_counts[bucket as usize] += 1;
    }
    let orders_by_status = StatusBucket::ALL
        .iter()
        .map(|bucket| StatusOrders {
            status: bucket.label().to_string(),
            count: bucket_counts[*bucket as usize],
        })
        .collect();

    DashboardMetrics {
        total_orders,
        cancellation_rate,
        total_revenue,
        average_ticket,
        orders_by_channel,
        cancellations_by_channel,
        orders_by_status,
    }
}
