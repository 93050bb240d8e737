// src/models/orders.rs

// Uma linha do export de pedidos, já com os campos tipados.
// O `created_at` segue como texto cru: nenhuma semântica de data é aplicada aqui.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderRecord {
    pub id: String,
    pub sales_channel: String, // Código cru do canal (ex: "IFOOD")
    pub status: String,        // Código cru do status (ex: "CANCELED")
    pub total_amount: f64,
    pub created_at: String,
}
