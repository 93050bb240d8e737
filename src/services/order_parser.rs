// src/services/order_parser.rs

use crate::models::orders::OrderRecord;

const DELIMITER: char = ';';
const BOM: char = '\u{feff}';

// Posição de cada campo no cabeçalho. `None` = coluna ausente no export.
#[derive(Debug, Default)]
struct ColumnIndex {
    id: Option<usize>,
    sales_channel: Option<usize>,
    status: Option<usize>,
    total_amount: Option<usize>,
    created_at: Option<usize>,
}

impl ColumnIndex {
    fn from_header(header: &str) -> (Self, usize) {
        let mut index = Self::default();
        let mut width = 0;

        for (position, raw_name) in header.split(DELIMITER).enumerate() {
            width += 1;
            let name = raw_name.replace(BOM, "");
            // Nomes repetidos: a última coluna vence
            match name.trim() {
                "id" => index.id = Some(position),
                "saleschannel" => index.sales_channel = Some(position),
                "status" => index.status = Some(position),
                "totalamount" => index.total_amount = Some(position),
                "createdat" => index.created_at = Some(position),
                _ => {}
            }
        }

        (index, width)
    }
}

/// Converte o texto cru do export (`;` como separador, primeira linha = cabeçalho)
/// em pedidos tipados, na mesma ordem das linhas.
///
/// Nunca falha: linhas com menos colunas que o cabeçalho são descartadas e
/// valores inválidos viram o padrão do campo.
pub fn parse_orders(raw: &str) -> Vec<OrderRecord> {
    let text = raw.trim_start_matches(BOM).trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = text.split('\n');
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let (columns, width) = ColumnIndex::from_header(header);

    lines
        .filter_map(|line| {
            let values: Vec<&str> = line.split(DELIMITER).collect();
            if values.len() < width {
                return None;
            }

            let text_at = |column: Option<usize>| -> String {
                column
                    .and_then(|i| values.get(i))
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default()
            };

            Some(OrderRecord {
                id: text_at(columns.id),
                sales_channel: text_at(columns.sales_channel),
                status: text_at(columns.status),
                total_amount: coerce_amount(&text_at(columns.total_amount)),
                created_at: text_at(columns.created_at),
            })
        })
        .collect()
}

/// Coerção "melhor esforço" do valor monetário: usa o maior prefixo numérico
/// válido (`"12.5 BRL"` -> 12.5) e cai para `0.0` em qualquer outro caso.
pub fn coerce_amount(value: &str) -> f64 {
    let value = value.trim();
    let end = numeric_prefix_len(value.as_bytes());

    value[..end]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

// Tamanho do maior prefixo no formato `[+-]digitos[.digitos][e[+-]digitos]`.
// Sem nenhum dígito na mantissa o prefixo é vazio.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let integer_digits = digits_from(pos);
    pos += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        fraction_digits = digits_from(pos + 1);
        pos += 1 + fraction_digits;
    }

    if integer_digits + fraction_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exponent_digits = digits_from(exp);
        if exponent_digits > 0 {
            pos = exp + exponent_digits;
        }
    }

    pos
}
