use serde::{Deserialize, Serialize};

use crate::api::decode;

pub type ListingId = i64;

/// One property record as returned by `/imoveis` and `/favoritos`.
///
/// Field names follow the API's Portuguese wire names. Numeric fields are
/// optional because the upstream data mixes numbers, numeric strings and nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    #[serde(rename = "nome", default, deserialize_with = "decode::text")]
    pub name: String,
    #[serde(rename = "bairro", default, deserialize_with = "decode::text")]
    pub neighborhood: String,
    #[serde(rename = "descricao", default, deserialize_with = "decode::text")]
    pub description: String,
    #[serde(rename = "tipo", default, deserialize_with = "decode::text")]
    pub kind: String,
    #[serde(rename = "finalidade", default, deserialize_with = "decode::purposes")]
    pub purposes: Vec<String>,
    #[serde(default, deserialize_with = "decode::text")]
    pub status: String,
    #[serde(rename = "area_terreno", default, deserialize_with = "decode::lenient_f64")]
    pub land_area: Option<f64>,
    #[serde(
        rename = "area_construida",
        default,
        deserialize_with = "decode::lenient_f64"
    )]
    pub built_area: Option<f64>,
    #[serde(rename = "valor_aluguel", default, deserialize_with = "decode::lenient_f64")]
    pub rent_price: Option<f64>,
    #[serde(rename = "valor_venda", default, deserialize_with = "decode::lenient_f64")]
    pub sale_price: Option<f64>,
    #[serde(rename = "imagem", default, deserialize_with = "decode::text")]
    pub image: String,
}

impl Listing {
    /// Minimal record used by tests and fakes; every optional field is empty.
    pub fn new(id: ListingId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            neighborhood: String::new(),
            description: String::new(),
            kind: String::new(),
            purposes: Vec::new(),
            status: String::new(),
            land_area: None,
            built_area: None,
            rent_price: None,
            sale_price: None,
            image: String::new(),
        }
    }

    pub fn purposes_label(&self) -> String {
        self.purposes.join(", ")
    }
}

/// Render an optional amount for display, using `-` for missing values.
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_record_with_mixed_types() {
        let raw = r#"{
            "id": 7,
            "nome": "Casa do Lago",
            "bairro": "Centro",
            "descricao": null,
            "tipo": "Casa",
            "finalidade": ["VENDA", "LOCACAO"],
            "status": "publicado",
            "area_terreno": "360",
            "area_construida": 120.5,
            "valor_aluguel": null,
            "valor_venda": "450000.00",
            "imagem": "home.jpg"
        }"#;

        let listing: Listing = serde_json::from_str(raw).unwrap();

        assert_eq!(listing.id, 7);
        assert_eq!(listing.description, "");
        assert_eq!(listing.purposes, vec!["VENDA", "LOCACAO"]);
        assert_eq!(listing.land_area, Some(360.0));
        assert_eq!(listing.built_area, Some(120.5));
        assert_eq!(listing.rent_price, None);
        assert_eq!(listing.sale_price, Some(450_000.0));
    }

    #[test]
    fn single_purpose_string_and_missing_fields() {
        let raw = r#"{"id": 3, "nome": "Sala 12", "finalidade": "locacao"}"#;

        let listing: Listing = serde_json::from_str(raw).unwrap();

        assert_eq!(listing.purposes, vec!["locacao"]);
        assert_eq!(listing.neighborhood, "");
        assert_eq!(listing.built_area, None);
    }

    #[test]
    fn serializes_with_wire_names() {
        let mut listing = Listing::new(1, "Rancho");
        listing.built_area = Some(80.0);

        let value = serde_json::to_value(&listing).unwrap();

        assert_eq!(value["nome"], "Rancho");
        assert_eq!(value["area_construida"], 80.0);
        assert!(value.get("built_area").is_none());
    }

    #[test]
    fn formats_amounts() {
        assert_eq!(format_amount(Some(1500.0)), "1500");
        assert_eq!(format_amount(Some(99.5)), "99.50");
        assert_eq!(format_amount(None), "-");
    }
}
