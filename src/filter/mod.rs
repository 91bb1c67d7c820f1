use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::listing::Listing;

pub mod form;

pub use form::{FilterForm, FormField, FORM_FIELDS};

/// Transaction type accepted by the `finalidade` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Sale,
    Rent,
    Season,
}

impl Purpose {
    pub const ALL: [Purpose; 3] = [Purpose::Sale, Purpose::Rent, Purpose::Season];

    pub fn as_param(self) -> &'static str {
        match self {
            Purpose::Sale => "venda",
            Purpose::Rent => "locacao",
            Purpose::Season => "temporada",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Purpose::Sale => "Sale",
            Purpose::Rent => "Rent",
            Purpose::Season => "Season",
        }
    }
}

impl FromStr for Purpose {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "venda" | "sale" => Ok(Purpose::Sale),
            "locacao" | "rent" => Ok(Purpose::Rent),
            "temporada" | "season" => Ok(Purpose::Season),
            other => Err(AppError::InvalidFilter(format!(
                "unknown purpose `{other}` (expected venda, locacao or temporada)"
            ))),
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Property type accepted by the `tipo` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    House,
    Apartment,
    Office,
    Warehouse,
    SmallFarm,
    Land,
    Ranch,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 7] = [
        PropertyKind::House,
        PropertyKind::Apartment,
        PropertyKind::Office,
        PropertyKind::Warehouse,
        PropertyKind::SmallFarm,
        PropertyKind::Land,
        PropertyKind::Ranch,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            PropertyKind::House => "casa",
            PropertyKind::Apartment => "apartamento",
            PropertyKind::Office => "sala",
            PropertyKind::Warehouse => "barracao",
            PropertyKind::SmallFarm => "chácara",
            PropertyKind::Land => "terreno",
            PropertyKind::Ranch => "rancho",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyKind::House => "House",
            PropertyKind::Apartment => "Apartment",
            PropertyKind::Office => "Office",
            PropertyKind::Warehouse => "Warehouse",
            PropertyKind::SmallFarm => "Small farm",
            PropertyKind::Land => "Land",
            PropertyKind::Ranch => "Ranch",
        }
    }
}

impl FromStr for PropertyKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "casa" | "house" => Ok(PropertyKind::House),
            "apartamento" | "apartment" => Ok(PropertyKind::Apartment),
            "sala" | "office" => Ok(PropertyKind::Office),
            "barracao" | "warehouse" => Ok(PropertyKind::Warehouse),
            "chacara" | "farm" | "small-farm" => Ok(PropertyKind::SmallFarm),
            "terreno" | "land" => Ok(PropertyKind::Land),
            "rancho" | "ranch" => Ok(PropertyKind::Ranch),
            other => Err(AppError::InvalidFilter(format!(
                "unknown property type `{other}`"
            ))),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

fn normalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'ç' => 'c',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

/// Inclusive numeric range; a missing side places no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeBound {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeBound {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Absent values fail any active bound.
    pub fn contains(&self, value: Option<f64>) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Parse the two text inputs of a min/max pair. Blank text means "no bound".
    pub fn parse(min: &str, max: &str) -> Result<Self, AppError> {
        Ok(Self {
            min: parse_bound(min)?,
            max: parse_bound(max)?,
        })
    }

    fn describe(&self) -> Option<String> {
        match (self.min, self.max) {
            (None, None) => None,
            (Some(min), None) => Some(format!(">= {min}")),
            (None, Some(max)) => Some(format!("<= {max}")),
            (Some(min), Some(max)) => Some(format!("{min}..{max}")),
        }
    }
}

pub fn parse_bound(text: &str) -> Result<Option<f64>, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or_else(|| AppError::InvalidFilter(format!("`{trimmed}` is not a number")))
}

/// Numeric listing fields that are filtered locally after each fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    LandArea,
    BuiltArea,
    SalePrice,
    RentPrice,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        NumericField::LandArea,
        NumericField::BuiltArea,
        NumericField::SalePrice,
        NumericField::RentPrice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NumericField::LandArea => "Land area",
            NumericField::BuiltArea => "Built area",
            NumericField::SalePrice => "Sale price",
            NumericField::RentPrice => "Rent price",
        }
    }

    pub fn value(self, listing: &Listing) -> Option<f64> {
        match self {
            NumericField::LandArea => listing.land_area,
            NumericField::BuiltArea => listing.built_area,
            NumericField::SalePrice => listing.sale_price,
            NumericField::RentPrice => listing.rent_price,
        }
    }
}

/// Search criteria: categorical fields go to the server, numeric bounds are applied per page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub purpose: Option<Purpose>,
    pub kind: Option<PropertyKind>,
    pub neighborhood: Option<String>,
    pub land_area: RangeBound,
    pub built_area: RangeBound,
    pub sale_price: RangeBound,
    pub rent_price: RangeBound,
}

impl FilterCriteria {
    pub fn bound(&self, field: NumericField) -> &RangeBound {
        match field {
            NumericField::LandArea => &self.land_area,
            NumericField::BuiltArea => &self.built_area,
            NumericField::SalePrice => &self.sale_price,
            NumericField::RentPrice => &self.rent_price,
        }
    }

    pub fn bound_mut(&mut self, field: NumericField) -> &mut RangeBound {
        match field {
            NumericField::LandArea => &mut self.land_area,
            NumericField::BuiltArea => &mut self.built_area,
            NumericField::SalePrice => &mut self.sale_price,
            NumericField::RentPrice => &mut self.rent_price,
        }
    }

    /// Query parameters understood by `/imoveis`; empty criteria are omitted.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(purpose) = self.purpose {
            params.push(("finalidade", purpose.as_param().to_string()));
        }
        if let Some(kind) = self.kind {
            params.push(("tipo", kind.as_param().to_string()));
        }
        if let Some(neighborhood) = self.neighborhood.as_deref() {
            let trimmed = neighborhood.trim();
            if !trimmed.is_empty() {
                params.push(("bairro", trimmed.to_string()));
            }
        }
        params
    }

    pub fn has_local_bounds(&self) -> bool {
        NumericField::ALL
            .iter()
            .any(|field| !self.bound(*field).is_empty())
    }

    /// True when the listing satisfies every active numeric bound.
    pub fn matches(&self, listing: &Listing) -> bool {
        NumericField::ALL
            .iter()
            .all(|field| self.bound(*field).contains(field.value(listing)))
    }

    /// Reduce one fetched page to the rows passing the local bounds, keeping API order.
    pub fn apply(&self, page: Vec<Listing>) -> Vec<Listing> {
        if !self.has_local_bounds() {
            return page;
        }
        page.into_iter()
            .filter(|listing| self.matches(listing))
            .collect()
    }

    /// Short human summary used in headers and CLI output.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(purpose) = self.purpose {
            parts.push(format!("purpose={}", purpose.label()));
        }
        if let Some(kind) = self.kind {
            parts.push(format!("type={}", kind.label()));
        }
        if let Some(neighborhood) = self.neighborhood.as_deref() {
            if !neighborhood.trim().is_empty() {
                parts.push(format!("neighborhood={}", neighborhood.trim()));
            }
        }
        for field in NumericField::ALL {
            if let Some(range) = self.bound(field).describe() {
                parts.push(format!("{} {}", field.label().to_lowercase(), range));
            }
        }

        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_built_area(id: i64, area: f64) -> Listing {
        let mut listing = Listing::new(id, format!("listing {id}"));
        listing.built_area = Some(area);
        listing
    }

    #[test]
    fn built_area_bounds_keep_only_the_middle_row() {
        let criteria = FilterCriteria {
            built_area: RangeBound::new(Some(10.0), Some(50.0)),
            ..Default::default()
        };
        let page = vec![
            with_built_area(1, 5.0),
            with_built_area(2, 20.0),
            with_built_area(3, 60.0),
        ];

        let visible = criteria.apply(page);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = RangeBound::new(Some(10.0), Some(50.0));
        assert!(range.contains(Some(10.0)));
        assert!(range.contains(Some(50.0)));
        assert!(!range.contains(Some(50.01)));
    }

    #[test]
    fn empty_bounds_are_no_ops() {
        let criteria = FilterCriteria::default();
        let page = vec![Listing::new(1, "a"), with_built_area(2, 1.0)];

        assert_eq!(criteria.apply(page.clone()), page);
    }

    #[test]
    fn missing_value_fails_active_bound_only() {
        let criteria = FilterCriteria {
            sale_price: RangeBound::new(None, Some(100_000.0)),
            ..Default::default()
        };
        let mut priced = Listing::new(1, "priced");
        priced.sale_price = Some(90_000.0);
        let unpriced = Listing::new(2, "unpriced");

        assert!(criteria.matches(&priced));
        assert!(!criteria.matches(&unpriced));
    }

    #[test]
    fn all_bounds_must_hold() {
        let criteria = FilterCriteria {
            land_area: RangeBound::new(Some(200.0), None),
            rent_price: RangeBound::new(None, Some(2_000.0)),
            ..Default::default()
        };
        let mut listing = Listing::new(1, "x");
        listing.land_area = Some(300.0);
        listing.rent_price = Some(2_500.0);
        assert!(!criteria.matches(&listing));

        listing.rent_price = Some(1_800.0);
        assert!(criteria.matches(&listing));
    }

    #[test]
    fn parses_bounds_from_text() {
        let range = RangeBound::parse(" 1500,50 ", "").unwrap();
        assert_eq!(range, RangeBound::new(Some(1500.5), None));

        let err = RangeBound::parse("abc", "10").unwrap_err();
        assert!(err.to_string().contains("not a number"), "{err}");
    }

    #[test]
    fn categorical_criteria_become_query_params() {
        let criteria = FilterCriteria {
            purpose: Some(Purpose::Rent),
            kind: Some(PropertyKind::SmallFarm),
            neighborhood: Some("  ".to_string()),
            built_area: RangeBound::new(Some(1.0), None),
            ..Default::default()
        };

        assert_eq!(
            criteria.query_params(),
            vec![
                ("finalidade", "locacao".to_string()),
                ("tipo", "chácara".to_string()),
            ]
        );
    }

    #[test]
    fn parses_enums_in_either_language() {
        assert_eq!("Locação".parse::<Purpose>().unwrap(), Purpose::Rent);
        assert_eq!("sale".parse::<Purpose>().unwrap(), Purpose::Sale);
        assert_eq!("Chácara".parse::<PropertyKind>().unwrap(), PropertyKind::SmallFarm);
        assert_eq!("barracão".parse::<PropertyKind>().unwrap(), PropertyKind::Warehouse);
        assert!("castle".parse::<PropertyKind>().is_err());
    }

    #[test]
    fn describes_active_criteria() {
        assert_eq!(FilterCriteria::default().describe(), "no filters");

        let criteria = FilterCriteria {
            kind: Some(PropertyKind::House),
            built_area: RangeBound::new(Some(10.0), Some(50.0)),
            ..Default::default()
        };
        assert_eq!(criteria.describe(), "type=House, built area 10..50");
    }
}
