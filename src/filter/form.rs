use crate::error::Result;

use super::{parse_bound, FilterCriteria, NumericField, PropertyKind, Purpose};

/// One editable input of the filter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Purpose,
    Kind,
    Neighborhood,
    Min(NumericField),
    Max(NumericField),
}

impl FormField {
    pub fn label(self) -> String {
        match self {
            FormField::Purpose => "Purpose (venda/locacao/temporada)".to_string(),
            FormField::Kind => "Type (casa, apartamento, sala...)".to_string(),
            FormField::Neighborhood => "Neighborhood".to_string(),
            FormField::Min(field) => format!("{} min", field.label()),
            FormField::Max(field) => format!("{} max", field.label()),
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FormField::Min(_) | FormField::Max(_))
    }
}

pub const FORM_FIELDS: [FormField; 11] = [
    FormField::Purpose,
    FormField::Kind,
    FormField::Neighborhood,
    FormField::Min(NumericField::SalePrice),
    FormField::Max(NumericField::SalePrice),
    FormField::Min(NumericField::RentPrice),
    FormField::Max(NumericField::RentPrice),
    FormField::Min(NumericField::BuiltArea),
    FormField::Max(NumericField::BuiltArea),
    FormField::Min(NumericField::LandArea),
    FormField::Max(NumericField::LandArea),
];

/// Raw text state behind the filter screen; converted to criteria on apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterForm {
    values: [String; FORM_FIELDS.len()],
}

impl FilterForm {
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut form = Self::default();
        for (idx, field) in FORM_FIELDS.iter().enumerate() {
            form.values[idx] = match field {
                FormField::Purpose => criteria
                    .purpose
                    .map(|p| p.as_param().to_string())
                    .unwrap_or_default(),
                FormField::Kind => criteria
                    .kind
                    .map(|k| k.as_param().to_string())
                    .unwrap_or_default(),
                FormField::Neighborhood => criteria.neighborhood.clone().unwrap_or_default(),
                FormField::Min(numeric) => format_bound(criteria.bound(*numeric).min),
                FormField::Max(numeric) => format_bound(criteria.bound(*numeric).max),
            };
        }
        form
    }

    pub fn value(&self, idx: usize) -> &str {
        self.values.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn push_char(&mut self, idx: usize, ch: char) {
        let Some(field) = FORM_FIELDS.get(idx) else {
            return;
        };
        if field.is_numeric() && !(ch.is_ascii_digit() || ch == '.' || ch == ',') {
            return;
        }
        self.values[idx].push(ch);
    }

    pub fn pop_char(&mut self, idx: usize) {
        if let Some(value) = self.values.get_mut(idx) {
            value.pop();
        }
    }

    pub fn clear(&mut self) {
        self.values = Default::default();
    }

    /// Validate every input and build criteria; the first invalid field is reported.
    pub fn to_criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::default();
        for (idx, field) in FORM_FIELDS.iter().enumerate() {
            let raw = self.values[idx].trim();
            match field {
                FormField::Purpose if !raw.is_empty() => {
                    criteria.purpose = Some(raw.parse::<Purpose>()?);
                }
                FormField::Kind if !raw.is_empty() => {
                    criteria.kind = Some(raw.parse::<PropertyKind>()?);
                }
                FormField::Neighborhood if !raw.is_empty() => {
                    criteria.neighborhood = Some(raw.to_string());
                }
                FormField::Min(numeric) => {
                    criteria.bound_mut(*numeric).min = parse_bound(raw)?;
                }
                FormField::Max(numeric) => {
                    criteria.bound_mut(*numeric).max = parse_bound(raw)?;
                }
                _ => {}
            }
        }
        Ok(criteria)
    }
}

fn format_bound(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
