use serde::{Deserialize, Deserializer, Serialize};

use super::error::{StoreError, StoreResult};

/// One toy in the catalogue.
///
/// The id is stored as `_id` on disk and on the wire; `id` is accepted on input.
/// Older data files may hold `"price": null` or omit `name`; those load as
/// `0` and an empty name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toy {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_in_stock() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Toy {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|own| own == label)
    }
}

/// Incoming fields for a create or an update.
///
/// `None` means "not provided": on update the stored value is kept.
/// `createdAt` is never taken from input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToyDraft {
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

impl ToyDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Checks the fields that are present.
    pub fn validate(&self) -> StoreResult<()> {
        if let Some(name) = self.name.as_deref()
            && name.trim().is_empty()
        {
            return Err(StoreError::validation("name must not be blank"));
        }
        if let Some(price) = self.price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(StoreError::validation(
                "price must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// Builds a brand-new record. New toys always start in stock.
    pub fn into_new_toy(self, id: String, created_at: i64) -> StoreResult<Toy> {
        self.validate()?;
        let name = self
            .name
            .ok_or_else(|| StoreError::validation("name is required"))?;
        let price = self
            .price
            .ok_or_else(|| StoreError::validation("price is required"))?;

        Ok(Toy {
            id,
            name,
            price,
            labels: self.labels.unwrap_or_default(),
            in_stock: true,
            created_at,
        })
    }

    /// Shallow-merges the provided fields over `existing`.
    pub fn merge_into(self, existing: &Toy) -> StoreResult<Toy> {
        self.validate()?;
        Ok(Toy {
            id: existing.id.clone(),
            name: self.name.unwrap_or_else(|| existing.name.clone()),
            price: self.price.unwrap_or(existing.price),
            labels: self.labels.unwrap_or_else(|| existing.labels.clone()),
            in_stock: self.in_stock.unwrap_or(existing.in_stock),
            created_at: existing.created_at,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceInput {
    Number(f64),
    Text(String),
}

// Prices arrive from form fields as strings as often as numbers.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<PriceInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PriceInput::Number(value)) => Ok(Some(value)),
        Some(PriceInput::Text(raw)) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid price '{raw}'"))),
    }
}
