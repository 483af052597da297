use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// Product entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Product {
    /// Store-assigned identifier
    pub id: i32,
    /// Product name, unique ignoring case
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    /// Unit price, two decimal places
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
}

/// DTO for creating a new product
///
/// Missing fields fall back to their defaults so that the validation helper,
/// not the JSON extractor, reports what is wrong. An `id` in the body is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
}

impl NewProduct {
    pub fn into_product(self, id: i32) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
        }
    }
}

/// Direction for name-ordered listings
///
/// Parsing ignores ASCII case and accepts both the short and long spelling:
///
/// ```
/// use domain_products::SortOrder;
///
/// assert_eq!("Asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
/// assert_eq!("descending".parse::<SortOrder>().unwrap(), SortOrder::Descending);
/// assert!("sideways".parse::<SortOrder>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
    #[strum(serialize = "asc", serialize = "ascending", to_string = "ascending")]
    Ascending,
    #[strum(serialize = "desc", serialize = "descending", to_string = "descending")]
    Descending,
}

/// Query for `GET /product/search`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name; omitted matches all
    pub name: Option<String>,
}

/// Query for `GET /product/sort`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// `asc`, `ascending`, `desc` or `descending`, any case
    pub order: Option<String>,
}
