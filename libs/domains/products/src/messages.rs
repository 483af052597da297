//! Fixed client-facing messages.

pub const PRODUCT_NAME_EMPTY: &str = "Product name cannot be empty";
pub const PRODUCT_NAME_DUPLICATE: &str = "Product name cannot be duplicate";
pub const PRODUCT_NOT_FOUND: &str = "Product with given details was not found";
pub const PRODUCT_EMPTY: &str = "Product cannot have empty data";
pub const PRODUCT_CATEGORY_EMPTY: &str = "Product category cannot be empty";
pub const PRODUCT_PRICE_LESS_THAN_ZERO: &str = "Product price cannot be less than 0";
pub const PRODUCT_PRICE_TOO_LARGE: &str = "Product price cannot exceed 9999999999999999.99";
pub const PRODUCT_ID_LESS_THAN_ZERO: &str = "Product Id cannot be less than 0";
pub const INVALID_SORT_ORDER: &str = "InValid Sort Order";
