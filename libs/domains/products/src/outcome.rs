use crate::models::Product;

/// Data carried by a successful [`Outcome`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    None,
    Id(i32),
    Products(Vec<Product>),
    Count(u64),
}

/// Result of a service operation.
///
/// Expected failures (missing records, duplicate names, empty fields) are
/// reported here with `success == false` and a fixed message. Store faults
/// travel separately as [`crate::ProductError`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub success: bool,
    pub message: Option<String>,
    pub payload: Payload,
}

impl Outcome {
    pub fn ok(payload: Payload) -> Self {
        Self {
            success: true,
            message: None,
            payload,
        }
    }

    /// Success with nothing to return.
    pub fn done() -> Self {
        Self::ok(Payload::None)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            payload: Payload::None,
        }
    }

    /// Failure without a message.
    pub fn rejected() -> Self {
        Self {
            success: false,
            message: None,
            payload: Payload::None,
        }
    }

    pub fn from_flag(success: bool) -> Self {
        if success {
            Self::done()
        } else {
            Self::rejected()
        }
    }

    pub fn id(&self) -> Option<i32> {
        match self.payload {
            Payload::Id(id) => Some(id),
            _ => None,
        }
    }

    pub fn count(&self) -> Option<u64> {
        match self.payload {
            Payload::Count(count) => Some(count),
            _ => None,
        }
    }

    pub fn products(&self) -> &[Product] {
        match &self.payload {
            Payload::Products(products) => products,
            _ => &[],
        }
    }

    pub fn into_products(self) -> Vec<Product> {
        match self.payload {
            Payload::Products(products) => products,
            _ => Vec::new(),
        }
    }
}
