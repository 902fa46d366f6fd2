//! Order submission validation.
//!
//! The order service is a persistence boundary: it trusts the caller for
//! totals, stock checks and order-number entropy. It only rejects
//! submissions that are missing the data an order row requires.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::product::validate_price;
use crate::types::DbId;

/// Maximum length of a caller-supplied order number.
pub const MAX_ORDER_NUMBER_LENGTH: usize = 64;

/// A checkout payload as submitted by the storefront.
///
/// Every field is optional at the serde level so missing data surfaces as a
/// [`CoreError::Validation`] naming the field rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub order_number: Option<String>,
    pub user_id: Option<DbId>,
    pub total_amount: Option<Decimal>,
    pub items: Option<Value>,
    pub shipping_info: Option<Value>,
}

/// A submission that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_number: String,
    pub user_id: Option<DbId>,
    pub total_amount: Decimal,
    /// Cart snapshot, stored exactly as submitted.
    pub items: Value,
    /// Address/contact block, stored exactly as submitted.
    pub shipping_info: Value,
}

impl OrderSubmission {
    /// Check for required data and produce a [`NewOrder`].
    ///
    /// - `orderNumber`: present, non-blank, at most [`MAX_ORDER_NUMBER_LENGTH`]
    /// - `totalAmount`: present, `>= 0`
    /// - `items`: a non-empty JSON array
    /// - `shippingInfo`: a JSON object
    pub fn validate(self) -> Result<NewOrder, CoreError> {
        let order_number = self
            .order_number
            .ok_or_else(|| missing("orderNumber"))?;
        if order_number.trim().is_empty() {
            return Err(CoreError::Validation("orderNumber must not be empty".into()));
        }
        if order_number.chars().count() > MAX_ORDER_NUMBER_LENGTH {
            return Err(CoreError::Validation(format!(
                "orderNumber exceeds {MAX_ORDER_NUMBER_LENGTH} characters"
            )));
        }

        let total_amount = self.total_amount.ok_or_else(|| missing("totalAmount"))?;
        validate_price("totalAmount", total_amount)?;

        let items = self.items.ok_or_else(|| missing("items"))?;
        match &items {
            Value::Array(lines) if !lines.is_empty() => {}
            Value::Array(_) => {
                return Err(CoreError::Validation("items must not be empty".into()));
            }
            _ => return Err(CoreError::Validation("items must be an array".into())),
        }

        let shipping_info = self.shipping_info.ok_or_else(|| missing("shippingInfo"))?;
        if !shipping_info.is_object() {
            return Err(CoreError::Validation("shippingInfo must be an object".into()));
        }

        Ok(NewOrder {
            order_number,
            user_id: self.user_id,
            total_amount,
            items,
            shipping_info,
        })
    }
}

fn missing(field: &str) -> CoreError {
    CoreError::Validation(format!("{field} is required"))
}
