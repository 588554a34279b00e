/// Low-stock threshold resolution
///
/// A product is "low stock" when its quantity on hand is at or below
/// its effective threshold. The effective threshold is resolved with a
/// fixed precedence:
///
/// 1. the product's own `low_stock_threshold`, if set
/// 2. the organization's `default_low_stock_threshold`, if set
/// 3. [`FALLBACK_LOW_STOCK_THRESHOLD`]
///
/// The same rule runs in SQL (via COALESCE) for the dashboard query;
/// this module is the canonical statement of it and the place the rule
/// is unit-tested.

/// Hard-coded threshold used when neither the product nor the
/// organization configures one
pub const FALLBACK_LOW_STOCK_THRESHOLD: i32 = 5;

/// Resolves the effective low-stock threshold for one product
///
/// # Example
///
/// ```
/// use stocklane_shared::stock::{effective_threshold, FALLBACK_LOW_STOCK_THRESHOLD};
///
/// assert_eq!(effective_threshold(Some(2), Some(10)), 2);
/// assert_eq!(effective_threshold(None, Some(10)), 10);
/// assert_eq!(effective_threshold(None, None), FALLBACK_LOW_STOCK_THRESHOLD);
/// ```
pub fn effective_threshold(product_override: Option<i32>, org_default: Option<i32>) -> i32 {
    product_override
        .or(org_default)
        .unwrap_or(FALLBACK_LOW_STOCK_THRESHOLD)
}

/// Checks whether a product's stock level is at or below its effective
/// threshold
pub fn is_low_stock(
    quantity_on_hand: i32,
    product_override: Option<i32>,
    org_default: Option<i32>,
) -> bool {
    quantity_on_hand <= effective_threshold(product_override, org_default)
}
