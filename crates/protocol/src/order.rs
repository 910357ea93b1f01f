use menu_catalog::CatalogItem;

/// Botswana pula
pub const DEFAULT_CURRENCY_PREFIX: &str = "P";

/// Shortest decimal form of a price: `85`, `42.5`
#[must_use]
pub fn format_price(price: f64, currency_prefix: &str) -> String {
    // -0.0 + 0.0 is +0.0, so a negative zero never renders as "-0"
    let price = price + 0.0;
    format!("{currency_prefix}{price}")
}

/// Pre-filled order text for a recommended item
#[must_use]
pub fn order_message(item: &CatalogItem, currency_prefix: &str) -> String {
    format!(
        "Hi! I'd like to order {} ({}) based on your Smart Assistant recommendation.",
        item.name,
        format_price(item.price, currency_prefix)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whole_prices_have_no_decimals() {
        assert_eq!(format_price(85.0, "P"), "P85");
        assert_eq!(format_price(0.0, "P"), "P0");
        assert_eq!(format_price(42.5, "$"), "$42.5");
        assert_eq!(format_price(-0.0, "P"), "P0");
    }

    #[test]
    fn order_message_names_item_and_price() {
        let item = CatalogItem::new(2, "Peri-Peri Chicken", 75.0);
        assert_eq!(
            order_message(&item, DEFAULT_CURRENCY_PREFIX),
            "Hi! I'd like to order Peri-Peri Chicken (P75) based on your Smart Assistant recommendation."
        );
    }
}
