//! Derived views over loaded admin slices.
//!
//! Pure functions; nothing here calls the backend. They are re-derived
//! on every render from whatever the slices currently hold.

use rust_decimal::Decimal;
use shopdesk_core::{Order, OrderStatus, Review, ReviewStatus, StockItem, VariantId};

/// Quantity at or below which an item without its own threshold counts
/// as low on stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Items at or under their low-stock threshold, in listing order.
#[must_use]
pub fn low_stock(items: &[StockItem], default_threshold: u32) -> Vec<&StockItem> {
    items
        .iter()
        .filter(|item| item.is_low(default_threshold))
        .collect()
}

#[must_use]
pub fn reviews_with_status(reviews: &[Review], status: ReviewStatus) -> Vec<&Review> {
    reviews.iter().filter(|r| r.status == status).collect()
}

/// Mean star rating rounded to one decimal place, `None` when empty.
#[must_use]
pub fn average_rating<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Option<Decimal> {
    let (sum, count) = reviews
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), r| (sum + u64::from(r.rating), count + 1));
    if count == 0 {
        return None;
    }
    Some((Decimal::from(sum) / Decimal::from(count)).round_dp(1))
}

#[must_use]
pub fn orders_with_status(orders: &[Order], status: OrderStatus) -> Vec<&Order> {
    orders.iter().filter(|o| o.status == status).collect()
}

/// Expand `id`, or collapse it if it is already the expanded variant.
///
/// At most one variant is expanded at a time. Returns whether `id` is
/// expanded afterwards.
pub fn toggle_expanded(expanded: &mut Option<VariantId>, id: VariantId) -> bool {
    if expanded.as_ref() == Some(&id) {
        *expanded = None;
        false
    } else {
        *expanded = Some(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use shopdesk_core::{Extra, ProductId, Related, ReviewId, StockId};

    use super::*;

    fn stock(id: &str, quantity: u32, threshold: Option<u32>) -> StockItem {
        StockItem {
            id: StockId::new(id),
            product: Related::Id(ProductId::new("p1")),
            variant: None,
            quantity,
            low_stock_threshold: threshold,
            extra: Extra::new(),
        }
    }

    fn review(id: &str, rating: u8, status: ReviewStatus) -> Review {
        Review {
            id: ReviewId::new(id),
            product: Related::Id(ProductId::new("p1")),
            user: None,
            rating,
            comment: None,
            status,
            created_at: None,
            extra: Extra::new(),
        }
    }

    #[test]
    fn test_low_stock_uses_item_threshold_first() {
        let items = vec![
            stock("a", 5, None),
            stock("b", 6, None),
            stock("c", 9, Some(10)),
            stock("d", 0, Some(0)),
        ];
        let low: Vec<_> = low_stock(&items, DEFAULT_LOW_STOCK_THRESHOLD)
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(low, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_average_rating() {
        let reviews = vec![
            review("r1", 5, ReviewStatus::Approved),
            review("r2", 4, ReviewStatus::Approved),
            review("r3", 4, ReviewStatus::Pending),
        ];
        assert_eq!(average_rating(&reviews), Some(Decimal::new(43, 1)));
        assert_eq!(
            average_rating(reviews_with_status(&reviews, ReviewStatus::Approved)),
            Some(Decimal::new(45, 1))
        );
        assert_eq!(average_rating(&Vec::<Review>::new()), None);
    }

    #[test]
    fn test_toggle_expanded_keeps_one() {
        let mut expanded = None;
        assert!(toggle_expanded(&mut expanded, VariantId::new("v1")));
        assert!(toggle_expanded(&mut expanded, VariantId::new("v2")));
        assert_eq!(expanded, Some(VariantId::new("v2")));
        assert!(!toggle_expanded(&mut expanded, VariantId::new("v2")));
        assert_eq!(expanded, None);
    }
}
