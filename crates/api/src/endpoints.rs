//! Endpoint registry.
//!
//! Literal paths, relative to the configured base URL, grouped by the
//! audience that calls them. Parameterized routes are small builder
//! functions so call sites never format paths by hand.

/// Routes served to the administrative surface.
pub mod admin {
    pub const LOGIN: &str = "/admin/login";
    pub const PROFILE: &str = "/admin/profile";
    pub const ADMINS: &str = "/admin/admins";
    pub const CATEGORIES: &str = "/admin/categories";
    pub const PRODUCTS: &str = "/admin/products";
    pub const ORDERS: &str = "/admin/orders";
    pub const BOOKINGS: &str = "/admin/bookings";
    pub const BLOGS: &str = "/admin/blogs";
    pub const BANNERS: &str = "/admin/banners";
    pub const DRIVERS: &str = "/admin/drivers";
    pub const REVIEWS: &str = "/admin/reviews";
    pub const CONTACTS: &str = "/admin/contacts";
    pub const STOCK: &str = "/admin/stock";
    pub const USERS: &str = "/admin/users";

    #[must_use]
    pub fn admin(id: &str) -> String {
        format!("{ADMINS}/{id}")
    }

    #[must_use]
    pub fn category(id: &str) -> String {
        format!("{CATEGORIES}/{id}")
    }

    #[must_use]
    pub fn product(id: &str) -> String {
        format!("{PRODUCTS}/{id}")
    }

    #[must_use]
    pub fn product_variant(product_id: &str, variant_id: &str) -> String {
        format!("{PRODUCTS}/{product_id}/variants/{variant_id}")
    }

    #[must_use]
    pub fn order(id: &str) -> String {
        format!("{ORDERS}/{id}")
    }

    #[must_use]
    pub fn order_status(id: &str) -> String {
        format!("{ORDERS}/{id}/status")
    }

    /// Shipping label; the body is a binary document, not an envelope.
    #[must_use]
    pub fn order_label(id: &str) -> String {
        format!("{ORDERS}/{id}/label")
    }

    #[must_use]
    pub fn assign_driver(order_id: &str) -> String {
        format!("{ORDERS}/{order_id}/assign-driver")
    }

    #[must_use]
    pub fn booking(id: &str) -> String {
        format!("{BOOKINGS}/{id}")
    }

    #[must_use]
    pub fn booking_status(id: &str) -> String {
        format!("{BOOKINGS}/{id}/status")
    }

    #[must_use]
    pub fn blog(id: &str) -> String {
        format!("{BLOGS}/{id}")
    }

    #[must_use]
    pub fn banner(id: &str) -> String {
        format!("{BANNERS}/{id}")
    }

    #[must_use]
    pub fn driver(id: &str) -> String {
        format!("{DRIVERS}/{id}")
    }

    #[must_use]
    pub fn review(id: &str) -> String {
        format!("{REVIEWS}/{id}")
    }

    #[must_use]
    pub fn review_status(id: &str) -> String {
        format!("{REVIEWS}/{id}/status")
    }

    #[must_use]
    pub fn contact(id: &str) -> String {
        format!("{CONTACTS}/{id}")
    }

    #[must_use]
    pub fn stock_item(id: &str) -> String {
        format!("{STOCK}/{id}")
    }

    #[must_use]
    pub fn user(id: &str) -> String {
        format!("{USERS}/{id}")
    }

    #[must_use]
    pub fn user_status(id: &str) -> String {
        format!("{USERS}/{id}/status")
    }
}

/// Routes served to end users.
pub mod user {
    pub const REGISTER: &str = "/user/register";
    pub const LOGIN: &str = "/user/login";
    pub const PROFILE: &str = "/user/profile";
    pub const CATEGORIES: &str = "/user/categories";
    pub const PRODUCTS: &str = "/user/products";
    pub const BANNERS: &str = "/user/banners";
    pub const BLOGS: &str = "/user/blogs";
    pub const CART: &str = "/user/cart";
    pub const ORDERS: &str = "/user/orders";
    pub const BOOKINGS: &str = "/user/bookings";
    pub const ADDRESSES: &str = "/user/addresses";
    pub const REVIEWS: &str = "/user/reviews";
    pub const CONTACT: &str = "/user/contact";

    #[must_use]
    pub fn product(id: &str) -> String {
        format!("{PRODUCTS}/{id}")
    }

    #[must_use]
    pub fn product_reviews(id: &str) -> String {
        format!("{PRODUCTS}/{id}/reviews")
    }

    #[must_use]
    pub fn blog(id: &str) -> String {
        format!("{BLOGS}/{id}")
    }

    #[must_use]
    pub fn cart_item(id: &str) -> String {
        format!("{CART}/{id}")
    }

    #[must_use]
    pub fn order(id: &str) -> String {
        format!("{ORDERS}/{id}")
    }

    #[must_use]
    pub fn cancel_order(id: &str) -> String {
        format!("{ORDERS}/{id}/cancel")
    }

    #[must_use]
    pub fn address(id: &str) -> String {
        format!("{ADDRESSES}/{id}")
    }
}

/// Every route as `(name, template)`, for listing in the console.
pub const CATALOG: &[(&str, &str)] = &[
    ("admin.login", admin::LOGIN),
    ("admin.profile", admin::PROFILE),
    ("admin.admins", admin::ADMINS),
    ("admin.admin", "/admin/admins/:id"),
    ("admin.categories", admin::CATEGORIES),
    ("admin.category", "/admin/categories/:id"),
    ("admin.products", admin::PRODUCTS),
    ("admin.product", "/admin/products/:id"),
    ("admin.product_variant", "/admin/products/:id/variants/:variantId"),
    ("admin.orders", admin::ORDERS),
    ("admin.order", "/admin/orders/:id"),
    ("admin.order_status", "/admin/orders/:id/status"),
    ("admin.order_label", "/admin/orders/:id/label"),
    ("admin.assign_driver", "/admin/orders/:id/assign-driver"),
    ("admin.bookings", admin::BOOKINGS),
    ("admin.booking", "/admin/bookings/:id"),
    ("admin.booking_status", "/admin/bookings/:id/status"),
    ("admin.blogs", admin::BLOGS),
    ("admin.blog", "/admin/blogs/:id"),
    ("admin.banners", admin::BANNERS),
    ("admin.banner", "/admin/banners/:id"),
    ("admin.drivers", admin::DRIVERS),
    ("admin.driver", "/admin/drivers/:id"),
    ("admin.reviews", admin::REVIEWS),
    ("admin.review", "/admin/reviews/:id"),
    ("admin.review_status", "/admin/reviews/:id/status"),
    ("admin.contacts", admin::CONTACTS),
    ("admin.contact", "/admin/contacts/:id"),
    ("admin.stock", admin::STOCK),
    ("admin.stock_item", "/admin/stock/:id"),
    ("admin.users", admin::USERS),
    ("admin.user", "/admin/users/:id"),
    ("admin.user_status", "/admin/users/:id/status"),
    ("user.register", user::REGISTER),
    ("user.login", user::LOGIN),
    ("user.profile", user::PROFILE),
    ("user.categories", user::CATEGORIES),
    ("user.products", user::PRODUCTS),
    ("user.product", "/user/products/:id"),
    ("user.product_reviews", "/user/products/:id/reviews"),
    ("user.banners", user::BANNERS),
    ("user.blogs", user::BLOGS),
    ("user.blog", "/user/blogs/:id"),
    ("user.cart", user::CART),
    ("user.cart_item", "/user/cart/:id"),
    ("user.orders", user::ORDERS),
    ("user.order", "/user/orders/:id"),
    ("user.cancel_order", "/user/orders/:id/cancel"),
    ("user.bookings", user::BOOKINGS),
    ("user.addresses", user::ADDRESSES),
    ("user.address", "/user/addresses/:id"),
    ("user.reviews", user::REVIEWS),
    ("user.contact", user::CONTACT),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_match_catalog_templates() {
        let expand = |template: &str| template.replace(":variantId", "v9").replace(":id", "42");
        let lookup = |name: &str| {
            CATALOG
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, t)| expand(t))
        };

        assert_eq!(lookup("admin.order_status"), Some(admin::order_status("42")));
        assert_eq!(
            lookup("admin.product_variant"),
            Some(admin::product_variant("42", "v9"))
        );
        assert_eq!(lookup("user.cancel_order"), Some(user::cancel_order("42")));
        assert_eq!(lookup("user.cart_item"), Some(user::cart_item("42")));
    }

    #[test]
    fn test_groups_are_prefixed() {
        for (name, template) in CATALOG {
            let group = name.split('.').next().unwrap_or_default();
            assert!(
                template.starts_with(&format!("/{group}")),
                "{name} -> {template}"
            );
        }
    }
}
