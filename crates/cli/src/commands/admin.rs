//! Administrative commands. Every request here carries the admin token.

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;
use rust_decimal::Decimal;
use shopdesk_admin::{AdminState, DEFAULT_LOW_STOCK_THRESHOLD};
use shopdesk_api::{ApiError, FilePart};
use shopdesk_core::{
    AccountStatus, AdminDraft, AdminId, AdminRole, BannerDraft, BannerId, BlogDraft, BlogId, BookingId,
    BookingStatus, CategoryDraft, CategoryId, ContactId, Credentials, DriverDraft, DriverId,
    OrderId, OrderStatus, ProductDraft, ProductId, ProductQuery, ReviewId, ReviewStatus, StockId,
    UserId, VariantDraft, VariantId,
};

use super::store::PageArgs;
use crate::error::CliError;
use crate::render::{self, money, opt, related};

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Sign in as an admin
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "SHOPDESK_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the admin token
    Logout,
    /// Show the signed-in admin
    Profile,
    /// List admin accounts
    Admins,
    /// Create an admin account
    CreateAdmin {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: Option<String>,
        /// `super_admin`, `admin`, or `viewer`
        #[arg(short, long, default_value = "admin")]
        role: AdminRole,
    },
    /// Delete an admin account
    DeleteAdmin { id: AdminId },
    /// List categories
    Categories,
    /// Create a category
    CreateCategory {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Rename or re-describe a category
    UpdateCategory {
        id: CategoryId,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a category
    DeleteCategory { id: CategoryId },
    /// List products
    Products {
        #[arg(short, long)]
        search: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Show one product and its variants
    Product {
        id: ProductId,
        /// Expand this variant's details
        #[arg(long)]
        expand: Option<VariantId>,
    },
    /// Create a product
    CreateProduct {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        price: Decimal,
        #[arg(long)]
        discount_price: Option<Decimal>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<CategoryId>,
        #[arg(long)]
        stock: Option<u32>,
        #[arg(short, long, num_args = 1..)]
        images: Vec<PathBuf>,
    },
    /// Delete a product
    DeleteProduct { id: ProductId },
    /// Edit one variant of a product
    UpdateVariant {
        product: ProductId,
        variant: VariantId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        price: Option<Decimal>,
        #[arg(short, long)]
        stock: Option<u32>,
    },
    /// List orders
    Orders {
        #[arg(long)]
        status: Option<OrderStatus>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Move an order to another status
    OrderStatus { id: OrderId, status: OrderStatus },
    /// Delete an order
    DeleteOrder { id: OrderId },
    /// Assign a delivery driver to an order
    AssignDriver { order: OrderId, driver: DriverId },
    /// Download an order's shipping label
    Label {
        id: OrderId,
        #[arg(short, long, default_value = "labels")]
        dir: PathBuf,
    },
    /// List orders whose label was downloaded
    Labels,
    /// List bookings
    Bookings {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Move a booking to another status
    BookingStatus { id: BookingId, status: BookingStatus },
    /// Delete a booking
    DeleteBooking { id: BookingId },
    /// List blog posts
    Blogs,
    /// Publish a blog post
    CreateBlog {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        content: String,
        #[arg(short, long)]
        author: Option<String>,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a blog post
    DeleteBlog { id: BlogId },
    /// List banners
    Banners,
    /// Create a banner
    CreateBanner {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        link: Option<String>,
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a banner
    DeleteBanner { id: BannerId },
    /// List drivers
    Drivers,
    /// Add a driver
    CreateDriver {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        phone: String,
        #[arg(short, long)]
        vehicle: Option<String>,
    },
    /// Remove a driver
    DeleteDriver { id: DriverId },
    /// List reviews
    Reviews {
        #[arg(long)]
        status: Option<ReviewStatus>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Approve or reject a review
    ReviewStatus { id: ReviewId, status: ReviewStatus },
    /// Delete a review
    DeleteReview { id: ReviewId },
    /// List contact-form messages
    Contacts {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Delete a contact-form message
    DeleteContact { id: ContactId },
    /// List stock levels
    Stock {
        /// Only items at or under their threshold
        #[arg(long)]
        low: bool,
        /// Threshold for items without their own
        #[arg(long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
        threshold: u32,
    },
    /// Set an item's on-hand quantity
    SetStock { id: StockId, quantity: u32 },
    /// List shopper accounts
    Users {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Block or reactivate a shopper account
    UserStatus { id: UserId, status: AccountStatus },
    /// Delete a shopper account
    DeleteUser { id: UserId },
}

async fn image(path: Option<PathBuf>) -> Result<Option<FilePart>, ApiError> {
    match path {
        Some(path) => Ok(Some(FilePart::from_path("image", &path).await?)),
        None => Ok(None),
    }
}

#[allow(clippy::too_many_lines)]
pub async fn run(
    state: &AdminState,
    command: AdminCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        AdminCommand::Login { email, password } => {
            state.login(Credentials { email, password }).await?;
            signed_in(state, out).await?;
        }
        AdminCommand::Logout => {
            state.logout().await?;
            writeln!(out, "Signed out")?;
        }
        AdminCommand::Profile => {
            state.load_profile().await?;
            signed_in(state, out).await?;
        }
        AdminCommand::Admins => {
            state.load_admins().await?;
            let admins = state.admins().read().await;
            let rows: Vec<Vec<String>> = admins
                .items
                .iter()
                .map(|a| vec![a.id.to_string(), a.name.clone(), a.email.clone(), a.role.to_string()])
                .collect();
            render::table(out, &["ID", "NAME", "EMAIL", "ROLE"], &rows)?;
        }
        AdminCommand::CreateAdmin {
            name,
            email,
            password,
            role,
        } => {
            state
                .create_admin(AdminDraft {
                    name,
                    email,
                    password,
                    role,
                })
                .await?;
            writeln!(out, "Admin created")?;
        }
        AdminCommand::DeleteAdmin { id } => {
            state.delete_admin(&id).await?;
            writeln!(out, "Admin {id} deleted")?;
        }
        AdminCommand::Categories => {
            state.load_categories().await?;
            let categories = state.categories().read().await;
            let rows: Vec<Vec<String>> = categories
                .items
                .iter()
                .map(|c| vec![c.id.to_string(), c.name.clone(), opt(c.is_active)])
                .collect();
            render::table(out, &["ID", "NAME", "ACTIVE"], &rows)?;
        }
        AdminCommand::CreateCategory {
            name,
            description,
            image: path,
        } => {
            let draft = CategoryDraft {
                name,
                description,
                is_active: Some(true),
            };
            state.create_category(draft, image(path).await?).await?;
            writeln!(out, "Category created")?;
        }
        AdminCommand::UpdateCategory {
            id,
            name,
            description,
            image: path,
        } => {
            let draft = CategoryDraft {
                name,
                description,
                is_active: None,
            };
            state.update_category(&id, draft, image(path).await?).await?;
            writeln!(out, "Category {id} updated")?;
        }
        AdminCommand::DeleteCategory { id } => {
            state.delete_category(&id).await?;
            writeln!(out, "Category {id} deleted")?;
        }
        AdminCommand::Products { search, paging } => {
            state.load_products(&ProductQuery::default()).await?;
            let products = state.products().read().await;
            let needle = search.unwrap_or_default();
            let matching: Vec<_> = products
                .items
                .iter()
                .filter(|p| p.matches_text(&needle))
                .collect();
            render::paged(
                out,
                &matching,
                paging.page,
                paging.page_size,
                &["ID", "NAME", "PRICE", "VARIANTS", "STOCK"],
                |p| {
                    vec![
                        p.id.to_string(),
                        p.name.clone(),
                        money(p.effective_price()),
                        p.variants.len().to_string(),
                        opt(p.stock),
                    ]
                },
            )?;
        }
        AdminCommand::Product { id, expand } => {
            state.open_product(&id).await?;
            if let Some(variant) = expand {
                state.toggle_variant(variant).await;
            }
            let expanded = state.expanded_variant().read().await.clone();
            let products = state.products().read().await;
            if let Some(product) = &products.current {
                writeln!(out, "{} ({})", product.name, money(product.effective_price()))?;
                for variant in &product.variants {
                    writeln!(out, "  {} {} {}", variant.id, variant.name, money(variant.price))?;
                    if expanded.as_ref() == Some(&variant.id) {
                        writeln!(out, "    sku:   {}", opt(variant.sku.as_deref()))?;
                        writeln!(out, "    stock: {}", opt(variant.stock))?;
                    }
                }
            }
        }
        AdminCommand::CreateProduct {
            name,
            price,
            discount_price,
            description,
            category,
            stock,
            images,
        } => {
            let mut files = Vec::with_capacity(images.len());
            for path in &images {
                files.push(FilePart::from_path("images", path).await?);
            }
            let draft = ProductDraft {
                name,
                description,
                price,
                discount_price,
                category,
                stock,
            };
            state.create_product(draft, files).await?;
            writeln!(out, "Product created")?;
        }
        AdminCommand::DeleteProduct { id } => {
            state.delete_product(&id).await?;
            writeln!(out, "Product {id} deleted")?;
        }
        AdminCommand::UpdateVariant {
            product,
            variant,
            name,
            price,
            stock,
        } => {
            let draft = VariantDraft { name, price, stock };
            state.update_variant(&product, &variant, draft).await?;
            writeln!(out, "Variant {variant} updated")?;
        }
        AdminCommand::Orders { status, paging } => {
            state.load_orders().await?;
            let orders = match status {
                Some(status) => state.orders_with_status(status).await,
                None => state.orders().read().await.items.clone(),
            };
            render::paged(
                out,
                &orders,
                paging.page,
                paging.page_size,
                &["ORDER", "CUSTOMER", "STATUS", "TOTAL", "DRIVER", "LABEL"],
                |o| {
                    vec![
                        o.reference().to_owned(),
                        o.user
                            .as_ref()
                            .map_or_else(|| "-".to_owned(), |u| related(u, |u| u.name.as_str())),
                        o.status.to_string(),
                        money(o.total_amount),
                        o.driver
                            .as_ref()
                            .map_or_else(|| "-".to_owned(), |d| related(d, |d| d.name.as_str())),
                        if state.is_label_downloaded(&o.id) { "yes" } else { "" }.to_owned(),
                    ]
                },
            )?;
        }
        AdminCommand::OrderStatus { id, status } => {
            state.update_order_status(&id, status).await?;
            writeln!(out, "Order {id} is now {status}")?;
        }
        AdminCommand::DeleteOrder { id } => {
            state.delete_order(&id).await?;
            writeln!(out, "Order {id} deleted")?;
        }
        AdminCommand::AssignDriver { order, driver } => {
            state.assign_driver(&order, &driver).await?;
            writeln!(out, "Driver {driver} assigned to order {order}")?;
        }
        AdminCommand::Label { id, dir } => {
            let path = state.download_label(&id, &dir).await?;
            writeln!(out, "Saved {}", path.display())?;
        }
        AdminCommand::Labels => {
            for id in state.downloaded_labels() {
                writeln!(out, "{id}")?;
            }
        }
        AdminCommand::Bookings { paging } => {
            state.load_bookings().await?;
            let bookings = state.bookings().read().await;
            render::paged(
                out,
                &bookings.items,
                paging.page,
                paging.page_size,
                &["ID", "CUSTOMER", "SERVICE", "WHEN", "STATUS"],
                |b| {
                    vec![
                        b.id.to_string(),
                        b.user
                            .as_ref()
                            .map_or_else(|| "-".to_owned(), |u| related(u, |u| u.name.as_str())),
                        b.service.clone(),
                        opt(b.scheduled_at),
                        b.status.to_string(),
                    ]
                },
            )?;
        }
        AdminCommand::BookingStatus { id, status } => {
            state.update_booking_status(&id, status).await?;
            writeln!(out, "Booking {id} is now {status}")?;
        }
        AdminCommand::DeleteBooking { id } => {
            state.delete_booking(&id).await?;
            writeln!(out, "Booking {id} deleted")?;
        }
        AdminCommand::Blogs => {
            state.load_blogs().await?;
            let blogs = state.blogs().read().await;
            let rows: Vec<Vec<String>> = blogs
                .items
                .iter()
                .map(|b| vec![b.id.to_string(), b.title.clone(), opt(b.author.as_deref())])
                .collect();
            render::table(out, &["ID", "TITLE", "AUTHOR"], &rows)?;
        }
        AdminCommand::CreateBlog {
            title,
            content,
            author,
            image: path,
        } => {
            let draft = BlogDraft {
                title,
                content,
                author,
            };
            state.create_blog(draft, image(path).await?).await?;
            writeln!(out, "Blog post created")?;
        }
        AdminCommand::DeleteBlog { id } => {
            state.delete_blog(&id).await?;
            writeln!(out, "Blog post {id} deleted")?;
        }
        AdminCommand::Banners => {
            state.load_banners().await?;
            let banners = state.banners().read().await;
            let rows: Vec<Vec<String>> = banners
                .items
                .iter()
                .map(|b| vec![b.id.to_string(), b.title.clone(), opt(b.link.as_deref())])
                .collect();
            render::table(out, &["ID", "TITLE", "LINK"], &rows)?;
        }
        AdminCommand::CreateBanner {
            title,
            link,
            image: path,
        } => {
            let draft = BannerDraft {
                title,
                link,
                is_active: Some(true),
            };
            state.create_banner(draft, image(path).await?).await?;
            writeln!(out, "Banner created")?;
        }
        AdminCommand::DeleteBanner { id } => {
            state.delete_banner(&id).await?;
            writeln!(out, "Banner {id} deleted")?;
        }
        AdminCommand::Drivers => {
            state.load_drivers().await?;
            let drivers = state.drivers().read().await;
            let rows: Vec<Vec<String>> = drivers
                .items
                .iter()
                .map(|d| {
                    vec![
                        d.id.to_string(),
                        d.name.clone(),
                        d.phone.clone(),
                        opt(d.vehicle_number.as_deref()),
                        opt(d.is_available),
                    ]
                })
                .collect();
            render::table(out, &["ID", "NAME", "PHONE", "VEHICLE", "AVAILABLE"], &rows)?;
        }
        AdminCommand::CreateDriver {
            name,
            phone,
            vehicle,
        } => {
            let draft = DriverDraft {
                name,
                phone,
                vehicle_number: vehicle,
                is_available: Some(true),
            };
            state.create_driver(draft).await?;
            writeln!(out, "Driver created")?;
        }
        AdminCommand::DeleteDriver { id } => {
            state.delete_driver(&id).await?;
            writeln!(out, "Driver {id} deleted")?;
        }
        AdminCommand::Reviews { status, paging } => {
            state.load_reviews().await?;
            let reviews = match status {
                Some(status) => state.reviews_with_status(status).await,
                None => state.reviews().read().await.items.clone(),
            };
            render::paged(
                out,
                &reviews,
                paging.page,
                paging.page_size,
                &["ID", "PRODUCT", "RATING", "STATUS", "COMMENT"],
                |r| {
                    vec![
                        r.id.to_string(),
                        related(&r.product, |p| p.name.as_str()),
                        r.rating.to_string(),
                        r.status.to_string(),
                        opt(r.comment.as_deref()),
                    ]
                },
            )?;
            if let Some(average) = state.average_rating(status).await {
                writeln!(out, "average rating {average}")?;
            }
        }
        AdminCommand::ReviewStatus { id, status } => {
            state.update_review_status(&id, status).await?;
            writeln!(out, "Review {id} is now {status}")?;
        }
        AdminCommand::DeleteReview { id } => {
            state.delete_review(&id).await?;
            writeln!(out, "Review {id} deleted")?;
        }
        AdminCommand::Contacts { paging } => {
            state.load_contacts().await?;
            let contacts = state.contacts().read().await;
            render::paged(
                out,
                &contacts.items,
                paging.page,
                paging.page_size,
                &["ID", "FROM", "SUBJECT", "MESSAGE"],
                |c| {
                    vec![
                        c.id.to_string(),
                        format!("{} <{}>", c.name, c.email),
                        opt(c.subject.as_deref()),
                        c.message.clone(),
                    ]
                },
            )?;
        }
        AdminCommand::DeleteContact { id } => {
            state.delete_contact(&id).await?;
            writeln!(out, "Contact message {id} deleted")?;
        }
        AdminCommand::Stock { low, threshold } => {
            state.load_stock().await?;
            let items = if low {
                state.low_stock(threshold).await
            } else {
                state.stock().read().await.items.clone()
            };
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|s| {
                    vec![
                        s.id.to_string(),
                        related(&s.product, |p| p.name.as_str()),
                        opt(s.variant.as_ref()),
                        s.quantity.to_string(),
                        if s.is_low(threshold) { "low" } else { "" }.to_owned(),
                    ]
                })
                .collect();
            render::table(out, &["ID", "PRODUCT", "VARIANT", "QTY", ""], &rows)?;
        }
        AdminCommand::SetStock { id, quantity } => {
            state.set_stock(&id, quantity).await?;
            writeln!(out, "Stock {id} set to {quantity}")?;
        }
        AdminCommand::Users { paging } => {
            state.load_users().await?;
            let users = state.users().read().await;
            render::paged(
                out,
                &users.items,
                paging.page,
                paging.page_size,
                &["ID", "NAME", "EMAIL", "STATUS"],
                |u| vec![u.id.to_string(), u.name.clone(), u.email.clone(), u.status.to_string()],
            )?;
        }
        AdminCommand::UserStatus { id, status } => {
            state.update_user_status(&id, status).await?;
            writeln!(out, "User {id} is now {status}")?;
        }
        AdminCommand::DeleteUser { id } => {
            state.delete_user(&id).await?;
            writeln!(out, "User {id} deleted")?;
        }
    }
    Ok(())
}

async fn signed_in(state: &AdminState, out: &mut impl Write) -> Result<(), CliError> {
    let auth = state.auth().read().await;
    match &auth.value {
        Some(admin) => writeln!(out, "{} <{}> ({})", admin.name, admin.email, admin.role)?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}
