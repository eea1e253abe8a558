//! End-user commands.

use std::io::Write;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use shopdesk_core::{
    AddressDraft, AddressId, BookingRequest, CartAddition, CartItemId, ContactMessage,
    Credentials, OrderId, OrderStatus, ProductId, ProductQuery, Registration, ReviewSubmission,
    VariantId,
};
use shopdesk_storefront::StorefrontState;

use crate::error::CliError;
use crate::render::{self, DEFAULT_PAGE_SIZE, money, opt, related};

/// Paging flags shared by listing commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Page to show (1-indexed)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Sign in as a shopper
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "SHOPDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "SHOPDESK_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in profile
    Profile,
    /// List products
    Products {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Show one product with its variants and reviews
    Product { id: ProductId },
    /// List categories
    Categories,
    /// List banners
    Banners,
    /// List blog posts
    Blogs {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// List your orders
    Orders {
        #[arg(long)]
        status: Option<OrderStatus>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Cancel a pending or confirmed order
    CancelOrder { id: OrderId },
    /// Manage saved addresses
    Addresses {
        #[command(subcommand)]
        action: AddressCommand,
    },
    /// Book a service
    Book {
        #[arg(short, long)]
        service: String,
        /// RFC 3339 time, e.g. 2026-11-02T10:00:00Z
        #[arg(short, long)]
        at: DateTime<Utc>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List your bookings
    Bookings,
    /// Review a product
    Review {
        product: ProductId,
        #[arg(short, long)]
        rating: u8,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        message: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show cart lines
    Show,
    /// Add a product
    Add {
        product: ProductId,
        #[arg(short, long)]
        variant: Option<VariantId>,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity
    Update {
        id: CartItemId,
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a line
    Remove { id: CartItemId },
    /// Empty the cart
    Clear,
    /// Place an order for some or all lines
    Checkout {
        #[arg(short, long)]
        address: AddressId,
        #[arg(short, long, default_value = "cod")]
        payment: String,
        /// Lines to order; every line when omitted
        #[arg(short, long, num_args = 1..)]
        select: Vec<CartItemId>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AddressCommand {
    /// List saved addresses
    List,
    /// Save a new address
    Add {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        line1: String,
        #[arg(long)]
        line2: Option<String>,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        postal_code: String,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        default: bool,
    },
    /// Delete an address
    Delete { id: AddressId },
}

pub async fn run(
    state: &StorefrontState,
    command: StoreCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        StoreCommand::Login { email, password } => {
            state.login(Credentials { email, password }).await?;
            signed_in(state, out).await?;
        }
        StoreCommand::Register {
            name,
            email,
            password,
            phone,
        } => {
            state
                .register(Registration {
                    name,
                    email,
                    password,
                    phone,
                })
                .await?;
            signed_in(state, out).await?;
        }
        StoreCommand::Logout => {
            state.logout().await?;
            writeln!(out, "Signed out")?;
        }
        StoreCommand::Profile => {
            state.load_profile().await?;
            signed_in(state, out).await?;
        }
        StoreCommand::Products {
            search,
            category,
            paging,
        } => {
            let query = ProductQuery {
                search,
                category: category.map(Into::into),
                ..ProductQuery::default()
            };
            state.load_products(&query).await?;
            let products = state.products().read().await;
            render::paged(
                out,
                &products.items,
                paging.page,
                paging.page_size,
                &["ID", "NAME", "PRICE", "STOCK"],
                |p| {
                    vec![
                        p.id.to_string(),
                        p.name.clone(),
                        money(p.effective_price()),
                        opt(p.stock),
                    ]
                },
            )?;
        }
        StoreCommand::Product { id } => {
            state.open_product(&id).await?;
            state.load_product_reviews(&id).await?;
            let products = state.products().read().await;
            if let Some(product) = &products.current {
                writeln!(out, "{} ({})", product.name, money(product.effective_price()))?;
                if let Some(description) = &product.description {
                    writeln!(out, "{description}")?;
                }
                let rows: Vec<Vec<String>> = product
                    .variants
                    .iter()
                    .map(|v| vec![v.id.to_string(), v.name.clone(), money(v.price), opt(v.stock)])
                    .collect();
                render::table(out, &["VARIANT", "NAME", "PRICE", "STOCK"], &rows)?;
            }
            let reviews = state.reviews().read().await;
            writeln!(out, "{} review(s)", reviews.items.len())?;
            for review in &reviews.items {
                writeln!(out, "  {}/5 {}", review.rating, opt(review.comment.as_deref()))?;
            }
        }
        StoreCommand::Categories => {
            state.load_categories().await?;
            let categories = state.categories().read().await;
            render::paged(
                out,
                &categories.items,
                1,
                categories.items.len(),
                &["ID", "NAME"],
                |c| vec![c.id.to_string(), c.name.clone()],
            )?;
        }
        StoreCommand::Banners => {
            state.load_banners().await?;
            let banners = state.banners().read().await;
            render::paged(
                out,
                &banners.items,
                1,
                banners.items.len(),
                &["ID", "TITLE", "LINK"],
                |b| vec![b.id.to_string(), b.title.clone(), opt(b.link.as_deref())],
            )?;
        }
        StoreCommand::Blogs { paging } => {
            state.load_blogs().await?;
            let blogs = state.blogs().read().await;
            render::paged(
                out,
                &blogs.items,
                paging.page,
                paging.page_size,
                &["ID", "TITLE", "AUTHOR"],
                |b| vec![b.id.to_string(), b.title.clone(), opt(b.author.as_deref())],
            )?;
        }
        StoreCommand::Cart { action } => cart(state, action, out).await?,
        StoreCommand::Orders { status, paging } => {
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
                &["ORDER", "STATUS", "TOTAL", "ITEMS"],
                |o| {
                    vec![
                        o.reference().to_owned(),
                        o.status.to_string(),
                        money(o.total_amount),
                        o.items.len().to_string(),
                    ]
                },
            )?;
        }
        StoreCommand::CancelOrder { id } => {
            state.cancel_order(&id).await?;
            writeln!(out, "Order {id} cancelled")?;
        }
        StoreCommand::Addresses { action } => addresses(state, action, out).await?,
        StoreCommand::Book { service, at, notes } => {
            state
                .book(BookingRequest {
                    service,
                    scheduled_at: at,
                    notes,
                })
                .await?;
            writeln!(out, "Booked for {at}")?;
        }
        StoreCommand::Bookings => {
            state.load_bookings().await?;
            let bookings = state.bookings().read().await;
            render::paged(
                out,
                &bookings.items,
                1,
                bookings.items.len(),
                &["ID", "SERVICE", "WHEN", "STATUS"],
                |b| {
                    vec![
                        b.id.to_string(),
                        b.service.clone(),
                        opt(b.scheduled_at),
                        b.status.to_string(),
                    ]
                },
            )?;
        }
        StoreCommand::Review {
            product,
            rating,
            comment,
        } => {
            state
                .submit_review(ReviewSubmission {
                    product_id: product,
                    rating,
                    comment,
                })
                .await?;
            writeln!(out, "Review submitted")?;
        }
        StoreCommand::Contact {
            name,
            email,
            message,
            subject,
            phone,
        } => {
            state
                .send_contact(ContactMessage {
                    name,
                    email,
                    phone,
                    subject,
                    message,
                })
                .await?;
            let ack = state.contact().read().await.value.clone();
            writeln!(out, "{}", ack.unwrap_or_default())?;
        }
    }
    Ok(())
}

async fn signed_in(state: &StorefrontState, out: &mut impl Write) -> Result<(), CliError> {
    let auth = state.auth().read().await;
    match &auth.value {
        Some(user) => writeln!(out, "{} <{}> ({})", user.name, user.email, user.status)?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

async fn cart(
    state: &StorefrontState,
    action: CartCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match action {
        CartCommand::Show => state.load_cart().await?,
        CartCommand::Add {
            product,
            variant,
            quantity,
        } => {
            state
                .add_to_cart(CartAddition {
                    product_id: product,
                    variant_id: variant,
                    quantity,
                })
                .await?;
            state.load_cart().await?;
        }
        CartCommand::Update { id, quantity } => {
            state.update_cart_item(&id, quantity).await?;
            state.load_cart().await?;
        }
        CartCommand::Remove { id } => state.remove_cart_item(&id).await?,
        CartCommand::Clear => state.clear_cart().await?,
        CartCommand::Checkout {
            address,
            payment,
            select,
        } => {
            state.load_cart().await?;
            if select.is_empty() {
                state.select_all_cart_items().await;
            } else {
                for id in select {
                    state.select_cart_item(id).await;
                }
            }
            let order = state.checkout(address, payment).await?;
            writeln!(
                out,
                "Order {} placed, total {}",
                order.reference(),
                money(order.total_amount)
            )?;
        }
    }

    let cart = state.cart().read().await;
    let rows: Vec<Vec<String>> = cart
        .items
        .iter()
        .map(|i| {
            vec![
                i.id.to_string(),
                related(&i.product, |p| p.name.as_str()),
                i.quantity.to_string(),
                money(i.line_total()),
            ]
        })
        .collect();
    render::table(out, &["LINE", "PRODUCT", "QTY", "TOTAL"], &rows)?;
    writeln!(out, "{} item(s), subtotal {}", cart.item_count(), money(cart.subtotal()))?;
    Ok(())
}

async fn addresses(
    state: &StorefrontState,
    action: AddressCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match action {
        AddressCommand::List => state.load_addresses().await?,
        AddressCommand::Add {
            full_name,
            line1,
            line2,
            city,
            state: region,
            postal_code,
            country,
            phone,
            default,
        } => {
            state
                .add_address(AddressDraft {
                    full_name,
                    line1,
                    line2,
                    city,
                    state: region,
                    postal_code,
                    country,
                    phone,
                    is_default: default,
                })
                .await?;
        }
        AddressCommand::Delete { id } => {
            state.load_addresses().await?;
            state.delete_address(&id).await?;
        }
    }

    let addresses = state.addresses().read().await;
    let rows: Vec<Vec<String>> = addresses
        .items
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                a.one_line(),
                if a.is_default { "yes" } else { "" }.to_owned(),
            ]
        })
        .collect();
    render::table(out, &["ID", "ADDRESS", "DEFAULT"], &rows)?;
    Ok(())
}
