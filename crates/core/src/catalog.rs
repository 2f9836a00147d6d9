//! Product and order filtering for the listing pages.
//!
//! Query strings come straight from `<select>`/`<input>` forms, so parsing
//! is lenient: blank or unknown values fall back to "no filter" rather than
//! failing the request.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Order, Product};
use crate::types::{CategoryId, OrderStatus, UserId};

/// Raw home-page query string (`/?category=2&q=pizza&availability=available&sort=price-asc`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductQueryParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub availability: Option<String>,
    pub sort: Option<String>,
}

/// Availability filter on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl AvailabilityFilter {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    const fn accepts(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Available => product.available,
            Self::Unavailable => !product.available,
        }
    }
}

impl FromStr for AvailabilityFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" | "" => Ok(Self::All),
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(()),
        }
    }
}

/// Sort order on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl ProductSort {
    pub const ALL: [Self; 4] = [Self::NameAsc, Self::NameDesc, Self::PriceAsc, Self::PriceDesc];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NameAsc => "Nombre (A-Z)",
            Self::NameDesc => "Nombre (Z-A)",
            Self::PriceAsc => "Precio: menor a mayor",
            Self::PriceDesc => "Precio: mayor a menor",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
        }
    }
}

impl FromStr for ProductSort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL.into_iter().find(|sort| sort.as_str() == s).ok_or(())
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Parsed home-page filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<CategoryId>,
    /// Lowercased, trimmed search text; `None` when blank.
    pub search: Option<String>,
    pub availability: AvailabilityFilter,
    pub sort: Option<ProductSort>,
}

impl ProductQuery {
    /// Parse query parameters, ignoring anything malformed.
    #[must_use]
    pub fn from_params(params: &ProductQueryParams) -> Self {
        let category = params
            .category
            .as_deref()
            .filter(|c| *c != "all")
            .and_then(|c| c.parse().ok());
        let search = params
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        let availability = params
            .availability
            .as_deref()
            .and_then(|a| a.parse().ok())
            .unwrap_or_default();
        let sort = params.sort.as_deref().and_then(|s| s.parse().ok());

        Self {
            category,
            search,
            availability,
            sort,
        }
    }

    /// Whether a product passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|id| product.category_id != id) {
            return false;
        }

        if let Some(query) = &self.search {
            let in_name = product.name.to_lowercase().contains(query.as_str());
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(query.as_str()));
            if !in_name && !in_description {
                return false;
            }
        }

        self.availability.accepts(product)
    }

    /// Filter then (stably) sort.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut result: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        if let Some(sort) = self.sort {
            result.sort_by(|a, b| sort.compare(a, b));
        }
        result
    }
}

/// `"0 productos"`, `"1 producto"`, `"12 productos"`.
#[must_use]
pub fn product_count_label(count: usize) -> String {
    if count == 1 {
        "1 producto".to_owned()
    } else {
        format!("{count} productos")
    }
}

/// Status filter on order listings (`?status=all|pending|...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    #[default]
    All,
    Status(OrderStatus),
}

impl OrderFilter {
    /// Parse a query value; unknown or blank means `All`.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<OrderStatus>().ok())
            .map_or(Self::All, Self::Status)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Status(status) => status.as_str(),
        }
    }

    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => order.status == *status,
        }
    }

    #[must_use]
    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        orders.iter().filter(|o| self.matches(o)).cloned().collect()
    }
}

/// Newest first; ties broken by the higher id.
pub fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

/// A customer's own orders, newest first.
#[must_use]
pub fn orders_for_user(orders: &[Order], user: UserId) -> Vec<Order> {
    let mut mine: Vec<Order> = orders
        .iter()
        .filter(|o| o.user_id == Some(user))
        .cloned()
        .collect();
    sort_newest_first(&mut mine);
    mine
}
