//! Catalog listing query construction.
//!
//! Filters and sort directives come straight from the query string, so every
//! user-supplied value goes through sea-query's parameter binding. Predicates
//! and their bound values are appended together by the builder, which keeps
//! placeholder numbering aligned whatever subset of filters is present.

use sea_orm::prelude::Expr;
use sea_orm::sea_query::{ExprTrait, Func, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select};

use crate::entity::catalog_part;
use crate::models::catalog::CatalogListQuery;
use crate::models::shared::{escape_like, normalize_optional};

/// Numeric comparison of the textual price column.
const PRICE_AS_DECIMAL: &str = r#"CAST("price" AS DECIMAL)"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSort {
    LowToHigh,
    HighToLow,
}

impl PriceSort {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low-to-high" => Some(Self::LowToHigh),
            "high-to-low" => Some(Self::HighToLow),
            _ => None,
        }
    }

    fn order(self) -> Order {
        match self {
            Self::LowToHigh => Order::Asc,
            Self::HighToLow => Order::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOrder {
    Asc,
    Desc,
}

impl NameOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    fn order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

/// Normalised catalog listing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price: Option<PriceSort>,
    pub order: Option<NameOrder>,
}

impl From<CatalogListQuery> for CatalogFilter {
    fn from(query: CatalogListQuery) -> Self {
        Self {
            name: normalize_optional(query.name),
            brand: normalize_optional(query.brand),
            category: normalize_optional(query.category),
            price: query.price.as_deref().and_then(PriceSort::parse),
            order: query.order.as_deref().and_then(NameOrder::parse),
        }
    }
}

impl CatalogFilter {
    /// Build the listing query.
    ///
    /// Filters are ANDed in the order name, brand, category. Price sort comes
    /// before name sort; without either the store's order is kept.
    pub fn select(&self) -> Select<catalog_part::Entity> {
        let mut select = catalog_part::Entity::find();

        if let Some(ref name) = self.name {
            let term = escape_like(&name.to_lowercase());
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(catalog_part::Column::Name)))
                    .like(LikeExpr::new(format!("%{term}%")).escape('\\')),
            );
        }
        if let Some(ref brand) = self.brand {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(catalog_part::Column::Brand)))
                    .eq(brand.to_lowercase()),
            );
        }
        if let Some(ref category) = self.category {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(catalog_part::Column::Category)))
                    .eq(category.to_lowercase()),
            );
        }

        if let Some(price) = self.price {
            select = select.order_by(Expr::cust(PRICE_AS_DECIMAL), price.order());
        }
        if let Some(order) = self.order {
            select = select.order_by(catalog_part::Column::Name, order.order());
        }

        select
    }
}

/// Distinct non-null values of one catalog column, ascending.
pub fn distinct_values(column: catalog_part::Column) -> Select<catalog_part::Entity> {
    catalog_part::Entity::find()
        .select_only()
        .column(column)
        .distinct()
        .filter(column.is_not_null())
        .order_by_asc(column)
}
