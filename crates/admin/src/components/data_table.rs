//! Data table component types.
//!
//! These types define the configuration for the admin list tables: header
//! columns, the status filter on orders, and the empty-state text.

use food_store_core::OrderStatus;
use food_store_core::catalog::OrderFilter;

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
    /// Right-align numeric columns.
    pub numeric: bool,
}

impl TableColumn {
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            numeric: false,
        }
    }

    #[must_use]
    pub const fn numeric(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            numeric: true,
        }
    }
}

/// Option for select filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Option value.
    pub value: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Whether this option is the active one.
    pub selected: bool,
}

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: &'static str,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Title for empty state.
    pub empty_title: &'static str,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub const fn new(table_id: &'static str) -> Self {
        Self {
            table_id,
            columns: Vec::new(),
            empty_title: "No hay elementos para mostrar",
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set empty state title.
    #[must_use]
    pub const fn empty_state(mut self, title: &'static str) -> Self {
        self.empty_title = title;
        self
    }
}

/// Build the categories table configuration.
#[must_use]
pub fn categories_table_config() -> DataTableConfig {
    DataTableConfig::new("categories")
        .column(TableColumn::numeric("id", "ID"))
        .column(TableColumn::new("name", "Nombre"))
        .column(TableColumn::new("description", "Descripción"))
        .column(TableColumn::new("actions", "Acciones"))
        .empty_state("No hay categorías cargadas")
}

/// Build the products table configuration.
#[must_use]
pub fn products_table_config() -> DataTableConfig {
    DataTableConfig::new("products")
        .column(TableColumn::numeric("id", "ID"))
        .column(TableColumn::new("image", "Imagen"))
        .column(TableColumn::new("name", "Nombre"))
        .column(TableColumn::new("description", "Descripción"))
        .column(TableColumn::numeric("price", "Precio"))
        .column(TableColumn::new("category", "Categoría"))
        .column(TableColumn::numeric("stock", "Stock"))
        .column(TableColumn::new("available", "Estado"))
        .column(TableColumn::new("actions", "Acciones"))
        .empty_state("No hay productos cargados")
}

/// Build the orders table configuration.
#[must_use]
pub fn orders_table_config() -> DataTableConfig {
    DataTableConfig::new("orders")
        .column(TableColumn::numeric("id", "Pedido"))
        .column(TableColumn::new("customer", "Cliente"))
        .column(TableColumn::new("date", "Fecha"))
        .column(TableColumn::numeric("items", "Productos"))
        .column(TableColumn::numeric("total", "Total"))
        .column(TableColumn::new("status", "Estado"))
        .column(TableColumn::new("actions", ""))
        .empty_state("No hay pedidos para mostrar")
}

/// Options for the order status filter, with `active` pre-selected.
#[must_use]
pub fn order_status_options(active: OrderFilter) -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: OrderFilter::All.as_str(),
        label: "Todos",
        selected: active == OrderFilter::All,
    })
    .chain(OrderStatus::ALL.into_iter().map(|status| FilterOption {
        value: status.as_str(),
        label: status.label(),
        selected: active == OrderFilter::Status(status),
    }))
    .collect()
}
