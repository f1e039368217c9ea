//! Proxy admin table pages
//!
//! Typed records of the proxy manager backend and the table definitions of
//! each admin page: columns, filters, grouping and bulk actions, ready to
//! drive a [`datagrid::DataTable`].

pub mod api;
pub mod error;
pub mod model;
pub mod pages;
