//! # Resource Modules
//!
//! Typed endpoint wrappers for the external ERP API.
//!
//! ## Resource Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Resource Pattern Explained                           │
//! │                                                                         │
//! │  Each entity kind gets an accessor on ApiClient:                       │
//! │                                                                         │
//! │       api.products().list()                                            │
//! │       api.sales_orders().approve("so-17")                              │
//! │       api.returns().refund("ret-3")                                    │
//! │                                                                         │
//! │  The accessor borrows the client; the resource struct is free to      │
//! │  construct and holds no state of its own.                              │
//! │                                                                         │
//! │  Create/update methods run atlas-core validation FIRST: an invalid    │
//! │  payload never reaches the network.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Resources
//!
//! - [`catalog`] - products, categories, colors
//! - [`partners`] - customers, suppliers
//! - [`sales`] - sales orders, delivery orders
//! - [`billing`] - invoices, customer receipts, sales returns
//! - [`purchasing`] - purchase orders
//! - [`inventory`] - stock movements
//! - [`admin`] - users, roles

pub mod admin;
pub mod billing;
pub mod catalog;
pub mod inventory;
pub mod partners;
pub mod purchasing;
pub mod sales;
