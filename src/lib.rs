//! Bodega
//!
//! Bodega is the storefront core for a small retail shop: catalog models, a
//! client-side shopping cart with persistent snapshots, deterministic order
//! bills, and HTTP clients for the catalog and admin APIs.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod ids;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod store;
pub mod summary;
