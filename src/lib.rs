//! library_catalog - books, categories and the associations between them
//!
//! A REST service over a relational store. The interesting part is the
//! book service: year validation, the three-category limit, and full
//! replacement of a book's category set on update.

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod storage;
