//! Quote provider abstraction and implementations.
//!
//! The rest of the crate only sees [`QuoteProvider`]; the Yahoo Finance
//! implementation lives in [`yahoo`].

mod traits;

pub mod yahoo;

pub use traits::QuoteProvider;
