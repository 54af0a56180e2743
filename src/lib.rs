#![doc(test(attr(deny(warnings))))]

//! Property Core offers the recurring fixed-expense ledger primitives that
//! power property back-office workflows: obligation lifecycle management,
//! due-date scheduling, and bank-style statement projection.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Property Core tracing initialized.");
    });
}
