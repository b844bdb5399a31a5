//! # unipay-gateway — Descriptors and Response Orchestration
//!
//! The outward face of the unipay stack. One orchestration shape —
//! verify (callbacks only), read the success flag, classify, envelope —
//! parametrized by a [`GatewayDescriptor`] value per gateway. There is no
//! handler type hierarchy; adding a gateway means writing a descriptor.
//!
//! ## Entry Points
//!
//! - [`handle_callback`] — authenticate and classify an asynchronous
//!   notification.
//! - [`handle_query_response`] — classify a synchronous order-query
//!   response, in observe or confirm-success mode.
//! - [`verify_callback_signature`] — the verification primitive on its
//!   own, for callers that gate routing on authenticity.
//!
//! ```
//! use unipay_gateway::{alipay, handle_query_response};
//! use unipay_state::QueryMode;
//! use unipay_core::FieldMap;
//!
//! let raw: FieldMap = [("code", "10000"), ("trade_status", "TRADE_SUCCESS")]
//!     .into_iter()
//!     .collect();
//! let envelope = handle_query_response(&alipay::descriptor(), &raw, QueryMode::ConfirmSuccess)
//!     .expect("well-formed response");
//! assert!(envelope.is_success());
//! ```

pub mod alipay;
pub mod descriptor;
pub mod handler;
pub mod wechat;

pub use descriptor::GatewayDescriptor;
pub use handler::{handle_callback, handle_query_response, verify_callback_signature};
