//! # Signed-JSON Gateway Descriptor
//!
//! Response conventions of the JSON-style gateway: a four-digit `code`
//! field flags success (`"10000"`), failures qualify themselves through
//! `sub_code`/`sub_msg`, and the order lifecycle is reported in
//! `trade_status`.

use chrono::NaiveDateTime;

use unipay_core::{FieldMap, GatewayKind, UnipayError};
use unipay_sign::SignScheme;
use unipay_state::StatusVocabulary;

use crate::descriptor::GatewayDescriptor;

/// Gateway success code.
const CODE_OK: &str = "10000";

/// `send_pay_date` arrives as `2019-07-15 17:19:30` in gateway local time.
const PAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The descriptor for the signed-JSON gateway.
pub fn descriptor() -> GatewayDescriptor {
    GatewayDescriptor {
        gateway: GatewayKind::Alipay,
        scheme: SignScheme::KeyedSha256,
        signature_field: "sign",
        vocabulary: StatusVocabulary {
            gateway: GatewayKind::Alipay,
            succeeded: &["TRADE_SUCCESS"],
            awaiting: &["WAIT_BUYER_PAY"],
            closed: &["TRADE_CLOSED"],
            finished: &["TRADE_FINISHED"],
        },
        success_flag,
        sub_code,
        trade_status,
        paid_at,
    }
}

fn success_flag(fields: &FieldMap) -> Result<bool, UnipayError> {
    match fields.get("code") {
        Some(code) => Ok(code == CODE_OK),
        None => Err(UnipayError::missing("code")),
    }
}

fn sub_code(fields: &FieldMap) -> Option<(&str, &str)> {
    let code = fields.get("sub_code")?;
    Some((code, fields.get("sub_msg").unwrap_or_default()))
}

fn trade_status(fields: &FieldMap) -> Option<&str> {
    fields.get("trade_status")
}

fn paid_at(fields: &FieldMap) -> Option<NaiveDateTime> {
    fields
        .get("send_pay_date")
        .and_then(|s| NaiveDateTime::parse_from_str(s, PAY_DATE_FORMAT).ok())
}
