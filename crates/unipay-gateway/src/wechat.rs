//! # Signed-XML Gateway Descriptor
//!
//! Response conventions of the XML-style gateway: success is two-layered
//! (`return_code` for protocol-level acceptance, `result_code` for the
//! business outcome), failures qualify themselves through
//! `err_code`/`err_code_des`, and query responses report the lifecycle in
//! `trade_state`. Asynchronous callbacks carry `result_code` but no
//! `trade_state` — the flag is the outcome there.

use chrono::NaiveDateTime;

use unipay_core::{FieldMap, GatewayKind, UnipayError};
use unipay_sign::SignScheme;
use unipay_state::StatusVocabulary;

use crate::descriptor::GatewayDescriptor;

const SUCCESS: &str = "SUCCESS";

/// `time_end` arrives as `20190715171930` in gateway local time.
const TIME_END_FORMAT: &str = "%Y%m%d%H%M%S";

/// The descriptor for the signed-XML gateway.
pub fn descriptor() -> GatewayDescriptor {
    GatewayDescriptor {
        gateway: GatewayKind::Wechat,
        scheme: SignScheme::HmacSha256,
        signature_field: "sign",
        vocabulary: StatusVocabulary {
            gateway: GatewayKind::Wechat,
            succeeded: &["SUCCESS"],
            awaiting: &["NOTPAY", "USERPAYING"],
            closed: &["CLOSED", "REVOKED"],
            finished: &[],
        },
        success_flag,
        sub_code,
        trade_status,
        paid_at,
    }
}

fn success_flag(fields: &FieldMap) -> Result<bool, UnipayError> {
    match fields.get("return_code") {
        None => Err(UnipayError::missing("return_code")),
        Some(rc) if rc != SUCCESS => Ok(false),
        Some(_) => match fields.get("result_code") {
            Some(result) => Ok(result == SUCCESS),
            None => Err(UnipayError::missing("result_code")),
        },
    }
}

fn sub_code(fields: &FieldMap) -> Option<(&str, &str)> {
    let code = fields.get("err_code")?;
    Some((code, fields.get("err_code_des").unwrap_or_default()))
}

fn trade_status(fields: &FieldMap) -> Option<&str> {
    fields.get("trade_state")
}

fn paid_at(fields: &FieldMap) -> Option<NaiveDateTime> {
    fields
        .get("time_end")
        .and_then(|s| NaiveDateTime::parse_from_str(s, TIME_END_FORMAT).ok())
}
