//! # Response Orchestration
//!
//! The single handler shape both gateways share: verify (callbacks only) →
//! inspect the gateway's success flag → classify → envelope. Field names,
//! sub-code tables, and signing schemes all come from the descriptor; the
//! steps never vary.
//!
//! ## Diagnostics
//!
//! Exactly three conditions are reportable beyond ordinary business
//! failures, because they should never happen against a well-behaved
//! gateway: a callback without a signature, a callback whose signature
//! does not verify (both logged at error severity — the message must not
//! be trusted), and a sub-code outside the mapping tables (warn).

use unipay_core::{ErrorKind, FieldMap, ResponseEnvelope, SignedMessage, UnipayError};
use unipay_sign::SignatureCheck;
use unipay_state::{classify, QueryMode, TradeSnapshot};

use crate::descriptor::GatewayDescriptor;

/// Verify the signature on a callback's field map.
///
/// Exposed independently of full callback handling for callers that route
/// raw notifications before processing them. The signature field named by
/// the descriptor is read from `fields` and excluded from recomputation.
pub fn verify_callback_signature(
    descriptor: &GatewayDescriptor,
    fields: &FieldMap,
    secret: &str,
) -> bool {
    unipay_sign::verify(
        fields,
        fields.get(descriptor.signature_field),
        secret,
        descriptor.scheme,
        descriptor.signature_field,
    )
}

/// Handle an asynchronous, gateway-initiated callback.
///
/// Confirms authenticity and trade outcome; callbacks carry no business
/// data beyond success/failure, so the success payload is `()`.
///
/// An unverifiable callback is never inspected further — the envelope
/// reports `SignatureInvalid` and the remaining fields are discarded.
pub fn handle_callback(
    descriptor: &GatewayDescriptor,
    secret: &str,
    raw: FieldMap,
) -> Result<ResponseEnvelope<()>, UnipayError> {
    let message = SignedMessage::extract(raw, descriptor.signature_field);
    match unipay_sign::check(
        &message.fields,
        message.signature.as_deref(),
        secret,
        descriptor.scheme,
        descriptor.signature_field,
    ) {
        SignatureCheck::Missing => {
            tracing::error!(
                gateway = %descriptor.gateway,
                "callback carried no signature; possible tampering in transit"
            );
            return Ok(ResponseEnvelope::failure(ErrorKind::SignatureInvalid));
        }
        SignatureCheck::Mismatch => {
            tracing::error!(
                gateway = %descriptor.gateway,
                "callback signature did not verify; possible tampering in transit"
            );
            return Ok(ResponseEnvelope::failure(ErrorKind::SignatureInvalid));
        }
        SignatureCheck::Valid => {}
    }

    let flag = (descriptor.success_flag)(&message.fields)?;
    let status = (descriptor.trade_status)(&message.fields);

    // A flag-true callback without a status field IS the outcome; when a
    // status is present it must confirm unambiguous success.
    let outcome = match status {
        None if flag => Ok(()),
        _ => classify(
            &descriptor.vocabulary,
            flag,
            (descriptor.sub_code)(&message.fields),
            status,
            QueryMode::ConfirmSuccess,
        )
        .map(|_| ()),
    };

    Ok(match outcome {
        Ok(()) => ResponseEnvelope::success(()),
        Err(kind) => {
            warn_if_unmapped(descriptor, &kind);
            ResponseEnvelope::failure(kind)
        }
    })
}

/// Handle a synchronous order-query response.
///
/// Query responses ride the authenticated request channel, so no
/// signature verification applies here — that is a callback-only step.
/// In [`QueryMode::Observe`] the snapshot reports whatever state the
/// gateway currently sees; in [`QueryMode::ConfirmSuccess`] anything
/// short of unambiguous success is a typed failure.
pub fn handle_query_response(
    descriptor: &GatewayDescriptor,
    raw: &FieldMap,
    mode: QueryMode,
) -> Result<ResponseEnvelope<TradeSnapshot>, UnipayError> {
    let flag = (descriptor.success_flag)(raw)?;

    Ok(
        match classify(
            &descriptor.vocabulary,
            flag,
            (descriptor.sub_code)(raw),
            (descriptor.trade_status)(raw),
            mode,
        ) {
            Ok(mut snapshot) => {
                snapshot.paid_at = (descriptor.paid_at)(raw);
                ResponseEnvelope::success(snapshot)
            }
            Err(kind) => {
                warn_if_unmapped(descriptor, &kind);
                ResponseEnvelope::failure(kind)
            }
        },
    )
}

fn warn_if_unmapped(descriptor: &GatewayDescriptor, kind: &ErrorKind) {
    if let ErrorKind::Unknown { code, message } = kind {
        tracing::warn!(
            gateway = %descriptor.gateway,
            code = %code,
            message = %message,
            "gateway sub-code outside the mapping tables"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unipay_core::SigningInput;
    use unipay_sign::sign;
    use unipay_state::TradeState;

    const SECRET: &str = "k";

    fn signed(descriptor: &GatewayDescriptor, mut fields: FieldMap) -> FieldMap {
        let sig = sign(
            &SigningInput::new(&fields, descriptor.signature_field),
            SECRET,
            descriptor.scheme,
        )
        .unwrap();
        fields.insert(descriptor.signature_field, sig);
        fields
    }

    fn wechat_notify() -> FieldMap {
        [
            ("return_code", "SUCCESS"),
            ("result_code", "SUCCESS"),
            ("out_trade_no", "A1"),
            ("total_fee", "100"),
        ]
        .into_iter()
        .collect()
    }

    // ── Callbacks ────────────────────────────────────────────────────

    #[test]
    fn genuine_callback_accepted() {
        let desc = crate::wechat::descriptor();
        let fields = signed(&desc, wechat_notify());
        let envelope = handle_callback(&desc, SECRET, fields).unwrap();
        assert!(envelope.is_success());
    }

    #[test]
    fn bogus_signature_rejected_without_inspection() {
        let desc = crate::wechat::descriptor();
        let mut fields = wechat_notify();
        fields.insert("sign", "bogus");
        let envelope = handle_callback(&desc, SECRET, fields).unwrap();
        assert_eq!(envelope.error(), Some(&ErrorKind::SignatureInvalid));
    }

    #[test]
    fn absent_signature_rejected() {
        let desc = crate::wechat::descriptor();
        let envelope = handle_callback(&desc, SECRET, wechat_notify()).unwrap();
        assert_eq!(envelope.error(), Some(&ErrorKind::SignatureInvalid));
    }

    #[test]
    fn tampered_amount_rejected() {
        let desc = crate::wechat::descriptor();
        let mut fields = signed(&desc, wechat_notify());
        fields.insert("total_fee", "1");
        let envelope = handle_callback(&desc, SECRET, fields).unwrap();
        assert_eq!(envelope.error(), Some(&ErrorKind::SignatureInvalid));
    }

    #[test]
    fn business_failure_in_callback_maps_sub_code() {
        let desc = crate::wechat::descriptor();
        let fields = signed(
            &desc,
            [
                ("return_code", "SUCCESS"),
                ("result_code", "FAIL"),
                ("err_code", "ORDERNOTEXIST"),
                ("err_code_des", "order does not exist"),
            ]
            .into_iter()
            .collect(),
        );
        let envelope = handle_callback(&desc, SECRET, fields).unwrap();
        assert_eq!(envelope.error(), Some(&ErrorKind::OrderNotExist));
    }

    #[test]
    fn signed_json_callback_with_status_confirms_strictly() {
        let desc = crate::alipay::descriptor();
        let fields = signed(
            &desc,
            [
                ("code", "10000"),
                ("out_trade_no", "A1"),
                ("trade_status", "WAIT_BUYER_PAY"),
            ]
            .into_iter()
            .collect(),
        );
        let envelope = handle_callback(&desc, SECRET, fields).unwrap();
        assert_eq!(envelope.error(), Some(&ErrorKind::AwaitingPayment));
    }

    #[test]
    fn malformed_callback_is_a_fault_not_an_outcome() {
        let desc = crate::wechat::descriptor();
        // Signed, but the success-flag field is absent entirely.
        let fields = signed(&desc, [("out_trade_no", "A1")].into_iter().collect());
        assert!(handle_callback(&desc, SECRET, fields).is_err());
    }

    // ── Queries ──────────────────────────────────────────────────────

    #[test]
    fn observe_mode_reports_state_and_paid_at() {
        let desc = crate::wechat::descriptor();
        let raw: FieldMap = [
            ("return_code", "SUCCESS"),
            ("result_code", "SUCCESS"),
            ("trade_state", "SUCCESS"),
            ("time_end", "20190715171930"),
        ]
        .into_iter()
        .collect();
        let envelope = handle_query_response(&desc, &raw, QueryMode::Observe).unwrap();
        let snapshot = envelope.data().unwrap();
        assert_eq!(snapshot.state, Some(TradeState::Succeeded));
        assert!(snapshot.paid_at.is_some());
    }

    #[test]
    fn strict_query_on_closed_order() {
        let desc = crate::alipay::descriptor();
        let raw: FieldMap = [("code", "10000"), ("trade_status", "TRADE_CLOSED")]
            .into_iter()
            .collect();
        let envelope = handle_query_response(&desc, &raw, QueryMode::ConfirmSuccess).unwrap();
        assert_eq!(envelope.error(), Some(&ErrorKind::TradeClosed));
    }

    #[test]
    fn query_failure_without_sub_code() {
        let desc = crate::alipay::descriptor();
        let raw: FieldMap = [("code", "40004")].into_iter().collect();
        let envelope = handle_query_response(&desc, &raw, QueryMode::Observe).unwrap();
        assert_eq!(envelope.error(), Some(&ErrorKind::GatewayServerError));
    }

    #[test]
    fn unmapped_sub_code_surfaces_verbatim() {
        let desc = crate::alipay::descriptor();
        let raw: FieldMap = [
            ("code", "40004"),
            ("sub_code", "ACQ.ACCESS_FORBIDDEN"),
            ("sub_msg", "no permission"),
        ]
        .into_iter()
        .collect();
        let envelope = handle_query_response(&desc, &raw, QueryMode::Observe).unwrap();
        assert_eq!(
            envelope.error(),
            Some(&ErrorKind::Unknown {
                code: "ACQ.ACCESS_FORBIDDEN".to_string(),
                message: "no permission".to_string(),
            })
        );
    }

    // ── Standalone verification ──────────────────────────────────────

    #[test]
    fn standalone_signature_check() {
        let desc = crate::wechat::descriptor();
        let fields = signed(&desc, wechat_notify());
        assert!(verify_callback_signature(&desc, &fields, SECRET));
        assert!(!verify_callback_signature(&desc, &fields, "wrong"));
        assert!(!verify_callback_signature(&desc, &wechat_notify(), SECRET));
    }
}
