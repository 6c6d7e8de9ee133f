// ABOUTME: Classifies inbound deliver_sm traffic into delivery receipts and MO messages
// ABOUTME: Implements the engine's PDU-received callback and produces acknowledgements

use crate::engine::{DeliverAck, InboundHandler, InboundPdu};
use tracing::info;

/// Classifier registered as the engine's inbound PDU callback.
///
/// Runs synchronously on the engine's receive path: inspects the ESM class
/// delivery-receipt bit, logs the payload under the matching category and
/// answers with the protocol-mandated acknowledgement. Inbound PDUs are
/// never retained. A `None` return tells the engine not to acknowledge;
/// the engine must always tolerate that.
#[derive(Debug, Default)]
pub struct InboundClassifier;

impl InboundClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl InboundHandler for InboundClassifier {
    fn on_pdu(&self, pdu: Option<InboundPdu>) -> Option<DeliverAck> {
        let pdu = pdu?;
        // Payloads are logged lossily; a binary MO body must not be able to
        // fail the handler.
        let text = String::from_utf8_lossy(&pdu.payload);
        if pdu.is_delivery_receipt() {
            info!("received delivery report: {}", text);
        } else {
            info!("received MO message: {}", text);
        }
        Some(pdu.ack())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        Address, CommandStatus, ESM_CLASS_MT_SMSC_DELIVERY_RECEIPT,
    };
    use bytes::Bytes;

    fn inbound(esm_class: u8, payload: &'static [u8]) -> InboundPdu {
        InboundPdu {
            sequence_number: 9,
            source: Address::international("12345"),
            dest: Address::international("54321"),
            esm_class,
            payload: Bytes::from_static(payload),
        }
    }

    #[test]
    fn delivery_receipt_is_acknowledged() {
        let classifier = InboundClassifier::new();
        let ack = classifier
            .on_pdu(Some(inbound(ESM_CLASS_MT_SMSC_DELIVERY_RECEIPT, b"id:1 stat:DELIVRD")))
            .expect("receipt must be acknowledged");
        assert_eq!(ack.sequence_number, 9);
        assert_eq!(ack.command_status, CommandStatus::Ok);
    }

    #[test]
    fn mobile_originated_message_is_acknowledged() {
        let classifier = InboundClassifier::new();
        let ack = classifier.on_pdu(Some(inbound(0, b"hello from handset")));
        assert!(ack.is_some());
    }

    #[test]
    fn missing_pdu_gets_no_response() {
        let classifier = InboundClassifier::new();
        assert!(classifier.on_pdu(None).is_none());
    }

    #[test]
    fn binary_payload_is_still_acknowledged() {
        let classifier = InboundClassifier::new();
        let ack = classifier.on_pdu(Some(inbound(0, &[0xFF, 0xFE, 0x00, 0x80])));
        assert!(ack.is_some());
    }
}
