// ABOUTME: Value types exchanged across the SMPP engine seam
// ABOUTME: Covers bind configuration, addresses, submission requests and inbound PDUs

use bytes::Bytes;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// ESM class bit marking a mobile-terminated SMSC delivery receipt on an
/// inbound `deliver_sm` (SMPP v3.4, Section 5.2.12).
pub const ESM_CLASS_MT_SMSC_DELIVERY_RECEIPT: u8 = 0x04;

/// registered_delivery value requesting an SMSC delivery receipt.
pub const REGISTERED_DELIVERY_SMSC_RECEIPT_REQUESTED: u8 = 0x01;

/// SMPP type_of_number values (SMPP v3.4, Section 5.2.5).
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeOfNumber {
    Unknown = 0b00000000,
    International = 0b00000001,
    National = 0b00000010,
    NetworkSpecific = 0b00000011,
    SubscriberNumber = 0b00000100,
    Alphanumeric = 0b00000101,
    Abbreviated = 0b00000110,
}

/// SMPP numbering_plan_indicator values (SMPP v3.4, Section 5.2.6).
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumericPlanIndicator {
    Unknown = 0b00000000,
    Isdn = 0b00000001,
    Data = 0b00000011,
    Telex = 0b00000100,
    LandMobile = 0b00000110,
    National = 0b00001000,
    Private = 0b00001001,
    Ermes = 0b00001010,
    Internet = 0b00001110,
}

/// Subset of SMPP command_status values the orchestration layer inspects.
///
/// Returned by the engine in bind and submit responses; anything outside the
/// subset is surfaced through the engine's error strings instead.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandStatus {
    /// No error
    Ok = 0x00000000,
    /// Message length is invalid
    InvalidMsgLength = 0x00000001,
    /// Incorrect bind status for given command
    IncorrectBindStatus = 0x00000004,
    /// ESME already in bound state
    AlreadyBound = 0x00000005,
    /// System error
    SystemError = 0x00000008,
    /// Invalid source address
    InvalidSourceAddress = 0x0000000A,
    /// Invalid destination address
    InvalidDestinationAddress = 0x0000000B,
    /// Bind failed
    BindFailed = 0x0000000D,
    /// Invalid password
    InvalidPassword = 0x0000000E,
    /// Invalid system_id
    InvalidSystemId = 0x0000000F,
    /// Message queue full
    MessageQueueFull = 0x00000014,
    /// Throttling error (ESME exceeded allowed message limits)
    ThrottlingError = 0x00000058,
}

/// An SMPP address: type of number, numbering plan and the digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub ton: TypeOfNumber,
    pub npi: NumericPlanIndicator,
    pub digits: String,
}

impl Address {
    /// Creates an address with explicit TON/NPI.
    pub fn new(ton: TypeOfNumber, npi: NumericPlanIndicator, digits: impl Into<String>) -> Self {
        Self {
            ton,
            npi,
            digits: digits.into(),
        }
    }

    /// Creates an international ISDN address, the only form the gateway
    /// surface uses for source and destination numbers.
    pub fn international(digits: impl Into<String>) -> Self {
        Self::new(TypeOfNumber::International, NumericPlanIndicator::Isdn, digits)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits)
    }
}

/// Type of SMPP bind operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindType {
    /// Bind as transmitter (can send submit_sm)
    Transmitter,
    /// Bind as receiver (can receive deliver_sm)
    Receiver,
    /// Bind as transceiver (both capabilities on one connection)
    Transceiver,
}

/// Everything the engine needs to perform a bind handshake.
#[derive(Debug, Clone)]
pub struct BindConfig {
    /// Bind mode; the gateway always binds as transceiver so it can both
    /// submit messages and receive deliver_sm traffic.
    pub bind_type: BindType,
    /// SMSC host name or address
    pub host: String,
    /// SMSC port
    pub port: u16,
    /// System identifier for authentication
    pub system_id: String,
    /// Password for authentication
    pub password: String,
    /// Optional system type forwarded in the bind PDU
    pub system_type: Option<String>,
}

impl BindConfig {
    /// Creates a transceiver bind configuration.
    pub fn transceiver(
        host: impl Into<String>,
        port: u16,
        system_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            bind_type: BindType::Transceiver,
            host: host.into(),
            port,
            system_id: system_id.into(),
            password: password.into(),
            system_type: None,
        }
    }
}

/// One outbound submission handed to the engine.
///
/// The payload is the final wire short_message content; for concatenated
/// parts it already carries the UDH produced by the segmenter.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub source: Address,
    pub dest: Address,
    pub payload: Bytes,
    pub registered_delivery: u8,
}

impl SubmitRequest {
    /// Creates a request between two international ISDN numbers.
    pub fn international(
        from: impl Into<String>,
        to: impl Into<String>,
        payload: Bytes,
        registered_delivery: u8,
    ) -> Self {
        Self {
            source: Address::international(from),
            dest: Address::international(to),
            payload,
            registered_delivery,
        }
    }
}

/// The SMSC's response to a synchronous submission.
#[derive(Debug, Clone)]
pub struct SubmitResponse {
    /// SMSC-assigned message id
    pub message_id: String,
    pub command_status: CommandStatus,
}

/// A `deliver_sm` received from the SMSC while bound as transceiver.
#[derive(Debug, Clone)]
pub struct InboundPdu {
    /// Sequence number the acknowledgement must echo
    pub sequence_number: u32,
    pub source: Address,
    pub dest: Address,
    /// Raw esm_class bit field from the PDU header
    pub esm_class: u8,
    pub payload: Bytes,
}

impl InboundPdu {
    /// Whether the delivery-receipt ESM class bit is set.
    pub fn is_delivery_receipt(&self) -> bool {
        self.esm_class & ESM_CLASS_MT_SMSC_DELIVERY_RECEIPT
            == ESM_CLASS_MT_SMSC_DELIVERY_RECEIPT
    }

    /// Builds the protocol-mandated `deliver_sm_resp` for this PDU.
    pub fn ack(&self) -> DeliverAck {
        DeliverAck {
            sequence_number: self.sequence_number,
            command_status: CommandStatus::Ok,
        }
    }
}

/// Acknowledgement returned to the engine for an inbound PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliverAck {
    pub sequence_number: u32,
    pub command_status: CommandStatus,
}
