// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scanner tests against messages encoded by prost.

mod common;

use common::{sample_customer, varint_bytes, Customer, Item, Order, Scalars, Wire};
use prost::encoding::WireType as ProstWireType;
use prost::Message;
use protoscan::{ErrorKind, ScalarRead, ScanError, Scanner, WireType};

fn decode_scalars(data: &[u8]) -> Scalars {
    let mut out = Scalars::default();
    let mut scanner = Scanner::new(data);
    while scanner.advance() {
        match scanner.field_number() {
            1 => out.int32 = scanner.int32().unwrap(),
            2 => out.int64 = scanner.int64().unwrap(),
            3 => out.uint32 = scanner.uint32().unwrap(),
            4 => out.uint64 = scanner.uint64().unwrap(),
            5 => out.sint32 = scanner.sint32().unwrap(),
            6 => out.sint64 = scanner.sint64().unwrap(),
            7 => out.fixed32 = scanner.fixed32().unwrap(),
            8 => out.fixed64 = scanner.fixed64().unwrap(),
            9 => out.sfixed32 = scanner.sfixed32().unwrap(),
            10 => out.sfixed64 = scanner.sfixed64().unwrap(),
            11 => out.float = scanner.float().unwrap(),
            12 => out.double = scanner.double().unwrap(),
            13 => out.flag = scanner.bool().unwrap(),
            14 => out.name = scanner.string().unwrap().to_string(),
            15 => out.payload = scanner.bytes().unwrap().to_vec(),
            _ => scanner.skip(),
        }
    }
    assert!(scanner.error().is_none(), "{:?}", scanner.error());
    assert!(scanner.is_at_end());
    out
}

// ============================================================================
// Scalar Fields
// ============================================================================

#[test]
fn test_decode_all_scalar_types() {
    let msg = Scalars {
        int32: -42,
        int64: -9_000_000_000,
        uint32: 4_000_000_000,
        uint64: u64::MAX,
        sint32: -7,
        sint64: i64::MIN,
        fixed32: 0xDEAD_BEEF,
        fixed64: 0x0123_4567_89AB_CDEF,
        sfixed32: -1,
        sfixed64: i64::MIN + 1,
        float: 3.25,
        double: -1.0e300,
        flag: true,
        name: "héllo wörld".to_string(),
        payload: vec![0, 1, 2, 255],
    };
    assert_eq!(decode_scalars(&msg.encode_to_vec()), msg);
}

#[test]
fn test_decode_scalar_extremes() {
    let msg = Scalars {
        int32: i32::MIN,
        int64: i64::MAX,
        uint32: u32::MAX,
        uint64: 1,
        sint32: i32::MAX,
        sint64: i64::MAX,
        sfixed32: i32::MIN,
        sfixed64: i64::MAX,
        float: f32::MIN_POSITIVE,
        double: f64::MAX,
        ..Default::default()
    };
    assert_eq!(decode_scalars(&msg.encode_to_vec()), msg);
}

#[test]
fn test_zigzag_round_trip_through_prost() {
    for value in [0, 1, -1, i32::MAX, i32::MIN] {
        let msg = Scalars {
            sint32: value,
            sint64: i64::from(value),
            ..Default::default()
        };
        let decoded = decode_scalars(&msg.encode_to_vec());
        assert_eq!(decoded.sint32, value);
        assert_eq!(decoded.sint64, i64::from(value));
    }
    for value in [i64::MAX, i64::MIN] {
        let msg = Scalars {
            sint64: value,
            ..Default::default()
        };
        assert_eq!(decode_scalars(&msg.encode_to_vec()).sint64, value);
    }
}

#[test]
fn test_empty_message() {
    let mut scanner = Scanner::new(&[]);
    assert!(!scanner.advance());
    assert!(scanner.error().is_none());
    assert_eq!(scanner.field_number(), 0);
    assert_eq!(scanner.wire_type(), None);
}

// ============================================================================
// Framing
// ============================================================================

#[test]
fn test_skip_visits_every_field() {
    let data = sample_customer().encode_to_vec();
    let mut scanner = Scanner::new(&data);
    let mut fields = Vec::new();
    while scanner.advance() {
        fields.push(scanner.field_number());
        scanner.skip();
    }
    assert!(scanner.error().is_none());
    assert!(scanner.is_at_end());
    assert_eq!(fields, vec![1, 2, 2, 3, 4]);
}

#[test]
fn test_skip_all_wire_types() {
    let data = Wire::new()
        .varint(1, 300)
        .fixed64(2, 7)
        .bytes(3, b"abc")
        .fixed32(4, 9)
        .varint(5, u64::MAX)
        .build();
    let mut scanner = Scanner::new(&data);
    let mut seen = Vec::new();
    while scanner.advance() {
        seen.push((scanner.field_number(), scanner.wire_type()));
        scanner.skip();
    }
    assert!(scanner.error().is_none());
    assert_eq!(
        seen,
        vec![
            (1, Some(WireType::Varint)),
            (2, Some(WireType::Fixed64)),
            (3, Some(WireType::LengthDelimited)),
            (4, Some(WireType::Fixed32)),
            (5, Some(WireType::Varint)),
        ]
    );
}

#[test]
fn test_truncated_message_latches_error() {
    let mut data = sample_customer().encode_to_vec();
    data.pop();
    let mut scanner = Scanner::new(&data);
    while scanner.advance() {
        scanner.skip();
    }
    assert_eq!(
        scanner.error().map(ScanError::kind),
        Some(ErrorKind::UnexpectedEof)
    );
    // the error stays latched
    assert!(!scanner.advance());
}

#[test]
fn test_reserved_wire_type_latches_error() {
    let data = Wire::new().varint(1, 1).raw(&[0x17]).build();
    let mut scanner = Scanner::new(&data);
    assert!(scanner.advance());
    scanner.skip();
    assert!(!scanner.advance());
    assert_eq!(
        scanner.error(),
        Some(&ScanError::InvalidWireType {
            wire_type: 7,
            position: 2
        })
    );
}

#[test]
fn test_typed_read_error_is_not_latched() {
    // field 1 claims to be a fixed64 but only two bytes follow
    let data = Wire::new()
        .key(1, ProstWireType::SixtyFourBit)
        .raw(&[1, 2])
        .build();
    let mut scanner = Scanner::new(&data);
    assert!(scanner.advance());
    assert!(matches!(
        scanner.fixed64(),
        Err(ScanError::UnexpectedEof {
            position: 1,
            needed: 8
        })
    ));
    assert!(scanner.error().is_none());
}

#[test]
fn test_varint_overflow_boundaries() {
    let overlong = Wire::new().key(1, ProstWireType::Varint).raw(&[230; 10]).build();
    let mut scanner = Scanner::new(&overlong);
    assert!(scanner.advance());
    assert!(matches!(
        scanner.uint64(),
        Err(ScanError::IntegerOverflow { position: 1 })
    ));

    let short = Wire::new().key(1, ProstWireType::Varint).raw(&[230; 2]).build();
    let mut scanner = Scanner::new(&short);
    assert!(scanner.advance());
    assert!(matches!(
        scanner.uint64(),
        Err(ScanError::UnexpectedEof { .. })
    ));

    let overlong32 = Wire::new().key(1, ProstWireType::Varint).raw(&[230; 6]).build();
    let mut scanner = Scanner::new(&overlong32);
    assert!(scanner.advance());
    assert!(matches!(
        scanner.uint32(),
        Err(ScanError::IntegerOverflow { .. })
    ));

    let mut scanner = Scanner::new(&short);
    assert!(scanner.advance());
    assert!(matches!(
        scanner.uint32(),
        Err(ScanError::UnexpectedEof { .. })
    ));
}

#[test]
fn test_int32_sign_extended() {
    // negative int32 values are written as ten-byte varints
    let data = Scalars {
        int32: -1,
        ..Default::default()
    }
    .encode_to_vec();
    assert_eq!(data.len(), 11);
    let mut scanner = Scanner::new(&data);
    assert!(scanner.advance());
    assert_eq!(scanner.int32().unwrap(), -1);
}

#[test]
fn test_invalid_utf8_string() {
    let data = Wire::new().bytes(14, &[0xFF, 0xFE]).varint(1, 5).build();
    let mut scanner = Scanner::new(&data);
    assert!(scanner.advance());
    assert!(matches!(
        scanner.string(),
        Err(ScanError::InvalidUtf8 { .. })
    ));
    assert!(scanner.advance());
    assert_eq!(scanner.int32().unwrap(), 5);
}

#[test]
fn test_negative_length() {
    // length -1 as a ten-byte varint
    let data = Wire::new()
        .key(1, ProstWireType::LengthDelimited)
        .raw(&varint_bytes(u64::MAX))
        .build();
    let mut scanner = Scanner::new(&data);
    assert!(scanner.advance());
    assert!(matches!(
        scanner.bytes(),
        Err(ScanError::InvalidLength { .. })
    ));
}

// ============================================================================
// Sub-messages
// ============================================================================

fn decode_item(scanner: &mut Scanner<'_>) -> Item {
    let mut item = Item::default();
    while scanner.advance() {
        match scanner.field_number() {
            1 => item.sku = scanner.string().unwrap().to_string(),
            2 => item.quantity = scanner.uint32().unwrap(),
            3 => item.price = scanner.double().unwrap(),
            _ => scanner.skip(),
        }
    }
    assert!(scanner.error().is_none());
    item
}

fn decode_order(scanner: &mut Scanner<'_>) -> Order {
    let mut order = Order::default();
    while scanner.advance() {
        match scanner.field_number() {
            1 => order.id = scanner.uint64().unwrap(),
            2 => order.items.push(decode_item(&mut scanner.message().unwrap())),
            3 => scanner.repeated_sint32(&mut order.adjustments).unwrap(),
            _ => scanner.skip(),
        }
    }
    assert!(scanner.error().is_none());
    order
}

#[test]
fn test_nested_messages() {
    let customer = sample_customer();
    let data = customer.encode_to_vec();

    let mut decoded = Customer::default();
    let mut scanner = Scanner::new(&data);
    while scanner.advance() {
        match scanner.field_number() {
            1 => decoded.name = scanner.string().unwrap().to_string(),
            2 => decoded.orders.push(decode_order(&mut scanner.message().unwrap())),
            3 => decoded.primary = Some(decode_order(&mut scanner.message().unwrap())),
            4 => decoded.active = scanner.bool().unwrap(),
            _ => scanner.skip(),
        }
    }
    assert!(scanner.error().is_none());
    assert_eq!(decoded, customer);
}

#[test]
fn test_sub_scanner_is_isolated() {
    let data = Wire::new()
        .bytes(1, &Wire::new().varint(1, 5).raw(&[0x80]).build())
        .varint(2, 6)
        .build();
    let mut scanner = Scanner::new(&data);
    assert!(scanner.advance());
    let mut sub = scanner.message().unwrap();
    assert!(sub.advance());
    assert_eq!(sub.uint64().unwrap(), 5);
    // the sub-message ends in a truncated tag
    assert!(!sub.advance());
    assert!(sub.error().is_some());

    // the parent is unaffected
    assert!(scanner.error().is_none());
    assert!(scanner.advance());
    assert_eq!(scanner.field_number(), 2);
    assert_eq!(scanner.uint64().unwrap(), 6);
}

#[test]
fn test_message_into_reuses_scanner() {
    let data = sample_customer().encode_to_vec();
    let mut scanner = Scanner::new(&data);
    let mut sub = Scanner::default();
    let mut ids = Vec::new();
    while scanner.advance() {
        match scanner.field_number() {
            2 | 3 => {
                scanner.message_into(&mut sub).unwrap();
                ids.push(decode_order(&mut sub).id);
            }
            _ => scanner.skip(),
        }
    }
    assert_eq!(ids, vec![1, 2, 9]);
}

#[test]
fn test_message_data_hands_off_to_prost() {
    let customer = sample_customer();
    let data = customer.encode_to_vec();
    let mut scanner = Scanner::new(&data);
    let mut orders = Vec::new();
    while scanner.advance() {
        if scanner.field_number() == 2 {
            let raw = scanner.message_data().unwrap();
            orders.push(Order::decode(raw).unwrap());
        } else {
            scanner.skip();
        }
    }
    assert_eq!(orders, customer.orders);
}

#[test]
fn test_reset_and_reset_with() {
    let first = Wire::new().varint(1, 1).varint(1, 2).build();
    let second = Wire::new().varint(3, 30).build();

    let mut scanner = Scanner::new(&first);
    let mut sum = 0;
    while scanner.advance() {
        sum += scanner.uint64().unwrap();
    }
    scanner.reset();
    assert_eq!(scanner.position(), 0);
    while scanner.advance() {
        sum += scanner.uint64().unwrap();
    }
    assert_eq!(sum, 6);

    scanner.reset_with(&second);
    assert_eq!(scanner.remaining(), second.len());
    assert!(scanner.advance());
    assert_eq!(scanner.field_number(), 3);
    assert_eq!(scanner.uint64().unwrap(), 30);
}
