// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use prost::encoding::{encode_key, encode_varint, WireType};

// ============================================================================
// Test Messages
// ============================================================================

/// One field of every scalar type.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Scalars {
    #[prost(int32, tag = "1")]
    pub int32: i32,
    #[prost(int64, tag = "2")]
    pub int64: i64,
    #[prost(uint32, tag = "3")]
    pub uint32: u32,
    #[prost(uint64, tag = "4")]
    pub uint64: u64,
    #[prost(sint32, tag = "5")]
    pub sint32: i32,
    #[prost(sint64, tag = "6")]
    pub sint64: i64,
    #[prost(fixed32, tag = "7")]
    pub fixed32: u32,
    #[prost(fixed64, tag = "8")]
    pub fixed64: u64,
    #[prost(sfixed32, tag = "9")]
    pub sfixed32: i32,
    #[prost(sfixed64, tag = "10")]
    pub sfixed64: i64,
    #[prost(float, tag = "11")]
    pub float: f32,
    #[prost(double, tag = "12")]
    pub double: f64,
    #[prost(bool, tag = "13")]
    pub flag: bool,
    #[prost(string, tag = "14")]
    pub name: String,
    #[prost(bytes = "vec", tag = "15")]
    pub payload: Vec<u8>,
}

/// Repeated numeric fields, encoded packed.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Packed {
    #[prost(int32, repeated, tag = "1")]
    pub int32: Vec<i32>,
    #[prost(sint64, repeated, tag = "2")]
    pub sint64: Vec<i64>,
    #[prost(fixed32, repeated, tag = "3")]
    pub fixed32: Vec<u32>,
    #[prost(double, repeated, tag = "4")]
    pub double: Vec<f64>,
    #[prost(bool, repeated, tag = "5")]
    pub flags: Vec<bool>,
    #[prost(uint64, repeated, tag = "6")]
    pub uint64: Vec<u64>,
}

/// The same fields as [`Packed`], encoded one tag per value.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Unpacked {
    #[prost(int32, repeated, packed = "false", tag = "1")]
    pub int32: Vec<i32>,
    #[prost(sint64, repeated, packed = "false", tag = "2")]
    pub sint64: Vec<i64>,
    #[prost(fixed32, repeated, packed = "false", tag = "3")]
    pub fixed32: Vec<u32>,
    #[prost(double, repeated, packed = "false", tag = "4")]
    pub double: Vec<f64>,
    #[prost(bool, repeated, packed = "false", tag = "5")]
    pub flags: Vec<bool>,
    #[prost(uint64, repeated, packed = "false", tag = "6")]
    pub uint64: Vec<u64>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Item {
    #[prost(string, tag = "1")]
    pub sku: String,
    #[prost(uint32, tag = "2")]
    pub quantity: u32,
    #[prost(double, tag = "3")]
    pub price: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Order {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(message, repeated, tag = "2")]
    pub items: Vec<Item>,
    #[prost(sint32, repeated, tag = "3")]
    pub adjustments: Vec<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Customer {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, repeated, tag = "2")]
    pub orders: Vec<Order>,
    #[prost(message, optional, tag = "3")]
    pub primary: Option<Order>,
    #[prost(bool, tag = "4")]
    pub active: bool,
}

/// A customer with two orders and a primary order.
pub fn sample_customer() -> Customer {
    let item = |sku: &str, quantity, price| Item {
        sku: sku.to_string(),
        quantity,
        price,
    };
    Customer {
        name: "Ada".to_string(),
        orders: vec![
            Order {
                id: 1,
                items: vec![item("apple", 3, 0.5), item("pear", 1, 0.75)],
                adjustments: vec![-5, 10],
            },
            Order {
                id: 2,
                items: vec![item("plum", 12, 0.2)],
                adjustments: vec![],
            },
        ],
        primary: Some(Order {
            id: 9,
            items: vec![],
            adjustments: vec![-1],
        }),
        active: true,
    }
}

// ============================================================================
// Hand-built Wire Data
// ============================================================================

/// Builder for wire data prost cannot produce directly (groups, split
/// repeated fields, malformed input).
#[derive(Debug, Default, Clone)]
pub struct Wire {
    buf: Vec<u8>,
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, field: u32, wire_type: WireType) -> Self {
        encode_key(field, wire_type, &mut self.buf);
        self
    }

    pub fn varint(mut self, field: u32, value: u64) -> Self {
        encode_key(field, WireType::Varint, &mut self.buf);
        encode_varint(value, &mut self.buf);
        self
    }

    pub fn fixed32(mut self, field: u32, value: u32) -> Self {
        encode_key(field, WireType::ThirtyTwoBit, &mut self.buf);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn fixed64(mut self, field: u32, value: u64) -> Self {
        encode_key(field, WireType::SixtyFourBit, &mut self.buf);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn bytes(mut self, field: u32, payload: &[u8]) -> Self {
        encode_key(field, WireType::LengthDelimited, &mut self.buf);
        encode_varint(payload.len() as u64, &mut self.buf);
        self.buf.extend_from_slice(payload);
        self
    }

    /// A packed block of varints.
    pub fn packed_varints(self, field: u32, values: &[u64]) -> Self {
        let mut payload = Vec::new();
        for &value in values {
            encode_varint(value, &mut payload);
        }
        self.bytes(field, &payload)
    }

    /// A group whose body is `body`.
    pub fn group(self, field: u32, body: &[u8]) -> Self {
        let mut wire = self.key(field, WireType::StartGroup);
        wire.buf.extend_from_slice(body);
        wire.key(field, WireType::EndGroup)
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode a varint on its own.
pub fn varint_bytes(value: u64) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_varint(value, &mut buf);
    buf
}
