// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Stats command - per-field histogram of an encoded message.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::bail;
use clap::Args;
use serde::Serialize;

use crate::common::{consume, output_json_or, visit_path, FieldPath, InputArgs, Result};
use protoscan::{Scanner, WireType};

/// Show which fields a message contains and how much space they take.
#[derive(Args, Clone, Debug)]
pub struct StatsCmd {
    #[command(flatten)]
    pub input: InputArgs,

    /// Dotted path of embedded messages or groups to describe instead of the
    /// top-level message
    #[arg(value_name = "PATH")]
    pub path: Option<FieldPath>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCmd {
    pub fn run(self) -> Result<()> {
        let input = self.input.load()?;
        let data = input.as_bytes();

        let mut histogram = Histogram::default();
        match &self.path {
            None => histogram.add_message(data)?,
            Some(path) => {
                let mut scanner = Scanner::new(data);
                visit_path(&mut scanner, path.segments(), &mut |s| {
                    let body = match s.wire_type() {
                        Some(WireType::LengthDelimited) => s.message_data()?,
                        Some(WireType::StartGroup) => s.group_data()?,
                        other => bail!(
                            "Field {} is not a message (wire type {})",
                            s.field_number(),
                            other.map_or("none", WireType::as_str)
                        ),
                    };
                    histogram.add_message(body)
                })?;
            }
        }

        let report = StatsReport {
            input: self.input.input.display().to_string(),
            path: self.path.as_ref().map(FieldPath::to_string),
            messages: histogram.messages,
            total_bytes: histogram.bytes,
            fields: histogram.into_fields(),
        };

        output_json_or(self.json, &report, || {
            match &report.path {
                Some(path) => println!("=== Fields at {} in {} ===", path, report.input),
                None => println!("=== Fields in {} ===", report.input),
            }
            println!("Messages: {}", report.messages);
            println!("Bytes:    {}", report.total_bytes);
            println!();
            println!(
                "{:>8}  {:<24}  {:>11}  {:>12}",
                "FIELD", "WIRE TYPE", "OCCURRENCES", "BYTES"
            );
            for field in &report.fields {
                println!(
                    "{:>8}  {:<24}  {:>11}  {:>12}",
                    field.field_number,
                    field.wire_types.join(","),
                    field.occurrences,
                    field.bytes
                );
            }
            Ok(())
        })
    }
}

#[derive(Default)]
struct Histogram {
    messages: usize,
    bytes: usize,
    fields: BTreeMap<u32, FieldTally>,
}

#[derive(Default)]
struct FieldTally {
    wire_types: BTreeSet<u8>,
    occurrences: usize,
    bytes: usize,
}

impl Histogram {
    /// Tally the top-level fields of one encoded message.
    fn add_message(&mut self, data: &[u8]) -> Result<()> {
        let mut scanner = Scanner::new(data);
        let mut tag_start = 0;
        while scanner.advance() {
            let Some(field) = scanner.field() else {
                break;
            };
            consume(&mut scanner)?;

            let tally = self.fields.entry(field.number).or_default();
            tally.wire_types.insert(field.wire_type.bits());
            tally.occurrences += 1;
            tally.bytes += scanner.position() - tag_start;
            tag_start = scanner.position();
        }
        if let Some(err) = scanner.error() {
            return Err(err.clone().into());
        }

        self.messages += 1;
        self.bytes += data.len();
        Ok(())
    }

    fn into_fields(self) -> Vec<FieldStats> {
        self.fields
            .into_iter()
            .map(|(field_number, tally)| FieldStats {
                field_number,
                wire_types: tally
                    .wire_types
                    .into_iter()
                    .filter_map(WireType::from_bits)
                    .map(|wt| wt.as_str().to_string())
                    .collect(),
                occurrences: tally.occurrences,
                bytes: tally.bytes,
            })
            .collect()
    }
}

// Output types

#[derive(Serialize)]
struct StatsReport {
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    messages: usize,
    total_bytes: usize,
    fields: Vec<FieldStats>,
}

#[derive(Serialize)]
struct FieldStats {
    field_number: u32,
    wire_types: Vec<String>,
    occurrences: usize,
    /// Encoded size including tags
    bytes: usize,
}
