// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Extract command - pull the raw payload of one field out of a message.

use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::Args;

use crate::common::{consume, visit_path, FieldPath, InputArgs, Result};
use protoscan::{Scanner, WireType};

/// Extract the payload of a length-delimited field or group.
#[derive(Args, Clone, Debug)]
pub struct ExtractCmd {
    #[command(flatten)]
    pub input: InputArgs,

    /// Dotted path of field numbers, e.g. `3.2`
    #[arg(value_name = "PATH")]
    pub path: FieldPath,

    /// Which occurrence to extract, counting from 0 across the whole message
    #[arg(short, long, default_value = "0")]
    pub index: usize,

    /// Write the raw payload to this file instead of printing hex
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExtractCmd {
    pub fn run(self) -> Result<()> {
        let input = self.input.load()?;
        let mut scanner = Scanner::new(input.as_bytes());

        let Some(payload) = extract_payload(&mut scanner, self.path.segments(), self.index)? else {
            bail!("Field {} has no occurrence {}", self.path, self.index);
        };

        match &self.output {
            Some(output) => {
                std::fs::write(output, payload)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                println!("Wrote {} bytes to {}", payload.len(), output.display());
            }
            None => println!("{}", hex::encode(payload)),
        }
        Ok(())
    }
}

/// Find the `index`-th occurrence of `path` and return its payload.
fn extract_payload<'a>(
    scanner: &mut Scanner<'a>,
    path: &[u32],
    index: usize,
) -> Result<Option<&'a [u8]>> {
    let mut seen = 0;
    let mut found = None;
    visit_path(scanner, path, &mut |s| {
        if found.is_some() || seen != index {
            seen += 1;
            return consume(s);
        }
        seen += 1;
        let payload = match s.wire_type() {
            Some(WireType::LengthDelimited) => s.message_data()?,
            Some(WireType::StartGroup) => s.group_data()?,
            other => bail!(
                "Field {} has wire type {} and no payload to extract",
                s.field_number(),
                other.map_or("none", WireType::as_str)
            ),
        };
        found = Some(payload);
        Ok(())
    })?;
    Ok(found)
}
