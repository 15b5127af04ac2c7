// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

// Systematic RaptorQ encoding and decoding of source blocks.

mod decoder;
mod encoder;
mod managed_decoder;
mod source_block;

use rayon::prelude::*;

pub use decoder::SourceBlockDecoder;
pub use encoder::SourceBlockEncoder;
pub use managed_decoder::{DecodingState, ManagedDecoder};
pub use source_block::{EncodingSymbol, SourceBlock};

use crate::{
    config::EncoderConfig,
    error::Error,
    rq::{CodeParameters, Partition},
};

// Map an ESI to its ISI.  Repair symbols skip over the K' - K padding symbols, which
// are never transmitted.
pub fn internal_symbol_id(params: &CodeParameters, num_source_symbols: usize, esi: usize) -> usize {
    if esi < num_source_symbols {
        esi
    } else {
        esi + params.num_extended_source_symbols() - num_source_symbols
    }
}

// The number of source symbols in each of `num_blocks` source blocks sharing
// `total_symbols` symbols: larger blocks first, then smaller ones.
pub fn source_block_sizes(total_symbols: usize, num_blocks: usize) -> Result<Vec<usize>, Error> {
    Ok(Partition::new(total_symbols, num_blocks)?.sizes().collect())
}

// Encode independent source blocks in parallel, returning for each block its source
// symbols followed by `num_repair_symbols` repair symbols.
pub fn encode_source_blocks(
    blocks: Vec<SourceBlock>,
    num_repair_symbols: usize,
    config: &EncoderConfig,
) -> Result<Vec<Vec<EncodingSymbol>>, Error> {
    blocks
        .into_par_iter()
        .map(|block| {
            let encoder = SourceBlockEncoder::new(block, config.clone())?;

            let mut symbols = encoder.source_symbols();
            symbols.extend(
                encoder.repair_symbols(encoder.num_source_symbols(), num_repair_symbols)?,
            );

            Ok(symbols)
        })
        .collect()
}
