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

use std::sync::OnceLock;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    config::EncoderConfig,
    error::Error,
    matrix::OctetMatrix,
    rq::{
        pi_decoder,
        systematic::{internal_symbol_id, EncodingSymbol, SourceBlock},
        CodeParameters, ENCODING_SYMBOL_ID_MAX,
    },
};

#[derive(Debug)]
pub struct SourceBlockEncoder {
    block: SourceBlock,
    params: CodeParameters,
    config: EncoderConfig,

    // The intermediate symbols of the block, computed on the first request for a repair
    // symbol.
    intermediate: OnceLock<Result<OctetMatrix, Error>>,
}

impl SourceBlockEncoder {
    pub fn new(block: SourceBlock, config: EncoderConfig) -> Result<SourceBlockEncoder, Error> {
        let params = CodeParameters::new(block.num_source_symbols())?;

        Ok(SourceBlockEncoder {
            block,
            params,
            config,
            intermediate: OnceLock::new(),
        })
    }

    pub fn sbn(&self) -> u8 {
        self.block.sbn()
    }

    pub fn num_source_symbols(&self) -> usize {
        self.block.num_source_symbols()
    }

    pub fn symbol_len(&self) -> usize {
        self.block.symbol_len()
    }

    pub fn params(&self) -> &CodeParameters {
        &self.params
    }

    // Solve A * C = D where D holds S + H zero symbols, the K source symbols and K' - K
    // zero padding symbols.
    fn compute_intermediate_symbols(&self) -> Result<OctetMatrix, Error> {
        let l = self.params.num_intermediate_symbols();
        let first_source_row = self.params.num_ldpc_symbols() + self.params.num_hdpc_symbols();

        let mut d = OctetMatrix::from_element(l, self.symbol_len(), 0);

        for esi in 0..self.num_source_symbols() {
            d.row_mut(first_source_row + esi)
                .copy_from_slice(self.block.symbol(esi));
        }

        let intermediate = pi_decoder::solve(&self.params, self.params.constraint_matrix(), d)?;

        debug!(
            sbn = self.sbn(),
            k = self.num_source_symbols(),
            k_prime = self.params.num_extended_source_symbols(),
            "computed intermediate symbols"
        );

        Ok(intermediate)
    }

    pub fn intermediate_symbols(&self) -> Result<&OctetMatrix, Error> {
        self.intermediate
            .get_or_init(|| self.compute_intermediate_symbols())
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn source_symbol(&self, esi: usize) -> Result<EncodingSymbol, Error> {
        if esi >= self.num_source_symbols() {
            return Err(Error::InvalidParameters(format!(
                "ESI {} is not a source symbol of a block with {} source symbols",
                esi,
                self.num_source_symbols()
            )));
        }

        Ok(EncodingSymbol::new(
            self.sbn(),
            esi,
            self.block.symbol(esi).to_vec(),
        ))
    }

    pub fn source_symbols(&self) -> Vec<EncodingSymbol> {
        (0..self.num_source_symbols())
            .map(|esi| EncodingSymbol::new(self.sbn(), esi, self.block.symbol(esi).to_vec()))
            .collect()
    }

    pub fn repair_symbol(&self, esi: usize) -> Result<EncodingSymbol, Error> {
        let mut data = vec![0; self.symbol_len()];

        self.encode_repair_symbol(&mut data, esi)?;

        Ok(EncodingSymbol::new(self.sbn(), esi, data))
    }

    pub fn encoding_symbol(&self, esi: usize) -> Result<EncodingSymbol, Error> {
        if esi < self.num_source_symbols() {
            self.source_symbol(esi)
        } else {
            self.repair_symbol(esi)
        }
    }

    // Write the encoding symbol with the given ESI into `dst`, which must be symbol_len
    // bytes long.
    pub fn encode_symbol(&self, dst: &mut [u8], esi: usize) -> Result<(), Error> {
        if dst.len() != self.symbol_len() {
            return Err(Error::InvalidParameters(format!(
                "output buffer of length {} for symbol length {}",
                dst.len(),
                self.symbol_len()
            )));
        }

        if esi < self.num_source_symbols() {
            dst.copy_from_slice(self.block.symbol(esi));

            Ok(())
        } else {
            dst.fill(0);

            self.encode_repair_symbol(dst, esi)
        }
    }

    // Expects `dst` to be zero-filled on entry.
    fn encode_repair_symbol(&self, dst: &mut [u8], esi: usize) -> Result<(), Error> {
        if !(self.num_source_symbols()..=ENCODING_SYMBOL_ID_MAX).contains(&esi) {
            return Err(Error::InvalidParameters(format!(
                "ESI {} is not a repair symbol ESI for a block with {} source symbols",
                esi,
                self.num_source_symbols()
            )));
        }

        let intermediate = self.intermediate_symbols()?;

        let isi = internal_symbol_id(&self.params, self.num_source_symbols(), esi);

        self.params.lt_encode(intermediate, isi, dst);

        Ok(())
    }

    // Generate `count` consecutive repair symbols starting at `first_esi`, in parallel if
    // there are enough of them for that to be a win.
    pub fn repair_symbols(
        &self,
        first_esi: usize,
        count: usize,
    ) -> Result<Vec<EncodingSymbol>, Error> {
        // Make sure the intermediate symbols exist before fanning out.
        self.intermediate_symbols()?;

        let esis = first_esi..first_esi + count;

        if count >= self.config.parallel_repair_threshold {
            esis.into_par_iter()
                .map(|esi| self.repair_symbol(esi))
                .collect()
        } else {
            esis.map(|esi| self.repair_symbol(esi)).collect()
        }
    }
}
