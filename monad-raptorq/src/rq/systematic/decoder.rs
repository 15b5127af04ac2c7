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

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::{
    error::{DecodingFailure, Error},
    matrix::OctetMatrix,
    rq::{
        pi_decoder,
        systematic::{internal_symbol_id, EncodingSymbol},
        CodeParameters, ENCODING_SYMBOL_ID_MAX, SYMBOL_LEN_MAX,
    },
};

// Recovers a source block of K symbols from any sufficiently large set of its
// encoding symbols.
#[derive(Clone, Debug)]
pub struct SourceBlockDecoder {
    sbn: u8,
    num_source_symbols: usize,
    symbol_len: usize,
    params: CodeParameters,
}

impl SourceBlockDecoder {
    pub fn new(
        sbn: u8,
        num_source_symbols: usize,
        symbol_len: usize,
    ) -> Result<SourceBlockDecoder, Error> {
        if !(1..=SYMBOL_LEN_MAX).contains(&symbol_len) {
            return Err(Error::InvalidParameters(format!(
                "symbol length {} not in range 1..={}",
                symbol_len, SYMBOL_LEN_MAX
            )));
        }

        let params = CodeParameters::new(num_source_symbols)?;

        Ok(SourceBlockDecoder {
            sbn,
            num_source_symbols,
            symbol_len,
            params,
        })
    }

    pub fn sbn(&self) -> u8 {
        self.sbn
    }

    pub fn num_source_symbols(&self) -> usize {
        self.num_source_symbols
    }

    pub fn symbol_len(&self) -> usize {
        self.symbol_len
    }

    pub fn params(&self) -> &CodeParameters {
        &self.params
    }

    pub fn validate(&self, symbol: &EncodingSymbol) -> Result<(), Error> {
        if symbol.sbn() != self.sbn {
            return Err(Error::InvalidParameters(format!(
                "symbol for source block {} given to decoder for source block {}",
                symbol.sbn(),
                self.sbn
            )));
        }

        if symbol.data().len() != self.symbol_len {
            return Err(Error::InvalidParameters(format!(
                "decoder with symbol_len = {} given symbol of length {}",
                self.symbol_len,
                symbol.data().len()
            )));
        }

        if symbol.esi() > ENCODING_SYMBOL_ID_MAX {
            return Err(Error::InvalidParameters(format!(
                "ESI {} exceeds {}",
                symbol.esi(),
                ENCODING_SYMBOL_ID_MAX
            )));
        }

        Ok(())
    }

    // Reconstruct the K * symbol_len bytes of the source block.  If an ESI is received
    // more than once, the first copy is used.
    pub fn decode(&self, received: &[EncodingSymbol]) -> Result<Vec<u8>, Error> {
        let k = self.num_source_symbols;

        let mut symbols: BTreeMap<usize, &[u8]> = BTreeMap::new();

        for symbol in received {
            self.validate(symbol)?;

            symbols.entry(symbol.esi()).or_insert(symbol.data());
        }

        let num_source = symbols.range(..k).count();
        let repair: Vec<(usize, &[u8])> = symbols
            .range(k..)
            .map(|(esi, data)| (*esi, *data))
            .collect();

        trace!(
            sbn = self.sbn,
            source = num_source,
            repair = repair.len(),
            missing = k - num_source,
            "decoding source block"
        );

        if num_source == k {
            debug!(sbn = self.sbn, "all source symbols received");

            return Ok(symbols.range(..k).flat_map(|(_, data)| data.iter().copied()).collect());
        }

        let missing: Vec<usize> = (0..k).filter(|esi| !symbols.contains_key(esi)).collect();

        if repair.len() < missing.len() {
            return Err(DecodingFailure::NotEnoughRepairSymbols {
                missing: missing.len(),
                repair: repair.len(),
            }
            .into());
        }

        let intermediate = self.solve(&symbols, &missing, &repair)?;

        let mut out = vec![0u8; k * self.symbol_len];

        for (esi, chunk) in out.chunks_exact_mut(self.symbol_len).enumerate() {
            match symbols.get(&esi) {
                Some(data) => chunk.copy_from_slice(data),
                None => {
                    // Source ESIs below K map to the same ISI.
                    self.params.lt_encode(&intermediate, esi, chunk);
                }
            }
        }

        Ok(out)
    }

    // Build the decoding matrix and symbol data, and solve for the intermediate symbols.
    //
    // Row S + H + esi of the constraint matrix stays in place for every received source
    // symbol and for the K' - K padding symbols (with zero data).  The row of each
    // missing source symbol is replaced by the G_ENC row of a received repair symbol, in
    // ESI order, and any remaining repair symbols are appended as extra rows.
    fn solve(
        &self,
        symbols: &BTreeMap<usize, &[u8]>,
        missing: &[usize],
        repair: &[(usize, &[u8])],
    ) -> Result<OctetMatrix, Error> {
        let k = self.num_source_symbols;
        let l = self.params.num_intermediate_symbols();
        let first_source_row = self.params.num_ldpc_symbols() + self.params.num_hdpc_symbols();

        let num_rows = l + repair.len() - missing.len();

        let mut a = self.params.decoding_matrix(num_rows);
        let mut d = OctetMatrix::from_element(num_rows, self.symbol_len, 0);

        for (esi, data) in symbols.range(..k) {
            d.row_mut(first_source_row + esi).copy_from_slice(data);
        }

        let rows = missing
            .iter()
            .map(|esi| first_source_row + esi)
            .chain(l..num_rows);

        for (row, (esi, data)) in rows.zip(repair) {
            let isi = internal_symbol_id(&self.params, k, *esi);

            self.params.set_g_enc_row(&mut a, row, isi);
            d.row_mut(row).copy_from_slice(data);
        }

        pi_decoder::solve(&self.params, a, d).inspect_err(|err| {
            debug!(sbn = self.sbn, ?err, "source block decoding failed");
        })
    }
}

#[cfg(test)]
mod test {
    use rand::{thread_rng, RngCore};
    use tracing_test::traced_test;

    use super::SourceBlockDecoder;
    use crate::{
        config::EncoderConfig,
        error::{DecodingFailure, Error},
        rq::systematic::{EncodingSymbol, SourceBlock, SourceBlockEncoder},
    };

    fn random_encoder(len: usize, symbol_len: usize) -> (Vec<u8>, SourceBlockEncoder) {
        let mut data = vec![0u8; len];
        thread_rng().fill_bytes(&mut data);

        let block = SourceBlock::new(0, &data, symbol_len).unwrap();

        (data, SourceBlockEncoder::new(block, EncoderConfig::default()).unwrap())
    }

    #[test]
    #[traced_test]
    fn test_fast_path() {
        let (data, encoder) = random_encoder(80, 8);

        let decoder = SourceBlockDecoder::new(0, 10, 8).unwrap();

        let mut received = encoder.source_symbols();
        received.reverse();

        assert_eq!(decoder.decode(&received).unwrap(), data);
        assert!(logs_contain("all source symbols received"));
        assert!(!logs_contain("solved for intermediate symbols"));
    }

    #[test]
    fn test_drop_three_of_ten() {
        let (data, encoder) = random_encoder(80, 8);

        let mut received: Vec<EncodingSymbol> = encoder
            .source_symbols()
            .into_iter()
            .filter(|symbol| ![2, 5, 7].contains(&symbol.esi()))
            .collect();

        received.extend(encoder.repair_symbols(10, 4).unwrap());

        let decoder = SourceBlockDecoder::new(0, 10, 8).unwrap();

        assert_eq!(decoder.decode(&received).unwrap(), data);
    }

    #[test]
    #[traced_test]
    fn test_not_enough_repair_symbols() {
        let (_, encoder) = random_encoder(80, 8);

        let mut received: Vec<EncodingSymbol> =
            encoder.source_symbols().into_iter().skip(3).collect();
        received.push(encoder.repair_symbol(10).unwrap());

        let decoder = SourceBlockDecoder::new(0, 10, 8).unwrap();

        match decoder.decode(&received) {
            Err(Error::DecodingFailure(DecodingFailure::NotEnoughRepairSymbols {
                missing,
                repair,
            })) => {
                assert_eq!(missing, 3);
                assert_eq!(repair, 1);
            }
            other => panic!("expected NotEnoughRepairSymbols, got {:?}", other),
        }

        // No matrix was built.
        assert!(!logs_contain("first phase"));
    }

    #[test]
    fn test_duplicates_first_copy_wins() {
        let (data, encoder) = random_encoder(16, 4);

        let mut received = encoder.source_symbols();

        // A corrupted duplicate after the genuine copy is ignored.
        received.push(EncodingSymbol::new(0, 1, vec![0xff; 4]));

        let decoder = SourceBlockDecoder::new(0, 4, 4).unwrap();

        assert_eq!(decoder.decode(&received).unwrap(), data);
    }

    #[test]
    fn test_only_repair_symbols() {
        let (data, encoder) = random_encoder(60, 4);

        let received = encoder.repair_symbols(15, 17).unwrap();

        let decoder = SourceBlockDecoder::new(0, 15, 4).unwrap();

        assert_eq!(decoder.decode(&received).unwrap(), data);
    }

    #[test]
    fn test_validation() {
        let decoder = SourceBlockDecoder::new(1, 10, 8).unwrap();

        assert!(decoder.validate(&EncodingSymbol::new(0, 0, vec![0; 8])).is_err());
        assert!(decoder.validate(&EncodingSymbol::new(1, 0, vec![0; 7])).is_err());
        assert!(decoder.validate(&EncodingSymbol::new(1, 1 << 24, vec![0; 8])).is_err());
        assert!(decoder.validate(&EncodingSymbol::new(1, 3, vec![0; 8])).is_ok());

        assert!(SourceBlockDecoder::new(0, 0, 8).is_err());
        assert!(SourceBlockDecoder::new(0, 10, 0).is_err());
    }
}
