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

use bitvec::prelude::*;
use tracing::debug;

use crate::{
    config::DecoderConfig,
    error::{DecodingFailure, Error},
    rq::{
        systematic::{EncodingSymbol, SourceBlockDecoder},
        ENCODING_SYMBOL_ID_MAX,
    },
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodingState {
    Incomplete,
    Decoded,

    // The last decoding attempt failed, and no symbol has arrived since.
    DecodingFailure,
}

// Collects the encoding symbols of one source block as they arrive, and decodes the
// block once enough of them have been received.
#[derive(Debug)]
pub struct ManagedDecoder {
    decoder: SourceBlockDecoder,
    config: DecoderConfig,
    max_encoded_symbols: usize,
    seen_esis: BitVec<usize, Lsb0>,
    received: Vec<EncodingSymbol>,
    num_source_symbols_received: usize,
    decoded: Option<Vec<u8>>,
    latest_failure: Option<DecodingFailure>,
}

impl ManagedDecoder {
    pub fn new(
        sbn: u8,
        num_source_symbols: usize,
        symbol_len: usize,
        config: DecoderConfig,
    ) -> Result<ManagedDecoder, Error> {
        let decoder = SourceBlockDecoder::new(sbn, num_source_symbols, symbol_len)?;

        let max_encoded_symbols = config
            .max_redundancy
            .saturating_mul(num_source_symbols)
            .min(ENCODING_SYMBOL_ID_MAX + 1);

        let seen_esis = bitvec![usize, Lsb0; 0; max_encoded_symbols];

        Ok(ManagedDecoder {
            decoder,
            config,
            max_encoded_symbols,
            seen_esis,
            received: Vec::new(),
            num_source_symbols_received: 0,
            decoded: None,
            latest_failure: None,
        })
    }

    pub fn num_source_symbols(&self) -> usize {
        self.decoder.num_source_symbols()
    }

    pub fn received_encoded_symbol(
        &mut self,
        data: &[u8],
        encoding_symbol_id: usize,
    ) -> Result<(), Error> {
        if self.decoder.symbol_len() != data.len() {
            return Err(Error::InvalidParameters(format!(
                "ManagedDecoder with symbol_len = {} given symbol of length {}",
                self.decoder.symbol_len(),
                data.len()
            )));
        }

        if encoding_symbol_id >= self.max_encoded_symbols {
            return Err(Error::InvalidParameters(format!(
                "ManagedDecoder with max_encoded_symbols = {} received ESI {}",
                self.max_encoded_symbols, encoding_symbol_id,
            )));
        }

        if self.seen_esis[encoding_symbol_id] {
            return Err(Error::InvalidParameters(format!(
                "ManagedDecoder already saw ESI {}",
                encoding_symbol_id
            )));
        }
        self.seen_esis.set(encoding_symbol_id, true);

        if encoding_symbol_id < self.num_source_symbols() {
            self.num_source_symbols_received += 1;
        }

        self.received.push(EncodingSymbol::new(
            self.decoder.sbn(),
            encoding_symbol_id,
            data.to_vec(),
        ));

        self.latest_failure = None;

        Ok(())
    }

    // Attempt to decode the block.  Returns true if the block is (or already was)
    // decoded.  A failed attempt is recorded in latest_failure() and leaves the decoder
    // ready to accept more symbols.
    pub fn try_decode(&mut self) -> bool {
        if self.decoded.is_some() {
            return true;
        }

        let k = self.num_source_symbols();

        let all_source_symbols = self.num_source_symbols_received == k;

        if !all_source_symbols && self.received.len() < k + self.config.symbol_overhead {
            return false;
        }

        let result = self.decoder.decode(&self.received);

        self.finish_attempt(result)
    }

    fn finish_attempt(&mut self, result: Result<Vec<u8>, Error>) -> bool {
        match result {
            Ok(data) => {
                self.decoded = Some(data);
                self.latest_failure = None;

                true
            }
            Err(err) => {
                debug!(
                    sbn = self.decoder.sbn(),
                    received = self.received.len(),
                    ?err,
                    "decoding attempt failed, waiting for more symbols"
                );

                // Received symbols are validated on arrival, so the decoder can only
                // fail for lack of (independent) symbols.
                if let Error::DecodingFailure(failure) = err {
                    self.latest_failure = Some(failure);
                }

                false
            }
        }
    }

    // The reason the last decoding attempt failed, if it did and no symbol has been
    // received since.
    pub fn latest_failure(&self) -> Option<&DecodingFailure> {
        self.latest_failure.as_ref()
    }

    pub fn decoding_done(&self) -> bool {
        self.decoded.is_some()
    }

    pub fn state(&self) -> DecodingState {
        if self.decoding_done() {
            DecodingState::Decoded
        } else if self.latest_failure.is_some() {
            DecodingState::DecodingFailure
        } else {
            DecodingState::Incomplete
        }
    }

    pub fn num_encoded_symbols_received(&self) -> usize {
        self.received.len()
    }

    // A source symbol is available once it has been received or the block is decoded.
    pub fn contains_source_symbol(&self, esi: usize) -> bool {
        esi < self.num_source_symbols() && (self.decoding_done() || self.seen_esis[esi])
    }

    pub fn contains_repair_symbol(&self, esi: usize) -> bool {
        (self.num_source_symbols()..self.max_encoded_symbols).contains(&esi) && self.seen_esis[esi]
    }

    // ESIs of the received repair symbols, in arrival order.
    pub fn available_repair_symbols(&self) -> Vec<usize> {
        self.received
            .iter()
            .map(EncodingSymbol::esi)
            .filter(|esi| *esi >= self.num_source_symbols())
            .collect()
    }

    // ESIs of the source symbols that have neither been received nor recovered.
    pub fn missing_source_symbols(&self) -> Vec<usize> {
        if self.decoding_done() {
            return Vec::new();
        }

        (0..self.num_source_symbols())
            .filter(|esi| !self.seen_esis[*esi])
            .collect()
    }

    pub fn reconstruct_source_data(&self) -> Option<Vec<u8>> {
        self.decoded.clone()
    }
}

#[cfg(test)]
mod test {
    use tracing_test::traced_test;

    use super::{DecodingState, ManagedDecoder};
    use crate::{
        config::{DecoderConfig, EncoderConfig},
        error::{DecodingFailure, Error},
        rq::systematic::{SourceBlock, SourceBlockEncoder},
    };

    fn encoder(data: &[u8], symbol_len: usize) -> SourceBlockEncoder {
        SourceBlockEncoder::new(
            SourceBlock::new(0, data, symbol_len).unwrap(),
            EncoderConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_symbols() {
        let mut decoder = ManagedDecoder::new(0, 10, 4, DecoderConfig::default()).unwrap();

        assert!(decoder.received_encoded_symbol(&[0; 3], 0).is_err());
        assert!(decoder.received_encoded_symbol(&[0; 4], 70).is_err());
        assert!(decoder.received_encoded_symbol(&[0; 4], 69).is_ok());
        assert!(decoder.received_encoded_symbol(&[0; 4], 69).is_err());

        assert_eq!(decoder.num_encoded_symbols_received(), 1);
    }

    #[test]
    fn test_missing_source_symbols() {
        let data: Vec<u8> = (0..40).collect();
        let encoder = encoder(&data, 4);

        let mut decoder = ManagedDecoder::new(0, 10, 4, DecoderConfig::default()).unwrap();

        for esi in [0, 1, 3, 4, 6, 7, 8, 9] {
            let symbol = encoder.encoding_symbol(esi).unwrap();
            decoder.received_encoded_symbol(symbol.data(), esi).unwrap();
        }

        assert_eq!(decoder.missing_source_symbols(), vec![2, 5]);
        assert!(!decoder.try_decode());
        assert_eq!(decoder.state(), DecodingState::Incomplete);

        for esi in 10..14 {
            let symbol = encoder.encoding_symbol(esi).unwrap();
            decoder.received_encoded_symbol(symbol.data(), esi).unwrap();
        }

        assert!(decoder.try_decode());
        assert_eq!(decoder.state(), DecodingState::Decoded);
        assert!(decoder.missing_source_symbols().is_empty());
        assert_eq!(decoder.reconstruct_source_data(), Some(data));
    }

    #[test]
    #[traced_test]
    fn test_symbol_overhead_delays_decoding() {
        let data = vec![7u8; 40];
        let encoder = encoder(&data, 4);

        let config = DecoderConfig {
            symbol_overhead: 2,
            ..DecoderConfig::default()
        };

        let mut decoder = ManagedDecoder::new(0, 10, 4, config).unwrap();

        for esi in 1..11 {
            let symbol = encoder.encoding_symbol(esi).unwrap();
            decoder.received_encoded_symbol(symbol.data(), esi).unwrap();
        }

        // K symbols received, but not K + 2.
        assert!(!decoder.try_decode());
        assert!(!logs_contain("decoding source block"));

        for esi in 11..13 {
            let symbol = encoder.encoding_symbol(esi).unwrap();
            decoder.received_encoded_symbol(symbol.data(), esi).unwrap();
        }

        assert!(decoder.try_decode());
        assert_eq!(decoder.reconstruct_source_data(), Some(data));
    }

    #[test]
    fn test_symbol_accessors() {
        let data: Vec<u8> = (0..40).collect();
        let encoder = encoder(&data, 4);

        let mut decoder = ManagedDecoder::new(0, 10, 4, DecoderConfig::default()).unwrap();

        for esi in [3, 15, 0, 11] {
            let symbol = encoder.encoding_symbol(esi).unwrap();
            decoder.received_encoded_symbol(symbol.data(), esi).unwrap();
        }

        assert!(decoder.contains_source_symbol(0));
        assert!(decoder.contains_source_symbol(3));
        assert!(!decoder.contains_source_symbol(1));
        assert!(!decoder.contains_source_symbol(11));

        assert!(decoder.contains_repair_symbol(11));
        assert!(decoder.contains_repair_symbol(15));
        assert!(!decoder.contains_repair_symbol(3));
        assert!(!decoder.contains_repair_symbol(12));
        assert!(!decoder.contains_repair_symbol(1000));

        assert_eq!(decoder.available_repair_symbols(), vec![15, 11]);
    }

    #[test]
    #[traced_test]
    fn test_failed_attempt_is_reported() {
        let data = vec![3u8; 40];
        let encoder = encoder(&data, 4);

        let mut decoder = ManagedDecoder::new(0, 10, 4, DecoderConfig::default()).unwrap();

        for esi in 1..11 {
            let symbol = encoder.encoding_symbol(esi).unwrap();
            decoder.received_encoded_symbol(symbol.data(), esi).unwrap();
        }

        assert_eq!(decoder.state(), DecodingState::Incomplete);
        assert_eq!(decoder.latest_failure(), None);

        // A rank deficient system, as a solve over dependent repair symbols would give.
        assert!(!decoder.finish_attempt(Err(Error::DecodingFailure(
            DecodingFailure::ULowerRankDeficient
        ))));

        assert!(logs_contain("decoding attempt failed"));
        assert_eq!(decoder.state(), DecodingState::DecodingFailure);
        assert_eq!(
            decoder.latest_failure(),
            Some(&DecodingFailure::ULowerRankDeficient)
        );
        assert!(!decoder.decoding_done());
        assert_eq!(decoder.reconstruct_source_data(), None);

        // Rejected symbols don't clear the failure, accepted ones do.
        assert!(decoder.received_encoded_symbol(&[0; 4], 1).is_err());
        assert_eq!(decoder.state(), DecodingState::DecodingFailure);

        let symbol = encoder.encoding_symbol(0).unwrap();
        decoder.received_encoded_symbol(symbol.data(), 0).unwrap();

        assert_eq!(decoder.state(), DecodingState::Incomplete);
        assert_eq!(decoder.latest_failure(), None);

        // All source symbols are in, so the retry takes the fast path.
        assert!(decoder.try_decode());
        assert_eq!(decoder.state(), DecodingState::Decoded);
        assert_eq!(decoder.reconstruct_source_data(), Some(data));
    }
}
