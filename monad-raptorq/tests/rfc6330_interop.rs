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

// Known-answer checks against an independent RFC 6330 implementation.  Any deviation in
// the Rand, degree or systematic index tables changes the repair symbols, and makes
// this crate unable to interoperate with other RaptorQ peers.

use monad_raptorq::{
    CodeParameters, EncoderConfig, EncodingSymbol, SourceBlock, SourceBlockDecoder,
    SourceBlockEncoder, ENCODING_SYMBOL_ID_MAX,
};
use rand::{thread_rng, RngCore};
use raptorq::ObjectTransmissionInformation;
use test_case::test_case;

fn random_block(num_source_symbols: usize, symbol_len: usize) -> Vec<u8> {
    let mut data = vec![0u8; num_source_symbols * symbol_len];
    thread_rng().fill_bytes(&mut data);

    data
}

// Repair symbols from the reference encoder.  It numbers repair symbols from 0, with the
// first one being ISI K', which is ESI K.
fn reference_repair_symbols(
    data: &[u8],
    symbol_len: usize,
    first_repair: usize,
    count: usize,
) -> Vec<Vec<u8>> {
    let config =
        ObjectTransmissionInformation::new(data.len() as u64, symbol_len as u16, 1, 1, 1);

    let encoder = raptorq::SourceBlockEncoder::new(0, &config, data);

    encoder
        .repair_packets(first_repair as u32, count as u32)
        .iter()
        .map(|packet| packet.data().to_vec())
        .collect()
}

fn check_against_reference(num_source_symbols: usize, symbol_len: usize) {
    let data = random_block(num_source_symbols, symbol_len);

    let block = SourceBlock::new(0, &data, symbol_len).unwrap();
    let encoder = SourceBlockEncoder::new(block, EncoderConfig::default()).unwrap();

    let k_prime = encoder.params().num_extended_source_symbols();

    // Low repair symbols, and the highest ones whose ESI still fits in 24 bits.
    let high_first_repair = ENCODING_SYMBOL_ID_MAX - k_prime - 4;

    for (first_repair, count) in [(0, 20), (high_first_repair, 4)] {
        let expected = reference_repair_symbols(&data, symbol_len, first_repair, count);

        let symbols = encoder
            .repair_symbols(num_source_symbols + first_repair, count)
            .unwrap();

        for (symbol, expected) in symbols.iter().zip(&expected) {
            assert_eq!(
                symbol.data(),
                &expected[..],
                "K = {}, ESI = {}",
                num_source_symbols,
                symbol.esi()
            );
        }

        assert_eq!(symbols.len(), expected.len());
    }
}

// K = K'
#[test_case(10, 8; "k 10")]
// K < K'
#[test_case(11, 8; "k 11 padded to 12")]
#[test_case(50, 16; "k 50 padded to 55")]
// K' + S > 256, where the HDPC rows wrap around the powers of alpha.
#[test_case(250, 4; "k 250 padded to 257")]
fn test_repair_symbols_match_reference(num_source_symbols: usize, symbol_len: usize) {
    check_against_reference(num_source_symbols, symbol_len);
}

#[test]
fn test_repair_symbols_match_reference_large() {
    if cfg!(debug_assertions) {
        return;
    }

    for num_source_symbols in [1000, 1500] {
        check_against_reference(num_source_symbols, 4);
    }
}

#[test]
fn test_decode_reference_repair_symbols() {
    let num_source_symbols = 250;
    let symbol_len = 4;

    let data = random_block(num_source_symbols, symbol_len);

    let params = CodeParameters::new(num_source_symbols).unwrap();
    assert!(params.num_extended_source_symbols() > num_source_symbols);

    // Keep every other source symbol and make up for the rest with reference repair
    // symbols.
    let mut received: Vec<EncodingSymbol> = (0..num_source_symbols)
        .step_by(2)
        .map(|esi| {
            let symbol = data[esi * symbol_len..(esi + 1) * symbol_len].to_vec();

            EncodingSymbol::new(0, esi, symbol)
        })
        .collect();

    let num_repair = num_source_symbols - received.len() + 2;

    received.extend(
        reference_repair_symbols(&data, symbol_len, 0, num_repair)
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| EncodingSymbol::new(0, num_source_symbols + i, symbol)),
    );

    let decoder = SourceBlockDecoder::new(0, num_source_symbols, symbol_len).unwrap();

    assert_eq!(decoder.decode(&received).unwrap(), data);
}
