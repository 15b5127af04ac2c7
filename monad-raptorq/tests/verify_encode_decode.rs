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

// Tests the RaptorQ encoder and decoder against each other.

use monad_raptorq::{
    DecodingFailure, EncoderConfig, EncodingSymbol, Error, SourceBlock, SourceBlockDecoder,
    SourceBlockEncoder,
};
use rand::{prelude::SliceRandom, thread_rng, Rng, RngCore};
use test_case::test_case;

const SYMBOL_LEN: usize = 4;

// Number of symbols beyond K handed to the decoder in randomized tests.  With two extra
// symbols the decoding failure probability is negligible.
const OVERHEAD: usize = 2;

fn encoder(src: &[u8], symbol_len: usize) -> SourceBlockEncoder {
    let block = SourceBlock::new(0, src, symbol_len).unwrap();

    SourceBlockEncoder::new(block, EncoderConfig::default()).unwrap()
}

fn test_single_decode(mut src: Vec<u8>) {
    let encoder = encoder(&src, SYMBOL_LEN);

    let num_source_symbols = encoder.num_source_symbols();

    // Pick K + OVERHEAD distinct ESIs out of the first 3K, in random order.
    let mut esis: Vec<usize> = (0..3 * num_source_symbols + OVERHEAD).collect();
    esis.shuffle(&mut thread_rng());
    esis.truncate(num_source_symbols + OVERHEAD);

    let received: Vec<EncodingSymbol> = esis
        .iter()
        .map(|esi| encoder.encoding_symbol(*esi).unwrap())
        .collect();

    let decoder = SourceBlockDecoder::new(0, num_source_symbols, SYMBOL_LEN).unwrap();

    let decoded = match decoder.decode(&received) {
        Ok(decoded) => decoded,
        Err(err) => panic!("decoding {} bytes from ESIs {:?} failed: {}", src.len(), esis, err),
    };

    // Pad `src` to K * SYMBOL_LEN bytes to simplify the comparison.
    src.resize(num_source_symbols * SYMBOL_LEN, 0u8);

    assert_eq!(src, decoded);
}

#[test]
fn test_encode_decode() {
    let max_bytes = if cfg!(debug_assertions) { 128 } else { 2048 };

    for bytes in 0..=max_bytes {
        println!("Testing bytes = {}", bytes);

        let mut src = vec![0u8; bytes];

        thread_rng().fill_bytes(&mut src);

        test_single_decode(src);
    }
}

#[test]
fn test_drop_three_source_symbols() {
    let mut src = vec![0u8; 80];
    thread_rng().fill_bytes(&mut src);

    let encoder = encoder(&src, 8);

    assert_eq!(encoder.num_source_symbols(), 10);

    let mut received: Vec<EncodingSymbol> = encoder
        .source_symbols()
        .into_iter()
        .filter(|symbol| ![2, 5, 7].contains(&symbol.esi()))
        .collect();

    received.extend(encoder.repair_symbols(10, 4).unwrap());

    let decoder = SourceBlockDecoder::new(0, 10, 8).unwrap();

    assert_eq!(decoder.decode(&received).unwrap(), src);
}

#[test]
fn test_not_enough_repair_symbols() {
    let src = vec![0x5au8; 80];

    let encoder = encoder(&src, 8);

    let mut received: Vec<EncodingSymbol> = encoder
        .source_symbols()
        .into_iter()
        .filter(|symbol| ![0, 4, 9].contains(&symbol.esi()))
        .collect();

    received.push(encoder.repair_symbol(10).unwrap());

    let decoder = SourceBlockDecoder::new(0, 10, 8).unwrap();

    assert!(matches!(
        decoder.decode(&received),
        Err(Error::DecodingFailure(
            DecodingFailure::NotEnoughRepairSymbols {
                missing: 3,
                repair: 1
            }
        ))
    ));
}

#[test_case(1, 1; "single byte symbols")]
#[test_case(1000, 7; "odd symbol length")]
#[test_case(4096, 64; "k = 64")]
#[test_case(10000, 16; "k = 625")]
fn test_source_symbols_roundtrip(len: usize, symbol_len: usize) {
    let mut src = vec![0u8; len];
    thread_rng().fill_bytes(&mut src);

    let encoder = encoder(&src, symbol_len);

    let decoder = SourceBlockDecoder::new(0, encoder.num_source_symbols(), symbol_len).unwrap();

    let mut decoded = decoder.decode(&encoder.source_symbols()).unwrap();
    decoded.truncate(len);

    assert_eq!(decoded, src);
}

#[test]
fn test_repair_symbols_beyond_padding() {
    // K = 11 is padded to K' = 12, so repair ISIs are offset from ESIs.
    let mut src = vec![0u8; 11 * 8];
    thread_rng().fill_bytes(&mut src);

    let encoder = encoder(&src, 8);

    assert_eq!(encoder.num_source_symbols(), 11);
    assert_eq!(encoder.params().num_extended_source_symbols(), 12);

    let mut rng = thread_rng();

    for _ in 0..10 {
        let first_repair_esi = rng.gen_range(11..1000);

        let received = encoder.repair_symbols(first_repair_esi, 11 + OVERHEAD).unwrap();

        let decoder = SourceBlockDecoder::new(0, 11, 8).unwrap();

        assert_eq!(decoder.decode(&received).unwrap(), src);
    }
}
