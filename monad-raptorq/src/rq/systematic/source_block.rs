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

use crate::{
    error::Error,
    rq::{SOURCE_SYMBOLS_MAX, SYMBOL_LEN_MAX},
};

// An encoding symbol of a source block: a source symbol if esi < K, or a repair symbol
// otherwise.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodingSymbol {
    sbn: u8,
    esi: usize,
    data: Vec<u8>,
}

impl EncodingSymbol {
    pub fn new(sbn: u8, esi: usize, data: Vec<u8>) -> EncodingSymbol {
        EncodingSymbol { sbn, esi, data }
    }

    pub fn sbn(&self) -> u8 {
        self.sbn
    }

    pub fn esi(&self) -> usize {
        self.esi
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

// The source data of one source block, split into K symbols of symbol_len bytes each,
// with the last symbol padded with NUL bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceBlock {
    sbn: u8,
    symbol_len: usize,
    num_source_symbols: usize,
    data_len: usize,
    data: Vec<u8>,
}

impl SourceBlock {
    pub fn new(sbn: u8, data: &[u8], symbol_len: usize) -> Result<SourceBlock, Error> {
        if !(1..=SYMBOL_LEN_MAX).contains(&symbol_len) {
            return Err(Error::InvalidParameters(format!(
                "symbol length {} not in range 1..={}",
                symbol_len, SYMBOL_LEN_MAX
            )));
        }

        let num_source_symbols = data.len().div_ceil(symbol_len).max(1);

        if num_source_symbols > SOURCE_SYMBOLS_MAX {
            return Err(Error::InvalidParameters(format!(
                "{} bytes with symbol length {} needs {} source symbols, more than {}",
                data.len(),
                symbol_len,
                num_source_symbols,
                SOURCE_SYMBOLS_MAX
            )));
        }

        let mut padded = Vec::with_capacity(num_source_symbols * symbol_len);
        padded.extend_from_slice(data);
        padded.resize(num_source_symbols * symbol_len, 0);

        Ok(SourceBlock {
            sbn,
            symbol_len,
            num_source_symbols,
            data_len: data.len(),
            data: padded,
        })
    }

    pub fn sbn(&self) -> u8 {
        self.sbn
    }

    pub fn symbol_len(&self) -> usize {
        self.symbol_len
    }

    pub fn num_source_symbols(&self) -> usize {
        self.num_source_symbols
    }

    // Length of the source data before padding.
    pub fn data_len(&self) -> usize {
        self.data_len
    }

    // The padded source data, K * symbol_len bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn symbol(&self, esi: usize) -> &[u8] {
        &self.data[esi * self.symbol_len..(esi + 1) * self.symbol_len]
    }
}

#[cfg(test)]
mod test {
    use test_case::test_case;

    use super::SourceBlock;

    #[test_case(0, 4, 1; "empty data")]
    #[test_case(1, 4, 1; "single byte")]
    #[test_case(8, 4, 2; "exact multiple")]
    #[test_case(9, 4, 3; "partial last symbol")]
    fn test_num_source_symbols(len: usize, symbol_len: usize, k: usize) {
        let data = vec![0xa5u8; len];

        let block = SourceBlock::new(3, &data, symbol_len).unwrap();

        assert_eq!(block.num_source_symbols(), k);
        assert_eq!(block.data().len(), k * symbol_len);
        assert_eq!(block.data_len(), len);
        assert_eq!(block.sbn(), 3);
    }

    #[test]
    fn test_padding() {
        let block = SourceBlock::new(0, &[1, 2, 3, 4, 5], 4).unwrap();

        assert_eq!(block.symbol(0), &[1, 2, 3, 4]);
        assert_eq!(block.symbol(1), &[5, 0, 0, 0]);
    }

    #[test]
    fn test_invalid() {
        assert!(SourceBlock::new(0, &[1, 2, 3], 0).is_err());
        assert!(SourceBlock::new(0, &[1, 2, 3], 65536).is_err());
        assert!(SourceBlock::new(0, &vec![0u8; 56404], 1).is_err());
    }
}
