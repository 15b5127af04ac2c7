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

use crate::{error::Error, rq::systematic_index};

pub const SOURCE_SYMBOLS_MIN: usize = 1;
pub const SOURCE_SYMBOLS_MAX: usize = 56403;

pub const SYMBOL_LEN_MAX: usize = 65535;

// Encoding symbol IDs are 24 bits wide in the FEC payload ID.
pub const ENCODING_SYMBOL_ID_MAX: usize = (1 << 24) - 1;

// The code parameters of RFC 6330 section 5.3.3.3 for a source block, derived from
// the number of extended source symbols K'.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CodeParameters {
    num_extended_source_symbols: usize,
    systematic_index: usize,
    num_ldpc_symbols: usize,
    num_hdpc_symbols: usize,
    num_lt_symbols: usize,
    num_pi_symbols_prime: usize,
}

impl CodeParameters {
    // Parameters for a source block of `num_source_symbols` symbols, which are those of
    // the smallest tabulated K' >= num_source_symbols.
    pub fn new(num_source_symbols: usize) -> Result<CodeParameters, Error> {
        if !(SOURCE_SYMBOLS_MIN..=SOURCE_SYMBOLS_MAX).contains(&num_source_symbols) {
            return Err(Error::InvalidParameters(format!(
                "number of source symbols {} not in range {}..={}",
                num_source_symbols, SOURCE_SYMBOLS_MIN, SOURCE_SYMBOLS_MAX
            )));
        }

        let entry = systematic_index::ceil(num_source_symbols).ok_or_else(|| {
            Error::InvalidParameters(format!(
                "no systematic index for {} source symbols",
                num_source_symbols
            ))
        })?;

        let num_intermediate_symbols = entry.num_extended_source_symbols
            + entry.num_ldpc_symbols
            + entry.num_hdpc_symbols;

        let num_pi_symbols = num_intermediate_symbols - entry.num_lt_symbols;

        Ok(CodeParameters {
            num_extended_source_symbols: entry.num_extended_source_symbols,
            systematic_index: entry.systematic_index,
            num_ldpc_symbols: entry.num_ldpc_symbols,
            num_hdpc_symbols: entry.num_hdpc_symbols,
            num_lt_symbols: entry.num_lt_symbols,
            num_pi_symbols_prime: smallest_prime_at_least(num_pi_symbols),
        })
    }

    // K'
    pub fn num_extended_source_symbols(&self) -> usize {
        self.num_extended_source_symbols
    }

    // J(K')
    pub fn systematic_index(&self) -> usize {
        self.systematic_index
    }

    // S
    pub fn num_ldpc_symbols(&self) -> usize {
        self.num_ldpc_symbols
    }

    // H
    pub fn num_hdpc_symbols(&self) -> usize {
        self.num_hdpc_symbols
    }

    // L = K' + S + H
    pub fn num_intermediate_symbols(&self) -> usize {
        self.num_extended_source_symbols + self.num_ldpc_symbols + self.num_hdpc_symbols
    }

    // W
    pub fn num_lt_symbols(&self) -> usize {
        self.num_lt_symbols
    }

    // B = W - S
    pub fn num_lt_non_ldpc_symbols(&self) -> usize {
        self.num_lt_symbols - self.num_ldpc_symbols
    }

    // P = L - W
    pub fn num_pi_symbols(&self) -> usize {
        self.num_intermediate_symbols() - self.num_lt_symbols
    }

    // P1, the smallest prime >= P
    pub fn num_pi_symbols_prime(&self) -> usize {
        self.num_pi_symbols_prime
    }

    // U = P - H
    pub fn num_pi_non_hdpc_symbols(&self) -> usize {
        self.num_pi_symbols() - self.num_hdpc_symbols
    }
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }

    let mut i = 2;

    while i * i <= n {
        if n % i == 0 {
            return false;
        }

        i += 1;
    }

    true
}

fn smallest_prime_at_least(n: usize) -> usize {
    (n..).find(|&i| is_prime(i)).unwrap_or(n)
}

#[cfg(test)]
mod test {
    use super::{is_prime, smallest_prime_at_least, CodeParameters, SOURCE_SYMBOLS_MAX};
    use crate::rq::systematic_index;

    #[test]
    fn test_k_10() {
        let params = CodeParameters::new(10).unwrap();

        assert_eq!(params.num_extended_source_symbols(), 10);
        assert_eq!(params.systematic_index(), 254);
        assert_eq!(params.num_ldpc_symbols(), 7);
        assert_eq!(params.num_hdpc_symbols(), 10);
        assert_eq!(params.num_intermediate_symbols(), 27);
        assert_eq!(params.num_lt_symbols(), 17);
        assert_eq!(params.num_lt_non_ldpc_symbols(), 10);
        assert_eq!(params.num_pi_symbols(), 10);
        assert_eq!(params.num_pi_symbols_prime(), 11);
        assert_eq!(params.num_pi_non_hdpc_symbols(), 0);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(CodeParameters::new(1).unwrap().num_extended_source_symbols(), 10);
        assert_eq!(CodeParameters::new(11).unwrap().num_extended_source_symbols(), 12);
    }

    #[test]
    fn test_out_of_range() {
        assert!(CodeParameters::new(0).is_err());
        assert!(CodeParameters::new(SOURCE_SYMBOLS_MAX).is_ok());
        assert!(CodeParameters::new(SOURCE_SYMBOLS_MAX + 1).is_err());
    }

    #[test]
    fn test_all_entries_consistent() {
        for k_prime in systematic_index::extended_source_symbols() {
            let params = CodeParameters::new(k_prime).unwrap();

            assert_eq!(params.num_extended_source_symbols(), k_prime);
            assert!(params.num_lt_symbols() > params.num_ldpc_symbols());
            assert!(params.num_pi_symbols() >= params.num_hdpc_symbols());
            assert!(params.num_pi_symbols_prime() >= params.num_pi_symbols());
            assert!(is_prime(params.num_pi_symbols_prime()));
            assert!(is_prime(params.num_ldpc_symbols()));
            assert!(is_prime(params.num_lt_symbols()));
        }
    }

    #[test]
    fn test_primes() {
        assert_eq!(smallest_prime_at_least(10), 11);
        assert_eq!(smallest_prime_at_least(11), 11);
        assert_eq!(smallest_prime_at_least(0), 2);
        assert!(!is_prime(1));
        assert!(is_prime(56951));
    }
}
