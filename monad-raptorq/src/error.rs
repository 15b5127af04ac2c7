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

use thiserror::Error;

// Reasons for which the permanent inactivation decoder can fail to recover the
// intermediate symbols.  All of these are recoverable by supplying more (or different)
// encoding symbols and retrying.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DecodingFailure {
    #[error("not enough repair symbols: {missing} source symbols missing, {repair} received")]
    NotEnoughRepairSymbols { missing: usize, repair: usize },

    #[error("all entries in V are zero")]
    AllEntriesInVAreZero,

    #[error("U_lower rank deficient")]
    ULowerRankDeficient,
}

#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("decoding failure: {0}")]
    DecodingFailure(#[from] DecodingFailure),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl Error {
    pub fn is_decoding_failure(&self) -> bool {
        matches!(self, Error::DecodingFailure(_))
    }
}

#[cfg(test)]
mod test {
    use super::{DecodingFailure, Error};

    #[test]
    fn test_display() {
        let err: Error = DecodingFailure::NotEnoughRepairSymbols {
            missing: 3,
            repair: 1,
        }
        .into();

        assert!(err.is_decoding_failure());
        assert_eq!(
            err.to_string(),
            "decoding failure: not enough repair symbols: 3 source symbols missing, 1 received"
        );

        let err = Error::InvalidParameters("symbol_len == 0".to_string());

        assert!(!err.is_decoding_failure());
        assert_eq!(err.to_string(), "invalid parameters: symbol_len == 0");
    }
}
