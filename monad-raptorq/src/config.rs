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

use serde::Deserialize;

const DEFAULT_PARALLEL_REPAIR_THRESHOLD: usize = 1024;

// ESIs at or above max_redundancy * K are discarded by the managed decoder, as a
// protection against DoS and algorithmic complexity attacks.
const DEFAULT_MAX_REDUNDANCY: usize = 7;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct EncoderConfig {
    // Repair symbol batches of at least this many symbols are generated with rayon.
    pub parallel_repair_threshold: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            parallel_repair_threshold: DEFAULT_PARALLEL_REPAIR_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct DecoderConfig {
    pub max_redundancy: usize,

    // Number of encoding symbols beyond K to wait for before attempting a full
    // inactivation decode.
    pub symbol_overhead: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_redundancy: DEFAULT_MAX_REDUNDANCY,
            symbol_overhead: 0,
        }
    }
}
