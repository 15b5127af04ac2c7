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

mod binary_search;

pub mod config;
pub mod error;
pub mod gf256;

mod matrix;

pub mod rq;
pub use rq::{
    systematic::{
        encode_source_blocks, source_block_sizes, DecodingState, EncodingSymbol, ManagedDecoder,
        SourceBlock, SourceBlockDecoder, SourceBlockEncoder,
    },
    CodeParameters, ENCODING_SYMBOL_ID_MAX, SOURCE_SYMBOLS_MAX, SOURCE_SYMBOLS_MIN,
    SYMBOL_LEN_MAX,
};

pub mod symbol;

pub use config::{DecoderConfig, EncoderConfig};
pub use error::{DecodingFailure, Error};
pub use matrix::OctetMatrix;
