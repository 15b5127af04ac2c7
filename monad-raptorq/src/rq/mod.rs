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

pub mod a;
pub mod degree;
pub mod hdpc;
pub mod ldpc;
pub mod lt;
pub mod matrix;
pub mod parameters;
pub mod partition;
pub mod pi_decoder;
pub mod rand;
pub mod systematic;
pub mod systematic_index;
pub mod tuple;

pub use degree::{deg, MAX_DEGREE};
pub use parameters::{
    CodeParameters, ENCODING_SYMBOL_ID_MAX, SOURCE_SYMBOLS_MAX, SOURCE_SYMBOLS_MIN,
    SYMBOL_LEN_MAX,
};
pub use partition::Partition;
pub use rand::rand;
pub use tuple::Tuple;
