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

mod gaussian;
mod octet_matrix;
mod rc_permutation;
mod rc_swap_matrix;

pub use octet_matrix::OctetMatrix;
pub use rc_permutation::RCPermutation;
pub use rc_swap_matrix::RCSwapMatrix;

// Row operations performed on a matrix under elimination, expressed in terms of
// physical row indices, so that the same operations can be replayed on the matrix
// holding the symbol data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RowOperation {
    // row[dst] += factor * row[src]
    AddScaled { dst: usize, src: usize, factor: u8 },

    // row[row] *= factor
    Scale { row: usize, factor: u8 },

    // row[row] /= divisor
    Divide { row: usize, divisor: u8 },
}

impl RowOperation {
    pub fn apply(self, mat: &mut OctetMatrix) {
        match self {
            RowOperation::AddScaled { dst, src, factor } => mat.add_scaled_row(dst, src, factor),
            RowOperation::Scale { row, factor } => mat.scale_row(row, factor),
            RowOperation::Divide { row, divisor } => mat.divide_row(row, divisor),
        }
    }
}
