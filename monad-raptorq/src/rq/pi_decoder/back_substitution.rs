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

use crate::{matrix::RowOperation, rq::pi_decoder::PiDecoder};

impl PiDecoder<'_> {
    // Replace the first i rows of A by X * A, where X is the lower triangular i x i upper
    // left block of the original matrix after the row and column exchanges of the first
    // phase.  Rows are rewritten from the bottom up so that the rows being combined into
    // row k still hold their previous values.
    pub(super) fn third_phase(&mut self) {
        let i = self.i;

        for k in (0..i).rev() {
            for m in k + 1..i {
                debug_assert_eq!(self.x(k, m), 0);
            }

            let phys_k = self.a.row_permutation.index(k);

            let x_kk = self.x(k, k);

            debug_assert_ne!(x_kk, 0);

            if x_kk != 1 {
                self.a.row_scale(k, x_kk);

                self.row_operation(RowOperation::Scale {
                    row: phys_k,
                    factor: x_kk,
                });
            }

            for m in 0..k {
                let x_km = self.x(k, m);

                if x_km != 0 {
                    self.a.row_add_scaled(k, m, x_km);

                    self.row_operation(RowOperation::AddScaled {
                        dst: phys_k,
                        src: self.a.row_permutation.index(m),
                        factor: x_km,
                    });
                }
            }
        }
    }

    // Zero out the upper right i x u block of A.  Rows [i, L) of A are unit vectors at this
    // point, so this only needs to update the symbol data.
    pub(super) fn fourth_phase(&mut self) {
        let l = self.params.num_intermediate_symbols();

        for k in 0..self.i {
            let phys_k = self.a.row_permutation.index(k);

            for j in self.i..l {
                let beta = self.a[(k, j)];

                if beta != 0 {
                    self.a[(k, j)] = 0;

                    self.row_operation(RowOperation::AddScaled {
                        dst: phys_k,
                        src: self.a.row_permutation.index(j),
                        factor: beta,
                    });
                }
            }
        }
    }

    // Reduce the lower triangular upper left i x i block of A to the identity.
    pub(super) fn fifth_phase(&mut self) {
        for j in 0..self.i {
            let phys_j = self.a.row_permutation.index(j);

            let pivot = self.a[(j, j)];

            if pivot != 1 {
                self.a.row_divide(j, pivot);

                self.row_operation(RowOperation::Divide {
                    row: phys_j,
                    divisor: pivot,
                });
            }

            for l in 0..j {
                let beta = self.a[(j, l)];

                if beta != 0 {
                    self.a.row_add_scaled(j, l, beta);

                    self.row_operation(RowOperation::AddScaled {
                        dst: phys_j,
                        src: self.a.row_permutation.index(l),
                        factor: beta,
                    });
                }
            }
        }

        for row in 0..self.params.num_intermediate_symbols() {
            for col in 0..self.params.num_intermediate_symbols() {
                debug_assert_eq!(self.a[(row, col)], u8::from(row == col));
            }
        }
    }
}
