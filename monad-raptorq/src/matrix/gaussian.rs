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
    error::DecodingFailure,
    matrix::{RCSwapMatrix, RowOperation},
};

impl RCSwapMatrix {
    // Reduce the lower-right block of rows [first, nrows) and columns [first, ncols) to
    // the identity (with all-zero rows below it) by Gauss-Jordan elimination.  In each
    // step, the pivot is the row with a nonzero in the current column that has the
    // minimal weight within the block.  Every row operation is reported, in terms of
    // physical row indices, through `row_operation`.
    pub fn eliminate_lower_right(
        &mut self,
        first: usize,
        mut row_operation: impl FnMut(RowOperation),
    ) -> Result<(), DecodingFailure> {
        assert!(self.nrows() >= self.ncols());

        for step in first..self.ncols() {
            let mut best = None;
            let mut best_weight = 0;

            for row in step..self.nrows() {
                if self[(row, step)] != 0 {
                    let row_weight = self.row_weight_in(row, step..self.ncols());

                    if best.is_none() || row_weight < best_weight {
                        best = Some(row);
                        best_weight = row_weight;
                    }
                }
            }

            let row = best.ok_or(DecodingFailure::ULowerRankDeficient)?;

            // Move the pivot row to (step, step).
            if row != step {
                self.swap_rows(row, step);
            }

            let pivot = self[(step, step)];

            if pivot != 1 {
                self.row_divide(step, pivot);

                row_operation(RowOperation::Divide {
                    row: self.row_permutation.index(step),
                    divisor: pivot,
                });
            }

            // Clear this column in every other row of the block.
            for i in first..self.nrows() {
                let beta = self[(i, step)];

                if i != step && beta != 0 {
                    self.row_add_scaled(i, step, beta);

                    row_operation(RowOperation::AddScaled {
                        dst: self.row_permutation.index(i),
                        src: self.row_permutation.index(step),
                        factor: beta,
                    });
                }
            }
        }

        for i in first..self.nrows() {
            for j in first..self.ncols() {
                debug_assert_eq!(self[(i, j)], u8::from(i == j));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rand::{thread_rng, Rng};

    use crate::{
        error::DecodingFailure,
        matrix::{OctetMatrix, RCSwapMatrix},
    };

    #[test]
    fn test_eliminate_random_system() {
        let mut rng = thread_rng();

        for _ in 0..20 {
            let n = rng.gen_range(1..24);
            let extra = rng.gen_range(0..4);

            // Random matrices over GF(256) are invertible with high probability; retry
            // the (rare) singular draws.
            let a = OctetMatrix::from_fn(n + extra, n, |_, _| rng.gen());
            let x = OctetMatrix::from_fn(n, 3, |_, _| rng.gen());
            let mut d = a.mul(&x);

            let mut swap = RCSwapMatrix::from_octet_matrix(a);

            if swap.eliminate_lower_right(0, |op| op.apply(&mut d)).is_err() {
                continue;
            }

            for i in 0..n {
                assert_eq!(d.row(swap.row_permutation.index(i)), x.row(i));
            }
        }
    }

    #[test]
    fn test_rank_deficient() {
        // The last two rows are identical.
        let a = OctetMatrix::from_fn(3, 3, |i, j| match (i, j) {
            (0, 0) => 1,
            (1, _) | (2, _) => (j + 1) as u8,
            _ => 0,
        });

        let mut swap = RCSwapMatrix::from_octet_matrix(a);

        assert_eq!(
            swap.eliminate_lower_right(0, |_| {}),
            Err(DecodingFailure::ULowerRankDeficient)
        );
    }
}
