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

use tracing::{debug, trace};

use crate::{
    error::DecodingFailure,
    gf256,
    matrix::RowOperation,
    rq::pi_decoder::{graph::first_edge_in_largest_component, PiDecoder},
};

// Per-physical-row bookkeeping for choosing pivots in the first phase.
struct RowWeights {
    // Number of nonzero entries of each row within V.
    in_v: Vec<usize>,

    // Number of nonzero entries of each row in the original A.
    original: Vec<usize>,
}

impl PiDecoder<'_> {
    fn is_hdpc_row(&self, phys_row: usize) -> bool {
        let s = self.params.num_ldpc_symbols();

        (s..s + self.params.num_hdpc_symbols()).contains(&phys_row)
    }

    // The column range of V, the submatrix of A in rows [i, M) being reduced by the first
    // phase, is [i, L - u).
    fn v_end(&self) -> usize {
        self.params.num_intermediate_symbols() - self.u
    }

    // Choose the row of V to pivot on, and return its logical index and its weight r in V.
    fn choose_row(&self, weights: &RowWeights) -> Result<(usize, usize), DecodingFailure> {
        let rows = self.i..self.a.nrows();

        // HDPC rows are only considered when no other row has a nonzero entry in V.
        let allow_hdpc = rows.clone().all(|row| {
            let phys = self.a.row_permutation.index(row);

            weights.in_v[phys] == 0 || self.is_hdpc_row(phys)
        });

        let eligible = |row: usize| {
            let phys = self.a.row_permutation.index(row);

            weights.in_v[phys] != 0 && (allow_hdpc || !self.is_hdpc_row(phys))
        };

        let r = rows
            .clone()
            .filter(|&row| eligible(row))
            .map(|row| weights.in_v[self.a.row_permutation.index(row)])
            .min()
            .ok_or(DecodingFailure::AllEntriesInVAreZero)?;

        if r == 2 && !allow_hdpc {
            if let Some(row) = self.choose_row_from_graph(weights) {
                return Ok((row, r));
            }
        }

        // Otherwise take the row of weight r with the smallest original degree.
        let row = rows
            .filter(|&row| eligible(row) && weights.in_v[self.a.row_permutation.index(row)] == r)
            .min_by_key(|&row| weights.original[self.a.row_permutation.index(row)])
            .ok_or(DecodingFailure::AllEntriesInVAreZero)?;

        Ok((row, r))
    }

    // Among the rows with exactly two ones in V, choose one that is an edge of a
    // maximum size component of the graph on the columns of V that they define.
    fn choose_row_from_graph(&self, weights: &RowWeights) -> Option<usize> {
        let v_start = self.i;
        let v_end = self.v_end();

        let mut edge_rows = Vec::new();
        let mut edges = Vec::new();

        for row in v_start..self.a.nrows() {
            let phys = self.a.row_permutation.index(row);

            if weights.in_v[phys] != 2 || self.is_hdpc_row(phys) {
                continue;
            }

            let mut cols = (v_start..v_end).filter(|&col| self.a[(row, col)] != 0);

            if let (Some(c0), Some(c1)) = (cols.next(), cols.next()) {
                if self.a[(row, c0)] == 1 && self.a[(row, c1)] == 1 {
                    edge_rows.push(row);
                    edges.push((c0 - v_start, c1 - v_start));
                }
            }
        }

        first_edge_in_largest_component(v_end - v_start, &edges).map(|edge| edge_rows[edge])
    }

    // Reduce A to the form
    //
    //   +-----------+-----------------+---------+
    //   |           |                 |         |
    //   |     I     |    All Zeros    |         |
    //   |           |                 |         |
    //   +-----------+-----------------+    U    |
    //   |           |                 |         |
    //   |           |                 |         |
    //   | All Zeros |       V         |         |
    //   |           |                 |         |
    //   |           |                 |         |
    //   +-----------+-----------------+---------+
    //
    // where I is diagonal (not necessarily unit), until V is empty.
    pub(super) fn first_phase(&mut self) -> Result<(), DecodingFailure> {
        let l = self.params.num_intermediate_symbols();
        let m = self.a.nrows();

        // The row and column permutations are the identity at this point.
        let mut weights = RowWeights {
            in_v: (0..m).map(|row| self.a.row_weight_in(row, 0..l - self.u)).collect(),
            original: (0..m).map(|row| self.a.mat.row_weight(row)).collect(),
        };

        while self.i + self.u < l {
            let i = self.i;
            let v_end = self.v_end();

            let (row, r) = self.choose_row(&weights).inspect_err(|err| {
                debug!(i, u = self.u, ?err, "first phase failed");
            })?;

            trace!(i, row, r, "first phase pivot");

            if row != i {
                self.a.swap_rows(i, row);
            }

            // Move one nonzero of the chosen row to column i and the other r - 1 to the
            // last r - 1 columns of V.
            let mut cols = std::mem::take(&mut self.nonzero_cols);

            cols.clear();
            cols.extend((i..v_end).filter(|&col| self.a[(i, col)] != 0));

            debug_assert_eq!(cols.len(), r);

            let first = cols[0];
            if first != i {
                self.a.swap_columns(i, first);
            }

            // Going from the highest column down, no nonzero is swapped out of place.
            for (k, &col) in cols[1..].iter().rev().enumerate() {
                let target = v_end - 1 - k;

                if col != target {
                    self.a.swap_columns(col, target);
                }
            }

            self.nonzero_cols = cols;

            let new_v_end = v_end - (r - 1);

            // Eliminate column i below row i.
            let alpha = self.a[(i, i)];

            for row in i + 1..m {
                let phys = self.a.row_permutation.index(row);
                let beta = self.a[(row, i)];

                if beta != 0 {
                    let factor = gf256::div(beta, alpha);

                    self.a.row_add_scaled(row, i, factor);

                    self.row_operation(RowOperation::AddScaled {
                        dst: phys,
                        src: self.a.row_permutation.index(i),
                        factor,
                    });

                    weights.in_v[phys] = self.a.row_weight_in(row, i + 1..new_v_end);
                } else {
                    weights.in_v[phys] -= self.a.row_weight_in(row, new_v_end..v_end);
                }
            }

            self.i += 1;
            self.u += r - 1;
        }

        debug!(i = self.i, u = self.u, "first phase done");

        Ok(())
    }
}
