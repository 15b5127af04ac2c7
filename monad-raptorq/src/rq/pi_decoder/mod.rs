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

// Permanent inactivation decoding according to RFC 6330 section 5.4.2.

mod back_substitution;
mod first_phase;
mod graph;
mod second_phase;

use tracing::debug;

use crate::{
    error::Error,
    matrix::{OctetMatrix, RCSwapMatrix, RowOperation},
    rq::CodeParameters,
};

struct PiDecoder<'a> {
    params: &'a CodeParameters,

    // The matrix under elimination, viewed through its row and column permutations.
    a: RCSwapMatrix,

    // An unmodified copy of the physical A matrix.  Indexed through the permutations of
    // `a`, this is the matrix X of the RFC.
    x: OctetMatrix,

    // The symbol data, one symbol per physical row of `a`.  Every row operation on `a`
    // is replayed here.
    d: OctetMatrix,

    // The size of the identity part of A built up by the first phase, and the number of
    // inactivated columns.
    i: usize,
    u: usize,

    // Scratch space for the nonzero columns of a pivot row in the first phase.
    nonzero_cols: Vec<usize>,
}

impl<'a> PiDecoder<'a> {
    fn new(params: &'a CodeParameters, a: OctetMatrix, d: OctetMatrix) -> PiDecoder<'a> {
        let x = a.clone();

        PiDecoder {
            params,
            a: RCSwapMatrix::from_octet_matrix(a),
            x,
            d,
            i: 0,
            u: params.num_pi_symbols(),
            nonzero_cols: Vec::with_capacity(params.num_intermediate_symbols()),
        }
    }

    fn x(&self, row: usize, col: usize) -> u8 {
        self.x[(
            self.a.row_permutation.index(row),
            self.a.column_permutation.index(col),
        )]
    }

    fn row_operation(&mut self, op: RowOperation) {
        op.apply(&mut self.d);
    }

    // C[c[s]] = D[d[s]] for s in 0..L
    fn intermediate_symbols(&self) -> OctetMatrix {
        let l = self.params.num_intermediate_symbols();

        let mut c = OctetMatrix::from_element(l, self.d.ncols(), 0);

        for s in 0..l {
            c.row_mut(self.a.column_permutation.index(s))
                .copy_from_slice(self.d.row(self.a.row_permutation.index(s)));
        }

        c
    }
}

// Solve A * C = D for the L intermediate symbols C, where A is an M x L matrix whose
// first L rows are the constraint matrix (possibly with some G_ENC rows replaced) and
// D holds one symbol per row of A.
pub fn solve(
    params: &CodeParameters,
    a: OctetMatrix,
    d: OctetMatrix,
) -> Result<OctetMatrix, Error> {
    let l = params.num_intermediate_symbols();

    if a.ncols() != l || a.nrows() < l || d.nrows() != a.nrows() {
        return Err(Error::InvalidParameters(format!(
            "cannot decode a {}x{} matrix with {} data rows for L = {}",
            a.nrows(),
            a.ncols(),
            d.nrows(),
            l
        )));
    }

    let mut decoder = PiDecoder::new(params, a, d);

    decoder.first_phase()?;
    decoder.second_phase()?;
    decoder.third_phase();
    decoder.fourth_phase();
    decoder.fifth_phase();

    debug!(
        num_rows = decoder.a.nrows(),
        l,
        inactivated = decoder.u,
        "solved for intermediate symbols"
    );

    Ok(decoder.intermediate_symbols())
}
