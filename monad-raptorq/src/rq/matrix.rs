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

use crate::{matrix::OctetMatrix, rq::CodeParameters};

impl CodeParameters {
    // The L x L constraint matrix A.
    pub fn constraint_matrix(&self) -> OctetMatrix {
        self.decoding_matrix(self.num_intermediate_symbols())
    }

    // An M x L matrix whose first L rows are the constraint matrix and whose remaining
    // M - L rows are zero, to be filled in with G_ENC rows for overhead symbols.
    pub fn decoding_matrix(&self, num_rows: usize) -> OctetMatrix {
        let l = self.num_intermediate_symbols();

        assert!(num_rows >= l);

        let mut a = OctetMatrix::from_element(num_rows, l, 0);

        self.a_systematic(|i, j, v| {
            a[(i, j)] ^= v;
        });

        a
    }

    // Replace row `row` of `a` by the G_ENC row of the given internal symbol ID.
    pub fn set_g_enc_row(&self, a: &mut OctetMatrix, row: usize, internal_symbol_id: usize) {
        a.clear_row(row);

        self.a_g_enc_row(row, internal_symbol_id, |i, j, v| {
            a[(i, j)] ^= v;
        });
    }
}

#[cfg(test)]
mod test {
    use crate::rq::CodeParameters;

    #[test]
    fn test_constraint_matrix_structure() {
        let params = CodeParameters::new(10).unwrap();

        let s = params.num_ldpc_symbols();
        let h = params.num_hdpc_symbols();
        let l = params.num_intermediate_symbols();
        let b = params.num_lt_non_ldpc_symbols();

        let a = params.constraint_matrix();

        assert_eq!(a.nrows(), l);
        assert_eq!(a.ncols(), l);

        // I_S and I_H
        for i in 0..s {
            assert_eq!(a[(i, b + i)], 1);
        }
        for i in 0..h {
            assert_eq!(a[(s + i, l - h + i)], 1);
            for j in l - h..l {
                assert_eq!(a[(s + i, j)], u8::from(j == l - h + i));
            }
        }

        // LDPC rows are binary.
        for i in 0..s {
            assert!(a.row(i).iter().all(|v| *v <= 1));
        }

        // G_ENC rows agree with the LT index sequence.
        for isi in 0..params.num_extended_source_symbols() {
            let mut indices = Vec::new();
            params.lt_sequence_op(isi, |j| indices.push(j));

            for j in 0..l {
                assert_eq!(a[(s + h + isi, j)], u8::from(indices.contains(&j)));
            }
        }
    }

    #[test]
    fn test_constraint_matrix_deterministic() {
        for k in [10, 55, 300] {
            let params = CodeParameters::new(k).unwrap();

            assert_eq!(params.constraint_matrix(), params.constraint_matrix());
        }
    }

    #[test]
    fn test_decoding_matrix_overhead_rows() {
        let params = CodeParameters::new(20).unwrap();
        let l = params.num_intermediate_symbols();

        let mut a = params.decoding_matrix(l + 2);

        assert_eq!(a.nrows(), l + 2);
        assert_eq!(a.row_weight(l), 0);
        assert_eq!(a.row_weight(l + 1), 0);

        params.set_g_enc_row(&mut a, l + 1, 3);

        let constraint = params.constraint_matrix();
        let s_plus_h = params.num_ldpc_symbols() + params.num_hdpc_symbols();

        assert_eq!(a.row(l + 1), constraint.row(s_plus_h + 3));
    }
}
