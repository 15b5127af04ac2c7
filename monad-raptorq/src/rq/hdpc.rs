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
    gf256,
    rq::{rand::rand, CodeParameters},
};

impl CodeParameters {
    // Implant the elements of G_HDPC = MT * GAMMA according to RFC 6330 section 5.3.3.3.
    // Row indices are relative to the first HDPC row.
    //
    // MT is H x (K' + S), with two ones per column chosen by Rand[] and alpha^^i in row
    // i of the last column.  GAMMA is the lower triangular (K' + S) x (K' + S) matrix
    // with GAMMA[r][c] = alpha^^(r - c).  Because column c of GAMMA is alpha times
    // column c + 1 plus a unit entry, each row of the product can be evaluated from right
    // to left as row[c] = MT[c] + alpha * row[c + 1].
    pub fn g_hdpc(&self, mut add_element: impl FnMut(usize, usize, u8)) {
        let h = self.num_hdpc_symbols();
        let cols = self.num_extended_source_symbols() + self.num_ldpc_symbols();

        let h_u32: u32 = h.try_into().unwrap();

        let mut rows: Vec<Vec<u8>> = vec![vec![0; cols]; h];

        for (i, row) in rows.iter_mut().enumerate() {
            row[cols - 1] = gf256::exp(i);
        }

        for j in (0..cols - 1).rev() {
            for row in rows.iter_mut() {
                row[j] = gf256::mul(gf256::exp(1), row[j + 1]);
            }

            let x: u32 = (j + 1).try_into().unwrap();

            let i1 = rand(x, 6, h_u32) as usize;
            let i2 = (i1 + rand(x, 7, h_u32 - 1) as usize + 1) % h;

            rows[i1][j] ^= 1;
            rows[i2][j] ^= 1;
        }

        for (i, row) in rows.iter().enumerate() {
            for (j, elem) in row.iter().enumerate() {
                if *elem != 0 {
                    add_element(i, j, *elem);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        gf256,
        matrix::OctetMatrix,
        rq::{rand::rand, CodeParameters},
    };

    // Build MT and GAMMA explicitly and multiply them.
    fn naive_g_hdpc(params: &CodeParameters) -> OctetMatrix {
        let h = params.num_hdpc_symbols();
        let n = params.num_extended_source_symbols() + params.num_ldpc_symbols();

        let mut mt = OctetMatrix::from_element(h, n, 0);

        for j in 0..n - 1 {
            let x = (j + 1) as u32;

            let i1 = rand(x, 6, h as u32) as usize;
            let i2 = (i1 + rand(x, 7, h as u32 - 1) as usize + 1) % h;

            mt[(i1, j)] = 1;
            mt[(i2, j)] = 1;
        }

        for i in 0..h {
            mt[(i, n - 1)] = gf256::exp(i);
        }

        let gamma = OctetMatrix::from_fn(n, n, |r, c| if r >= c { gf256::exp(r - c) } else { 0 });

        mt.mul(&gamma)
    }

    #[test]
    fn test_g_hdpc_against_product() {
        // K' = 250 gives K' + S > 255, which exercises the wraparound of alpha's powers.
        for k in [10, 101, 250] {
            let params = CodeParameters::new(k).unwrap();

            let h = params.num_hdpc_symbols();
            let n = params.num_extended_source_symbols() + params.num_ldpc_symbols();

            let mut m = OctetMatrix::from_element(h, n, 0);
            params.g_hdpc(|i, j, v| m[(i, j)] ^= v);

            assert_eq!(m, naive_g_hdpc(&params));
        }
    }
}
