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

use crate::rq::CodeParameters;

impl CodeParameters {
    // Implant the elements of G_LDPC,1 and G_LDPC,2 according to RFC 6330 section
    // 5.3.3.3.  Elements are added, not set, so the caller must start from a zero
    // matrix.
    pub fn g_ldpc(&self, mut add_element: impl FnMut(usize, usize, u8)) {
        let s = self.num_ldpc_symbols();
        let w = self.num_lt_symbols();
        let p = self.num_pi_symbols();

        // G_LDPC,1: column i has ones at rows b, b + a and b + 2a (mod S).  Within each
        // S-wide circulant block, column i is column i - 1 shifted down by one row.
        for i in 0..self.num_lt_non_ldpc_symbols() {
            let a = 1 + i / s;

            let mut b = i % s;
            add_element(b, i, 1);

            b = (b + a) % s;
            add_element(b, i, 1);

            b = (b + a) % s;
            add_element(b, i, 1);
        }

        // G_LDPC,2
        for i in 0..s {
            add_element(i, w + (i % p), 1);
            add_element(i, w + ((i + 1) % p), 1);
        }
    }
}
