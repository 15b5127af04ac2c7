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
    // Implant the constraint rows of the matrix A according to RFC 6330 section
    // 5.3.3.4.2:
    //
    //                 B            S          U        H
    //   +-----------------------+-------+-----------+-------+
    //   |                       |       |           |       |
    // S |       G_LDPC,1        |  I_S  |   G_LDPC,2        |
    //   |                       |       |           |       |
    //   +-----------------------+-------+-----------+-------+
    //   |                                           |       |
    // H |                 G_HDPC                    |  I_H  |
    //   |                                           |       |
    //   +-------------------------------------------+-------+
    //
    // Elements are added to a caller-provided zero matrix.
    pub fn a_common(&self, mut add_element: impl FnMut(usize, usize, u8)) {
        let s = self.num_ldpc_symbols();
        let h = self.num_hdpc_symbols();
        let b = self.num_lt_non_ldpc_symbols();
        // I_H occupies the last H columns, [W + U, L).
        let first_hdpc_col = self.num_lt_symbols() + self.num_pi_non_hdpc_symbols();

        // G_LDPC,1 and G_LDPC,2
        self.g_ldpc(&mut add_element);

        // I_S
        for i in 0..s {
            add_element(i, b + i, 1);
        }

        // G_HDPC
        self.g_hdpc(|i, j, v| add_element(s + i, j, v));

        // I_H
        for i in 0..h {
            add_element(s + i, first_hdpc_col + i, 1);
        }
    }

    // Implant the G_ENC row for the encoding symbol with internal symbol ID
    // `internal_symbol_id` into row `row`.
    pub fn a_g_enc_row(
        &self,
        row: usize,
        internal_symbol_id: usize,
        mut add_element: impl FnMut(usize, usize, u8),
    ) {
        self.lt_sequence_op(internal_symbol_id, |j| add_element(row, j, 1));
    }

    // Generate the L x L matrix A which, when inverted, produces the intermediate symbols
    // from the constraint symbols and the K' extended source symbols.
    pub fn a_systematic(&self, mut add_element: impl FnMut(usize, usize, u8)) {
        self.a_common(&mut add_element);

        let first_g_enc_row = self.num_ldpc_symbols() + self.num_hdpc_symbols();

        for isi in 0..self.num_extended_source_symbols() {
            self.a_g_enc_row(first_g_enc_row + isi, isi, &mut add_element);
        }
    }
}
