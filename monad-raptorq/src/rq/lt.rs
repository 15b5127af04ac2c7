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
    matrix::OctetMatrix,
    rq::{tuple::Tuple, CodeParameters},
    symbol::xor_eq,
};

impl CodeParameters {
    // Call `op` for each intermediate symbol index that the encoding symbol with
    // internal symbol ID `internal_symbol_id` is the sum of, in the order of the enc[]
    // function of RFC 6330 section 5.3.5.3.  The G_ENC rows of the constraint matrix and
    // the encoder both enumerate indices through here.
    pub fn lt_sequence_op(&self, internal_symbol_id: usize, mut op: impl FnMut(usize)) {
        let Tuple {
            d,
            a,
            mut b,
            d1,
            a1,
            mut b1,
        } = self.tuple(internal_symbol_id);

        let w = self.num_lt_symbols();
        let p = self.num_pi_symbols();
        let p1 = self.num_pi_symbols_prime();

        op(b);

        for _ in 1..d {
            b = (b + a) % w;
            op(b);
        }

        while b1 >= p {
            b1 = (b1 + a1) % p1;
        }

        op(w + b1);

        for _ in 1..d1 {
            b1 = (b1 + a1) % p1;

            while b1 >= p {
                b1 = (b1 + a1) % p1;
            }

            op(w + b1);
        }
    }

    // Compute the encoding symbol with internal symbol ID `internal_symbol_id` from the
    // intermediate symbols.  Expects the output buffer to be filled with NUL bytes on
    // entry.
    pub fn lt_encode(&self, intermediate: &OctetMatrix, internal_symbol_id: usize, dst: &mut [u8]) {
        assert_eq!(intermediate.nrows(), self.num_intermediate_symbols());
        assert_eq!(dst.len(), intermediate.ncols());

        self.lt_sequence_op(internal_symbol_id, |index| {
            xor_eq(dst, intermediate.row(index));
        });
    }
}
