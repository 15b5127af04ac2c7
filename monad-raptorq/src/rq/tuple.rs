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

use crate::rq::{
    degree::{deg, MAX_V},
    rand::rand,
    CodeParameters,
};

// The encoding parameters (d, a, b, d1, a1, b1) of one encoding symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tuple {
    pub d: usize,
    pub a: usize,
    pub b: usize,
    pub d1: usize,
    pub a1: usize,
    pub b1: usize,
}

impl CodeParameters {
    // Tuple[K', X] according to RFC 6330 section 5.3.5.4.
    pub fn tuple(&self, internal_symbol_id: usize) -> Tuple {
        let x: u32 = internal_symbol_id.try_into().unwrap();
        let j: u32 = self.systematic_index().try_into().unwrap();
        let w: u32 = self.num_lt_symbols().try_into().unwrap();
        let p1: u32 = self.num_pi_symbols_prime().try_into().unwrap();

        let mut a = 53591 + j * 997;
        if a % 2 == 0 {
            a += 1;
        }

        let b = 10267 * (j + 1);

        let y = b.wrapping_add(x.wrapping_mul(a));

        let v = rand(y, 0, MAX_V);

        let d = deg(v, self.num_lt_symbols());

        let d1 = if d < 4 { 2 + rand(x, 3, 2) } else { 2 };

        Tuple {
            d,
            a: 1 + rand(y, 1, w - 1) as usize,
            b: rand(y, 2, w) as usize,
            d1: d1 as usize,
            a1: 1 + rand(x, 4, p1 - 1) as usize,
            b1: rand(x, 5, p1) as usize,
        }
    }
}
