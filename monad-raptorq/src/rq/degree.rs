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

use crate::binary_search::smallest_integer_satisfying;

// Upper bound (exclusive) for the v argument of deg().
pub const MAX_V: u32 = 1 << 20;

pub const MAX_DEGREE: usize = 30;

// The degree distribution of RFC 6330 section 5.3.5.2.
#[allow(clippy::unreadable_literal)]
const DEGREE_DISTRIBUTION: [u32; MAX_DEGREE + 1] = [
    0, 5243, 529531, 704294, 791675, 844104, 879057, 904023, 922747, 937311, 948962, 958494,
    966438, 973160, 978921, 983914, 988283, 992138, 995565, 998631, 1001391, 1003887, 1006157,
    1008229, 1010129, 1011876, 1013490, 1014983, 1016370, 1017662, 1048576,
];

// Deg[v], capped at W - 2.
pub fn deg(v: u32, num_lt_symbols: usize) -> usize {
    assert!(v < MAX_V, "Can't find Deg({})", v);

    let d = smallest_integer_satisfying(1, DEGREE_DISTRIBUTION.len(), |d| {
        v < DEGREE_DISTRIBUTION[d]
    })
    .unwrap_or(MAX_DEGREE);

    d.min(num_lt_symbols - 2)
}
