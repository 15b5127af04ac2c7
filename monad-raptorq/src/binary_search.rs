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

// Find the smallest integer in [from, to) for which `condition` holds, given that
// `condition` is monotonic over that interval.
pub fn smallest_integer_satisfying(
    from: usize,
    to: usize,
    condition: impl Fn(usize) -> bool,
) -> Option<usize> {
    let mut lower = from;
    let mut upper = to;

    while lower < upper {
        let pivot = lower + (upper - lower) / 2;

        if condition(pivot) {
            // The answer, if any, lies in [lower, pivot].
            upper = pivot;
        } else {
            lower = pivot + 1;
        }
    }

    if upper < to {
        Some(upper)
    } else {
        None
    }
}
