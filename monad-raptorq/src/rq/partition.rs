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

use crate::error::Error;

// The block partitioning function of RFC 6330 section 5.3.1.2: split `size` into
// `num_long` parts of `long_size` followed by `num_short` parts of `short_size`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Partition {
    pub long_size: usize,
    pub short_size: usize,
    pub num_long: usize,
    pub num_short: usize,
}

impl Partition {
    pub fn new(size: usize, num_parts: usize) -> Result<Partition, Error> {
        if num_parts == 0 {
            return Err(Error::InvalidParameters(format!(
                "cannot partition {} into zero parts",
                size
            )));
        }

        let long_size = size.div_ceil(num_parts);
        let short_size = size / num_parts;
        let num_long = size - short_size * num_parts;
        let num_short = num_parts - num_long;

        Ok(Partition {
            long_size,
            short_size,
            num_long,
            num_short,
        })
    }

    // The part sizes in order: all long parts first, then all short parts.
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        std::iter::repeat_n(self.long_size, self.num_long)
            .chain(std::iter::repeat_n(self.short_size, self.num_short))
    }
}
