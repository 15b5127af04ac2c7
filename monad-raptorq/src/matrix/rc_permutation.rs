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

// A permutation that supports O(1) swaps in both directions, used to track row and
// column exchanges without moving matrix data.
#[derive(Clone, Debug, PartialEq)]
pub struct RCPermutation {
    virt_to_phys: Vec<u32>,
    phys_to_virt: Vec<u32>,
}

impl RCPermutation {
    pub fn new(len: usize) -> RCPermutation {
        let len: u32 = len.try_into().expect("permutation length fits in u32");
        let virt_to_phys: Vec<u32> = (0..len).collect();
        let phys_to_virt: Vec<u32> = (0..len).collect();

        RCPermutation {
            virt_to_phys,
            phys_to_virt,
        }
    }

    pub fn index(&self, a: usize) -> usize {
        self.virt_to_phys[a] as usize
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.virt_to_phys.swap(a, b);

        self.phys_to_virt.swap(
            self.virt_to_phys[a] as usize,
            self.virt_to_phys[b] as usize,
        );
    }
}
