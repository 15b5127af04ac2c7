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

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    ops::{Index, IndexMut},
};

use crate::symbol;

// Row-major dense matrix over GF(256).  Also used to hold blocks of symbols, one
// symbol per row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OctetMatrix {
    data: Vec<u8>,
    nrows: usize,
    ncols: usize,
}

impl OctetMatrix {
    pub fn from_element(nrows: usize, ncols: usize, elem: u8) -> OctetMatrix {
        let data = vec![elem; nrows * ncols];

        OctetMatrix { data, nrows, ncols }
    }

    pub fn from_fn(
        nrows: usize,
        ncols: usize,
        mut f: impl FnMut(usize, usize) -> u8,
    ) -> OctetMatrix {
        let mut data = Vec::with_capacity(nrows * ncols);

        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }

        OctetMatrix { data, nrows, ncols }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn row(&self, i: usize) -> &[u8] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [u8] {
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    pub fn clear_row(&mut self, i: usize) {
        self.row_mut(i).fill(0);
    }

    // Split the borrow to be able to get a mutable reference to row `a` and an
    // immutable reference to row `b` without using unsafe code.
    fn get_two_mut(&mut self, a: usize, b: usize) -> (&mut [u8], &[u8]) {
        let ncols = self.ncols;

        match a.cmp(&b) {
            Ordering::Less => {
                let (first, second) = self.data.split_at_mut(b * ncols);
                (&mut first[a * ncols..(a + 1) * ncols], &second[..ncols])
            }
            Ordering::Greater => {
                let (first, second) = self.data.split_at_mut(a * ncols);
                (&mut second[..ncols], &first[b * ncols..(b + 1) * ncols])
            }
            Ordering::Equal => panic!("get_two_mut: Was asked to borrow row {} twice", a),
        }
    }

    // row[a] += factor * row[b]
    pub fn add_scaled_row(&mut self, a: usize, b: usize, factor: u8) {
        if factor != 0 {
            let (dst, src) = self.get_two_mut(a, b);

            symbol::add_scaled_eq(dst, src, factor);
        }
    }

    // row[a] *= factor
    pub fn scale_row(&mut self, a: usize, factor: u8) {
        symbol::scale(self.row_mut(a), factor);
    }

    // row[a] /= divisor
    pub fn divide_row(&mut self, a: usize, divisor: u8) {
        symbol::divide(self.row_mut(a), divisor);
    }

    pub fn mul(&self, rhs: &OctetMatrix) -> OctetMatrix {
        assert_eq!(self.ncols, rhs.nrows);

        let mut result = OctetMatrix::from_element(self.nrows, rhs.ncols, 0);

        for i in 0..self.nrows {
            for k in 0..self.ncols {
                let beta = self[(i, k)];

                if beta != 0 {
                    symbol::add_scaled_eq(result.row_mut(i), rhs.row(k), beta);
                }
            }
        }

        result
    }

    pub fn row_weight(&self, i: usize) -> usize {
        self.row(i).iter().filter(|elem| **elem != 0).count()
    }
}

impl Display for OctetMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        writeln!(f)?;

        for i in 0..self.nrows {
            write!(f, "  |")?;

            for j in 0..self.ncols {
                write!(f, " {:02x}", self[(i, j)])?;
            }

            writeln!(f, " |")?;
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for OctetMatrix {
    type Output = u8;

    fn index(&self, index: (usize, usize)) -> &u8 {
        &self.data[index.0 * self.ncols + index.1]
    }
}

impl IndexMut<(usize, usize)> for OctetMatrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut u8 {
        &mut self.data[index.0 * self.ncols + index.1]
    }
}
