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
    fmt::{Display, Formatter},
    ops::{Index, IndexMut},
};

use crate::matrix::{OctetMatrix, RCPermutation};

// An OctetMatrix viewed through a row permutation and a column permutation.  Row and
// column swaps only touch the permutations; row arithmetic is done on physical rows.
#[derive(Clone, Debug)]
pub struct RCSwapMatrix {
    pub mat: OctetMatrix,
    pub row_permutation: RCPermutation,
    pub column_permutation: RCPermutation,
}

impl RCSwapMatrix {
    pub fn from_octet_matrix(mat: OctetMatrix) -> RCSwapMatrix {
        let row_permutation = RCPermutation::new(mat.nrows());
        let column_permutation = RCPermutation::new(mat.ncols());

        RCSwapMatrix {
            mat,
            row_permutation,
            column_permutation,
        }
    }

    pub fn nrows(&self) -> usize {
        self.mat.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.mat.ncols()
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.row_permutation.swap(a, b);
    }

    pub fn swap_columns(&mut self, a: usize, b: usize) {
        self.column_permutation.swap(a, b);
    }

    // row[a] += factor * row[b]
    pub fn row_add_scaled(&mut self, a: usize, b: usize, factor: u8) {
        let a_phys = self.row_permutation.index(a);
        let b_phys = self.row_permutation.index(b);

        self.mat.add_scaled_row(a_phys, b_phys, factor);
    }

    // row[a] *= factor
    pub fn row_scale(&mut self, a: usize, factor: u8) {
        let a_phys = self.row_permutation.index(a);

        self.mat.scale_row(a_phys, factor);
    }

    // row[a] /= divisor
    pub fn row_divide(&mut self, a: usize, divisor: u8) {
        let a_phys = self.row_permutation.index(a);

        self.mat.divide_row(a_phys, divisor);
    }

    // Number of nonzero elements of row `row` within the logical columns `cols`.
    pub fn row_weight_in(&self, row: usize, cols: std::ops::Range<usize>) -> usize {
        cols.filter(|&col| self[(row, col)] != 0).count()
    }

    pub fn to_octet_matrix(&self) -> OctetMatrix {
        OctetMatrix::from_fn(self.mat.nrows(), self.mat.ncols(), |i, j| self[(i, j)])
    }
}

impl Display for RCSwapMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_octet_matrix())
    }
}

impl Index<(usize, usize)> for RCSwapMatrix {
    type Output = u8;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.mat[(
            self.row_permutation.index(index.0),
            self.column_permutation.index(index.1),
        )]
    }
}

impl IndexMut<(usize, usize)> for RCSwapMatrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.mat[(
            self.row_permutation.index(index.0),
            self.column_permutation.index(index.1),
        )]
    }
}

#[cfg(test)]
mod test {
    use super::RCSwapMatrix;
    use crate::matrix::OctetMatrix;

    #[test]
    fn test_swaps_are_views() {
        let mat = OctetMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as u8);
        let mut a = RCSwapMatrix::from_octet_matrix(mat.clone());

        a.swap_rows(0, 2);
        a.swap_columns(1, 2);

        assert_eq!(a[(0, 0)], mat[(2, 0)]);
        assert_eq!(a[(0, 1)], mat[(2, 2)]);
        assert_eq!(a[(1, 2)], mat[(1, 1)]);

        // The physical data is untouched.
        assert_eq!(a.mat, mat);

        assert_eq!(a.row_weight_in(2, 0..3), 2);
        assert_eq!(a.to_octet_matrix()[(2, 1)], mat[(0, 2)]);
    }
}
