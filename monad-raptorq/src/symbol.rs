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

// Vector operations over GF(256) on equally sized symbols.

use crate::gf256::{OCT_EXP, OCT_LOG};

// dst += src
pub fn xor_eq(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len());

    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }
}

// dst *= beta
pub fn scale(dst: &mut [u8], beta: u8) {
    match beta {
        0 => dst.fill(0),
        1 => {}
        _ => {
            let log_beta = usize::from(OCT_LOG[usize::from(beta)]);

            for d in dst.iter_mut() {
                if *d != 0 {
                    *d = OCT_EXP[usize::from(OCT_LOG[usize::from(*d)]) + log_beta];
                }
            }
        }
    }
}

// dst /= beta
pub fn divide(dst: &mut [u8], beta: u8) {
    assert_ne!(beta, 0, "GF(256) division by zero");

    if beta != 1 {
        scale(dst, OCT_EXP[255 - usize::from(OCT_LOG[usize::from(beta)])]);
    }
}

// dst += beta * src
pub fn add_scaled_eq(dst: &mut [u8], src: &[u8], beta: u8) {
    assert_eq!(dst.len(), src.len());

    match beta {
        0 => {}
        1 => xor_eq(dst, src),
        _ => {
            let log_beta = usize::from(OCT_LOG[usize::from(beta)]);

            for (d, s) in dst.iter_mut().zip(src) {
                if *s != 0 {
                    *d ^= OCT_EXP[usize::from(OCT_LOG[usize::from(*s)]) + log_beta];
                }
            }
        }
    }
}
