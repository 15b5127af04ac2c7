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

// Checks that the constraint matrix can be inverted by the permanent inactivation
// decoder for every tabulated K'.

use monad_raptorq::{
    rq::{pi_decoder, systematic_index},
    CodeParameters, OctetMatrix,
};
use rand::{thread_rng, Rng};

const SYMBOL_LEN: usize = 2;

fn check_a_invertible(max_extended_source_symbols: usize) {
    let mut rng = thread_rng();

    for k_prime in systematic_index::extended_source_symbols()
        .take_while(|k_prime| *k_prime <= max_extended_source_symbols)
    {
        println!("Testing K' = {}", k_prime);

        let params = CodeParameters::new(k_prime).unwrap();

        let a = params.constraint_matrix();
        let c =
            OctetMatrix::from_fn(params.num_intermediate_symbols(), SYMBOL_LEN, |_, _| rng.gen());
        let d = a.mul(&c);

        match pi_decoder::solve(&params, a, d) {
            Ok(recovered) => assert_eq!(recovered, c, "wrong solution for K' = {}", k_prime),
            Err(err) => panic!("Inverting A matrix for K' = {} failed: {}", k_prime, err),
        }
    }
}

#[test]
fn check_a_invertible_small() {
    check_a_invertible(if cfg!(debug_assertions) { 128 } else { 1024 });
}

#[test]
#[ignore]
fn check_a_invertible_large() {
    check_a_invertible(4096);
}
