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

use tracing::debug;

use crate::{error::DecodingFailure, rq::pi_decoder::PiDecoder};

impl PiDecoder<'_> {
    // Reduce U_lower, rows [i, M) and columns [i, L) of A, to the identity over its first
    // u rows, or fail if its rank is less than u.
    pub(super) fn second_phase(&mut self) -> Result<(), DecodingFailure> {
        let PiDecoder { a, d, i, u, .. } = self;

        a.eliminate_lower_right(*i, |op| op.apply(d))
            .inspect_err(|err| debug!(i = *i, u = *u, ?err, "second phase failed"))
    }
}
