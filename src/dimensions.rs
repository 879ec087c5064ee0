// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Display, Formatter};

/// Width and height of a 2D surface, in texels
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of 4×4 blocks needed to cover these dimensions, as (columns, rows)
    pub fn blocks(self) -> (u32, u32) {
        (self.width.div_ceil(4), self.height.div_ceil(4))
    }

    pub fn is_power_of_two(self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }

    /// Iterate over the dimensions of a full mip chain starting with `self`. Each mip is half the
    /// size of the previous one rounded down, but never smaller than 1. The chain ends once both
    /// dimensions reach 1.
    pub fn mips(self) -> MipDimensionIterator {
        MipDimensionIterator {
            current: Some(self),
        }
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[u32; 2]> for Dimensions {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

pub trait Dimensioned {
    fn dimensions(&self) -> Dimensions;
}

pub struct MipDimensionIterator {
    current: Option<Dimensions>,
}

impl Iterator for MipDimensionIterator {
    type Item = Dimensions;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        self.current = if current.width <= 1 && current.height <= 1 {
            None // after mips are all 1, the chain terminates
        } else {
            Some(Dimensions {
                width: u32::max(current.width / 2, 1),
                height: u32::max(current.height / 2, 1),
            })
        };

        Some(current)
    }
}
