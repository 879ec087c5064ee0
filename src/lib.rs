// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub mod chunk;
pub mod container;
pub mod dimensions;
pub mod error;
pub mod format;
pub mod layer;
pub mod s3tc;
pub mod shape;

pub use container::dds::{DdsImage, LoadFlags};
pub use error::{DdsError, DdsResult};
pub use format::PixelFormat;
pub use layer::Layer;
