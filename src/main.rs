// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::{arg, command, value_parser, ArgAction};
use enumflags2::BitFlags;
use miette::{IntoDiagnostic, Result};
use tracing::Level;

use ddsload::dimensions::Dimensioned;
use ddsload::{DdsImage, LoadFlags};

fn main() -> Result<()> {
    let matches = command!()
        .about("Print the structure of a DDS texture")
        .arg(arg!(-v --verbose ... "Log more detail, repeat for more").action(ArgAction::Count))
        .arg(arg!(--"no-flip" "Keep rows in file order"))
        .arg(arg!(<FILE> "DDS file to inspect").value_parser(value_parser!(PathBuf)))
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut flags: BitFlags<LoadFlags> = BitFlags::default();
    if matches.get_flag("no-flip") {
        flags.remove(LoadFlags::ReverseRowOrder);
    }

    let path = matches
        .get_one::<PathBuf>("FILE")
        .ok_or_else(|| miette::miette!("no file given"))?;
    let image = DdsImage::load_with_flags(path, flags).into_diagnostic()?;

    println!("{}", image.name());
    println!("  format:  {}", image.pixel_format());
    println!("  cubemap: {}", image.is_cubemap());
    println!("  images:  {}", image.num_images());
    println!("  mips:    {}", image.num_mipmap_layers());

    for image_index in 0..image.num_images() {
        for (mip, layer) in image.layers(image_index).unwrap_or_default().iter().enumerate() {
            println!(
                "  image {image_index} mip {mip:>2}: {:>9} {:>8} bytes",
                layer.dimensions().to_string(),
                layer.data_size()
            );
        }
    }

    Ok(())
}
