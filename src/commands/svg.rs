use ditherator::{DitherResult, estimated_size};

use crate::cli::SvgCommand;

use super::utils::{build_ditherator, derive_variant_path};

/// The main function to run the svg command.
pub fn run(cmd: SvgCommand) -> DitherResult<()> {
    let ditherator = build_ditherator(&cmd.dither)?;
    let handle = ditherator.for_image(&cmd.input)?.dither();
    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_variant_path(&cmd.input, "dithered", "svg"));

    let options = cmd.colors.svg_options(cmd.dither.scale);
    let svg = handle.save_svg(&output_path, &options)?;
    let mask = handle.mask();
    tracing::info!(
        algorithm = %handle.settings().algorithm,
        width = mask.width(),
        height = mask.height(),
        foreground_pct = mask.foreground_fraction() * 100.0,
        "dithered"
    );
    println!(
        "SVG saved to {} ({})",
        output_path.display(),
        estimated_size(&svg)
    );

    Ok(())
}
