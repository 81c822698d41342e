use ditherator::DitherResult;

use crate::cli::PreviewCommand;

use super::utils::{build_ditherator, derive_variant_path};

/// The main function to run the preview command.
pub fn run(cmd: PreviewCommand) -> DitherResult<()> {
    let ditherator = build_ditherator(&cmd.dither)?;
    let handle = ditherator.for_image(&cmd.input)?.dither();
    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_variant_path(&cmd.input, "preview", "png"));

    handle.save_preview(
        &output_path,
        &cmd.colors.foreground,
        &cmd.colors.background,
        cmd.dither.scale,
    )?;
    tracing::info!(
        algorithm = %handle.settings().algorithm,
        threshold = handle.settings().threshold,
        "preview rendered"
    );
    println!("Preview PNG saved to {}", output_path.display());

    Ok(())
}
