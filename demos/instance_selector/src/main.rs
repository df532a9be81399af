//! Instance selector entry-point: resolve the flags and print what was asked for.

use instance_selector::cli::SelectorCli;
use instance_selector::error::{Result, SelectorError};
use instance_selector::selection::print_summary;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let cli = SelectorCli::new()?;
    let selection = match cli.parse_from(std::env::args_os()) {
        Ok(selection) => selection,
        Err(SelectorError::Flags(err)) => {
            if let Some(display) = err.display_request() {
                display.exit();
            }
            return Err(err.into());
        }
        Err(err) => return Err(err),
    };
    print_summary(&selection)?;
    Ok(())
}
