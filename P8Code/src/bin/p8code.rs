//! P8Code command-line binary

fn main() -> anyhow::Result<()> {
    p8code::cli::run_cli()
}
