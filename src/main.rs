use anyhow::Context;
use deckelpost::{init_logging, Cli, ProgramAssembler, ProgramInput};
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.log_json)?;

    let config = cli.to_config().context("Failed to build configuration")?;
    tracing::info!(
        "Post-processing for {} ({} units)",
        config.machine_name,
        config.units
    );

    let input = ProgramInput::load(&cli.input)
        .with_context(|| format!("Failed to read tool paths from {}", cli.input.display()))?;
    tracing::info!(
        "Loaded {} tool path(s), {} command(s)",
        input.paths.len(),
        input.command_count()
    );

    let program = ProgramAssembler::new(&config)
        .assemble(&input.paths)
        .context("Translation aborted")?;

    let mut text = program.text();
    text.push('\n');

    if cli.writes_stdout() {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(text.as_bytes())
            .context("Failed to write program to stdout")?;
        stdout.flush()?;
    } else {
        std::fs::write(&cli.output, text)
            .with_context(|| format!("Failed to write {}", cli.output.display()))?;
        tracing::info!("Wrote {}", cli.output.display());
    }

    for entry in &program.diagnostics {
        tracing::warn!(path = %entry.path, "{}", entry.diagnostic);
    }
    if !program.diagnostics.is_empty() {
        eprintln!(
            "{} diagnostic(s) across {} tool path(s); {} path(s) emitted",
            program.diagnostics.len(),
            input.paths.len(),
            program.emitted_paths
        );
    }

    Ok(())
}
