//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = fleetfit_cli::run() {
        if let fleetfit_cli::CliError::ArgumentParsing(clap_err) = &err {
            // Help and version exit 0; usage errors keep clap's exit code.
            clap_err.exit();
        }
        eprintln!("fleetfit: {err}");
        std::process::exit(1);
    }
}
