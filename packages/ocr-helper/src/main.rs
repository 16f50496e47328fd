use std::process::ExitCode;

use ocr_helper::{logging, output, pipeline, Invocation, USAGE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let invocation = match Invocation::from_env() {
        Ok(invocation) => invocation,
        Err(e) => e.exit(),
    };

    let Invocation::Recognize {
        image_path,
        config,
        verbose,
        parse_error,
    } = invocation
    else {
        eprintln!("{USAGE}");
        return ExitCode::from(1);
    };

    logging::init(verbose);
    if let Some(reason) = parse_error {
        tracing::warn!("{reason}; using {} with default options", image_path.display());
    }

    // Every failure past this point still yields a JSON array on stdout.
    let regions = match pipeline::run(&image_path, &config).await {
        Ok(regions) => regions,
        Err(e) => {
            tracing::error!("{e}");
            Vec::new()
        }
    };

    println!("{}", output::render(&regions));
    ExitCode::SUCCESS
}
