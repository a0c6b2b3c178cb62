use log::{debug, error, info};
use scanwrap::{Options, Runner, Scanner, help_note, show_scanner_help};
use std::io::{self, Write};
use std::process;

const SCANNER_NAME: &str = "scanner";

#[tokio::main]
async fn main() {
    init_logger();

    let scanner: Scanner = Scanner::new(SCANNER_NAME);
    let options: Options = scanner.parse_options();

    if options.extra_help {
        if let Err(e) = show_scanner_help(&options).await {
            error!("Failed to run scanner: {}", e);
            process::exit(1);
        }
        let exe = std::env::args().next().unwrap_or_else(|| SCANNER_NAME.to_string());
        println!("{}", help_note(&exe));
        process::exit(2);
    }

    if !options.has_input() {
        error!("No input file given");
        process::exit(1);
    }
    if let Err(e) = options.input_lines() {
        error!("{}", e);
        process::exit(1);
    }

    let runner: Runner = Runner::from_options(&options);
    let mut stdout = io::stdout().lock();
    let mut write_error: Option<io::Error> = None;
    let result = runner
        .run_capturing([&options.input], |line| {
            // Keep draining the scanner after stdout goes away.
            if write_error.is_none() {
                if let Err(e) = writeln!(stdout, "{}", line) {
                    write_error = Some(e);
                }
            }
        })
        .await;

    if let Err(e) = result {
        error!("{}", e);
        process::exit(e.exit_code().unwrap_or(1));
    }
    match write_error {
        Some(e) if e.kind() == io::ErrorKind::BrokenPipe => debug!("stdout closed: {}", e),
        Some(e) => {
            error!("Failed to write scanner output: {}", e);
            process::exit(1);
        }
        None => info!("{} finished", runner.bin_path().display()),
    }
}

fn init_logger() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();
}
