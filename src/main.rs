//! MP3 frame counting command line tool
//!
//! Runs each input file through the same checks as the upload endpoint
//! and prints its frame count, or the JSON reply with `-j`.

use mp3_frame_counter::{
    FrameCountResponse, FrameScanner, HttpReply, LogObserver, UploadConfig, UploadHandler,
    UploadedFile,
};
use std::env;
use std::io::{self, Read};
use std::process;

/// Command line arguments structure
struct Args {
    inputs: Vec<String>,
    json: bool,
    summary: bool,
    max_file_size: Option<usize>,
    quiet: bool,
    verbose: bool,
}

impl Args {
    /// Parse command line arguments
    fn parse() -> Result<Self, String> {
        let args: Vec<String> = env::args().collect();

        if args.len() < 2 {
            return Err("".to_string()); // Empty error triggers usage display
        }

        let mut json = false;
        let mut summary = false;
        let mut max_file_size = None;
        let mut quiet = false;
        let mut verbose = false;

        let mut i = 1;

        // Parse options (flags starting with -)
        while i < args.len() && args[i].starts_with('-') && args[i] != "-" {
            match args[i].as_str() {
                "-j" => json = true,
                "-s" => summary = true,
                "-m" => {
                    i += 1;
                    let value = args
                        .get(i)
                        .ok_or_else(|| "Option -m requires a size in bytes".to_string())?;
                    let limit = value
                        .parse::<usize>()
                        .map_err(|_| format!("Invalid size: {}", value))?;
                    max_file_size = Some(limit);
                }
                "-q" => {
                    quiet = true;
                    verbose = false;
                }
                "-v" => {
                    verbose = true;
                    quiet = false;
                }
                "-h" => return Err("".to_string()),
                other => return Err(format!("Unknown option: {}", other)),
            }
            i += 1;
        }

        if i >= args.len() {
            return Err("".to_string());
        }

        Ok(Self {
            inputs: args[i..].to_vec(),
            json,
            summary,
            max_file_size,
            quiet,
            verbose,
        })
    }
}

fn print_usage() {
    println!("Usage: mp3-frame-counter [options] <file>...");
    println!();
    println!("Use \"-\" for standard input (treated as audio/mpeg).");
    println!();
    println!("Options:");
    println!(" -h            this help message");
    println!(" -j            print the JSON reply for each file");
    println!(" -s            print scan totals (tag size, rejected candidates, duration)");
    println!(" -m <bytes>    reject files larger than <bytes>");
    println!(" -q            quiet mode");
    println!(" -v            verbose mode");
}

/// Load an input as an upload, reading standard input for "-"
fn load_input(input: &str) -> io::Result<UploadedFile> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes)?;
        return Ok(UploadedFile::new("stdin.mp3", "audio/mpeg", bytes));
    }
    UploadedFile::from_path(input)
}

/// Process one input, returning whether it produced a frame count
fn process_input(handler: &UploadHandler<LogObserver>, input: &str, args: &Args) -> bool {
    let file = match load_input(input) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("{}: {}", input, err);
            return false;
        }
    };

    let result = handler.scan_upload(Some(&file));

    if args.json {
        let reply = HttpReply::from_result(result.clone().map(|summary| FrameCountResponse {
            frame_count: summary.frame_count,
        }));
        println!("{}", reply.body);
    } else {
        match &result {
            Ok(summary) => {
                if !args.quiet {
                    println!("{}: {} frames", input, summary.frame_count);
                }
            }
            Err(err) if err.is_client_error() => {
                eprintln!("{}: {} ({})", input, err, err.status_code())
            }
            Err(err) => eprintln!(
                "{}: {} ({}), rerun with -v for details",
                input,
                err,
                err.status_code()
            ),
        }
    }

    if let (true, Ok(summary)) = (args.summary, &result) {
        match serde_json::to_string(summary) {
            Ok(text) => println!("{}", text),
            Err(err) => eprintln!("{}: {}", input, err),
        }
    }

    result.is_ok()
}

fn main() {
    // Parse command line arguments
    let args = match Args::parse() {
        Ok(args) => args,
        Err(err) => {
            if err.is_empty() {
                print_usage();
            } else {
                eprintln!("Error: {}", err);
            }
            process::exit(1);
        }
    };

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else if args.quiet {
        log::LevelFilter::Off
    } else {
        log::LevelFilter::Error
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let mut config = UploadConfig::default();
    if let Some(limit) = args.max_file_size {
        config = config.with_max_file_size(limit);
    }
    if let Err(err) = config.validate() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }

    let handler = UploadHandler::with_scanner(config, FrameScanner::with_observer(LogObserver));

    let mut all_ok = true;
    for input in &args.inputs {
        all_ok &= process_input(&handler, input, &args);
    }

    if !all_ok {
        process::exit(1);
    }
}
