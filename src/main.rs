use std::{env, fs::read_to_string, path::Path, process::exit, time::Instant};

use fxfront::{display_diagnostic, display_error, parser::parser::parse};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        let program = args.first().map(String::as_str).unwrap_or("fxfront");
        eprintln!("Usage: {} <file.fx>", program);
        exit(2);
    }

    let file_path = Path::new(&args[1]);
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args[1].clone());

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path.display(), error);
            exit(2);
        }
    };

    let start = Instant::now();
    let (diagnostics, result) = parse(&source, Some(file_name));
    println!("Parsed in {:?}", start.elapsed());

    for diagnostic in &diagnostics {
        display_diagnostic(diagnostic, &source);
    }

    match result {
        Ok(program) if diagnostics.is_empty() => {
            println!("{} function(s), no errors", program.functions.len());
        }
        Ok(_) => {
            println!("{} error(s)", diagnostics.len());
            exit(1);
        }
        Err(error) => {
            display_error(&error, &source);
            exit(1);
        }
    }
}
