fn main() {
    if let Err(err) = specgen::cli::run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
