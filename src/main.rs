fn main() {
    if let Err(e) = lucky::cli::run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
