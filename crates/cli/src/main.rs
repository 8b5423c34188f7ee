fn main() {
    if let Err(e) = javamap_cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
