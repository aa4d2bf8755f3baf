fn main() {
    if let Err(err) = csv_columndet::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
