fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match medsearch_core::runtime::parse_cli_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("[medsearch-core] {error}");
            std::process::exit(2);
        }
    };

    if let Err(error) = medsearch_core::runtime::run_with_options(options) {
        eprintln!("[medsearch-core] replay failed: {error}");
        std::process::exit(1);
    }
}
