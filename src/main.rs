mod app;
mod logging;

fn main() {
    let args = careful_rm::cli::parse();
    match app::run(args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            careful_rm::output::print_error(&format!("{err:#}"));
            std::process::exit(1);
        }
    }
}
