use std::io;

fn main() {
    flopbot_cli::logging::init_logging();
    let code = flopbot_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
