use owo_colors::OwoColorize;

/// Consistent, optionally colored user-facing printing. Everything that is
/// part of the interactive conversation (reports, warnings, prompts) goes to
/// stderr; only the final command echo uses stdout so it can be scripted
/// against. Colors are enabled only when the stream is a TTY.
fn err_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_warn(msg: &str) {
    if err_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if err_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Unprefixed stderr line: path listings and multi-line prompt preambles.
pub fn print_report(msg: &str) {
    eprintln!("{}", msg);
}

/// Plain stdout line for the final command echo (dry-run / verbose).
pub fn print_command(msg: &str) {
    println!("{}", msg);
}
