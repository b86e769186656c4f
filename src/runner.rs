use crate::config::Config;
use crate::interpreter::Interpreter;

/// Run a whole script, reporting any lex, parse or runtime error against the
/// source it came from.
pub fn run(source: &str, filename: Option<&str>, config: Config) -> Option<Interpreter> {
    match Interpreter::with_config(source, config) {
        Ok(interpreter) => Some(interpreter),
        Err(error) => {
            if let Err(io_error) = error.report(source, filename) {
                eprintln!("{}", error);
                log::error!("failed to render report: {}", io_error);
            }
            None
        }
    }
}
