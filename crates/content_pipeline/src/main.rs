use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    content_pipeline::exit_code(content_pipeline::execute_from_env())
}
