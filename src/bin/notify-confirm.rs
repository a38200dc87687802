use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    notify_confirm::cli_app::run_from_args(std::env::args_os()).await
}
