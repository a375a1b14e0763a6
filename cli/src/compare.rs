use std::process::ExitCode;

use textvec_cli::{CompareCli, init_tracing, parse_or_usage, report, run_compare};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = match parse_or_usage::<CompareCli>(false) {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    init_tracing();
    report(run_compare(cli).await)
}
