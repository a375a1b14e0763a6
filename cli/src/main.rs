use std::process::ExitCode;

use textvec_cli::{EmbedCli, init_tracing, parse_or_usage, report, run_embed};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = match parse_or_usage::<EmbedCli>(true) {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    init_tracing();
    report(run_embed(cli).await)
}
