use mazescore::{app::App, config::RunConfig, generators::MazeParams};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let app = App::from_config(&RunConfig::default())?;

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);
    let params = MazeParams {
        width: u8::MAX as usize,
        height: u8::MAX as usize,
    };
    app.profile(&params, num_iters)?;
    Ok(())
}
