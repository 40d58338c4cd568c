use anyhow::Result;
use refindex_cli::app;

fn main() -> Result<()> {
    app::run()
}
