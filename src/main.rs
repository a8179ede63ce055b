use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_env::game::GameConfig;
use snake_env::modes::DemoMode;

#[derive(Parser)]
#[command(name = "snake_env")]
#[command(version, about = "Snake RL environment with a live score overlay")]
struct Cli {
    /// Run mode (currently only 'demo' is implemented)
    #[arg(long, default_value = "demo")]
    mode: Mode,

    /// Board width in pixels (multiple of the cell size)
    #[arg(long, default_value = "480")]
    width: i32,

    /// Board height in pixels (multiple of the cell size)
    #[arg(long, default_value = "360")]
    height: i32,

    /// Grid cell size in pixels
    #[arg(long, default_value = "20")]
    cell_size: i32,

    /// Advisory pacing target in ticks per second
    #[arg(long, default_value = "12")]
    speed: u32,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Watch the probe policy play
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        width: cli.width,
        height: cli.height,
        cell_size: cli.cell_size,
        speed: cli.speed,
        ..GameConfig::default()
    };

    match cli.mode {
        Mode::Demo => {
            let mut demo = DemoMode::new(config)?;
            demo.run().await?;
        }
    }

    Ok(())
}
