use clap::Parser;
use console::style;
use log::{error, info};
use std::process::ExitCode;
use thumbnails::component::PreviewGenerator;
use thumbnails::config::{Cli, Config};

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", style("✗").red().bold());
            return ExitCode::from(e.exit_code());
        }
    };

    println!("{}", style("=== 影片預覽縮圖與 VTT 產生 ===").cyan().bold());
    println!(
        "{}",
        style(format!("輸入: {}", config.input.display())).dim()
    );

    match PreviewGenerator::new(config).run() {
        Ok(summary) => {
            println!();
            println!(
                "{} 已產生 {} 個 cue: {}",
                style("✓").green(),
                summary.cue_count,
                summary.vtt_path.display()
            );
            if let Some(sprite) = &summary.sprite_path {
                println!("{} sprite 圖: {}", style("✓").green(), sprite.display());
            }
            if let Some(poster) = &summary.poster_path {
                println!("{} poster: {}", style("✓").green(), poster.display());
            }
            info!("程式正常結束");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("處理失敗: {e}");
            eprintln!("\n{} {e}", style("✗").red().bold());
            ExitCode::from(e.exit_code())
        }
    }
}
