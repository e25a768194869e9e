//! # Carousel CLI
//!
//! 轮播状态机的无头模拟器，不需要任何渲染后端。
//!
//! ## 用法
//!
//! ```bash
//! # 默认配置、5 张幻灯片，空跑 5 秒
//! cargo run -p carousel-cli -- simulate
//!
//! # 指定配置与输入脚本，输出 JSON lines
//! cargo run -p carousel-cli -- simulate --config demos/configs/gallery.json \
//!     --script demos/scripts/gallery.json --until 8000 --json
//!
//! # 检查配置文件
//! cargo run -p carousel-cli -- check demos/configs/autoplay.json
//! ```

mod sim;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use carousel_runtime::{Carousel, CarouselConfig};
use clap::{Parser, Subcommand};
use tracing::Level;

use crate::sim::{Simulation, load_script};

#[derive(Parser)]
#[command(name = "carousel")]
#[command(about = "轮播状态机的无头模拟器")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 输出调试日志（重复两次输出 trace 日志）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行模拟并打印事件
    Simulate {
        /// 配置文件（JSON），省略时使用默认配置
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// 幻灯片数量
        #[arg(short = 'n', long, default_value = "5")]
        slides: usize,

        /// 输入脚本（JSON）
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// 模拟时长（毫秒）
        #[arg(short, long, default_value = "5000")]
        until: u64,

        /// 帧间隔（毫秒）
        #[arg(short, long, default_value = "16")]
        frame: u64,

        /// 以 JSON lines 输出
        #[arg(long)]
        json: bool,
    },

    /// 检查配置文件
    Check {
        /// 配置文件路径
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Simulate {
            config,
            slides,
            script,
            until,
            frame,
            json,
        } => simulate(config.as_deref(), slides, script.as_deref(), until, frame, json),
        Commands::Check { config } => check(&config),
    };

    if let Err(e) = result {
        eprintln!("❌ {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn simulate(
    config: Option<&Path>,
    slides: usize,
    script: Option<&Path>,
    until_ms: u64,
    frame_ms: u64,
    json: bool,
) -> anyhow::Result<()> {
    if frame_ms == 0 {
        anyhow::bail!("帧间隔必须大于 0");
    }

    let config = match config {
        Some(path) => CarouselConfig::from_file(path)
            .with_context(|| format!("无法加载配置: {}", path.display()))?,
        None => CarouselConfig::default(),
    };
    let script = match script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let carousel = Carousel::new(slides, config).context("无法创建轮播")?;
    let mut sim = Simulation::new(carousel, script, frame_ms);
    sim.run(until_ms);

    for timed in sim.events() {
        if json {
            println!("{}", serde_json::to_string(timed)?);
        } else {
            println!("{:>7}ms  {}", timed.at_ms, timed.event);
        }
    }

    if !json {
        let state = sim.carousel().state();
        eprintln!(
            "\n模拟结束于 {}ms: cur={} prev={} next={} moving={}",
            sim.now_ms(),
            state.cur,
            state.prev,
            state.next,
            sim.carousel().is_moving()
        );
    }
    Ok(())
}

fn check(path: &Path) -> anyhow::Result<()> {
    let config = CarouselConfig::from_file(path)
        .with_context(|| format!("配置检查失败: {}", path.display()))?;

    eprintln!("✅ {}", path.display());
    eprintln!(
        "   visible_count={} start_index={} duration={}ms timing={}",
        config.visible_count, config.start_index, config.duration_ms, config.timing_function
    );
    match config.auto.interval_ms {
        Some(interval) => eprintln!(
            "   auto: every {}ms, dir={}, pause_on_hover={}",
            interval, config.auto.direction, config.auto.pause_on_hover
        ),
        None => eprintln!("   auto: off"),
    }
    Ok(())
}
