//! # xtask - 开发辅助工具
//!
//! 轮播仓库的本地门禁。
//!
//! ## 命令
//!
//! - `check-all`: fmt、clippy、test，最后检查 demos
//! - `cov`: 状态机的覆盖率报告，`--workspace` 时包含模拟器
//! - `demo-check`: 检查 demos 下的配置与输入脚本
//! - `demo-run`: 用 demos 下的配置与脚本运行模拟器

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use carousel_runtime::{CarouselConfig, CarouselInput};
use walkdir::WalkDir;
use xshell::{Shell, cmd};

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => check_all()?,
        "cov" => {
            let workspace = args.next().is_some_and(|arg| arg == "--workspace");
            coverage(workspace)?;
        }
        "demo-check" => {
            let path = args.next();
            demo_check(path.as_deref())?;
        }
        "demo-run" => demo_run()?,
        "help" | "-h" | "--help" => print_help(),
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 轮播仓库的本地门禁

USAGE:
  cargo xtask <command> [args]

COMMANDS:
  check-all           fmt、clippy、test，然后检查 demos/
  cov [--workspace]   覆盖率报告（默认只含 carousel-runtime）
  demo-check [path]   检查 demos/ 或指定路径下的 .json
  demo-run            每个脚本配同名配置跑一次模拟

demo-check 按所在目录区分文件：configs/ 下的按轮播配置解析并验证，
scripts/ 下的逐条检查 at_ms 与输入。
"#
    );
}

//=============================================================================
// check-all / cov 命令实现
//=============================================================================

fn check_all() -> anyhow::Result<()> {
    let sh = Shell::new()?;
    eprintln!("\n==> fmt");
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    eprintln!("\n==> clippy");
    cmd!(sh, "cargo clippy --workspace --all-targets").run()?;
    eprintln!("\n==> test");
    cmd!(sh, "cargo test --workspace").run()?;
    eprintln!("\n==> demos");
    demo_check(None)
}

fn coverage(workspace: bool) -> anyhow::Result<()> {
    let sh = Shell::new()?;
    if cmd!(sh, "cargo llvm-cov --version").quiet().ignore_stdout().run().is_err() {
        anyhow::bail!(
            "cargo llvm-cov 不可用，请先安装：\n  \
cargo install cargo-llvm-cov\n  \
rustup component add llvm-tools-preview"
        );
    }

    // xtask 本身不计入
    let scope: &[&str] = if workspace {
        &["--workspace", "--exclude", "xtask"]
    } else {
        &["-p", "carousel-runtime"]
    };
    cmd!(sh, "cargo llvm-cov {scope...} --html").run()?;
    eprintln!("\n覆盖率报告: target/llvm-cov/html/index.html");
    Ok(())
}

//=============================================================================
// demo-check 命令实现
//=============================================================================

/// demos 根目录（相对于 workspace root）
const DEMOS_DIR: &str = "demos";

/// 文件种类，由所在目录决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemoKind {
    Config,
    Script,
}

impl DemoKind {
    fn of(path: &Path) -> Option<Self> {
        path.components().find_map(|c| match c.as_os_str().to_str() {
            Some("configs") => Some(Self::Config),
            Some("scripts") => Some(Self::Script),
            _ => None,
        })
    }
}

/// 检查结果
#[derive(Default)]
struct DemoCheckResult {
    checked: usize,
    errors: usize,
    skipped: usize,
}

fn demo_check(path: Option<&str>) -> anyhow::Result<()> {
    let root = PathBuf::from(path.unwrap_or(DEMOS_DIR));
    if !root.exists() {
        anyhow::bail!(
            "路径不存在: {}\n请在 workspace 根目录运行，或指定路径",
            root.display()
        );
    }

    let files = collect_json_files(&root)?;
    if files.is_empty() {
        eprintln!("未找到 .json 文件");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个文件...\n", files.len());

    let mut result = DemoCheckResult::default();
    for file in &files {
        match DemoKind::of(file) {
            Some(DemoKind::Config) => check_config_file(file, &mut result),
            Some(DemoKind::Script) => check_script_file(file, &mut result)?,
            None => {
                eprintln!("[SKIP] {}: 不在 configs/ 或 scripts/ 下", file.display());
                result.skipped += 1;
            }
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    eprintln!(
        "检查完成: {} 个文件, 跳过 {} 个",
        result.checked, result.skipped
    );
    if result.errors > 0 {
        eprintln!("❌ {} 个错误", result.errors);
        anyhow::bail!("demo 检查发现错误");
    }
    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

fn collect_json_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn check_config_file(file: &Path, result: &mut DemoCheckResult) {
    result.checked += 1;
    if let Err(e) = CarouselConfig::from_file(file) {
        eprintln!("[ERROR] {}: {}", file.display(), e);
        result.errors += 1;
    }
}

/// 检查输入脚本
///
/// 逐条解析，报告所有无法识别的输入而不是在第一条处停止。
fn check_script_file(file: &Path, result: &mut DemoCheckResult) -> anyhow::Result<()> {
    result.checked += 1;

    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] {}: 无法读取文件 - {}", file.display(), e);
            result.errors += 1;
            return Ok(());
        }
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("[ERROR] {}: 脚本必须是数组 - {}", file.display(), e);
            result.errors += 1;
            return Ok(());
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        if entry.get("at_ms").and_then(|v| v.as_u64()).is_none() {
            eprintln!("[ERROR] {}#{}: 缺少 at_ms", file.display(), i);
            result.errors += 1;
        }
        let input = entry.get("input").cloned().unwrap_or_default();
        if let Err(e) = serde_json::from_value::<CarouselInput>(input) {
            eprintln!("[ERROR] {}#{}: 无法识别的输入 - {}", file.display(), i, e);
            result.errors += 1;
        }
    }
    Ok(())
}

//=============================================================================
// demo-run 命令实现
//=============================================================================

/// 每个脚本与同名配置配对运行；没有同名配置时使用默认配置
fn demo_run() -> anyhow::Result<()> {
    let sh = Shell::new()?;
    let scripts_dir = Path::new(DEMOS_DIR).join("scripts");
    let configs_dir = Path::new(DEMOS_DIR).join("configs");

    for script in collect_json_files(&scripts_dir)? {
        let Some(name) = script.file_name() else {
            continue;
        };
        let config = configs_dir.join(name);

        eprintln!("\n==> {}", script.display());
        if config.exists() {
            cmd!(
                sh,
                "cargo run -q -p carousel-cli -- simulate --config {config} --script {script}"
            )
            .run()?;
        } else {
            cmd!(sh, "cargo run -q -p carousel-cli -- simulate --script {script}").run()?;
        }
    }
    Ok(())
}
