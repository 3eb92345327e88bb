//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::deidentification::Region;
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// 一款基于位平面隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 的低位中隐藏或提取任意数据。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于位平面隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 的低位中隐藏或提取任意数据。\n日志级别可通过环境变量 RUST_LOG 控制。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将文件内容隐藏到无损格式图像中。
    Hide(HideArgs),

    /// 从经过隐写的图像中提取隐藏的数据。
    #[command(alias = "recover")]
    Extract(ExtractArgs),

    /// 从去标识化图像中提取被遮挡区域的原始像素并写回。
    Restore(RestoreArgs),

    /// 显示图像在给定参数下最多可以隐藏的字节数。
    Capacity(CapacityArgs),

    /// 对全部 24 种 (分量数, 比特数) 组合做满载隐写，并把结果图像写入目录。
    Bench(BenchArgs),
}

/// 隐写算法的种类。
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmKind {
    /// 仅使用蓝色分量的最低有效位。
    Lsb,
    /// 使用低 K 个颜色分量的低 N 位。
    RgbBits,
}

/// 所有需要选择算法的子命令共享的参数。
#[derive(Args, Debug, Clone)]
pub struct CodecArgs {
    /// 隐写算法。
    #[arg(short, long, value_enum, default_value_t = AlgorithmKind::RgbBits)]
    pub algorithm: AlgorithmKind,

    /// 使用的颜色分量数 (1-3，按 B、G、R 顺序)，仅对 rgb-bits 有效。
    #[arg(short, long, default_value_t = 1)]
    pub components: u8,

    /// 每个颜色分量使用的低位数 (1-8)，仅对 rgb-bits 有效。
    #[arg(short, long, default_value_t = 1)]
    pub bits: u8,
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的数据文件路径。
    #[arg(short, long, required_unless_present_any = ["embed_region", "text"])]
    pub payload: Option<PathBuf>,

    /// 直接隐藏这段 UTF-8 文本，代替 `--payload`。
    #[arg(short, long, conflicts_with_all = ["payload", "embed_region"])]
    pub text: Option<String>,

    /// 隐写完成后，保存结果图像的输出路径。默认为输入目录下的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 隐藏前把该矩形区域 (X0,Y0,X1,Y1，包含边界) 涂黑，仅支持 rgb-bits。
    #[arg(short, long)]
    pub redact: Option<Region>,

    /// 以被涂黑区域的原始像素作为载荷，代替 `--payload`。
    #[arg(long, requires = "redact", conflicts_with = "payload")]
    pub embed_region: bool,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 保存提取数据的输出路径。默认为输入目录下的 `recovered_<文件名>.bin`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 把提取出的数据当作 UTF-8 文本打印到终端，不写入文件。
    #[arg(short, long, conflicts_with = "output")]
    pub text: bool,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 'restore' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// 去标识化后的隐写图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 隐藏时涂黑的矩形区域 (X0,Y0,X1,Y1)。
    #[arg(short, long)]
    pub region: Region,

    /// 保存恢复后图像的输出路径。默认为输入目录下的 `restored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要计算容量的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub codec: CodecArgs,
}

/// 'bench' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct BenchArgs {
    /// 原始图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 保存结果图像的目录，不存在时会自动创建。
    #[arg(short, long)]
    pub out_dir: PathBuf,
}
