//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::DEFAULT_MAX_IMAGE_MB;
use crate::logging::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// 基于单比特 LSB 隐写的命令行工具: 把文本藏进图像的颜色通道，并以无损格式保存。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "基于单比特 LSB 隐写的命令行工具。文本的每个比特写入 R/G/B 通道字节的最低位 (alpha 通道不变)，以全零字节结尾。结果必须以无损格式 (PNG, BMP, TIFF, WebP, QOI) 保存，有损压缩会破坏隐藏的信息。"
)]
pub struct Cli {
    /// 日志级别，日志输出到 stderr。
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令: hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在图像中隐藏文本文件内容，并以无损格式保存结果。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 显示图像最多可以隐藏多少字节的文本。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的载体图像路径 (PNG, BMP, TIFF, WebP, QOI, JPEG)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 结果图像的输出路径，扩展名决定格式且必须是无损格式。
    /// 默认为载体图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时覆盖它。
    #[arg(short, long)]
    pub force: bool,

    /// 载体图像文件的最大大小 (MiB)，0 表示不限制。
    #[arg(long, default_value_t = DEFAULT_MAX_IMAGE_MB)]
    pub max_size_mb: u64,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复出的文本的保存路径，默认为图像旁的 `recovered_<名称>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时覆盖它。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查询容量的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
