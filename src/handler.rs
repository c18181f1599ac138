//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、图像格式的解码/编码、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::pixels::PixelBuffer;
use crate::steganography::{capacity, decode, encode};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, ImageReader};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像和文本文件、检查隐写空间是否足够、调用隐写核心函数嵌入文本，
/// 最后以无损格式写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径及选项的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 目标扩展名不是无损图像格式。
/// * 载体图像超出大小限制，或无法读取/解码。
/// * 图像没有足够的空间来隐藏文本。
/// * 核心隐写函数 (`encode`) 拒绝了该文本。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image, "doctored_", "png"));
    ensure_writable(&dest, args.force)?;
    let format = lossless_format(&dest)?;
    check_file_size(&args.image, args.max_size_mb)?;

    let text = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    let cover = load_pixels(&args.image)?;
    let available_space = capacity(cover.width(), cover.height());
    let required_space = text.len();
    debug!(
        width = cover.width(),
        height = cover.height(),
        available_space,
        required_space,
        "checked capacity"
    );

    let fits = i64::try_from(required_space).is_ok_and(|n| n <= available_space);
    anyhow::ensure!(
        available_space > 0 && fits,
        "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
        required_space.to_string().red().bold(),
        available_space.max(0).to_string().green().bold()
    );

    let doctored = encode(&cover, &text).with_context(|| {
        format!(
            "Failed to hide the text from {}. \nThe text must not contain zero bytes and must fit in the image.",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    doctored
        .into_image()?
        .save_with_format(&dest, format)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;
    info!(dest = %dest.display(), bytes = text.len(), "hid text");

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数提取文本，
/// 最后将恢复的文本内容写入目标文本文件。
///
/// 恢复出的内容为空或包含非文本字节时仍会写入文件，但会打印警告:
/// 这通常意味着图像并未隐藏信息，或已被有损压缩破坏。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径及选项的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像文件。
/// * 图像中找不到终止字节 (没有隐藏信息)。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args
        .text
        .clone()
        .unwrap_or_else(|| default_output_path(&args.image, "recovered_", "txt"));
    ensure_writable(&dest, args.force)?;

    let picture = load_pixels(&args.image)?;
    let recovered = decode(&picture).with_context(|| {
        format!(
            "No hidden message found or message is corrupted: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    if recovered.is_empty() {
        eprintln!(
            "{}",
            "Warning: the recovered message is empty. The image may not contain a hidden message."
                .yellow()
        );
    } else if !recovered.looks_valid() {
        eprintln!(
            "{}",
            "Warning: the recovered message contains non-printable bytes. \nThe image may not contain a hidden message, or it was recompressed."
                .yellow()
        );
    }

    let text = recovered.into_bytes();
    fs::write(&dest, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    info!(dest = %dest.display(), bytes = text.len(), "recovered text");

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令: 打印图像尺寸及可隐藏的最大字节数。
///
/// 返回容量模型的原始结果 (可能为非正数)。
pub fn handle_capacity(args: CapacityArgs) -> Result<i64> {
    let (width, height) = image::image_dimensions(&args.image).with_context(|| {
        format!(
            "Unable to read image dimensions: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    let available = capacity(width, height);

    println!(
        "{}x{} image can hide up to {} bytes of text.",
        width,
        height,
        available.max(0).to_string().green().bold()
    );
    Ok(available)
}

/// 在输入文件旁生成默认输出路径: `<prefix><stem>.<extension>`。
pub fn default_output_path(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_else(|| "image".into());
    input.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 由目标路径的扩展名确定输出格式，并拒绝有损格式。
fn lossless_format(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Unable to determine the output image format from: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        matches!(
            format,
            ImageFormat::Png
                | ImageFormat::Bmp
                | ImageFormat::Tiff
                | ImageFormat::WebP
                | ImageFormat::Qoi
        ),
        "Output format {:?} is not lossless and would destroy the hidden text. \nUse png, bmp, tiff, webp or qoi.",
        format
    );
    Ok(format)
}

fn check_file_size(path: &Path, max_size_mb: u64) -> Result<()> {
    if max_size_mb == 0 {
        return Ok(());
    }
    let size = fs::metadata(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .len();

    anyhow::ensure!(
        size <= max_size_mb.saturating_mul(1024 * 1024),
        "Image file is too large: {} bytes. \nPlease use an image smaller than {} MB.",
        size.to_string().red().bold(),
        max_size_mb.to_string().green().bold()
    );
    Ok(())
}

/// 读取并解码图像文件，统一转换为 RGBA8 像素缓冲区。
fn load_pixels(path: &Path) -> Result<PixelBuffer> {
    let image = ImageReader::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .with_guessed_format()
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .decode()
        .with_context(|| {
            format!(
                "Unable to decode image: {}. \nSupported formats: png, bmp, tiff, webp, qoi, jpeg.",
                path.to_string_lossy().red().bold()
            )
        })?;

    Ok(PixelBuffer::from(image.to_rgba8()))
}
