//! # lsb_text 库
//!
//! 本库包含单比特 LSB 文本隐写的核心逻辑: 容量模型 ([`steganography::capacity`])、
//! 编码器 ([`steganography::encode`]) 和解码器 ([`steganography::decode`])，
//! 以及围绕它们的命令行处理逻辑。
//!
//! 隐藏的文本只能在无损格式中保存; 有损压缩或缩放会破坏它。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod logging;
pub mod pixels;
pub mod steganography;

pub use error::StegoError;
pub use pixels::PixelBuffer;
pub use steganography::{Decoded, capacity, decode, encode};
