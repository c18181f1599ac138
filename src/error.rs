//! # 错误类型
//!
//! 编解码器的所有失败都以 [`StegoError`] 显式返回，不会产生部分结果。

/// 隐写编码或解码过程中可能出现的错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StegoError {
    /// 比特流 (含终止符) 超出了缓冲区可嵌入的上限。
    #[error("payload too large: needs {required_bits} bits, buffer allows {available_bits}")]
    PayloadTooLarge {
        required_bits: usize,
        available_bits: usize,
    },

    /// 扫描完整个缓冲区仍未遇到全零的终止字节。
    #[error("no terminator found; the image carries no hidden message or is corrupted")]
    TerminatorNotFound,

    /// 缓冲区长度与 width × height × 4 不一致。
    #[error("invalid pixel buffer: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: u128,
        actual: usize,
    },

    /// 载荷内部含有 0x00 字节，解码时会在此处被截断。
    #[error("payload contains a zero byte at index {index}, which would end the message early")]
    InteriorTerminator { index: usize },
}

pub type Result<T> = std::result::Result<T, StegoError>;
