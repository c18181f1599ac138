//! # 核心隐写算法
//!
//! 每个颜色通道字节的最低有效位承载一个比特，alpha 通道保持不变。
//! 载荷按字节 MSB 优先展开为比特流，末尾追加一个全零终止字节:
//!
//! ```text
//! byte index : 0 1 2 3 4 5 6 7 8 ...
//! channel    : R G B A R G B A R ...
//! bit        : 0 1 2 - 3 4 5 - 6 ...
//! ```

use crate::constants::{
    ALPHA_OFFSET, CAPACITY_RESERVE, CHANNEL_STRIDE, COLOR_CHANNELS, ENCODER_BOUND, TERMINATOR,
};
use crate::error::{Result, StegoError};
use crate::pixels::{PixelBuffer, check_layout};
use std::borrow::Cow;
use std::iter;
use tracing::{debug, warn};

/// 计算给定尺寸的图像最多可以隐藏多少字节的载荷。
///
/// 结果为 `floor(width * height * 3 / 8) - 100`，可能为零或负数;
/// 调用方应把任何非正值视为"不接受载荷"。
pub fn capacity(width: u32, height: u32) -> i64 {
    let usable_bits = width as u128 * height as u128 * COLOR_CHANNELS as u128;
    let usable_bytes = i64::try_from(usable_bits / 8).unwrap_or(i64::MAX);
    usable_bytes - CAPACITY_RESERVE
}

/// 将载荷写入像素缓冲区的最低有效位，返回新的缓冲区。
///
/// 输入缓冲区不会被修改。alpha 字节以及比特流之后的字节原样复制。
///
/// # Errors
///
/// * [`StegoError::InvalidBuffer`] - 缓冲区长度与尺寸不符。
/// * [`StegoError::InteriorTerminator`] - 载荷内部含有 0x00 字节。
/// * [`StegoError::PayloadTooLarge`] - 比特流超过缓冲区长度的 3/4。
pub fn encode(buffer: &PixelBuffer, payload: &[u8]) -> Result<PixelBuffer> {
    check_layout(buffer.width(), buffer.height(), buffer.len())?;

    if let Some(index) = payload.iter().position(|&byte| byte == TERMINATOR) {
        return Err(StegoError::InteriorTerminator { index });
    }

    let required_bits = payload.len().saturating_add(1).saturating_mul(8);
    let (numerator, denominator) = ENCODER_BOUND;
    let available_bits = buffer.len() / denominator * numerator;
    if required_bits > available_bits {
        return Err(StegoError::PayloadTooLarge {
            required_bits,
            available_bits,
        });
    }

    let mut data = buffer.as_bytes().to_vec();
    let mut last_slot = None;
    for (slot, bit) in color_slots(data.len()).zip(bitstream(payload)) {
        data[slot] = (data[slot] & !1) | bit;
        last_slot = Some(slot);
    }

    debug!(
        payload_bytes = payload.len(),
        bits = required_bits,
        last_slot = ?last_slot,
        "embedded payload"
    );

    PixelBuffer::new(buffer.width(), buffer.height(), data)
}

/// 从像素缓冲区中恢复隐藏的载荷。
///
/// 逐个读取颜色通道字节的最低有效位，每凑满 8 位检查一次是否为终止字节;
/// 遇到终止字节立即停止。
///
/// # Errors
///
/// * [`StegoError::InvalidBuffer`] - 缓冲区长度与尺寸不符。
/// * [`StegoError::TerminatorNotFound`] - 扫描完整个缓冲区都没有终止字节。
pub fn decode(buffer: &PixelBuffer) -> Result<Decoded> {
    check_layout(buffer.width(), buffer.height(), buffer.len())?;

    let data = buffer.as_bytes();
    let mut bytes = Vec::new();
    let mut current = 0u8;
    let mut filled = 0;

    for slot in color_slots(data.len()) {
        current = (current << 1) | (data[slot] & 1);
        filled += 1;
        if filled < 8 {
            continue;
        }
        if current == TERMINATOR {
            let decoded = Decoded::new(bytes);
            debug!(
                payload_bytes = decoded.len(),
                terminator_slot = slot,
                looks_valid = decoded.looks_valid(),
                "recovered payload"
            );
            if !decoded.looks_valid() {
                warn!("recovered bytes fall outside printable ASCII");
            }
            return Ok(decoded);
        }
        bytes.push(current);
        current = 0;
        filled = 0;
    }

    debug!(
        scanned_bytes = data.len(),
        "buffer exhausted without terminator"
    );
    Err(StegoError::TerminatorNotFound)
}

/// 解码结果: 原始字节以及一个"看起来像文本"的标志。
///
/// 解码本身不会因字符集而失败; 当 `looks_valid` 为 false 时，
/// 图像很可能并未隐藏信息，或已被有损压缩破坏。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    bytes: Vec<u8>,
    looks_valid: bool,
}

impl Decoded {
    fn new(bytes: Vec<u8>) -> Self {
        let looks_valid = bytes.iter().all(|&byte| is_plain_text(byte));
        Self { bytes, looks_valid }
    }

    /// 所有字节都是可打印 ASCII 或 `\n` `\r` `\t` 时为 true。
    pub fn looks_valid(&self) -> bool {
        self.looks_valid
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 每个字节映射为同码值的字符 (U+0000..=U+00FF)。
    pub fn to_char_codes(&self) -> String {
        self.bytes.iter().map(|&byte| byte as char).collect()
    }

    /// 按 UTF-8 解释字节，无效序列替换为 U+FFFD。
    pub fn to_text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

fn is_plain_text(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E | b'\n' | b'\r' | b'\t')
}

/// 按顺序列出所有颜色通道字节的下标 (跳过 alpha)。
fn color_slots(len: usize) -> impl Iterator<Item = usize> {
    (0..len).filter(|index| index % CHANNEL_STRIDE != ALPHA_OFFSET)
}

/// 载荷 + 终止字节，按 MSB 优先展开的比特流。
fn bitstream(payload: &[u8]) -> impl Iterator<Item = u8> + '_ {
    payload
        .iter()
        .copied()
        .chain(iter::once(TERMINATOR))
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
}
