//! # 像素缓冲区
//!
//! [`PixelBuffer`] 是编解码器的输入/输出边界: 行优先、RGBA 交错排列的
//! width × height × 4 字节序列。构造时校验长度，因此编解码器拿到的缓冲区
//! 总是形状正确的。

use crate::constants::CHANNEL_STRIDE;
use crate::error::{Result, StegoError};
use image::RgbaImage;

/// 经过长度校验的 RGBA 像素缓冲区。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// 从原始 RGBA 字节创建缓冲区。
    ///
    /// # Errors
    ///
    /// 若 `data.len() != width * height * 4`，返回 [`StegoError::InvalidBuffer`]。
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_layout(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// 转换为 `image` 库的 RGBA 图像，以便交给无损格式编码器保存。
    pub fn into_image(self) -> Result<RgbaImage> {
        let (width, height, actual) = (self.width, self.height, self.data.len());
        let image = RgbaImage::from_raw(width, height, self.data);
        image.ok_or(StegoError::InvalidBuffer {
            width,
            height,
            expected: expected_len(width, height),
            actual,
        })
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

fn expected_len(width: u32, height: u32) -> u128 {
    width as u128 * height as u128 * CHANNEL_STRIDE as u128
}

/// 校验缓冲区长度是否与尺寸一致。
pub(crate) fn check_layout(width: u32, height: u32, actual: usize) -> Result<()> {
    let expected = expected_len(width, height);
    if expected != actual as u128 {
        return Err(StegoError::InvalidBuffer {
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}
