/// RGBA 交错缓冲区中每个像素占用的字节数 (通道步长)。
pub const CHANNEL_STRIDE: usize = 4;

/// Alpha 通道在每个像素内的偏移。
/// 隐写时跳过所有满足 `index % CHANNEL_STRIDE == ALPHA_OFFSET` 的字节。
pub const ALPHA_OFFSET: usize = 3;

/// 每个像素中承载数据的颜色通道数 (R, G, B)。
pub const COLOR_CHANNELS: usize = 3;

/// 追加在载荷之后的终止字节，8 个比特全部为 0。
pub const TERMINATOR: u8 = 0x00;

/// 容量模型中为终止符和安全余量保留的字节数。
pub const CAPACITY_RESERVE: i64 = 100;

/// 编码器自身的上限: 比特流长度不得超过缓冲区长度的 3/4。
/// 以 (分子, 分母) 表示，避免浮点比较。
pub const ENCODER_BOUND: (usize, usize) = (3, 4);

/// `hide` 命令允许的载体文件默认最大大小 (MiB)。
pub const DEFAULT_MAX_IMAGE_MB: u64 = 5;
