//! 统一错误类型定义.
//!
//! 位流游标与 Exp-Golomb 编解码共用的错误类型.
//! 所有失败都以返回值形式给出, 不会 panic; 单个操作失败时游标状态保持不变
//! (不会部分前进), 由调用方决定失败是否终止上层解析.

use thiserror::Error;

/// 位流操作统一错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitError {
    /// 读写越过位流末尾
    #[error("已到达位流末尾")]
    EndOfBuffer,

    /// 位宽参数非法 (0 或超过 32)
    #[error("无效位宽: {0}")]
    InvalidSize(u32),

    /// 值的最小二进制位宽超过请求的写入位宽
    #[error("值过宽: value={value} 无法放入 {size} 位")]
    ValueTooWide {
        /// 待写入的值
        value: u64,
        /// 请求的写入位宽
        size: u32,
    },

    /// 字节偏移超出缓冲区长度
    #[error("字节偏移越界: offset={offset}, len={len}")]
    OutOfRange {
        /// 请求的字节偏移
        offset: usize,
        /// 缓冲区字节长度
        len: usize,
    },

    /// Exp-Golomb 前导零过多, 码字无法在 u32 中表示
    #[error("Exp-Golomb 码字过长: 前导零超过 {0} 个")]
    CodeTooLong(u32),
}

/// 位流操作统一 Result 类型
pub type BitResult<T> = Result<T, BitError>;
