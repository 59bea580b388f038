//! 位流游标.
//!
//! 在固定长度的字节缓冲区上提供位粒度的顺序读写, 是 CAVLC/Exp-Golomb
//! 语法元素编解码的基础设施. 典型用法是每个 NAL 单元的 RBSP 数据
//! 构造一个游标, 由上层语法解析器按码流文法依次消费.
//!
//! 按大端位序访问 (MSB first), 这是多媒体编解码器中最常用的位序.

use crate::error::{BitError, BitResult};

/// 位流游标
///
/// 拥有一个长度固定的字节缓冲区和一个位粒度的读写位置.
/// 位置从第 0 字节的最高位起以 0 开始计数, 读写均单调前进,
/// 只有显式定位操作可以向后移动.
///
/// # 示例
/// ```
/// use liu::BitCursor;
///
/// let mut cur = BitCursor::from_slice(&[0b10110001, 0b01010101]);
/// assert_eq!(cur.read_bits(4).unwrap(), 0b1011);
/// assert_eq!(cur.read_bits(4).unwrap(), 0b0001);
/// assert_eq!(cur.read_bits(8).unwrap(), 0b01010101);
/// ```
#[derive(Debug, Clone)]
pub struct BitCursor {
    /// 底层缓冲区 (长度在游标生命周期内固定)
    buffer: Vec<u8>,
    /// 当前位偏移 (0 为第 0 字节的最高位)
    position: usize,
}

impl BitCursor {
    /// 以给定缓冲区创建游标 (获取所有权)
    pub fn new(buffer: Vec<u8>) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// 从切片复制数据创建游标
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }

    /// 创建指定字节长度的全零游标
    ///
    /// 写操作只置位不清零 (见 [`write_bits`](Self::write_bits)),
    /// 全零缓冲区是写入目标的标准初始状态.
    pub fn zeroed(len: usize) -> Self {
        Self::new(vec![0; len])
    }

    /// 获取位流总长度 (位) = 缓冲区字节数 * 8
    pub fn limit(&self) -> usize {
        self.buffer.len() * 8
    }

    /// 获取当前位偏移
    pub fn position(&self) -> usize {
        self.position
    }

    /// 设置当前位偏移 (绝对定位, 不做边界检查)
    ///
    /// 与 [`set_byte_offset`](Self::set_byte_offset) 不同, 本方法不检查
    /// 越界, 由调用方保证 `position <= limit`. 这一非对称行为来自原始
    /// 实现, 刻意保留.
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// 定位到指定字节偏移 (位偏移 = `offset * 8`)
    ///
    /// `offset` 超过缓冲区长度时返回 [`BitError::OutOfRange`].
    pub fn set_byte_offset(&mut self, offset: usize) -> BitResult<()> {
        if offset > self.buffer.len() {
            return Err(BitError::OutOfRange {
                offset,
                len: self.buffer.len(),
            });
        }
        self.position = offset * 8;
        Ok(())
    }

    /// 当前位置是否在字节边界上
    pub fn is_aligned(&self) -> bool {
        self.position % 8 == 0
    }

    /// 获取剩余可读位数
    pub fn bits_left(&self) -> usize {
        self.limit().saturating_sub(self.position)
    }

    /// 是否已到达末尾
    pub fn is_eof(&self) -> bool {
        self.bits_left() == 0
    }

    /// 获取底层缓冲区的只读视图
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// 消耗游标, 取回底层缓冲区
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    /// 读取 1 个位
    ///
    /// 位置越界时返回 [`BitError::EndOfBuffer`], 失败不前进.
    pub fn read_bit(&mut self) -> BitResult<u32> {
        if self.position >= self.limit() {
            return Err(BitError::EndOfBuffer);
        }

        let byte = self.buffer[self.position / 8];
        let bit = (byte >> (7 - self.position % 8)) & 1;
        self.position += 1;
        Ok(u32::from(bit))
    }

    /// 读取 N 个位 (1 到 32)
    ///
    /// 按大端位序读取, 第一个读到的位是结果的最高有效位.
    /// `size` 为 0 或超过 32 时返回 [`BitError::InvalidSize`];
    /// 剩余位数不足时返回 [`BitError::EndOfBuffer`], 不做部分读取,
    /// 位置保持不变.
    pub fn read_bits(&mut self, size: u32) -> BitResult<u32> {
        if size == 0 || size > 32 {
            return Err(BitError::InvalidSize(size));
        }
        if self.position + size as usize > self.limit() {
            return Err(BitError::EndOfBuffer);
        }

        let mut result: u32 = 0;
        for _ in 0..size {
            result = (result << 1) | self.read_bit()?;
        }
        Ok(result)
    }

    /// 窥视 N 个位 (不移动位置)
    pub fn peek_bits(&mut self, size: u32) -> BitResult<u32> {
        let saved = self.position;
        let result = self.read_bits(size);
        self.position = saved;
        result
    }

    /// 跳过 N 个位
    ///
    /// 剩余位数不足时返回 [`BitError::EndOfBuffer`], 位置保持不变.
    pub fn skip_bits(&mut self, n: usize) -> BitResult<()> {
        if n > self.bits_left() {
            return Err(BitError::EndOfBuffer);
        }
        self.position += n;
        Ok(())
    }

    /// 对齐到下一个字节边界
    ///
    /// 如果当前已在字节边界, 则不做任何事.
    pub fn align_to_byte(&mut self) {
        if self.position % 8 != 0 {
            self.position = (self.position / 8 + 1) * 8;
        }
    }

    /// 写入 1 个位 (只取 `bit` 的最低位)
    ///
    /// 与 [`write_bits`](Self::write_bits) 相同, 只置位不清零.
    pub fn write_bit(&mut self, bit: u32) -> BitResult<()> {
        if self.position >= self.limit() {
            return Err(BitError::EndOfBuffer);
        }

        let shift = 7 - self.position % 8;
        self.buffer[self.position / 8] |= ((bit & 1) as u8) << shift;
        self.position += 1;
        Ok(())
    }

    /// 写入 N 个位 (1 到 32)
    ///
    /// 将 `value` 的低 `size` 位按大端位序写入当前位置 (高位在前,
    /// 左侧补零), 成功后位置前进 `size` 位.
    ///
    /// # 前置条件
    ///
    /// 写入只对目标位做 OR, 从不清零, 因此目标区域必须事先为全零
    /// (如 [`zeroed`](Self::zeroed) 构造的缓冲区). 对非零区域写入
    /// 的结果是两者按位或.
    ///
    /// # 错误
    ///
    /// - `size` 为 0 或超过 32: [`BitError::InvalidSize`]
    /// - `value` 的最小位宽超过 `size`: [`BitError::ValueTooWide`]
    /// - 剩余位数不足: [`BitError::EndOfBuffer`]
    ///
    /// 任何失败都不改变缓冲区和位置.
    pub fn write_bits(&mut self, value: u32, size: u32) -> BitResult<()> {
        if size == 0 || size > 32 {
            return Err(BitError::InvalidSize(size));
        }
        let width = 32 - value.leading_zeros();
        if width > size {
            return Err(BitError::ValueTooWide {
                value: u64::from(value),
                size,
            });
        }
        if self.position + size as usize > self.limit() {
            return Err(BitError::EndOfBuffer);
        }

        for i in (0..size).rev() {
            let bit = (value >> i) & 1;
            self.write_bit(bit)?;
        }
        Ok(())
    }
}

impl Default for BitCursor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
