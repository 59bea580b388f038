//! Exp-Golomb (指数哥伦布) 编解码与 RBSP 尾部检测.
//!
//! H.264/H.265 的 CAVLC 语法元素大量使用 Exp-Golomb 可变长编码:
//! - `ue(v)`: 无符号
//! - `se(v)`: 有符号
//! - `te(v)`: 截断
//! - `me(v)`: 映射 (系数映射表未实现, 目前等价于 ue(v))
//!
//! 码字结构: N 个前导零 + 1 个停止位 + N 位后缀, 解码值为
//! `2^N - 1 + 后缀`. 码字长度随值的大小对数增长.
//!
//! 所有函数作用在调用方给定的 [`BitCursor`] 上, 按语法顺序消费位,
//! 位置前进是共享游标上的副作用. 本模块没有自己的循环或调度,
//! 调用顺序完全由上层码流文法决定.

use crate::bitcursor::BitCursor;
use crate::error::{BitError, BitResult};

/// ue(v) 前导零上限: 更多前导零的码字无法在 u32 中表示
const MAX_LEADING_ZEROS: u32 = 31;

/// 按固定位宽直接读取原始值
///
/// 等价于 [`BitCursor::read_bits`], `size` 为 0 时返回
/// [`BitError::InvalidSize`].
pub fn read_raw(cur: &mut BitCursor, size: u32) -> BitResult<u32> {
    cur.read_bits(size)
}

/// 读取无符号 Exp-Golomb 编码值 ue(v)
///
/// 逐位扫描前导零直到读到停止位 1 (停止位被消费但不计数);
/// 前导零为 0 时结果为 0, 否则再读同样多的后缀位, 结果为
/// `2^N - 1 + 后缀`.
///
/// 扫描只受缓冲区长度约束: 停止位在缓冲区结束前未出现时返回
/// [`BitError::EndOfBuffer`]; 前导零超过 31 个时返回
/// [`BitError::CodeTooLong`].
pub fn read_ue(cur: &mut BitCursor) -> BitResult<u32> {
    let mut leading_zeros = 0u32;
    loop {
        let bit = cur.read_bit()?;
        if bit == 1 {
            break;
        }
        leading_zeros += 1;
        if leading_zeros > MAX_LEADING_ZEROS {
            return Err(BitError::CodeTooLong(leading_zeros));
        }
    }

    if leading_zeros == 0 {
        return Ok(0);
    }

    let suffix = cur.read_bits(leading_zeros)?;
    Ok((1 << leading_zeros) - 1 + suffix)
}

/// 读取有符号 Exp-Golomb 编码值 se(v)
///
/// 先解码 ue(v), 再按交替符号映射: 0→0, 1→1, 2→-1, 3→2, 4→-2, ...
/// (奇数为正, 偶数为负, 幅值为 `ceil(ue/2)`).
pub fn read_se(cur: &mut BitCursor) -> BitResult<i32> {
    let code = read_ue(cur)?;
    let value = code.div_ceil(2) as i32;
    if code & 1 == 0 { Ok(-value) } else { Ok(value) }
}

/// 读取截断 Exp-Golomb 编码值 te(v)
///
/// `max` 是该语法元素的取值上界: `max > 1` 时与 ue(v) 相同;
/// `max == 1` 时只读 1 个位, 返回其取反 (0↔1);
/// `max == 0` 时返回 [`BitError::InvalidSize`].
pub fn read_te(cur: &mut BitCursor, max: u32) -> BitResult<u32> {
    if max == 0 {
        return Err(BitError::InvalidSize(0));
    }
    if max > 1 {
        return read_ue(cur);
    }

    let bit = cur.read_bit()?;
    Ok(bit ^ 1)
}

/// 读取映射 Exp-Golomb 编码值 me(v)
///
/// 真正的 me(v) 需要按 coded_block_pattern 的系数映射表 (ITU-T H.264
/// 表 9-4) 将 ue(v) 码字编号映射为语法元素值. 该表尚未实现,
/// 目前行为与 [`read_ue`] 完全一致, 这是一个已知的功能缺口,
/// 调用方拿到的是码字编号而不是映射后的值.
///
/// TODO: 引入表 9-4 (依赖 chroma_format_idc 与 Intra/Inter 上下文)
/// 后替换此回退.
pub fn read_me(cur: &mut BitCursor) -> BitResult<u32> {
    log::debug!("me(v) 按 ue(v) 解码, 系数映射表未实现");
    read_ue(cur)
}

/// 写入无符号 Exp-Golomb 编码值 ue(v)
///
/// 码字为 N 个前导零 + `value + 1` 的 N+1 位二进制表示.
/// `value == u32::MAX` 时 `value + 1` 无法表示, 返回
/// [`BitError::ValueTooWide`]; 剩余空间不足以容纳整个码字时返回
/// [`BitError::EndOfBuffer`], 不做部分写入.
pub fn write_ue(cur: &mut BitCursor, value: u32) -> BitResult<()> {
    if value == u32::MAX {
        return Err(BitError::ValueTooWide {
            value: u64::from(value),
            size: 32,
        });
    }

    let code = value + 1;
    let width = 32 - code.leading_zeros();
    let total = (2 * width - 1) as usize;

    // 整个码字的空间预检查, 保证失败时不会写出半个码字
    if cur.bits_left() < total {
        return Err(BitError::EndOfBuffer);
    }

    if width > 1 {
        cur.write_bits(0, width - 1)?;
    }
    cur.write_bits(code, width)
}

/// 写入有符号 Exp-Golomb 编码值 se(v)
///
/// [`read_se`] 映射的逆: `v > 0` 编码为 `2v - 1`, `v <= 0` 编码为 `-2v`.
pub fn write_se(cur: &mut BitCursor, value: i32) -> BitResult<()> {
    let code = if value > 0 {
        2 * i64::from(value) - 1
    } else {
        -2 * i64::from(value)
    };
    // i32::MIN 编码为 2^32, 超出 u32 码字范围
    let Ok(code) = u32::try_from(code) else {
        return Err(BitError::ValueTooWide {
            value: code as u64,
            size: 32,
        });
    };
    write_ue(cur, code)
}

/// 写入截断 Exp-Golomb 编码值 te(v)
///
/// [`read_te`] 的逆: `max > 1` 时与 ue(v) 相同; `max == 1` 时写入
/// `value` 最低位的取反; `max == 0` 时返回 [`BitError::InvalidSize`].
pub fn write_te(cur: &mut BitCursor, value: u32, max: u32) -> BitResult<()> {
    if max == 0 {
        return Err(BitError::InvalidSize(0));
    }
    if max > 1 {
        return write_ue(cur, value);
    }
    cur.write_bit((value & 1) ^ 1)
}

/// 判断当前位置之后是否还有有效语法数据 (排除 rbsp_trailing_bits)
///
/// RBSP 以一个停止位 1 加零填充到字节边界结尾. 本函数检查当前字节
/// 的剩余部分是否恰好是这种尾部模式, 且其后没有更多字节.
///
/// 保留自原始实现的两个边界行为 (刻意不做 "纠正", 由测试固定):
/// - `position == 0` (尚未消费任何数据) 时返回 `false`;
/// - 位置恰在字节边界上时, 检查点前移一位再取模式,
///   因此恰好对齐的停止位会被跳过.
pub fn more_rbsp_data(cur: &BitCursor) -> bool {
    let position = cur.position();
    if position >= cur.limit() || position == 0 {
        return false;
    }

    let mut probe = position;
    if probe % 8 == 0 {
        probe += 1;
    }
    let n_bit = (probe % 8) as u32;
    let byte_index = probe / 8;

    let data = cur.data();
    let Some(&current) = data.get(byte_index) else {
        return false;
    };

    // tail 是停止位在当前字节内的位置, mask 覆盖停止位及其后的所有位
    let tail = 1u8 << (8 - n_bit - 1);
    let mask = (tail << 1).wrapping_sub(1);
    let has_tail = (current & mask) == tail;

    let has_next_byte = byte_index + 1 < data.len();
    if !has_next_byte && has_tail {
        return false;
    }
    true
}
