//! # liu (流)
//!
//! 纯 Rust 实现的位流游标与 Exp-Golomb (CAVLC) 熵编解码库.
//!
//! 面向 NAL 码流 (H.264/H.265 等) 的语法元素解析, 提供:
//! - [`BitCursor`]: 位粒度的顺序读写游标, 按大端位序 (MSB first) 访问
//! - [`golomb`]: ue(v)/se(v)/te(v)/me(v) 解码与对应的编码原语
//! - [`golomb::more_rbsp_data`]: RBSP 尾部停止位模式检测
//!
//! 本库是库级原语: 没有自己的控制循环, NAL 单元切分与 SPS/PPS/slice
//! 文法解析由上层完成, 上层按文法顺序依次调用这里的读写操作.
//!
//! # 快速开始
//!
//! ```rust
//! use liu::BitCursor;
//! use liu::golomb;
//!
//! // 码字 "010" => ue(v) = 1
//! let mut cur = BitCursor::from_slice(&[0b0100_0000]);
//! assert_eq!(golomb::read_ue(&mut cur).unwrap(), 1);
//! ```
//!
//! # 线程模型
//!
//! 单线程同步. 游标是普通的可变共享状态, 不含内部锁,
//! 跨线程共享同一游标需要调用方自行串行化.

pub mod bitcursor;
pub mod error;
pub mod golomb;

// 重导出常用类型
pub use bitcursor::BitCursor;
pub use error::{BitError, BitResult};
