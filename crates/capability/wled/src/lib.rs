//! # 灯带控制器传输能力模块
//!
//! 通过 WLED JSON API 与灯带控制器通信：
//! - **下发**：`POST http://{address}/json/state`，一次请求携带该控制器的全部 segment
//! - **探活**：`GET http://{address}/json/info`，仅 HTTP 200 视为在线
//!
//! ## 报文格式
//!
//! ```json
//! {"seg":[{"id":0,"on":true,"i":[5,"FF0000",6,"FF0000"]}]}
//! ```
//!
//! `i` 为扁平数组：LED 序号与 6 位大写十六进制颜色交替出现。
//!
//! ## 扩展
//!
//! 上层只依赖 [`LedTransport`] trait，测试中可替换为记录/失败桩。

pub mod client;
pub mod error;
pub mod state;
pub mod transport;

pub use client::WledClient;
pub use error::TransportError;
pub use state::{WledSegment, WledState};
pub use transport::LedTransport;
