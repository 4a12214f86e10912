//! 网络模块
//!
//! 提供网络选择、节点地址解析和节点 REST API 客户端

pub mod client;
pub mod types;

// 重新导出主要类型
pub use client::{HttpNetworkClient, NetworkClient};
pub use types::{NetworkKind, NetworkSettings};
