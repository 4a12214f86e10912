//! 节点 API 客户端
//!
//! 提供查询 Blockstack 节点与广播交易的 HTTP 客户端

use crate::error::{NetworkError, Result};
use crate::network::types::NetworkSettings;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::{json, Value};

/// 节点客户端trait，命令处理器通过它访问网络
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// 查询名称的当前记录
    async fn get_name_info(&self, name: &str) -> Result<Value>;

    /// 查询名称的历史记录
    ///
    /// # 参数
    /// * `name` - 完整名称
    /// * `page` - 分页编号，从 0 开始
    async fn get_name_history(&self, name: &str, page: u64) -> Result<Value>;

    /// 查询名称的 zone file
    async fn get_zonefile(&self, name: &str) -> Result<Value>;

    /// 查询地址拥有的名称
    async fn get_names_owned(&self, address: &str) -> Result<Value>;

    /// 查询命名空间记录
    async fn get_namespace_info(&self, namespace_id: &str) -> Result<Value>;

    /// 查询名称价格
    async fn get_name_price(&self, name: &str) -> Result<Value>;

    /// 查询命名空间价格
    async fn get_namespace_price(&self, namespace_id: &str) -> Result<Value>;

    /// 查询账户余额
    async fn get_account_balance(&self, address: &str) -> Result<Value>;

    /// 查询账户历史
    async fn get_account_history(&self, address: &str, page: u64) -> Result<Value>;

    /// 查询账户在指定区块高度的状态
    async fn get_account_at(&self, address: &str, block_height: u64) -> Result<Value>;

    /// 查询当前区块高度
    async fn get_blockchain_height(&self) -> Result<Value>;

    /// 广播已签名交易
    ///
    /// # 参数
    /// * `raw_tx` - 十六进制编码的交易
    ///
    /// # 返回
    /// * `Result<Value>` - 广播服务的响应
    async fn broadcast_transaction(&self, raw_tx: &str) -> Result<Value>;
}

/// 基于 reqwest 的节点客户端
pub struct HttpNetworkClient {
    client: Client,
    api_url: String,
    broadcast_url: String,
}

impl HttpNetworkClient {
    /// 创建新的节点客户端
    ///
    /// # 参数
    /// * `settings` - 解析后的网络设置
    ///
    /// # 返回
    /// * `Result<Self>` - 客户端实例
    pub fn new(settings: &NetworkSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()
            .map_err(NetworkError::Request)?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            broadcast_url: settings.broadcast_url.clone(),
        })
    }

    /// 节点 API 地址
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// 发送 GET 请求并解析 JSON 响应
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.api_url, path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(NetworkError::Request)?;

        Self::decode(url, response).await
    }

    /// 检查状态码并解析响应体
    async fn decode(url: String, response: Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await.map_err(NetworkError::Request)?;

        if !status.is_success() {
            log::warn!("请求失败: {} -> {}", url, status.as_u16());
            return Err(NetworkError::Status {
                url,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| NetworkError::Decode(format!("{url}: {e}")).into())
    }
}

#[async_trait]
impl NetworkClient for HttpNetworkClient {
    async fn get_name_info(&self, name: &str) -> Result<Value> {
        self.get_json(&format!("/v1/names/{name}")).await
    }

    async fn get_name_history(&self, name: &str, page: u64) -> Result<Value> {
        self.get_json(&format!("/v1/names/{name}/history?page={page}"))
            .await
    }

    async fn get_zonefile(&self, name: &str) -> Result<Value> {
        self.get_json(&format!("/v1/names/{name}/zonefile")).await
    }

    async fn get_names_owned(&self, address: &str) -> Result<Value> {
        self.get_json(&format!("/v1/addresses/bitcoin/{address}"))
            .await
    }

    async fn get_namespace_info(&self, namespace_id: &str) -> Result<Value> {
        self.get_json(&format!("/v1/namespaces/{namespace_id}"))
            .await
    }

    async fn get_name_price(&self, name: &str) -> Result<Value> {
        self.get_json(&format!("/v2/prices/names/{name}")).await
    }

    async fn get_namespace_price(&self, namespace_id: &str) -> Result<Value> {
        self.get_json(&format!("/v2/prices/namespaces/{namespace_id}"))
            .await
    }

    async fn get_account_balance(&self, address: &str) -> Result<Value> {
        self.get_json(&format!("/v1/accounts/{address}/STACKS/balance"))
            .await
    }

    async fn get_account_history(&self, address: &str, page: u64) -> Result<Value> {
        self.get_json(&format!("/v1/accounts/{address}/history?page={page}"))
            .await
    }

    async fn get_account_at(&self, address: &str, block_height: u64) -> Result<Value> {
        self.get_json(&format!("/v1/accounts/{address}/history/{block_height}"))
            .await
    }

    async fn get_blockchain_height(&self) -> Result<Value> {
        self.get_json("/v1/info").await
    }

    async fn broadcast_transaction(&self, raw_tx: &str) -> Result<Value> {
        let url = format!("{}/v1/transactions", self.broadcast_url);
        log::info!("广播交易: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "tx": raw_tx }))
            .send()
            .await
            .map_err(NetworkError::Request)?;

        Self::decode(url, response).await
    }
}
