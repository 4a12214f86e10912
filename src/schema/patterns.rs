//! 参数格式正则片段
//!
//! 所有片段均不带锚点，由 [`ArgumentSpec`](super::ArgumentSpec) 编译时包裹为整串匹配。

/// 任意链上地址
pub const ADDRESS: &str = r"(?:[123mnMN2][a-km-zA-HJ-NP-Z1-9]{25,39}|[SM][0123456789ABCDEFGHJKMNPQRSTVWXYZ]{28,41})";

/// 身份地址，`ID-` 前缀可省略
pub const ID_ADDRESS: &str = r"(?:ID-)?[123mnMN2][a-km-zA-HJ-NP-Z1-9]{25,39}";

/// Blockstack ID，如 `alice.id`
pub const NAME: &str = r"[0-9a-z_.+-]{3,37}";

/// 命名空间ID，如 `id`
pub const NAMESPACE_ID: &str = r"[0-9a-z_-]{1,19}";

/// 子域名，如 `alice.personal.id`
pub const SUBDOMAIN: &str = r"[0-9a-z_+-]{1,37}\.[0-9a-z_.+-]{3,37}";

/// Blockstack ID 或身份地址
pub const NAME_OR_ID_ADDRESS: &str =
    r"(?:[0-9a-z_.+-]{3,37}|(?:ID-)?[123mnMN2][a-km-zA-HJ-NP-Z1-9]{25,39})";

/// 任意形式的付款/所有者私钥
pub const PRIVATE_KEY: &str = r"(?:[0-9a-f]{64}(?:01)?|[0-9]+,(?:[0-9a-f]{64,66},)*[0-9a-f]{64,66}|segwit:p2sh:[0-9]+,(?:[0-9a-f]{64,66},)*[0-9a-f]{64,66}|nosign:[123mnMN2][a-km-zA-HJ-NP-Z1-9]{25,39})";

/// 非负整数
pub const UNSIGNED: &str = r"[0-9]+";

/// 布尔值
pub const BOOLEAN: &str = r"(?:0|1|true|false)";

/// HTTP(S) URL
pub const URL: &str = r"https?://.+";

/// 十六进制编码的原始交易
pub const RAW_TRANSACTION: &str = r"(?:[0-9a-f]{2})+";

/// Zone file 哈希（RIPEMD160）
pub const ZONEFILE_HASH: &str = r"[0-9a-f]{40}";

/// 16个价格桶，逗号分隔
pub const PRICE_BUCKETS: &str = r"(?:[0-9]{1,2},){15}[0-9]{1,2}";

/// 代币类型
pub const TOKEN_TYPE: &str = r"(?:STACKS|BTC)";

/// 12 或 24 个单词的助记词
pub const MNEMONIC: &str = r"[a-z]+(?: [a-z]+){11}(?: [a-z]+){0,12}";

/// 加密后的助记词（hex 或 base64）
pub const ENCRYPTED_MNEMONIC: &str = r"[0-9a-fA-F]+|[A-Za-z0-9+/]+=*";

/// 文件路径
pub const PATH: &str = r".+";

/// 命令名称
pub const COMMAND_NAME: &str = r"[a-z_]+";
