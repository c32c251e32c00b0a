#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_bind_address, validate_non_empty_string, validate_range, validate_url, Validate,
};
use std::env;
use toml_config::AgentConfig;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const REVIEW_BIND: &str = "0.0.0.0:8000";
pub const OPTIMIZATION_BIND: &str = "0.0.0.0:8001";

pub const REVIEW_URL: &str = "http://localhost:8000";
pub const OPTIMIZE_URL: &str = "http://localhost:8001";

/// 連線到 LLM 供應商所需的設定
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: Option<f32>,
}

impl GatewaySettings {
    /// 金鑰缺少時不在啟動時檢查，交給供應商回傳認證錯誤
    pub fn review_defaults() -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            temperature: None,
        }
    }

    pub fn optimization_defaults() -> Self {
        Self {
            base_url: GROQ_BASE_URL.to_string(),
            model: "gemma2-9b-it".to_string(),
            api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
            temperature: Some(0.7),
        }
    }
}

impl Validate for GatewaySettings {
    fn validate(&self) -> Result<()> {
        validate_url("gateway.base_url", &self.base_url)?;
        validate_non_empty_string("gateway.model", &self.model)?;
        if let Some(temperature) = self.temperature {
            validate_range("gateway.temperature", temperature, 0.0, 2.0)?;
        }
        Ok(())
    }
}

/// 單一代理服務啟動時解析出的完整設定
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    pub gateway: GatewaySettings,
    pub bind: String,
    pub prompt: Option<String>,
}

impl ServiceSettings {
    pub fn review_defaults() -> Self {
        Self {
            gateway: GatewaySettings::review_defaults(),
            bind: REVIEW_BIND.to_string(),
            prompt: None,
        }
    }

    pub fn optimization_defaults() -> Self {
        Self {
            gateway: GatewaySettings::optimization_defaults(),
            bind: OPTIMIZATION_BIND.to_string(),
            prompt: None,
        }
    }

    /// 預設值 → 設定檔 → 命令列，後者覆蓋前者
    pub fn load(
        mut self,
        config_path: Option<&str>,
        bind_override: Option<String>,
    ) -> Result<Self> {
        if let Some(path) = config_path {
            tracing::info!("📁 Loading configuration from: {}", path);
            AgentConfig::from_file(path)?.apply(&mut self);
        }

        if let Some(bind) = bind_override {
            self.bind = bind;
        }

        Ok(self)
    }
}

impl Validate for ServiceSettings {
    fn validate(&self) -> Result<()> {
        self.gateway.validate()?;
        validate_bind_address("server.bind", &self.bind)?;
        if let Some(prompt) = &self.prompt {
            validate_non_empty_string("prompt.text", prompt)?;
        }
        Ok(())
    }
}

/// 不經命令列時使用的客戶端設定
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub review_url: String,
    pub optimize_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            review_url: REVIEW_URL.to_string(),
            optimize_url: OPTIMIZE_URL.to_string(),
        }
    }
}

impl ConfigProvider for ClientConfig {
    fn review_url(&self) -> &str {
        &self.review_url
    }

    fn optimize_url(&self) -> &str {
        &self.optimize_url
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("review_url", &self.review_url)?;
        validate_url("optimize_url", &self.optimize_url)
    }
}
