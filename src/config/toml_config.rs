use crate::config::ServiceSettings;
use crate::utils::error::{AgentError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 代理服務的 TOML 設定檔，所有欄位皆可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    pub text: Option<String>,
}

impl AgentConfig {
    /// 從檔案載入 TOML 配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 從字串載入 TOML 配置，先替換環境變數
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AgentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GROQ_API_KEY})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AgentError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 將有填寫的欄位覆蓋到服務設定上
    pub fn apply(self, settings: &mut ServiceSettings) {
        let gateway = self.gateway;
        if let Some(base_url) = gateway.base_url {
            settings.gateway.base_url = base_url;
        }
        if let Some(model) = gateway.model {
            settings.gateway.model = model;
        }
        if let Some(api_key) = gateway.api_key {
            settings.gateway.api_key = api_key;
        }
        if gateway.temperature.is_some() {
            settings.gateway.temperature = gateway.temperature;
        }
        if let Some(bind) = self.server.bind {
            settings.bind = bind;
        }
        if let Some(text) = self.prompt.text {
            settings.prompt = Some(text);
        }
    }
}
