//! LLM API 客户端
//!
//! 封装与 LLM 服务的调用：提示词进、纯文本出。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{WorkerError, WorkerResult};

/// 文本生成能力
///
/// 提示词进、响应文本出，不承担任何持久化职责。
/// 抽成 trait 是为了让题目生成服务可以注入替身实现做单元测试。
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 发送提示词并返回响应文本（可能不是 JSON，也可能是夹在文字中的 JSON）
    async fn generate(&self, prompt: &str, temperature: f32) -> WorkerResult<String>;
}

/// 基于 `async-openai` 的 LLM 客户端
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端（兼容 OpenAI API 的服务）
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> WorkerResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| WorkerError::Llm {
                message: e.to_string(),
            })?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(temperature)
            .max_tokens(2048u32)
            .build()
            .map_err(|e| WorkerError::Llm {
                message: e.to_string(),
            })?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            WorkerError::Llm {
                message: e.to_string(),
            }
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| WorkerError::Llm {
                message: "LLM 返回内容为空".to_string(),
            })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试 LLM API 连接性（需要真实服务）
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=... cargo test test_llm_generate -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_llm_generate() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let client = LlmClient::new(&config);

        let result = client
            .generate("请只返回一个 JSON 数组：[1, 2, 3]", 0.2)
            .await;

        match result {
            Ok(response) => {
                println!("\n========== LLM 响应 ==========");
                println!("{}", response);
                println!("==============================\n");
                assert!(!response.is_empty());
            }
            Err(e) => panic!("LLM 调用失败: {}", e),
        }
    }
}
