/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端内部 API 基础 URL（章节创建 / 题目保存）
    pub backend_api_base_url: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 采样温度（降低随机性，保证输出格式稳定）
    pub llm_temperature: f32,
    // --- 文档下载配置 ---
    /// 下载文档的超时时间（秒）
    pub fetch_timeout_secs: u64,
    // --- 处理节奏 ---
    /// 相邻章节之间的暂停（毫秒），避免对 LLM 服务造成突发压力
    pub chapter_pause_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_api_base_url: "http://localhost:3000/api".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            // 默认端点与默认模型必须指向同一家服务：
            // 这里用 Gemini 的 OpenAI 兼容端点搭配 gemini-2.5-flash
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
            llm_temperature: 0.6,
            fetch_timeout_secs: 60,
            chapter_pause_ms: 500,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            backend_api_base_url: std::env::var("BACKEND_API_BASE_URL").unwrap_or(default.backend_api_base_url),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_temperature),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fetch_timeout_secs),
            chapter_pause_ms: std::env::var("CHAPTER_PAUSE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.chapter_pause_ms),
        }
    }
}
