use anyhow::Result;
use async_trait::async_trait;

/// 文本生成后端的统一接口
///
/// 任何生成式模型（Gemini、OpenAI 兼容接口、测试桩）都应该实现这个 trait。
/// 一次调用对应一次远程请求，不做重试。
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 发送 prompt，返回模型输出的原始文本
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// 模型名称（用于展示）
    fn model_name(&self) -> &str;
}
