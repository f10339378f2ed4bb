use dockgen_core::StackVariant;

/// A text-completion backend used for assisted Dockerfile generation.
///
/// Production code uses the Gemini client in `dockgen-exec`; tests use
/// mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait TextGenerator: Send + Sync {
    /// Complete a single prompt, returning the raw response text.
    async fn complete(&self, prompt: &str) -> Result<String, AssistError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AssistError {
    #[error("text generation request failed: {detail}")]
    Request { detail: String },

    #[error("text generation backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected text generation response: {detail}")]
    Decode { detail: String },
}

/// Instructional prompt for a stack; the stack name is the only parameter.
pub fn prompt(stack: StackVariant) -> String {
    format!(
        "You are an expert DevOps engineer. Generate a production-ready Dockerfile for a {stack} application. Requirements:
- Use multi-stage builds to minimize image size
- For React single-page apps, serve the built files with nginx using the nginx.conf in the build context
- For Next.js, run `next start` from the regular build output (not standalone output)
- Include only necessary files in each stage
- Set proper permissions and a non-root user
- No volumes or host path mounts
- Respond ONLY with the Dockerfile content, no explanation, markdown or backticks.",
        stack = stack.name(),
    )
}
