use dockgen_core::{BuildConfig, ProjectProfile, StackVariant};

use crate::assist::{self, TextGenerator};
use crate::support::NGINX_CONF_FILE;

/// How a Dockerfile was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOrigin {
    Assisted,
    Template,
}

impl std::fmt::Display for ArtifactOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assisted => f.write_str("assisted"),
            Self::Template => f.write_str("template"),
        }
    }
}

/// Generated Dockerfile text, passed on byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerfileArtifact {
    content: String,
    origin: ArtifactOrigin,
}

impl DockerfileArtifact {
    pub fn new(content: impl Into<String>, origin: ArtifactOrigin) -> Self {
        Self {
            content: content.into(),
            origin,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn origin(&self) -> ArtifactOrigin {
        self.origin
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("unsupported tech stack: {0}")]
    UnsupportedStack(StackVariant),
}

/// Produce a Dockerfile for the inspected project.
///
/// The assisted backend is tried first when one is given. A non-empty
/// response is returned untouched; an empty response or a failed call falls
/// back to the built-in template for the stack.
pub async fn generate<G: TextGenerator>(
    config: &BuildConfig,
    profile: &ProjectProfile,
    assist: Option<&G>,
) -> Result<DockerfileArtifact, GenerateError> {
    let stack = profile.stack;
    if !stack.is_generatable() {
        return Err(GenerateError::UnsupportedStack(stack));
    }

    if let Some(backend) = assist {
        match backend.complete(&assist::prompt(stack)).await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(stack = %stack, "using assisted Dockerfile");
                return Ok(DockerfileArtifact::new(text, ArtifactOrigin::Assisted));
            }
            Ok(_) => {
                tracing::warn!(stack = %stack, "assisted generation returned nothing, using template")
            }
            Err(e) => {
                tracing::warn!(stack = %stack, error = %e, "assisted generation failed, using template")
            }
        }
    }

    let content = DockerfileGenerator::new(config, profile).render()?;
    tracing::info!(stack = %stack, package_manager = %profile.package_manager, "using template Dockerfile");
    Ok(DockerfileArtifact::new(content, ArtifactOrigin::Template))
}

/// Renders the built-in multi-stage template for a stack.
pub struct DockerfileGenerator<'a> {
    config: &'a BuildConfig,
    profile: &'a ProjectProfile,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(config: &'a BuildConfig, profile: &'a ProjectProfile) -> Self {
        Self { config, profile }
    }

    pub fn render(&self) -> Result<String, GenerateError> {
        match self.profile.stack {
            StackVariant::NextJs => Ok(self.render_nextjs()),
            StackVariant::React => Ok(self.render_react()),
            other => Err(GenerateError::UnsupportedStack(other)),
        }
    }

    /// Shared builder stage: install from the lock file, then build.
    fn builder_stage(&self, build_prefix: &str) -> String {
        let pm = self.profile.package_manager;
        let setup = match pm.setup_command() {
            Some(cmd) => format!("RUN {cmd}\n"),
            None => String::new(),
        };

        format!(
            r#"# === Stage 1: Builder ===
FROM {node} AS builder
WORKDIR /app
{setup}COPY package.json {lock_file} ./
RUN {install}
COPY . .
RUN {build_prefix}{run} run build
"#,
            node = self.config.node_image,
            lock_file = pm.lock_file(),
            install = pm.install_command(),
            run = pm.command(),
        )
    }

    fn render_nextjs(&self) -> String {
        // `public/` is optional in Next.js but the runtime stage copies it.
        let builder = self.builder_stage("mkdir -p public && ");

        format!(
            r#"{builder}
# === Stage 2: Runtime ===
FROM {node} AS runner
WORKDIR /app
ENV NODE_ENV=production
ENV NEXT_TELEMETRY_DISABLED=1
RUN addgroup --system --gid 1001 nodejs && \
    adduser --system --uid 1001 nextjs
COPY --from=builder --chown=nextjs:nodejs /app/.next ./.next
COPY --from=builder /app/public ./public
COPY --from=builder /app/package.json ./package.json
COPY --from=builder /app/node_modules ./node_modules
USER nextjs
EXPOSE 3000
CMD ["npm", "start"]
"#,
            node = self.config.node_image,
        )
    }

    fn render_react(&self) -> String {
        let builder = self.builder_stage("");

        format!(
            r#"{builder}
# === Stage 2: Static server ===
FROM {nginx}
RUN rm -rf /usr/share/nginx/html/*
COPY --from=builder /app/{out_dir} /usr/share/nginx/html
COPY {nginx_conf} /etc/nginx/conf.d/default.conf
EXPOSE 80
CMD ["nginx", "-g", "daemon off;"]
"#,
            nginx = self.config.nginx_image,
            out_dir = self.profile.build_output_dir(),
            nginx_conf = NGINX_CONF_FILE,
        )
    }
}

