use dockgen_build::instructions::{self, CopySpec, has_from};
use dockgen_build::precheck::{PrecheckError, check_nextjs_project};
use dockgen_build::validate::validate;
use dockgen_core::PackageManager;
use proptest::prelude::*;
use tempfile::TempDir;

// ── Instruction scanning ──

#[test]
fn parse_joins_continuations_and_drops_comments() {
    let parsed = instructions::parse(
        "# syntax comment\nFROM node:18 AS builder\nRUN apk add git \\\n    # inline comment\n    curl\n\ncopy a b\n",
    );

    let keywords: Vec<_> = parsed.iter().map(|i| i.keyword.as_str()).collect();
    assert_eq!(keywords, ["FROM", "RUN", "COPY"]);
    assert_eq!(parsed[1].args, "apk add git  curl");
}

#[test]
fn copy_spec_handles_flags_in_any_order() {
    let parsed = instructions::parse(
        "COPY --chown=node:node --from=builder /app/.next ./.next\nCOPY --link --chown=1001:1001 src ./src\n",
    );

    assert_eq!(
        parsed[0].copy_spec(),
        Some(CopySpec {
            from_stage: true,
            sources: vec!["/app/.next".to_owned()],
        })
    );
    assert_eq!(
        parsed[1].copy_spec(),
        Some(CopySpec {
            from_stage: false,
            sources: vec!["src".to_owned()],
        })
    );
}

#[test]
fn copy_spec_collects_all_sources() {
    let parsed = instructions::parse("COPY package.json yarn.lock .npmrc ./\n");
    let spec = parsed[0].copy_spec().unwrap();
    assert_eq!(spec.sources, ["package.json", "yarn.lock", ".npmrc"]);
}

#[test]
fn copy_spec_parses_exec_form() {
    let parsed = instructions::parse(r#"COPY ["my file.txt", "/app/"]"#);
    let spec = parsed[0].copy_spec().unwrap();
    assert_eq!(spec.sources, ["my file.txt"]);
}

#[test]
fn copy_spec_ignores_other_instructions_and_missing_destination() {
    let parsed = instructions::parse("RUN cp a b\nCOPY lonely\n");
    assert!(parsed[0].copy_spec().is_none());
    assert!(parsed[1].copy_spec().is_none());
}

#[test]
fn has_from_detects_base_image() {
    assert!(has_from("# comment\nfrom alpine\nRUN true\n"));
    assert!(!has_from("RUN echo FROM alpine\n"));
    assert!(!has_from(""));
}

// ── Validation ──

#[test]
fn reports_every_missing_path_in_order() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("package.json"), "{}").unwrap();

    let dockerfile = "FROM node:18\nCOPY package.json ./\nCOPY src ./src\nCOPY public/favicon.ico ./public/\nCOPY src ./again\n";
    let result = validate(dockerfile, tmp.path(), PackageManager::Npm);

    assert!(!result.is_valid());
    assert_eq!(result.missing_paths, ["src", "public/favicon.ico"]);
}

#[test]
fn resolves_paths_relative_to_context() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("src")).unwrap();
    std::fs::write(tmp.path().join("index.html"), "").unwrap();

    let dockerfile = "FROM nginx\nCOPY ./src /app/src\nCOPY /index.html /usr/share/nginx/html/\nCOPY . .\n";
    assert!(validate(dockerfile, tmp.path(), PackageManager::Npm).is_valid());
}

#[test]
fn skips_stage_copies_wildcards_and_nginx_conf() {
    let tmp = TempDir::new().unwrap();

    let dockerfile = "FROM node\nCOPY --from=builder /app/dist /srv\nCOPY *.json ./\nCOPY src/*.ts ./src/\nCOPY nginx.conf /etc/nginx/conf.d/default.conf\n";
    assert!(validate(dockerfile, tmp.path(), PackageManager::Npm).is_valid());
}

#[test]
fn skips_remote_add_sources_but_checks_local_ones() {
    let tmp = TempDir::new().unwrap();

    let dockerfile = "FROM alpine\nADD https://example.com/tool.tar.gz /opt/\nADD vendor.tar.gz /opt/\n";
    let result = validate(dockerfile, tmp.path(), PackageManager::Npm);
    assert_eq!(result.missing_paths, ["vendor.tar.gz"]);
}

#[test]
fn unrelated_lock_files_are_not_errors() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("package.json"), "{}").unwrap();
    std::fs::write(tmp.path().join("pnpm-lock.yaml"), "").unwrap();

    let dockerfile = "FROM node\nCOPY package.json yarn.lock package-lock.json pnpm-lock.yaml ./\n";
    assert!(validate(dockerfile, tmp.path(), PackageManager::Pnpm).is_valid());
}

#[test]
fn inferred_lock_file_must_exist() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("package.json"), "{}").unwrap();

    let dockerfile = "FROM node\nCOPY package.json yarn.lock ./\n";
    let result = validate(dockerfile, tmp.path(), PackageManager::Yarn);
    assert_eq!(result.missing_paths, ["yarn.lock"]);
}

#[test]
fn sources_outside_the_context_are_missing() {
    let tmp = TempDir::new().unwrap();
    let context = tmp.path().join("ws");
    std::fs::create_dir_all(context.join("src")).unwrap();
    std::fs::write(tmp.path().join("secret.env"), "TOKEN=1").unwrap();
    std::fs::write(context.join("app.js"), "").unwrap();

    let dockerfile = "FROM node\nCOPY ../secret.env ./\nCOPY src/../app.js ./\nCOPY ./src/../../secret.env ./\n";
    let result = validate(dockerfile, &context, PackageManager::Npm);
    assert_eq!(
        result.missing_paths,
        ["../secret.env", "src/../app.js", "./src/../../secret.env"]
    );
}

proptest! {
    #[test]
    fn missing_plain_paths_are_always_reported(name in "[a-z][a-z0-9_]{0,12}\\.(txt|js|cfg)") {
        let tmp = TempDir::new().unwrap();
        let dockerfile = format!("FROM alpine\nCOPY {name} /dst/\n");

        let result = validate(&dockerfile, tmp.path(), PackageManager::Npm);
        prop_assert_eq!(result.missing_paths, vec![name]);
    }

    #[test]
    fn stage_copies_and_wildcards_never_flagged(
        name in "[a-z][a-z0-9_]{0,12}",
        stage in "[a-z]{1,8}",
    ) {
        let tmp = TempDir::new().unwrap();
        let dockerfile = format!(
            "FROM alpine\nCOPY --from={stage} /{name} /dst/\nCOPY {name}* /dst/\nCOPY {name}/?.js /dst/\n"
        );

        prop_assert!(validate(&dockerfile, tmp.path(), PackageManager::Npm).is_valid());
    }
}

// ── Next.js pre-check ──

fn nextjs_project(manifest: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("package.json"), manifest).unwrap();
    tmp
}

const VALID_NEXT_MANIFEST: &str =
    r#"{"dependencies": {"next": "14.2.0", "react": "18"}, "scripts": {"build": "next build"}}"#;

#[test]
fn precheck_accepts_valid_project() {
    let tmp = nextjs_project(VALID_NEXT_MANIFEST);
    std::fs::write(
        tmp.path().join("next.config.js"),
        "module.exports = { reactStrictMode: true };",
    )
    .unwrap();

    check_nextjs_project(tmp.path()).unwrap();
}

#[test]
fn precheck_requires_manifest() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(
        check_nextjs_project(tmp.path()),
        Err(PrecheckError::ManifestMissing)
    ));
}

#[test]
fn precheck_requires_next_dependency() {
    let tmp = nextjs_project(r#"{"dependencies": {"react": "18"}, "scripts": {"build": "x"}}"#);
    assert!(matches!(
        check_nextjs_project(tmp.path()),
        Err(PrecheckError::FrameworkMissing)
    ));
}

#[test]
fn precheck_accepts_next_in_dev_dependencies() {
    let tmp = nextjs_project(r#"{"devDependencies": {"next": "14"}, "scripts": {"build": "next build"}}"#);
    check_nextjs_project(tmp.path()).unwrap();
}

#[test]
fn precheck_requires_build_script() {
    let tmp = nextjs_project(r#"{"dependencies": {"next": "14"}, "scripts": {"dev": "next dev"}}"#);
    let err = check_nextjs_project(tmp.path()).unwrap_err();
    assert!(matches!(err, PrecheckError::BuildScriptMissing));
    assert!(err.to_string().contains("no build script"));
}

#[test]
fn precheck_rejects_standalone_output() {
    for (file, content) in [
        ("next.config.js", "module.exports = {\n  output: 'standalone',\n};"),
        ("next.config.js", r#"module.exports = { output : "standalone" }"#),
        ("next.config.mjs", "export default { output: `standalone` };"),
        ("next.config.ts", "const config: NextConfig = { output: \"standalone\" };"),
    ] {
        let tmp = nextjs_project(VALID_NEXT_MANIFEST);
        std::fs::write(tmp.path().join(file), content).unwrap();

        let err = check_nextjs_project(tmp.path()).unwrap_err();
        assert!(
            matches!(err, PrecheckError::StandaloneOutput { .. }),
            "{file}: {content}"
        );
    }
}

#[test]
fn precheck_allows_export_output() {
    let tmp = nextjs_project(VALID_NEXT_MANIFEST);
    std::fs::write(
        tmp.path().join("next.config.js"),
        "module.exports = { output: 'export' };",
    )
    .unwrap();

    check_nextjs_project(tmp.path()).unwrap();
}

#[test]
fn precheck_surfaces_malformed_manifest() {
    let tmp = nextjs_project("{ not json");
    assert!(matches!(
        check_nextjs_project(tmp.path()),
        Err(PrecheckError::Manifest(_))
    ));
}
