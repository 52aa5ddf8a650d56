use std::fmt;

use spineapi_core::enhance::{EnhanceContext, Enhancer};
use spineapi_core::error::{EnhanceError, GenerateError};
use spineapi_core::generate::{EnhanceStep, generate};
use spineapi_core::load::{self, DocumentFormat};
use spineapi_core::transform::build;
use spineapi_core::{CodeGenerator, GeneratedFile, ParsedSpec};

const ITEMS: &str = include_str!("fixtures/items.yaml");

fn items() -> ParsedSpec {
    build(&load::from_str(ITEMS, DocumentFormat::Yaml).unwrap()).unwrap()
}

/// Emits one route module per tag group plus a model listing.
struct RouteStubGenerator;

struct StubConfig {
    package: &'static str,
}

#[derive(Debug)]
struct StubError;

impl fmt::Display for StubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no endpoints to emit")
    }
}

impl std::error::Error for StubError {}

impl CodeGenerator for RouteStubGenerator {
    type Config = StubConfig;
    type Error = StubError;

    fn generate(
        &self,
        spec: &ParsedSpec,
        config: &StubConfig,
    ) -> Result<Vec<GeneratedFile>, StubError> {
        if spec.endpoints.is_empty() {
            return Err(StubError);
        }

        let mut files: Vec<GeneratedFile> = spec
            .tag_groups()
            .iter()
            .map(|group| GeneratedFile {
                path: format!("{}/routes/{}.py", config.package, group.name),
                content: group
                    .endpoints
                    .iter()
                    .map(|e| format!("def {}(): ...\n", e.handler_name()))
                    .collect(),
            })
            .collect();

        files.push(GeneratedFile {
            path: format!("{}/models.txt", config.package),
            content: spec
                .schemas
                .iter()
                .map(|s| format!("{} -> {}\n", s.type_name(), s.table_name()))
                .collect(),
        });
        Ok(files)
    }
}

struct Stamp;

impl Enhancer for Stamp {
    fn name(&self) -> &str {
        "stamp"
    }

    fn enhance(
        &self,
        text: &str,
        ctx: &EnhanceContext<'_>,
    ) -> Result<Option<String>, EnhanceError> {
        if ctx.path.ends_with("default.py") {
            return Err(EnhanceError::Config("refusing default group".to_string()));
        }
        Ok(Some(format!("# {}\n{text}", ctx.file_type)))
    }
}

#[test]
fn generate_without_enhancer() {
    let spec = items();
    let report = generate(&spec, &RouteStubGenerator, &StubConfig { package: "app" }, None)
        .unwrap();

    assert_eq!(report.endpoints, 8);
    assert_eq!(report.schemas, 7);
    assert_eq!(report.enhanced, 0);

    let paths: Vec<&str> = report.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "app/routes/health.py",
            "app/routes/items.py",
            "app/routes/reviews.py",
            "app/routes/default.py",
            "app/models.txt",
        ]
    );
    assert_eq!(report.files[0].content, "def health_check(): ...\n");
    assert!(report.files[4].content.contains("OrderLine -> order_lines\n"));
}

#[test]
fn generate_enhances_matching_files_only() {
    let spec = items();
    let extensions = vec!["py".to_string()];
    let step = EnhanceStep {
        enhancer: &Stamp,
        extensions: &extensions,
    };
    let report = generate(
        &spec,
        &RouteStubGenerator,
        &StubConfig { package: "app" },
        Some(step),
    )
    .unwrap();

    // default.py fails to enhance and models.txt is not a target.
    assert_eq!(report.enhanced, 3);
    assert!(report.files[0].content.starts_with("# py\ndef health_check"));
    assert_eq!(report.files[3].content, "def head_status(): ...\n");
    assert!(!report.files[4].content.starts_with('#'));
}

#[test]
fn generate_wraps_generator_errors() {
    let spec = build(&load::from_str("openapi: 3.1.0\n", DocumentFormat::Yaml).unwrap()).unwrap();
    let err = generate(&spec, &RouteStubGenerator, &StubConfig { package: "app" }, None)
        .unwrap_err();

    let GenerateError::Generator { generator, message } = err;
    assert!(generator.ends_with("RouteStubGenerator"));
    assert_eq!(message, "no endpoints to emit");
}
