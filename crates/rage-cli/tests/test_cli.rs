//! Integration tests for the Rage CLI.

use rage_cli::{Compiler, Config, Overrides, pipeline};
use rage_codegen::CodegenOptions;
use std::fs;
use tempfile::TempDir;

const PROGRAM: &str = r#"
int32 main() {
    float x = 0
    stream.in x
    x = x + 1
    stream.out x
    return x
}
"#;

#[test]
fn test_build_pipeline() {
    let module = pipeline::build_pipeline(PROGRAM, "main.rg", &CodegenOptions::default()).unwrap();
    let text = module.to_string();

    assert!(text.starts_with("; ModuleID = 'Rage Language'"));
    assert!(text.contains("define i32 @main()"));
    assert!(text.contains("declare i32 @scanf(ptr, ...)"));
    assert!(text.contains("declare i32 @printf(ptr, ...)"));
}

#[test]
fn test_pipeline_stage_errors() {
    let options = CodegenOptions::default();

    let err = pipeline::build_pipeline("int32 main() { return 1 @ 2 }", "bad.rg", &options)
        .unwrap_err();
    assert_eq!(err.to_string(), "Lexical analysis failed");

    let err = pipeline::build_pipeline("int32 main() {\n    float x = 1\n}\n", "bad.rg", &options)
        .unwrap_err();
    assert_eq!(err.to_string(), "Parsing failed");

    let err = pipeline::build_pipeline("int32 main() {\n    return y\n}\n", "bad.rg", &options)
        .unwrap_err();
    assert_eq!(err.to_string(), "Code generation failed");
}

#[test]
fn test_token_dump() {
    let dump = pipeline::token_dump("float x = 1 + 2\n", "t.rg").unwrap();
    let lines: Vec<_> = dump.lines().collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "1:1\ttype name\tfloat");
    assert_eq!(lines[1], "1:7\tidentifier\tx");
    assert_eq!(lines[6], "1:16\tnewline");
}

#[test]
fn test_compiler_reads_project_config() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::new("demo");
    config.compiler.module_name = "Demo Module".to_string();
    config.save(temp_dir.path().join("rage.toml")).unwrap();

    let src_dir = temp_dir.path().join("src");
    fs::create_dir(&src_dir).unwrap();
    let file = src_dir.join("main.rg");
    fs::write(&file, PROGRAM).unwrap();

    let compiler = Compiler::new(&file, &Overrides::default()).unwrap();
    assert_eq!(compiler.config().map(|c| c.package.name.as_str()), Some("demo"));
    assert_eq!(compiler.options().module_name, "Demo Module");

    let module = compiler.emit().unwrap();
    assert_eq!(module.name, "Demo Module");
}

#[test]
fn test_overrides_win_over_config() {
    let mut config = Config::new("demo");
    config.compiler.module_name = "From Config".to_string();
    let overrides = Overrides {
        module_name: Some("From Flag".to_string()),
        no_verify: true,
    };

    let compiler = Compiler::from_source("main.rg", PROGRAM, Some(config), &overrides);
    assert_eq!(compiler.options().module_name, "From Flag");
    assert!(!compiler.options().verify);
}

#[test]
fn test_run_uses_streams() {
    let compiler = Compiler::from_source("main.rg", PROGRAM, None, &Overrides::default());
    let mut output = Vec::new();

    let result = compiler.run("41\n".as_bytes(), &mut output).unwrap();
    assert_eq!(result, 42);
    assert_eq!(String::from_utf8(output).unwrap(), "42.000000\n");
}

#[test]
fn test_missing_source_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = Compiler::new(temp_dir.path().join("absent.rg"), &Overrides::default());
    assert!(result.is_err());
}

#[test]
fn test_check_reports_success_and_failure() {
    let compiler = Compiler::from_source("main.rg", PROGRAM, None, &Overrides::default());
    assert!(compiler.check().is_ok());

    let broken = Compiler::from_source(
        "broken.rg",
        "int32 main() {\n    return y\n}\n",
        None,
        &Overrides::default(),
    );
    assert_eq!(broken.check().unwrap_err().to_string(), "Code generation failed");
}
