//! Tests for the Rage parser.

use rage_core::{ErrorKind, Result};
use rage_lexer::tokenize;
use rage_parser::{Expression, Program, Statement, StreamDirection, parse};

fn parse_source(source: &str) -> Result<Program> {
    parse(tokenize(source)?)
}

fn parse_error(source: &str) -> String {
    let err = parse_source(source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    err.to_string()
}

#[test]
fn test_parse_simple_function() {
    let program = parse_source("int32 main() {\n    return 0\n}\n").unwrap();

    assert_eq!(program.functions.len(), 1);
    let func = &program.functions[0];
    assert_eq!(func.name, "main");
    assert_eq!(func.return_type, "int32");
    assert_eq!(func.body.len(), 1);
    assert!(matches!(func.body[0], Statement::Return { .. }));
}

#[test]
fn test_parse_single_line_function() {
    let program = parse_source("int32 main() { return 1 }").unwrap();
    assert_eq!(program.functions[0].body.len(), 1);
}

#[test]
fn test_newlines_after_type_and_before_brace() {
    let source = "int32\nmain()\n\n{\n    return 0\n}\n";
    let program = parse_source(source).unwrap();
    assert_eq!(program.functions[0].name, "main");
}

#[test]
fn test_parse_multiple_functions() {
    let source = r#"
float first() {
    return 1
}

int8 second() {
    return 2
}
"#;
    let program = parse_source(source).unwrap();

    let names: Vec<_> = program.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
    assert_eq!(program.functions[1].return_type, "int8");
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_source("int32 main() {\n    float x = 1 + 2\n    return x\n}\n").unwrap();

    let Statement::VariableDeclaration {
        type_name,
        name,
        initializer,
        ..
    } = &program.functions[0].body[0]
    else {
        panic!("Expected variable declaration");
    };
    assert_eq!(type_name, "float");
    assert_eq!(name, "x");
    assert_eq!(initializer.to_string(), "(1 + 2)");
}

#[test]
fn test_parse_assignment() {
    let source = "int32 main() {\n    int32 x = 1\n    x = x * 2 + 1\n    return x\n}\n";
    let program = parse_source(source).unwrap();

    let Statement::Assignment { name, value, .. } = &program.functions[0].body[1] else {
        panic!("Expected assignment");
    };
    assert_eq!(name, "x");
    assert_eq!(value.to_string(), "((x * 2) + 1)");
}

#[test]
fn test_parse_stream_statements() {
    let source = "int32 main() {\n    float x = 0\n    stream.in x\n    stream.out x\n    return 0\n}\n";
    let program = parse_source(source).unwrap();
    let body = &program.functions[0].body;

    assert!(matches!(
        &body[1],
        Statement::Stream { variable, direction: StreamDirection::In, .. } if variable == "x"
    ));
    assert!(matches!(
        &body[2],
        Statement::Stream { variable, direction: StreamDirection::Out, .. } if variable == "x"
    ));
}

#[test]
fn test_parse_if_else() {
    let source = r#"
int32 main() {
    float x = 3
    if x - 3
    {
        x = 1
    }
    else
    {
        x = 2
    }
    return x
}
"#;
    let program = parse_source(source).unwrap();

    let Statement::IfElse {
        condition,
        then_body,
        else_body,
        ..
    } = &program.functions[0].body[1]
    else {
        panic!("Expected if/else");
    };
    assert_eq!(condition.to_string(), "(x - 3)");
    assert_eq!(then_body.len(), 1);
    assert_eq!(else_body.len(), 1);
}

#[test]
fn test_return_inside_if_satisfies_return_check() {
    let source = r#"
int32 main() {
    float x = 1
    if x {
        return 1
    } else {
        return 2
    }
}
"#;
    let program = parse_source(source).unwrap();
    assert_eq!(program.functions[0].body.len(), 2);
}

#[test]
fn test_number_literals_are_floats() {
    let program = parse_source("int32 main() {\n    return 2.5\n}\n").unwrap();

    let Statement::Return { value, .. } = &program.functions[0].body[0] else {
        panic!("Expected return");
    };
    assert!(matches!(value, Expression::Number { value, .. } if (*value - 2.5).abs() < f64::EPSILON));
}

#[test]
fn test_missing_return_fails() {
    let message = parse_error("int32 main() {\n    float x = 1\n}\n");
    assert!(message.contains("Function 'main' must return a value"));
}

#[test]
fn test_return_check_is_per_function() {
    let source = "int32 a() {\n    return 1\n}\nint32 b() {\n    float y = 2\n}\n";
    let message = parse_error(source);
    assert!(message.contains("Function 'b' must return a value"));
}

#[test]
fn test_statement_after_return_fails() {
    let message = parse_error("int32 main() {\n    return 1\n    float x = 2\n}\n");
    assert!(message.contains("'}' after return statement"));
}

#[test]
fn test_missing_else_fails() {
    let source = "int32 main() {\n    if 1 {\n        return 1\n    }\n    return 2\n}\n";
    let message = parse_error(source);
    assert!(message.contains("'else'"));
}

#[test]
fn test_else_if_is_rejected() {
    let source = "int32 main() {\n    if 1 {\n        return 1\n    } else if 2 {\n        return 2\n    } else {\n        return 3\n    }\n}\n";
    let message = parse_error(source);
    assert!(message.contains("Expected '{', found 'if'"));
}

#[test]
fn test_parameters_are_rejected() {
    let message = parse_error("int32 main(x) {\n    return 0\n}\n");
    assert!(message.contains("Expected ')'"));
}

#[test]
fn test_top_level_must_be_function() {
    let message = parse_error("x = 1\n");
    assert!(message.contains("return type of a function definition"));
}

#[test]
fn test_empty_assignment_fails() {
    let message = parse_error("int32 main() {\n    float x = 1\n    x =\n    return x\n}\n");
    assert!(message.contains("Expected assigned value, found empty expression"));
}

#[test]
fn test_two_statements_on_one_line_fail() {
    let message = parse_error("int32 main() {\n    float x = 1 float y = 2\n    return x\n}\n");
    assert!(message.contains("newline after statement"));
}

#[test]
fn test_unclosed_body_fails() {
    let message = parse_error("int32 main() {\n    float x = 1\n");
    assert!(message.contains("end of input"));
}

#[test]
fn test_function_call_syntax_is_rejected() {
    let message = parse_error("int32 main() {\n    float x = f()\n    return x\n}\n");
    assert!(message.contains("newline after statement"));
}

#[test]
fn test_expression_tree_shapes() {
    let source = r#"
int32 main() {
    float a = 2 + 3 * 4
    float b = 8 - 4 - 2
    float c = 1 - 2 * 3 + 4 / x
    return a
}
"#;
    let program = parse_source(source).unwrap();
    let shapes: Vec<String> = program.functions[0]
        .body
        .iter()
        .map(|statement| match statement {
            Statement::VariableDeclaration {
                name, initializer, ..
            } => format!("{name} = {initializer}"),
            Statement::Return { value, .. } => format!("return {value}"),
            other => panic!("unexpected statement {other:?}"),
        })
        .collect();

    insta::assert_snapshot!(shapes.join("\n"), @r"
    a = (2 + (3 * 4))
    b = ((8 - 4) - 2)
    c = ((1 - (2 * 3)) + (4 / x))
    return a
    ");
}
