use std::{
    cell::Cell,
    collections::HashMap,
    fs, io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use tracing_subscriber::fmt::MakeWriter;
use walkdir::WalkDir;
use zplot::{
    ComplexNumber, compile,
    error::{RuntimeError, SyntaxError, SyntaxErrorKind},
    evaluate_at,
    interpreter::{
        engine::Engine,
        symbols::{Arity, FunctionEntry, OperatorEntry, SymbolTables, VariableEntry},
        syntax::Syntax,
        value::complex::INVALID,
    },
    plane::{
        plot::Plot,
        reference,
        sampler::{GridConfig, sample_grid, sample_grid_parallel},
    },
};

const BOOK_POINT: ComplexNumber = ComplexNumber::new(0.5, 0.5);

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for code in extract_dsl_blocks(&content) {
            for line in code.lines().filter(|l| !l.trim().is_empty()) {
                count += 1;
                if let Err(e) = evaluate_at(line, BOOK_POINT) {
                    panic!("Example `{line}` in {path:?} failed: {e}");
                }
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```zplot") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn eval(src: &str) -> ComplexNumber {
    evaluate_at(src, ComplexNumber::new(0.0, 0.0)).unwrap_or_else(|e| panic!("`{src}` failed: {e}"))
}

fn assert_real(src: &str, expected: f64) {
    let value = eval(src);
    assert!((value.real - expected).abs() < 1e-9 && value.imaginary.abs() < 1e-9,
            "`{src}` evaluated to {value}, expected {expected}");
}

fn syntax_error(src: &str) -> SyntaxError {
    match compile(src) {
        Ok(expr) => panic!("`{src}` compiled to {expr} but was expected to fail"),
        Err(e) => e,
    }
}

fn assert_syntax_error(src: &str, kind: SyntaxErrorKind, offset: usize) {
    assert_eq!(syntax_error(src), SyntaxError { kind, offset }, "while compiling `{src}`");
}

/// Real-valued language with a unary-capable minus, for exercising the engine
/// outside the complex-plane configuration.
fn real_engine() -> Engine<f64> {
    let syntax = Syntax::new(|c: char| c.is_ascii_digit(),
                             |c: char| c.is_ascii_digit() || c == '.',
                             |text: &str| text.parse::<f64>().ok());

    let mut symbols = SymbolTables::default();
    symbols.variables.insert("x", VariableEntry::free(0.0));
    symbols.variables.insert("k", VariableEntry::constant(10.0));
    symbols.operators.insert("-",
                             OperatorEntry::new(Arity::range(1, 2), 1, |a: &[f64]| {
                                 Ok(match a {
                                     [v] => -v,
                                     [l, r] => l - r,
                                     _ => unreachable!(),
                                 })
                             }));
    symbols.operators.insert("*", OperatorEntry::new(Arity::exactly(2), 2, |a: &[f64]| Ok(a[0] * a[1])));
    symbols.operators.insert("^", OperatorEntry::new(Arity::exactly(2), 3, |a: &[f64]| Ok(a[0].powf(a[1]))));
    symbols.functions.insert("max", FunctionEntry::new(Arity::range(1, 3), |a: &[f64]| {
                                 Ok(a.iter().copied().fold(f64::NEG_INFINITY, f64::max))
                             }));
    Engine::new(syntax, symbols)
}

#[test]
fn precedence_and_associativity() {
    assert_real("1 + 2*3", 7.0);
    assert_real("(1 + 2)*3", 9.0);
    assert_real("8 - 3 - 2", 3.0);
    assert_real("8/4/2", 1.0);
    assert_real("2^3^2", 64.0);
    assert_real("2*3^2", 18.0);
    assert_real("((((7))))", 7.0);
}

#[test]
fn constants_and_functions() {
    assert_real("pi", std::f64::consts::PI);
    assert_real("e", std::f64::consts::E);
    assert_real("sin(0)", 0.0);
    assert_real("cos 0", 1.0);
    assert_real("gamma(5)", 24.0);
    assert_real("i*i", -1.0);
    assert_real("cos(pi/3)^2 + sin(pi/3)^2", 1.0);
    assert_eq!(eval("2*i"), ComplexNumber::new(0.0, 2.0));
}

#[test]
fn whitespace_is_insignificant() {
    assert_eq!(compile("sin(2*pi)").unwrap(), compile(" sin ( 2 * pi ) ").unwrap());
    assert_eq!(compile("sinz").unwrap(), compile("sin z").unwrap());
}

#[test]
fn bare_function_takes_one_primary() {
    let expr = compile("sin z^2").unwrap();
    assert_eq!(expr.to_string(), "(sin(z) ^ 2)");
}

#[test]
fn longest_name_wins() {
    let mut engine = reference::engine();
    engine.symbols_mut()
          .variables
          .insert("p", VariableEntry::free(ComplexNumber::new(2.0, 0.0)));

    let expr = engine.compile("pi").unwrap();
    assert_eq!(expr.variables(), ["pi"]);

    let expr = engine.compile("p*pi").unwrap();
    assert_eq!(expr.variables(), ["p", "pi"]);

    let err = engine.compile("pip").unwrap_err();
    assert_eq!(err, SyntaxError { kind:   SyntaxErrorKind::TrailingTokens,
                                  offset: 2, });
}

#[test]
fn function_beats_variable_of_equal_length() {
    let mut engine = reference::engine();
    engine.symbols_mut()
          .variables
          .insert("sin", VariableEntry::constant(ComplexNumber::new(5.0, 0.0)));

    let expr = engine.compile("sin(0)").unwrap();
    assert_eq!(engine.evaluate(&expr, &()).unwrap(), ComplexNumber::new(0.0, 0.0));
}

#[test]
fn syntax_errors_report_offsets() {
    assert_syntax_error("sin()", SyntaxErrorKind::ArityMismatch, 3);
    assert_syntax_error("sin(1, 2)", SyntaxErrorKind::ArityMismatch, 3);
    assert_syntax_error("foo(1)", SyntaxErrorKind::UnknownIdentifier, 0);
    assert_syntax_error("1 + q", SyntaxErrorKind::UnknownIdentifier, 4);
    assert_syntax_error("1.2.3 + z", SyntaxErrorKind::InvalidLiteral, 0);
    assert_syntax_error("z + 1.2.3", SyntaxErrorKind::InvalidLiteral, 4);
    assert_syntax_error("", SyntaxErrorKind::EmptyInput, 0);
    assert_syntax_error("   ", SyntaxErrorKind::EmptyInput, 0);
    assert_syntax_error("(z + 1", SyntaxErrorKind::UnclosedParen, 0);
    assert_syntax_error("2*(z", SyntaxErrorKind::UnclosedParen, 2);
    assert_syntax_error("z 1", SyntaxErrorKind::TrailingTokens, 2);
    assert_syntax_error("z)", SyntaxErrorKind::TrailingTokens, 1);
    assert_syntax_error("-z", SyntaxErrorKind::UnexpectedToken, 0);
    assert_syntax_error("z +", SyntaxErrorKind::UnexpectedEndOfInput, 3);
    assert_syntax_error("z * )", SyntaxErrorKind::UnexpectedToken, 4);
}

#[test]
fn offsets_count_characters() {
    let err = compile("z + é").unwrap_err();
    assert_eq!(err.offset, 4);

    let mut engine = reference::engine();
    engine.symbols_mut()
          .variables
          .insert("ζ", VariableEntry::free(ComplexNumber::new(1.0, 0.0)));

    let err = engine.compile("ζ*ζ + é").unwrap_err();
    assert_eq!(err, SyntaxError { kind:   SyntaxErrorKind::UnknownIdentifier,
                                  offset: 6, });
}

#[test]
fn syntax_error_display() {
    let err = compile("z +").unwrap_err();
    assert_eq!(err.to_string(), "syntax error at offset 3: unexpected end of input");
}

#[test]
fn nesting_is_bounded() {
    let deep = format!("{}z{}", "(".repeat(300), ")".repeat(300));
    assert_eq!(syntax_error(&deep).kind, SyntaxErrorKind::NestingTooDeep);

    let shallow = format!("{}z{}", "(".repeat(100), ")".repeat(100));
    assert!(compile(&shallow).is_ok());
}

#[test]
fn prefix_operators_in_custom_language() {
    let engine = real_engine();
    let run = |src: &str| {
        let expr = engine.compile(src).unwrap_or_else(|e| panic!("`{src}`: {e}"));
        engine.evaluate(&expr, &[("x", 3.0)]).unwrap()
    };

    assert!((run("-2^2") + 4.0).abs() < 1e-12);
    assert!((run("3 - -2") - 5.0).abs() < 1e-12);
    assert!((run("-x*2") + 6.0).abs() < 1e-12);
    assert!((run("max(1, x, 2)") - 3.0).abs() < 1e-12);
    assert!((run("k - x") - 7.0).abs() < 1e-12);

    let err = engine.compile("max(1, 2, 3, 4)").unwrap_err();
    assert_eq!(err, SyntaxError { kind:   SyntaxErrorKind::ArityMismatch,
                                  offset: 3, });
    assert_eq!(engine.compile("2 -").unwrap_err().kind,
               SyntaxErrorKind::UnexpectedEndOfInput);
}

#[test]
fn rebinding_changes_later_evaluations() {
    let mut engine = reference::engine();
    let expr = engine.compile("gamma(z)").unwrap();

    engine.symbols_mut().rebind("z", ComplexNumber::new(5.0, 0.0)).unwrap();
    let first = engine.evaluate(&expr, &()).unwrap();
    assert!((first.real - 24.0).abs() < 1e-9);

    engine.symbols_mut().rebind("z", ComplexNumber::new(6.0, 0.0)).unwrap();
    let second = engine.evaluate(&expr, &()).unwrap();
    assert!((second.real - 120.0).abs() < 1e-8);
}

#[test]
fn rebinding_is_checked() {
    let mut engine = reference::engine();
    assert_eq!(engine.symbols_mut().rebind("pi", ComplexNumber::new(3.0, 0.0)),
               Err(RuntimeError::ConstantRebind { name: "pi".to_string() }));
    assert_eq!(engine.symbols_mut().rebind("w", ComplexNumber::new(3.0, 0.0)),
               Err(RuntimeError::UnknownVariable { name: "w".to_string() }));
}

#[test]
fn bindings_override_only_free_variables() {
    let engine = reference::shared();
    let expr = engine.compile("z + pi").unwrap();

    let mut bindings = HashMap::new();
    bindings.insert("z".to_string(), ComplexNumber::new(1.0, 0.0));
    bindings.insert("pi".to_string(), ComplexNumber::new(100.0, 0.0));

    let value = engine.evaluate(&expr, &bindings).unwrap();
    assert!((value.real - (1.0 + std::f64::consts::PI)).abs() < 1e-12);

    let unbound = engine.evaluate(&expr, &()).unwrap();
    assert!((unbound.real - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn evaluation_is_repeatable() {
    let engine = reference::shared();
    let expr = engine.compile("sin(z)*cos(z) + gamma(z + 1)").unwrap();
    let bindings = [("z", ComplexNumber::new(0.3, -0.7))];

    let first = engine.evaluate(&expr, &bindings).unwrap();
    for _ in 0..10_000 {
        assert_eq!(engine.evaluate(&expr, &bindings).unwrap(), first);
    }
}

#[test]
fn runtime_errors_are_reported() {
    let at = |src: &str, re: f64| {
        let expr = compile(src).unwrap();
        reference::shared().evaluate(&expr, &[("z", ComplexNumber::new(re, 0.0))])
    };

    assert_eq!(at("1/z", 0.0), Err(RuntimeError::DivisionByZero));
    assert_eq!(at("z^(0-1)", 0.0), Err(RuntimeError::DivisionByZero));
    assert_eq!(at("gamma(z)", -3.0), Err(RuntimeError::Singularity { function: "gamma" }));
    assert_eq!(at("z^0", 0.0), Ok(ComplexNumber::new(1.0, 0.0)));
    assert_eq!(at("z^2", 0.0), Ok(ComplexNumber::new(0.0, 0.0)));
}

#[test]
fn grid_marks_failed_samples() {
    let config = GridConfig { half_range:  1.0,
                              aspect:      1.0,
                              line_step:   1.0,
                              sample_step: 0.5, };
    let grid = Plot::from_source("1/z").unwrap().sample(&config).unwrap();

    assert_eq!(grid.vertical.len(), 3);
    assert_eq!(grid.horizontal.len(), 3);
    assert_eq!(grid.invalid_count(), 2);
    assert_eq!(grid.vertical[1][2].transformed, INVALID);
    assert_eq!(grid.vertical[1][2].original, ComplexNumber::new(0.0, 0.0));
}

#[test]
fn grid_survives_gamma_poles() {
    let config = GridConfig { half_range:  2.0,
                              aspect:      1.0,
                              line_step:   1.0,
                              sample_step: 1.0, };
    let grid = Plot::from_source("gamma(z)").unwrap().sample(&config).unwrap();

    assert_eq!(grid.lines().count(), 10);
    assert_eq!(grid.invalid_count(), 6);
}

#[test]
fn parallel_sampling_matches_sequential() {
    let plot = Plot::from_source("gamma(z)").unwrap();
    let config = GridConfig::default();

    let sequential = plot.sample(&config).unwrap();
    let parallel = plot.sample_parallel(&config).unwrap();

    assert_eq!(sequential, parallel);
    assert!(sequential.vertical.len() > 1);
}

#[test]
fn grid_rejects_bad_config() {
    let config = GridConfig { sample_step: 0.0,
                              ..GridConfig::default() };
    assert!(matches!(sample_grid(&config, || Ok), Err(RuntimeError::InvalidArgument { .. })));
    assert!(matches!(sample_grid_parallel(&config, || Ok), Err(RuntimeError::InvalidArgument { .. })));
}

#[test]
fn plot_falls_back_to_default_expression() {
    let plot = Plot::from_source("sin(").unwrap();

    assert_eq!(plot.source(), "sin(");
    assert_eq!(plot.error().map(|e| e.kind), Some(SyntaxErrorKind::UnexpectedEndOfInput));
    assert_eq!(plot.expression(), &compile(reference::DEFAULT_EXPRESSION).unwrap());

    let value = plot.evaluate(ComplexNumber::new(4.0, 0.0)).unwrap();
    assert!((value.real - 6.0).abs() < 1e-9);
}

#[test]
fn long_operator_chains_compile_evaluate_and_drop() {
    let source = vec!["z"; 200_000].join("+");
    let expr = compile(&source).unwrap();
    assert_eq!(expr.root().size(), 399_999);

    let engine = reference::shared();
    let mut evaluator = engine.evaluator();
    for re in [1.0, 2.0, 0.5] {
        let value = evaluator.evaluate(&expr, &[("z", ComplexNumber::new(re, 0.0))])
                             .unwrap();
        assert_eq!(value, ComplexNumber::new(re * 200_000.0, 0.0));
    }

    let copy = expr.clone();
    assert_eq!(copy, expr);
    assert_eq!(expr.to_string().len(), copy.to_string().len());
    drop(copy);
    drop(expr);

    let mixed = vec!["2*z"; 100_000].join("-");
    let value = evaluate_at(&mixed, ComplexNumber::new(1.0, 0.0)).unwrap();
    assert_eq!(value, ComplexNumber::new(2.0 - 2.0 * 99_999.0, 0.0));
}

#[test]
fn long_bare_function_chains() {
    let shallow = format!("{}z", "sin ".repeat(200));
    let expr = compile(&shallow).unwrap();
    let value = reference::shared().evaluate(&expr, &[("z", ComplexNumber::new(0.0, 0.0))])
                                   .unwrap();
    assert_eq!(value, ComplexNumber::new(0.0, 0.0));
    drop(expr);

    let deep = format!("{}z", "sin ".repeat(100_000));
    assert_eq!(syntax_error(&deep).kind, SyntaxErrorKind::NestingTooDeep);
}

#[test]
fn unknown_name_after_known_prefix() {
    assert_syntax_error("exp(1)", SyntaxErrorKind::UnknownIdentifier, 1);
    assert_syntax_error("zeta(1)", SyntaxErrorKind::UnknownIdentifier, 2);
}

#[test]
fn each_line_gets_one_transform() {
    let config = GridConfig { half_range:  1.0,
                              aspect:      1.0,
                              line_step:   0.5,
                              sample_step: 0.25, };

    let made = Cell::new(0);
    let grid = sample_grid(&config, || {
                   made.set(made.get() + 1);
                   Ok
               }).unwrap();
    assert_eq!(made.get(), grid.lines().count());

    let made = AtomicUsize::new(0);
    let grid = sample_grid_parallel(&config, || {
                   made.fetch_add(1, Ordering::Relaxed);
                   Ok
               }).unwrap();
    assert_eq!(made.load(Ordering::Relaxed), grid.lines().count());
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn invalid_samples_are_warned_about() {
    let config = GridConfig { half_range:  1.0,
                              aspect:      1.0,
                              line_step:   1.0,
                              sample_step: 0.5, };
    let plot = Plot::from_source("1/z").unwrap();

    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt().with_writer(captured.clone())
                                              .with_max_level(tracing::Level::WARN)
                                              .with_ansi(false)
                                              .finish();
    let grid = tracing::subscriber::with_default(subscriber, || plot.sample(&config).unwrap());
    assert_eq!(grid.invalid_count(), 2);

    let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(log.contains("WARN"), "{log}");
    assert!(log.contains("grid contains invalid samples"), "{log}");
}
