//! Execution engine for linecalc programs
//!
//! Drives the parser over a whole source text, one statement at a time,
//! and applies the configured error policy.

use crate::config::{Config, ErrorMode};
use crate::error::{CalcError, Result};
use crate::parser::Parser;
use crate::program::Program;
use crate::tokenizer::tokenize;
use crate::variables::Environment;
use log::{debug, trace, warn};
use std::io::Write;

/// Outcome of a completed run
#[derive(Debug)]
pub struct RunSummary {
    /// Statements attempted, including failed ones
    pub statements: usize,
    /// Errors recovered from in `ErrorMode::Continue`
    pub errors: Vec<CalcError>,
    /// Variable bindings at the end of the run
    pub environment: Environment,
}

impl RunSummary {
    /// Check if every statement succeeded
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Statement executor for one configuration
#[derive(Debug, Clone, Default)]
pub struct Executor {
    config: Config,
}

impl Executor {
    /// Create a new executor
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute a loaded program
    pub fn run_program<W: Write>(&self, program: &Program, out: W) -> Result<RunSummary> {
        debug!("running {}", program.name());
        self.run(program.source(), out)
    }

    /// Execute source text with an empty environment
    pub fn run<W: Write>(&self, source: &str, out: W) -> Result<RunSummary> {
        self.run_with_environment(source, Environment::new(), out)
    }

    /// Execute source text starting from existing bindings
    pub fn run_with_environment<W: Write>(
        &self,
        source: &str,
        environment: Environment,
        out: W,
    ) -> Result<RunSummary> {
        let mut parser = Parser::with_environment(tokenize(source), environment, out)
            .with_max_depth(self.config.max_depth);
        let mut statements = 0;
        let mut errors = Vec::new();

        while !parser.at_end() {
            let line = parser.current().line;
            trace!("statement {} at line {}", statements + 1, line);
            statements += 1;

            if let Err(err) = parser.parse_statement() {
                let err = err.at_line(line);
                let fatal = matches!(err.root(), CalcError::Io(_));

                match self.config.error_mode {
                    ErrorMode::Continue if !fatal => {
                        warn!("{}", err);
                        errors.push(err);
                        parser.skip_through_line(line);
                    }
                    _ => return Err(err),
                }
            }
        }

        debug!(
            "run finished: {} statements, {} errors",
            statements,
            errors.len()
        );

        Ok(RunSummary {
            statements,
            errors,
            environment: parser.into_environment(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TokenKind;

    /// Run `source` and return the printed text
    fn output_of(executor: &Executor, source: &str) -> (String, Result<RunSummary>) {
        let mut out = Vec::new();
        let result = executor.run(source, &mut out);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn test_reference_scenarios() {
        let executor = Executor::default();
        let cases = [
            ("1 + 1", "2\n"),
            ("10 - 5", "5\n"),
            ("2 * 6", "12\n"),
            ("10 / 2", "5\n"),
            ("a = 5\n5 + a", "10\n"),
            ("2 + 3 * 4", "20\n"),
            ("(2 + 3) * 4", "20\n"),
        ];

        for (source, expected) in cases {
            let (output, result) = output_of(&executor, source);
            assert!(result.is_ok(), "{:?} failed: {:?}", source, result);
            assert_eq!(output, expected, "source: {:?}", source);
        }
    }

    #[test]
    fn test_undefined_variable_halts() {
        let executor = Executor::default();
        let (output, result) = output_of(&executor, "x");
        let err = result.unwrap_err();
        assert!(matches!(err.root(), CalcError::UndefinedVariable(name) if name == "x"));
        assert_eq!(err.line(), Some(1));
        assert_eq!(output, "");
    }

    #[test]
    fn test_division_by_zero_halts() {
        let executor = Executor::default();
        let (output, result) = output_of(&executor, "1\n5 / 0\n2");
        let err = result.unwrap_err();
        assert!(matches!(err.root(), CalcError::DivisionByZero));
        assert_eq!(err.line(), Some(2));
        assert_eq!(output, "1\n");
    }

    #[test]
    fn test_empty_program() {
        let executor = Executor::default();
        let (output, result) = output_of(&executor, "\n  \n");
        let summary = result.unwrap();
        assert_eq!(summary.statements, 0);
        assert!(summary.is_clean());
        assert_eq!(output, "");
    }

    #[test]
    fn test_summary_environment() {
        let executor = Executor::default();
        let (_, result) = output_of(&executor, "a = 1\nb = a + 1\na = 10");
        let summary = result.unwrap();
        assert_eq!(summary.statements, 3);
        assert_eq!(summary.environment.get("a").unwrap(), 10);
        assert_eq!(summary.environment.get("b").unwrap(), 2);
    }

    #[test]
    fn test_continue_mode_skips_failing_line() {
        let executor = Executor::new(Config::new().with_error_mode(ErrorMode::Continue));
        let (output, result) = output_of(&executor, "1 + 1\n5 / 0 + 1\ny\n( 1 + 2\n3 * 3");
        let summary = result.unwrap();

        assert_eq!(output, "2\n9\n");
        assert_eq!(summary.errors.len(), 3);
        assert!(matches!(summary.errors[0].root(), CalcError::DivisionByZero));
        assert!(matches!(summary.errors[1].root(), CalcError::UndefinedVariable(_)));
        assert!(matches!(summary.errors[2].root(), CalcError::ExpectedClosingParen));
        assert_eq!(summary.errors[2].line(), Some(4));
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_continue_mode_keeps_bindings() {
        let executor = Executor::new(Config::new().with_error_mode(ErrorMode::Continue));
        let (output, result) = output_of(&executor, "a = 4\nb = a / 0\n2 * a");
        let summary = result.unwrap();
        assert_eq!(output, "8\n");
        assert!(!summary.environment.contains("b"));
    }

    #[test]
    fn test_nesting_limit_from_config() {
        let executor = Executor::new(Config::new().with_max_depth(Some(1)));
        let (_, result) = output_of(&executor, "( ( 1 ) )");
        let err = result.unwrap_err();
        assert!(matches!(err.root(), CalcError::NestingTooDeep { limit: 1 }));

        let executor = Executor::new(Config::new().with_max_depth(None));
        let source = format!("{}1{}", "( ".repeat(200), " )".repeat(200));
        let (output, result) = output_of(&executor, &source);
        assert!(result.is_ok());
        assert_eq!(output, "1\n");
    }

    #[test]
    fn test_stray_token_reports_kind() {
        let executor = Executor::default();
        let (_, result) = output_of(&executor, "4 )");
        let err = result.unwrap_err();
        assert!(matches!(err.root(), CalcError::UnexpectedToken(TokenKind::RParen)));
    }

    #[test]
    fn test_run_with_environment() {
        let executor = Executor::default();
        let mut env = Environment::new();
        env.set("n", 6);
        let mut out = Vec::new();
        executor.run_with_environment("n * 7", env, &mut out).unwrap();
        assert_eq!(out, b"42\n");
    }

    #[test]
    fn test_run_program() {
        let executor = Executor::default();
        let program = Program::from_source("inline", "x = 2\n(x * x) + 1");
        let mut out = Vec::new();
        let summary = executor.run_program(&program, &mut out).unwrap();
        assert_eq!(out, b"5\n");
        assert_eq!(summary.statements, 2);
    }
}
