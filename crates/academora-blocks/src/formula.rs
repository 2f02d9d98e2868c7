//! Calculator formula evaluation
//!
//! Formulas are arithmetic expressions over field ids:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | ident | '(' expr ')'
//! ident  := [A-Za-z_][A-Za-z0-9_]* | '{' [^}]+ '}'
//! ```
//!
//! The braced form references ids that are not plain identifiers, such as
//! the positional `{field-1}`. Unary signs and parentheses nest at most
//! [`MAX_DEPTH`] levels.

use std::collections::HashMap;

use thiserror::Error;

/// Deepest allowed nesting of unary signs and parentheses
pub const MAX_DEPTH: usize = 64;

/// Formula evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
	/// Character that starts no token
	#[error("Unexpected character '{0}' at offset {1}")]
	UnexpectedChar(char, usize),

	/// Input ended where an operand was expected
	#[error("Unexpected end of formula")]
	UnexpectedEnd,

	/// Token in a position where it is not allowed
	#[error("Unexpected token '{0}'")]
	UnexpectedToken(String),

	/// Identifier that names no field
	#[error("Unknown variable: {0}")]
	UnknownVariable(String),

	/// Division with a zero divisor
	#[error("Division by zero")]
	DivisionByZero,

	/// Unary signs or parentheses nest deeper than [`MAX_DEPTH`]
	#[error("Formula nests deeper than {0} levels")]
	TooDeep(usize),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
	Number(f64),
	Ident(String),
	Plus,
	Minus,
	Star,
	Slash,
	LParen,
	RParen,
}

impl Token {
	fn describe(&self) -> String {
		match self {
			Token::Number(n) => n.to_string(),
			Token::Ident(name) => name.clone(),
			Token::Plus => "+".to_string(),
			Token::Minus => "-".to_string(),
			Token::Star => "*".to_string(),
			Token::Slash => "/".to_string(),
			Token::LParen => "(".to_string(),
			Token::RParen => ")".to_string(),
		}
	}
}

fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
	let mut tokens = Vec::new();
	let mut chars = input.char_indices().peekable();

	while let Some(&(offset, c)) = chars.peek() {
		match c {
			c if c.is_whitespace() => {
				chars.next();
			}
			'0'..='9' | '.' => {
				let mut literal = String::new();
				while let Some(&(_, d)) = chars.peek() {
					if d.is_ascii_digit() || d == '.' {
						literal.push(d);
						chars.next();
					} else {
						break;
					}
				}
				let value = literal
					.parse::<f64>()
					.map_err(|_| FormulaError::UnexpectedToken(literal.clone()))?;
				tokens.push(Token::Number(value));
			}
			c if c.is_ascii_alphabetic() || c == '_' => {
				let mut name = String::new();
				while let Some(&(_, d)) = chars.peek() {
					if d.is_ascii_alphanumeric() || d == '_' {
						name.push(d);
						chars.next();
					} else {
						break;
					}
				}
				tokens.push(Token::Ident(name));
			}
			'{' => {
				chars.next();
				let mut name = String::new();
				loop {
					match chars.next() {
						Some((_, '}')) => break,
						Some((_, d)) => name.push(d),
						None => return Err(FormulaError::UnexpectedEnd),
					}
				}
				let name = name.trim().to_string();
				if name.is_empty() {
					return Err(FormulaError::UnexpectedToken("{}".to_string()));
				}
				tokens.push(Token::Ident(name));
			}
			_ => {
				let token = match c {
					'+' => Token::Plus,
					'-' => Token::Minus,
					'*' => Token::Star,
					'/' => Token::Slash,
					'(' => Token::LParen,
					')' => Token::RParen,
					other => return Err(FormulaError::UnexpectedChar(other, offset)),
				};
				tokens.push(token);
				chars.next();
			}
		}
	}

	Ok(tokens)
}

struct Parser<'a> {
	tokens: Vec<Token>,
	position: usize,
	depth: usize,
	variables: &'a HashMap<String, f64>,
}

impl Parser<'_> {
	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.position)
	}

	fn advance(&mut self) -> Option<Token> {
		let token = self.tokens.get(self.position).cloned();
		self.position += 1;
		token
	}

	fn nested<F>(&mut self, parse: F) -> Result<f64, FormulaError>
	where
		F: FnOnce(&mut Self) -> Result<f64, FormulaError>,
	{
		if self.depth >= MAX_DEPTH {
			return Err(FormulaError::TooDeep(MAX_DEPTH));
		}
		self.depth += 1;
		let value = parse(self);
		self.depth -= 1;
		value
	}

	fn expr(&mut self) -> Result<f64, FormulaError> {
		let mut value = self.term()?;
		loop {
			match self.peek() {
				Some(Token::Plus) => {
					self.advance();
					value += self.term()?;
				}
				Some(Token::Minus) => {
					self.advance();
					value -= self.term()?;
				}
				_ => return Ok(value),
			}
		}
	}

	fn term(&mut self) -> Result<f64, FormulaError> {
		let mut value = self.factor()?;
		loop {
			match self.peek() {
				Some(Token::Star) => {
					self.advance();
					value *= self.factor()?;
				}
				Some(Token::Slash) => {
					self.advance();
					let divisor = self.factor()?;
					if divisor == 0.0 {
						return Err(FormulaError::DivisionByZero);
					}
					value /= divisor;
				}
				_ => return Ok(value),
			}
		}
	}

	fn factor(&mut self) -> Result<f64, FormulaError> {
		match self.advance() {
			Some(Token::Minus) => self.nested(Self::factor).map(|value| -value),
			Some(Token::Plus) => self.nested(Self::factor),
			Some(Token::Number(value)) => Ok(value),
			Some(Token::Ident(name)) => self
				.variables
				.get(&name)
				.copied()
				.ok_or(FormulaError::UnknownVariable(name)),
			Some(Token::LParen) => self.nested(|parser| {
				let value = parser.expr()?;
				match parser.advance() {
					Some(Token::RParen) => Ok(value),
					Some(other) => Err(FormulaError::UnexpectedToken(other.describe())),
					None => Err(FormulaError::UnexpectedEnd),
				}
			}),
			Some(other) => Err(FormulaError::UnexpectedToken(other.describe())),
			None => Err(FormulaError::UnexpectedEnd),
		}
	}
}

/// Evaluates `formula` with the given variable bindings.
pub fn evaluate(formula: &str, variables: &HashMap<String, f64>) -> Result<f64, FormulaError> {
	let mut parser = Parser {
		tokens: tokenize(formula)?,
		position: 0,
		depth: 0,
		variables,
	};
	let value = parser.expr()?;
	match parser.advance() {
		None => Ok(value),
		Some(token) => Err(FormulaError::UnexpectedToken(token.describe())),
	}
}

/// Evaluates `formula`, mapping every error and non-finite result to `0`.
pub fn evaluate_or_zero(formula: &str, variables: &HashMap<String, f64>) -> f64 {
	match evaluate(formula, variables) {
		Ok(value) if value.is_finite() => value,
		Ok(_) => 0.0,
		Err(error) => {
			tracing::debug!(formula, %error, "Formula evaluated to zero");
			0.0
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn vars() -> HashMap<String, f64> {
		HashMap::from([
			("tuition".to_string(), 20000.0),
			("years".to_string(), 4.0),
			("zero".to_string(), 0.0),
			("field-1".to_string(), 3.0),
		])
	}

	#[rstest]
	#[case("tuition * years", 80000.0)]
	#[case("1 + 2 * 3", 7.0)]
	#[case("(1 + 2) * 3", 9.0)]
	#[case("10 - 4 - 3", 3.0)]
	#[case("12 / 4 / 3", 1.0)]
	#[case("-years + 10", 6.0)]
	#[case("-(1 + 1) * --2", -4.0)]
	#[case("  2.5*2 ", 5.0)]
	#[case("tuition / years + 0.5", 5000.5)]
	#[case("{field-1} * 2", 6.0)]
	fn test_evaluate(#[case] formula: &str, #[case] expected: f64) {
		assert_eq!(evaluate(formula, &vars()).unwrap(), expected);
	}

	#[rstest]
	#[case("years / zero", FormulaError::DivisionByZero)]
	#[case("rent * 2", FormulaError::UnknownVariable("rent".to_string()))]
	#[case("1 +", FormulaError::UnexpectedEnd)]
	#[case("(1 + 2", FormulaError::UnexpectedEnd)]
	#[case("1 2", FormulaError::UnexpectedToken("2".to_string()))]
	#[case("1 $ 2", FormulaError::UnexpectedChar('$', 2))]
	#[case("1..2", FormulaError::UnexpectedToken("1..2".to_string()))]
	#[case("", FormulaError::UnexpectedEnd)]
	#[case("{field-1", FormulaError::UnexpectedEnd)]
	#[case("{ } + 1", FormulaError::UnexpectedToken("{}".to_string()))]
	fn test_evaluate_errors(#[case] formula: &str, #[case] expected: FormulaError) {
		assert_eq!(evaluate(formula, &vars()).unwrap_err(), expected);
	}

	#[rstest]
	#[case("years / zero")]
	#[case("unknown")]
	#[case("((")]
	fn test_evaluate_or_zero(#[case] formula: &str) {
		assert_eq!(evaluate_or_zero(formula, &vars()), 0.0);
	}

	#[rstest]
	#[case(format!("{}1", "-".repeat(100_000)))]
	#[case(format!("{}1", "+".repeat(100_000)))]
	#[case("(".repeat(100_000))]
	#[case(format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000)))]
	fn test_deep_nesting_is_rejected(#[case] formula: String) {
		assert_eq!(
			evaluate(&formula, &vars()).unwrap_err(),
			FormulaError::TooDeep(MAX_DEPTH)
		);
		assert_eq!(evaluate_or_zero(&formula, &vars()), 0.0);
	}

	#[rstest]
	fn test_nesting_up_to_limit_evaluates() {
		// Arrange
		let parens = format!("{}2{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
		let signs = format!("{}2", "-".repeat(MAX_DEPTH));

		// Act / Assert
		assert_eq!(evaluate(&parens, &vars()).unwrap(), 2.0);
		assert_eq!(evaluate(&signs, &vars()).unwrap(), 2.0);
	}
}
