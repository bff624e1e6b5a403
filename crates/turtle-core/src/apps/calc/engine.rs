//! Single-pending-operation calculator.
//!
//! Operators apply strictly left to right: pressing a second operator first
//! resolves the pending one, so `2 + 3 * 4 =` yields 20.

use core::fmt;

/// Text shown after a failed computation.
pub const ERROR: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// `None` on division by zero.
    fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            Operator::Add => Some(lhs + rhs),
            Operator::Subtract => Some(lhs - rhs),
            Operator::Multiply => Some(lhs * rhs),
            Operator::Divide if rhs == 0.0 => None,
            Operator::Divide => Some(lhs / rhs),
        }
    }
}

/// One calculator key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcKey {
    Digit(u8),
    Point,
    Clear,
    Negate,
    Percent,
    Op(Operator),
    Equals,
}

impl CalcKey {
    /// Map a typed or labelled character to its key.
    pub fn from_char(c: char) -> Option<Self> {
        let key = match c {
            '0'..='9' => CalcKey::Digit(c as u8 - b'0'),
            '.' => CalcKey::Point,
            'C' | 'c' => CalcKey::Clear,
            '±' => CalcKey::Negate,
            '%' => CalcKey::Percent,
            '+' => CalcKey::Op(Operator::Add),
            '-' => CalcKey::Op(Operator::Subtract),
            '*' => CalcKey::Op(Operator::Multiply),
            '/' => CalcKey::Op(Operator::Divide),
            '=' => CalcKey::Equals,
            _ => return None,
        };
        Some(key)
    }

    pub fn label(self) -> char {
        match self {
            CalcKey::Digit(d) => char::from(b'0' + d.min(9)),
            CalcKey::Point => '.',
            CalcKey::Clear => 'C',
            CalcKey::Negate => '±',
            CalcKey::Percent => '%',
            CalcKey::Op(op) => op.symbol(),
            CalcKey::Equals => '=',
        }
    }
}

impl fmt::Display for CalcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Calculator display and pending operation.
///
/// `display` always parses as a number or reads [`ERROR`]. The left operand
/// and the operator only ever exist together.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcState {
    display: String,
    expression: String,
    pending: Option<(f64, Operator)>,
    needs_clear: bool,
}

impl Default for CalcState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            expression: String::new(),
            pending: None,
            needs_clear: false,
        }
    }
}

impl CalcState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Preview of the pending operation, e.g. `"12 +"`.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn pending_operand(&self) -> Option<f64> {
        self.pending.map(|(operand, _)| operand)
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.map(|(_, op)| op)
    }

    pub fn needs_clear(&self) -> bool {
        self.needs_clear
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Feed every character of `input` that maps to a key.
    pub fn input_str(&mut self, input: &str) {
        for key in input.chars().filter_map(CalcKey::from_char) {
            self.input(key);
        }
    }

    pub fn input(&mut self, key: CalcKey) {
        match key {
            CalcKey::Clear => self.clear_all(),
            CalcKey::Negate => self.negate(),
            CalcKey::Percent => self.percent(),
            CalcKey::Op(op) => self.operator(op),
            CalcKey::Equals => {
                self.resolve();
                self.expression.clear();
                self.pending = None;
                self.needs_clear = true;
            }
            CalcKey::Digit(d) => self.push_char(char::from(b'0' + d.min(9))),
            CalcKey::Point => self.push_char('.'),
        }
    }

    fn value(&self) -> Option<f64> {
        self.display.parse().ok()
    }

    fn negate(&mut self) {
        if self.display == "0" || self.is_error() {
            return;
        }
        match self.display.strip_prefix('-') {
            Some(rest) => self.display = rest.to_string(),
            None => self.display.insert(0, '-'),
        }
    }

    fn percent(&mut self) {
        self.display = match self.value() {
            Some(v) => format_number(v / 100.0),
            None => ERROR.to_string(),
        };
        self.needs_clear = true;
    }

    fn operator(&mut self, op: Operator) {
        if self.is_error() {
            return;
        }
        if self.pending.is_some() && !self.needs_clear {
            self.resolve();
        }
        let Some(operand) = self.value() else {
            // The chained resolution failed; drop the pending operation.
            self.pending = None;
            self.expression.clear();
            self.needs_clear = true;
            return;
        };
        self.pending = Some((operand, op));
        self.expression = format!("{} {}", format_number(operand), op.symbol());
        self.needs_clear = true;
    }

    /// Apply the pending operation with the display as right operand.
    fn resolve(&mut self) {
        let Some((lhs, op)) = self.pending else {
            return;
        };
        self.display = match self.value().and_then(|rhs| op.apply(lhs, rhs)) {
            Some(result) => format_number(result),
            None => ERROR.to_string(),
        };
    }

    fn push_char(&mut self, c: char) {
        if self.needs_clear {
            self.display.clear();
            self.needs_clear = false;
        }

        if c == '.' {
            if !self.display.contains('.') {
                if self.display.is_empty() || self.is_error() {
                    self.display = "0.".to_string();
                } else {
                    self.display.push('.');
                }
            }
            return;
        }

        if self.display == "0" || self.is_error() {
            self.display = c.to_string();
        } else {
            self.display.push(c);
        }
    }
}

/// Integral values print without a decimal point; anything else is rounded
/// to 8 decimal places with trailing zeros removed.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value}");
    }
    let rounded = (value * 1e8).round() / 1e8;
    let text = format!("{rounded}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> CalcState {
        let mut calc = CalcState::new();
        calc.input_str(input);
        calc
    }

    #[test]
    fn test_left_to_right_evaluation() {
        let mut calc = CalcState::new();
        calc.input_str("2+3*");
        assert_eq!(calc.display(), "5");
        assert_eq!(calc.expression(), "5 *");
        calc.input_str("4=");
        assert_eq!(calc.display(), "20");
        assert_eq!(calc.expression(), "");
        assert_eq!(calc.pending_operator(), None);
    }

    #[test]
    fn test_division_by_zero_then_clear() {
        let mut calc = run("5/0=");
        assert_eq!(calc.display(), ERROR);
        assert!(calc.pending_operand().is_none());
        calc.input(CalcKey::Clear);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(run("10/4=").display(), "2.5");
        assert_eq!(run("9/3=").display(), "3");
        assert_eq!(run("1/3=").display(), "0.33333333");
        assert_eq!(run(".1+.2=").display(), "0.3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-12.0), "-12");
    }

    #[test]
    fn test_digit_entry_rules() {
        assert_eq!(run("007").display(), "7");
        assert_eq!(run("1.2.3").display(), "1.23");
        assert_eq!(run(".5").display(), "0.5");
        // A digit after `=` starts a new number
        assert_eq!(run("2+2=7").display(), "7");
    }

    #[test]
    fn test_negate_is_textual() {
        let mut calc = run("12");
        calc.input(CalcKey::Negate);
        assert_eq!(calc.display(), "-12");
        calc.input(CalcKey::Negate);
        assert_eq!(calc.display(), "12");

        let mut zero = CalcState::new();
        zero.input(CalcKey::Negate);
        assert_eq!(zero.display(), "0");
    }

    #[test]
    fn test_percent_keeps_pending_operator() {
        let mut calc = run("50+10%");
        assert_eq!(calc.display(), "0.1");
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        assert!(calc.needs_clear());
        calc.input(CalcKey::Equals);
        assert_eq!(calc.display(), "50.1");
    }

    #[test]
    fn test_operator_ignored_on_error() {
        let mut calc = run("5/0=");
        calc.input(CalcKey::Op(Operator::Add));
        assert_eq!(calc.display(), ERROR);
        assert!(calc.pending_operator().is_none());
        // Typing recovers
        calc.input(CalcKey::Digit(4));
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn test_chained_division_by_zero_drops_pending() {
        let calc = run("5/0+");
        assert_eq!(calc.display(), ERROR);
        assert!(calc.pending_operand().is_none());
        assert_eq!(calc.pending_operand().is_some(), calc.pending_operator().is_some());
    }

    #[test]
    fn test_repeated_operator_replaces_pending() {
        let calc = run("6+*");
        assert_eq!(calc.pending_operator(), Some(Operator::Multiply));
        assert_eq!(calc.expression(), "6 *");
        assert_eq!(calc.display(), "6");
    }
}
