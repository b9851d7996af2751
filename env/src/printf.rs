//
// Copyright (c) 2024 envkit contributors
//
// This file is part of the envkit project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Supported: d i u o x X c s f F e E g G and %%, with the - + space # 0 flags,
// a decimal field width and a decimal precision. No `*` width, no length
// modifiers.
//

use std::borrow::Cow;

use crate::error::{Error, Result};

/// Formatted strings of this many bytes or more are rejected.
pub const MAX_FORMATTED: usize = 10240;

// largest precision std's float formatting accepts
const MAX_PRECISION: usize = u16::MAX as usize;

/// One argument for a printf-style conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Str(&'a str),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Arg::Str(value.as_str())
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($source:ty),*) => {
        $(
            impl From<$source> for Arg<'_> {
                fn from(value: $source) -> Self {
                    Arg::$variant(value as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64, u8, u16, u32, u64, usize);
impl_from_int!(Float, f64, f32, f64);

impl Arg<'_> {
    fn as_int(&self) -> i64 {
        match *self {
            Arg::Int(n) => n,
            Arg::Uint(n) => n as i64,
            Arg::Float(f) => f as i64,
            Arg::Char(c) => c as i64,
            Arg::Str(s) => parse_numeric(s, "integer"),
        }
    }

    fn as_uint(&self) -> u64 {
        match *self {
            Arg::Int(n) => n as u64,
            Arg::Uint(n) => n,
            Arg::Float(f) => f as u64,
            Arg::Char(c) => c as u64,
            Arg::Str(s) => {
                let s = s.trim();
                if s.starts_with('-') {
                    parse_numeric::<i64>(s, "integer") as u64
                } else {
                    parse_numeric(s, "unsigned integer")
                }
            }
        }
    }

    fn as_float(&self) -> f64 {
        match *self {
            Arg::Int(n) => n as f64,
            Arg::Uint(n) => n as f64,
            Arg::Float(f) => f,
            Arg::Char(c) => c as u32 as f64,
            Arg::Str(s) => parse_numeric(s, "floating point number"),
        }
    }

    fn as_char(&self) -> Option<char> {
        match *self {
            Arg::Char(c) => Some(c),
            Arg::Int(n) => u32::try_from(n).ok().and_then(char::from_u32),
            Arg::Uint(n) => u32::try_from(n).ok().and_then(char::from_u32),
            Arg::Float(_) => None,
            Arg::Str(s) => s.chars().next(),
        }
    }

    fn as_text(&self) -> Cow<'_, str> {
        match *self {
            Arg::Str(s) => Cow::Borrowed(s),
            Arg::Int(n) => Cow::Owned(n.to_string()),
            Arg::Uint(n) => Cow::Owned(n.to_string()),
            Arg::Float(f) => Cow::Owned(f.to_string()),
            Arg::Char(c) => Cow::Owned(c.to_string()),
        }
    }
}

// empty text is zero, anything unparsable is zero with a warning
fn parse_numeric<T: std::str::FromStr + Default>(text: &str, what: &str) -> T {
    let text = text.trim();
    if text.is_empty() {
        return T::default();
    }
    match text.parse::<T>() {
        Ok(n) => n,
        Err(_) => {
            log::warn!("format: invalid {what}: {text}");
            T::default()
        }
    }
}

// a printf conversion specifier
#[derive(Debug, Clone, Default, PartialEq)]
struct ConvSpec {
    spec: char,
    width: Option<usize>,
    precision: Option<usize>,
    left_justify: bool,
    sign: bool,
    space: bool,
    alt_form: bool,
    zero_pad: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Conversion(ConvSpec),
    Literal(String),
}

enum ParseState {
    Literal,
    Flags,
    Width,
    Precision,
    PrecisionValue,
    Specifier,
}

const CONVERSIONS: &str = "diuoxXcsfFeEgG";

fn parse_number(digits: &str) -> Result<usize> {
    digits
        .parse()
        .map_err(|_| Error::Format(format!("field size '{digits}' is out of range")))
}

fn tokenize_format_str(format: &str) -> Result<Vec<Token>> {
    let mut conv_spec = ConvSpec::default();
    let mut literal = String::with_capacity(format.len());
    let mut precision = String::new();
    let mut state = ParseState::Literal;
    let mut tokens = Vec::<Token>::new();
    let mut width = String::new();

    for current_char in format.chars() {
        let mut done_with_char = false;

        while !done_with_char {
            match state {
                ParseState::Literal => {
                    if current_char == '%' {
                        state = ParseState::Flags;
                    } else {
                        literal.push(current_char);
                    }

                    done_with_char = true;
                }
                ParseState::Flags => {
                    match current_char {
                        '%' if conv_spec == ConvSpec::default() => {
                            literal.push('%');
                            state = ParseState::Literal;
                        }
                        '-' => conv_spec.left_justify = true,
                        '+' => conv_spec.sign = true,
                        ' ' => conv_spec.space = true,
                        '#' => conv_spec.alt_form = true,
                        '0' => conv_spec.zero_pad = true,
                        _ => {
                            state = ParseState::Width;

                            continue;
                        }
                    }

                    done_with_char = true;
                }
                ParseState::Width => {
                    if current_char.is_ascii_digit() {
                        width.push(current_char);

                        done_with_char = true;
                    } else {
                        if !width.is_empty() {
                            conv_spec.width = Some(parse_number(&width)?);

                            width.clear();
                        }

                        state = ParseState::Precision;
                    }
                }
                ParseState::Precision => {
                    if current_char == '.' {
                        state = ParseState::PrecisionValue;

                        done_with_char = true;
                    } else {
                        state = ParseState::Specifier;
                    }
                }
                ParseState::PrecisionValue => {
                    if current_char.is_ascii_digit() {
                        precision.push(current_char);

                        done_with_char = true;
                    } else {
                        // "%.f" means a precision of zero
                        conv_spec.precision = Some(if precision.is_empty() {
                            0
                        } else {
                            parse_number(&precision)?
                        });

                        precision.clear();

                        state = ParseState::Specifier;
                    }
                }
                ParseState::Specifier => {
                    if !CONVERSIONS.contains(current_char) {
                        return Err(Error::Format(format!(
                            "unknown conversion specifier '{current_char}'"
                        )));
                    }

                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }

                    conv_spec.spec = current_char;

                    tokens.push(Token::Conversion(std::mem::take(&mut conv_spec)));

                    state = ParseState::Literal;

                    done_with_char = true;
                }
            }
        }
    }

    if !matches!(state, ParseState::Literal) {
        return Err(Error::Format(String::from(
            "incomplete conversion specifier at end of format",
        )));
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    Ok(tokens)
}

// Pads `body` (already carrying any precision digits) out to the field width.
// `prefix` is the sign or radix prefix, kept in front of zero padding.
fn pad_field(conv: &ConvSpec, prefix: &str, body: &str, zero_ok: bool) -> String {
    let len = prefix.chars().count() + body.chars().count();
    let width = conv.width.unwrap_or(0);
    if width <= len {
        return format!("{prefix}{body}");
    }

    let fill = width - len;
    let mut output = String::with_capacity(width);
    if conv.left_justify {
        output.push_str(prefix);
        output.push_str(body);
        output.extend(std::iter::repeat(' ').take(fill));
    } else if conv.zero_pad && zero_ok {
        output.push_str(prefix);
        output.extend(std::iter::repeat('0').take(fill));
        output.push_str(body);
    } else {
        output.extend(std::iter::repeat(' ').take(fill));
        output.push_str(prefix);
        output.push_str(body);
    }
    output
}

fn sign_prefix(conv: &ConvSpec, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if conv.sign {
        "+"
    } else if conv.space {
        " "
    } else {
        ""
    }
}

// applies an integer precision: minimum digit count, and "" for zero at .0
fn with_min_digits(conv: &ConvSpec, digits: String) -> String {
    match conv.precision {
        Some(0) if digits == "0" => String::new(),
        Some(p) if digits.len() < p => format!("{}{digits}", "0".repeat(p - digits.len())),
        _ => digits,
    }
}

fn format_arg_int(conv: &ConvSpec, arg: &Arg) -> String {
    let n = arg.as_int();
    let digits = with_min_digits(conv, n.unsigned_abs().to_string());
    let zero_ok = conv.precision.is_none();
    pad_field(conv, sign_prefix(conv, n < 0), &digits, zero_ok)
}

fn format_arg_uint_base(conv: &ConvSpec, arg: &Arg) -> String {
    let n = arg.as_uint();
    let (prefix, digits) = match conv.spec {
        'o' => {
            let mut digits = with_min_digits(conv, format!("{n:o}"));
            if conv.alt_form && !digits.starts_with('0') {
                digits.insert(0, '0');
            }
            ("", digits)
        }
        'x' => {
            let prefix = if conv.alt_form && n != 0 { "0x" } else { "" };
            (prefix, with_min_digits(conv, format!("{n:x}")))
        }
        'X' => {
            let prefix = if conv.alt_form && n != 0 { "0X" } else { "" };
            (prefix, with_min_digits(conv, format!("{n:X}")))
        }
        _ => ("", with_min_digits(conv, n.to_string())),
    };
    pad_field(conv, prefix, &digits, conv.precision.is_none())
}

fn format_arg_char(conv: &ConvSpec, arg: &Arg) -> String {
    let body = arg.as_char().map(String::from).unwrap_or_default();
    pad_field(conv, "", &body, false)
}

fn format_arg_string(conv: &ConvSpec, arg: &Arg) -> String {
    let text = arg.as_text();
    let body: Cow<str> = match conv.precision {
        Some(p) => text.chars().take(p).collect::<String>().into(),
        None => text,
    };
    pad_field(conv, "", &body, false)
}

// "1.5e2" from Rust becomes "1.5e+02" as C writes it
fn exponent_form(v: f64, precision: usize, upper: bool, alt_form: bool) -> String {
    let rust_form = format!("{v:.precision$e}");
    let (mantissa, exponent) = rust_form.split_once('e').unwrap_or((&rust_form, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let mut output = String::from(mantissa);
    if alt_form && precision == 0 {
        output.push('.');
    }
    output.push(if upper { 'E' } else { 'e' });
    output.push(if exponent < 0 { '-' } else { '+' });
    output.push_str(&format!("{:02}", exponent.unsigned_abs()));
    output
}

fn fixed_form(v: f64, precision: usize, alt_form: bool) -> String {
    let mut output = format!("{v:.precision$}");
    if alt_form && precision == 0 {
        output.push('.');
    }
    output
}

fn strip_trailing_zeros(number: &str) -> String {
    let (mantissa, exponent) = match number.find(['e', 'E']) {
        Some(pos) => number.split_at(pos),
        None => (number, ""),
    };
    if !mantissa.contains('.') {
        return number.to_string();
    }
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{mantissa}{exponent}")
}

fn general_form(v: f64, precision: usize, upper: bool, alt_form: bool) -> String {
    let p = precision.max(1);
    let exponent = if v == 0.0 {
        0
    } else {
        let probe = format!("{v:.prec$e}", prec = p - 1);
        probe
            .split_once('e')
            .and_then(|(_, exp)| exp.parse::<i64>().ok())
            .unwrap_or(0)
    };

    let output = if exponent < -4 || exponent >= p as i64 {
        exponent_form(v, p - 1, upper, alt_form)
    } else {
        fixed_form(v, (p as i64 - 1 - exponent) as usize, alt_form)
    };

    if alt_form {
        output
    } else {
        strip_trailing_zeros(&output)
    }
}

fn format_arg_float(conv: &ConvSpec, arg: &Arg) -> String {
    let v = arg.as_float();
    let upper = conv.spec.is_ascii_uppercase();
    let negative = v.is_sign_negative() && !v.is_nan();
    let prefix = sign_prefix(conv, negative);

    if !v.is_finite() {
        let body = match (v.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        return pad_field(conv, prefix, body, false);
    }

    let v = v.abs();
    let precision = conv.precision.unwrap_or(6);
    let body = match conv.spec {
        'e' | 'E' => exponent_form(v, precision, upper, conv.alt_form),
        'g' | 'G' => general_form(v, precision, upper, conv.alt_form),
        _ => fixed_form(v, precision, conv.alt_form),
    };
    pad_field(conv, prefix, &body, true)
}

fn format_arg(conv: &ConvSpec, arg: &Arg) -> String {
    match conv.spec {
        'd' | 'i' => format_arg_int(conv, arg),
        'u' | 'o' | 'x' | 'X' => format_arg_uint_base(conv, arg),
        'c' => format_arg_char(conv, arg),
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => format_arg_float(conv, arg),
        _ => format_arg_string(conv, arg),
    }
}

/// printf-style formatter with an upper bound on the result size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatter {
    limit: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            limit: MAX_FORMATTED,
        }
    }
}

impl Formatter {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Expands `template` with `args`.
    ///
    /// Missing arguments format as empty or zero; surplus arguments are
    /// ignored. Fails on an unknown conversion or when the result would be
    /// `limit` bytes or larger.
    pub fn format(&self, template: &str, args: &[Arg]) -> Result<String> {
        let tokens = tokenize_format_str(template)?;
        let mut arguments = args.iter();
        let mut output = String::with_capacity(template.len() * 2);

        for token in tokens {
            match token {
                Token::Literal(text) => output.push_str(&text),
                Token::Conversion(conv) => {
                    if conv.width.is_some_and(|w| w >= self.limit) {
                        return Err(Error::FormatOverflow { limit: self.limit });
                    }
                    // %s precision only truncates
                    if conv.spec != 's'
                        && conv
                            .precision
                            .is_some_and(|p| p >= self.limit.min(MAX_PRECISION))
                    {
                        return Err(Error::FormatOverflow { limit: self.limit });
                    }
                    let arg = arguments.next().copied().unwrap_or_else(|| {
                        log::warn!("format: missing argument for %{}", conv.spec);
                        Arg::Str("")
                    });
                    output.push_str(&format_arg(&conv, &arg));
                }
            }

            if output.len() >= self.limit {
                return Err(Error::FormatOverflow { limit: self.limit });
            }
        }

        Ok(output)
    }
}

/// Formats with the default [`MAX_FORMATTED`] bound.
pub fn format(template: &str, args: &[Arg]) -> Result<String> {
    Formatter::default().format(template, args)
}

/// `envfmt!("%s has %d items", name, count)` is
/// `format("%s has %d items", &[Arg::from(name), Arg::from(count)])`.
#[macro_export]
macro_rules! envfmt {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format($template, &[$($crate::Arg::from($arg)),*])
    };
}
