// Copyright 2017 Dmytro Milinevskyi <dmilinevskyi@gmail.com>

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Positional printf-style formatting.
//!
//! The template is scanned left to right and every directive consumes
//! the next argument:
//!
//! ```ignore
//! %[flags][width][.precision]verb
//! ```
//!
//! Supported flags are `-` (left align), `+` (always print the sign),
//! ` ` (space for the sign), `0` (zero padding) and `#` (radix prefix).
//!
//! | verb              | arguments                                      |
//! |-------------------|------------------------------------------------|
//! | `%v`              | any value in its natural form                  |
//! | `%s`, `%q`        | strings, chars, `Display` values (`%q` quoted) |
//! | `%d`              | integers, chars (code point)                   |
//! | `%b` `%o` `%x` `%X` | integers; `%x`/`%X` also hex-dump strings    |
//! | `%c`              | chars, integers (as code points)               |
//! | `%t`              | booleans                                       |
//! | `%e` `%E` `%f` `%F` `%g` `%G` | floats                             |
//! | `%%`              | literal percent, consumes nothing              |
//!
//! Mismatches never fail, they are rendered inline instead:
//!
//! ```
//! use levlog::printf::{sprintf, Value};
//!
//! assert_eq!(sprintf("%d", &[]), "%!d(MISSING)");
//! assert_eq!(sprintf("%d", &[Value::from("x")]), "%!d(string=x)");
//! assert_eq!(sprintf("ok", &[Value::from(1)]), "ok%!(EXTRA int=1)");
//! ```
//!
//! Width and precision are limited to 1000000. A larger value is dropped
//! and `%!(BADWIDTH)` or `%!(BADPREC)` is emitted in front of the argument.

use std::fmt;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

/// Loosely typed formatting argument.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Character.
    Char(char),
    /// String slice.
    Str(&'a str),
    /// Anything printable.
    Display(&'a dyn fmt::Display),
}

impl<'a> Value<'a> {
    /// Wraps any `Display` value.
    pub fn display<T>(value: &'a T) -> Self where T: fmt::Display {
        Value::Display(value)
    }

    /// Name of the value type used in the mismatch markers.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float64",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Display(_) => "value",
        }
    }
}

macro_rules! value_from {
    ($variant:ident as $conv:ty: $($t:ty),*) => {
        $(
            impl<'a> From<$t> for Value<'a> {
                #[inline(always)]
                fn from(v: $t) -> Value<'a> {
                    Value::$variant(v as $conv)
                }
            }

            impl<'a, 'b> From<&'b $t> for Value<'a> {
                #[inline(always)]
                fn from(v: &'b $t) -> Value<'a> {
                    Value::$variant(*v as $conv)
                }
            }
        )*
    };
}

value_from!(Int as i64: i8, i16, i32, i64, isize);
value_from!(Uint as u64: u8, u16, u32, u64, usize);
value_from!(Float as f64: f32, f64);

impl<'a> From<bool> for Value<'a> {
    #[inline(always)]
    fn from(v: bool) -> Value<'a> {
        Value::Bool(v)
    }
}

impl<'a> From<char> for Value<'a> {
    #[inline(always)]
    fn from(v: char) -> Value<'a> {
        Value::Char(v)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    #[inline(always)]
    fn from(v: &'a str) -> Value<'a> {
        Value::Str(v)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    #[inline(always)]
    fn from(v: &'a String) -> Value<'a> {
        Value::Str(v.as_str())
    }
}

impl<'a> fmt::Display for Value<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
            Value::Float(v) => f.write_str(&shortest(v, false)),
            Value::Char(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
            Value::Display(v) => write!(f, "{}", v),
        }
    }
}

impl<'a> fmt::Debug for Value<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.type_name(), self)
    }
}

// Widths and precisions above this are rejected.
const MAX_WIDTH: usize = 1_000_000;

#[derive(Default, Debug)]
struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
}

fn digits(chars: &mut Peekable<Chars>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
        chars.next();
    }
    value
}

// Parses the directive that follows '%'. Returns `None` for the verb
// when the template ends prematurely.
fn directive(chars: &mut Peekable<Chars>) -> (Spec, Option<char>) {
    let mut spec = Spec::default();
    loop {
        match chars.peek() {
            Some(&'-') => spec.minus = true,
            Some(&'+') => spec.plus = true,
            Some(&' ') => spec.space = true,
            Some(&'0') => spec.zero = true,
            Some(&'#') => spec.sharp = true,
            _ => break,
        }
        chars.next();
    }
    spec.width = digits(chars);
    if spec.width.map_or(false, |w| w > MAX_WIDTH) {
        spec.width = None;
        spec.bad_width = true;
    }
    if chars.peek() == Some(&'.') {
        chars.next();
        let precision = digits(chars).unwrap_or(0);
        if precision > MAX_WIDTH {
            spec.bad_precision = true;
        } else {
            spec.precision = Some(precision);
        }
    }
    (spec, chars.next())
}

fn sign(spec: &Spec, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn pad(out: &mut String, spec: &Spec, prefix: &str, body: &str, zeros: bool) {
    let len = prefix.chars().count() + body.chars().count();
    let fill = spec.width.unwrap_or(0).saturating_sub(len);
    if spec.minus {
        out.push_str(prefix);
        out.push_str(body);
        out.extend((0..fill).map(|_| ' '));
    } else if zeros && spec.zero {
        out.push_str(prefix);
        out.extend((0..fill).map(|_| '0'));
        out.push_str(body);
    } else {
        out.extend((0..fill).map(|_| ' '));
        out.push_str(prefix);
        out.push_str(body);
    }
}

fn integer(out: &mut String, spec: &Spec, verb: char, negative: bool, magnitude: u64) {
    let mut body = match verb {
        'b' => format!("{:b}", magnitude),
        'o' => format!("{:o}", magnitude),
        'x' => format!("{:x}", magnitude),
        'X' => format!("{:X}", magnitude),
        _ => magnitude.to_string(),
    };
    if let Some(precision) = spec.precision {
        if precision == 0 && magnitude == 0 {
            body.clear();
        }
        if body.len() < precision {
            body = format!("{:0>1$}", body, precision);
        }
    }
    let mut prefix = sign(spec, negative).to_string();
    if spec.sharp {
        match verb {
            'b' => prefix.push_str("0b"),
            'o' => prefix.push('0'),
            'x' => prefix.push_str("0x"),
            'X' => prefix.push_str("0X"),
            _ => {},
        }
    }
    pad(out, spec, &prefix, &body, spec.precision.is_none());
}

fn with_exponent(mantissa: &str, exp: i32, upper: bool) -> String {
    format!("{}{}{}{:02}",
            mantissa,
            if upper { 'E' } else { 'e' },
            if exp < 0 { '-' } else { '+' },
            exp.abs())
}

// Splits Rust's `{:e}` rendering into the mantissa and the exponent.
fn split_exponent(rendered: &str) -> (&str, i32) {
    match rendered.find('e') {
        Some(pos) => (&rendered[..pos], rendered[pos + 1..].parse().unwrap_or(0)),
        None => (rendered, 0),
    }
}

fn trim_zeros(mantissa: &str) -> &str {
    if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    }
}

// Shortest representation of a non-negative finite number, switching to
// the exponent form for very small or large magnitudes.
fn shortest(v: f64, upper: bool) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v < 0.0 { "-Inf" } else { "+Inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let rendered = format!("{:e}", v);
    let (mantissa, exp) = split_exponent(&rendered);
    if exp < -4 || exp >= 6 {
        with_exponent(mantissa, exp, upper)
    } else {
        format!("{}", v)
    }
}

fn general(v: f64, precision: usize, upper: bool) -> String {
    let precision = if precision == 0 { 1 } else { precision };
    let rendered = format!("{:.*e}", precision - 1, v);
    let (mantissa, exp) = split_exponent(&rendered);
    if exp < -4 || exp >= precision as i32 {
        with_exponent(trim_zeros(mantissa), exp, upper)
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_zeros(&format!("{:.*}", decimals, v)).to_string()
    }
}

fn float(out: &mut String, spec: &Spec, verb: char, v: f64) {
    if !v.is_finite() {
        let body = if v.is_nan() {
            "NaN"
        } else {
            "Inf"
        };
        let prefix = if v.is_nan() { "" } else if v < 0.0 { "-" } else if spec.space && !spec.plus { " " } else { "+" };
        pad(out, spec, prefix, body, false);
        return;
    }

    let magnitude = v.abs();
    let upper = verb.is_uppercase();
    let body = match verb {
        'f' | 'F' => format!("{:.*}", spec.precision.unwrap_or(6), magnitude),
        'e' | 'E' => {
            let rendered = format!("{:.*e}", spec.precision.unwrap_or(6), magnitude);
            let (mantissa, exp) = split_exponent(&rendered);
            with_exponent(mantissa, exp, upper)
        },
        _ => match spec.precision {
            Some(precision) => general(magnitude, precision, upper),
            None => shortest(magnitude, upper),
        },
    };
    pad(out, spec, sign(spec, v.is_sign_negative()), &body, true);
}

fn string(out: &mut String, spec: &Spec, s: &str) {
    match spec.precision {
        Some(precision) => {
            let truncated: String = s.chars().take(precision).collect();
            pad(out, spec, "", &truncated, false);
        },
        None => pad(out, spec, "", s, false),
    }
}

fn hex_dump(out: &mut String, spec: &Spec, verb: char, s: &str) {
    let mut body = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        if verb == 'X' {
            let _ = write!(body, "{:02X}", b);
        } else {
            let _ = write!(body, "{:02x}", b);
        }
    }
    pad(out, spec, "", &body, false);
}

fn bad_verb(out: &mut String, verb: char, arg: &Value) {
    let _ = write!(out, "%!{}({:?})", verb, arg);
}

fn format_arg(out: &mut String, spec: &Spec, verb: char, arg: &Value) {
    match (verb, *arg) {
        ('v', Value::Int(v)) | ('d', Value::Int(v)) => integer(out, spec, 'd', v < 0, v.unsigned_abs()),
        ('v', Value::Uint(v)) | ('d', Value::Uint(v)) => integer(out, spec, 'd', false, v),
        ('v', Value::Float(v)) => float(out, spec, 'g', v),
        ('v', Value::Bool(v)) | ('t', Value::Bool(v)) => pad(out, spec, "", if v { "true" } else { "false" }, false),
        ('v', Value::Char(c)) | ('s', Value::Char(c)) | ('c', Value::Char(c)) => {
            let mut buf = [0u8; 4];
            pad(out, spec, "", c.encode_utf8(&mut buf), false);
        },
        ('v', Value::Str(s)) | ('s', Value::Str(s)) => string(out, spec, s),
        ('v', Value::Display(d)) | ('s', Value::Display(d)) => string(out, spec, &d.to_string()),

        ('q', Value::Str(s)) => string(out, spec, &format!("{:?}", s)),
        ('q', Value::Display(d)) => string(out, spec, &format!("{:?}", d.to_string())),
        ('q', Value::Char(c)) => string(out, spec, &format!("{:?}", c)),

        ('d', Value::Char(c)) => integer(out, spec, 'd', false, c as u64),
        ('b', Value::Int(v)) | ('o', Value::Int(v)) | ('x', Value::Int(v)) | ('X', Value::Int(v)) =>
            integer(out, spec, verb, v < 0, v.unsigned_abs()),
        ('b', Value::Uint(v)) | ('o', Value::Uint(v)) | ('x', Value::Uint(v)) | ('X', Value::Uint(v)) =>
            integer(out, spec, verb, false, v),
        ('x', Value::Str(s)) | ('X', Value::Str(s)) => hex_dump(out, spec, verb, s),
        ('x', Value::Display(d)) | ('X', Value::Display(d)) => hex_dump(out, spec, verb, &d.to_string()),

        ('c', Value::Int(v)) => {
            let c = if v < 0 { None } else { ::std::char::from_u32(v as u32) };
            format_arg(out, spec, 'c', &Value::Char(c.unwrap_or('\u{FFFD}')));
        },
        ('c', Value::Uint(v)) => {
            let c = if v > ::std::u32::MAX as u64 { None } else { ::std::char::from_u32(v as u32) };
            format_arg(out, spec, 'c', &Value::Char(c.unwrap_or('\u{FFFD}')));
        },

        ('e', Value::Float(v)) | ('E', Value::Float(v)) |
        ('f', Value::Float(v)) | ('F', Value::Float(v)) |
        ('g', Value::Float(v)) | ('G', Value::Float(v)) => float(out, spec, verb, v),

        _ => bad_verb(out, verb, arg),
    }
}

/// Formats `template` with `args` into `out`.
pub fn format_into(out: &mut String, template: &str, args: &[Value]) {
    let mut chars = template.chars().peekable();
    let mut argn = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let (spec, verb) = directive(&mut chars);
        let verb = match verb {
            Some(verb) => verb,
            None => {
                out.push_str("%!(NOVERB)");
                break;
            },
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        if spec.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if spec.bad_precision {
            out.push_str("%!(BADPREC)");
        }

        match args.get(argn) {
            Some(arg) => {
                argn += 1;
                format_arg(out, &spec, verb, arg);
            },
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            },
        }
    }

    if argn < args.len() {
        out.push_str("%!(EXTRA ");
        for (idx, arg) in args[argn..].iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{:?}", arg);
        }
        out.push(')');
    }
}

/// Formats `template` with `args` into a new string.
pub fn sprintf(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    format_into(&mut out, template, args);
    out
}

/// Counts the directives of `template` that consume an argument.
pub fn count_directives(template: &str) -> usize {
    let mut chars = template.chars().peekable();
    let mut count = 0;
    while let Some(c) = chars.next() {
        if c == '%' {
            match directive(&mut chars).1 {
                Some('%') => {},
                Some(_) => count += 1,
                None => break,
            }
        }
    }
    count
}

/// Formats a template with positional arguments converted into [Value](enum.Value.html)s.
///
/// # Example
///
/// ```rust
/// #[macro_use]
/// extern crate levlog;
///
/// fn main() {
///     assert_eq!(sprintf!("%s=%05.1f", "pi", 3.14159), "pi=003.1");
/// }
/// ```
#[macro_export]
macro_rules! sprintf {
    ($template:expr) => {
        $crate::printf::sprintf($template, &[])
    };
    ($template:expr, $($arg:expr),+ $(,)*) => {
        $crate::printf::sprintf($template, &[$($crate::printf::Value::from($arg)),+])
    };
}
