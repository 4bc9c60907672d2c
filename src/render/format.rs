//! `str.format` mini-language
//!
//! Interpreter for the subset of Python's format mini-language the label
//! templates use, most importantly fixed-width zero padding of identifiers:
//! `'{:05d}'.format(cable.pk)` renders as `00123`.
//!
//! Supported: `{}` / `{0}` replacement fields, `{{` / `}}` escapes, and a
//! format spec of `[[fill]align][0][width][type]` with the `d` and `s` types.

use minijinja::value::Value;
use minijinja::{Error, ErrorKind};

pub fn format_str(fmt: &str, args: &[Value]) -> Result<String, Error> {
    let mut out = String::new();
    let mut chars = fmt.chars().peekable();
    let mut next_auto = 0usize;
    let mut numbering = Numbering::Undecided;

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut field = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    field.push(c);
                }
                if !closed {
                    return Err(invalid("unmatched '{' in format string"));
                }
                let (name, spec) = match field.split_once(':') {
                    Some((name, spec)) => (name, spec),
                    None => (field.as_str(), ""),
                };
                let index = resolve_index(name, &mut next_auto, &mut numbering)?;
                let value = args.get(index).ok_or_else(|| {
                    invalid(format!("format argument {index} out of range"))
                })?;
                out.push_str(&apply_spec(value, spec)?);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(invalid("single '}' in format string"));
                }
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

#[derive(PartialEq)]
enum Numbering {
    Undecided,
    Automatic,
    Manual,
}

fn resolve_index(
    name: &str,
    next_auto: &mut usize,
    numbering: &mut Numbering,
) -> Result<usize, Error> {
    if name.is_empty() {
        if *numbering == Numbering::Manual {
            return Err(invalid(
                "cannot switch from manual to automatic field numbering",
            ));
        }
        *numbering = Numbering::Automatic;
        let index = *next_auto;
        *next_auto += 1;
        Ok(index)
    } else {
        if *numbering == Numbering::Automatic {
            return Err(invalid(
                "cannot switch from automatic to manual field numbering",
            ));
        }
        *numbering = Numbering::Manual;
        name.parse::<usize>()
            .map_err(|_| invalid(format!("unsupported field name '{name}'")))
    }
}

struct FormatSpec {
    fill: char,
    align: Option<char>,
    zero: bool,
    width: usize,
    ty: Option<char>,
}

fn parse_spec(spec: &str) -> Result<FormatSpec, Error> {
    let chars: Vec<char> = spec.chars().collect();
    let mut pos = 0;
    let mut fill = ' ';
    let mut align = None;

    if chars.len() >= 2 && matches!(chars[1], '<' | '>' | '^') {
        fill = chars[0];
        align = Some(chars[1]);
        pos = 2;
    } else if !chars.is_empty() && matches!(chars[0], '<' | '>' | '^') {
        align = Some(chars[0]);
        pos = 1;
    }

    let zero = chars.get(pos) == Some(&'0');
    if zero {
        pos += 1;
    }

    let mut width = 0usize;
    while let Some(c) = chars.get(pos) {
        if let Some(d) = c.to_digit(10) {
            width = width * 10 + d as usize;
            pos += 1;
        } else {
            break;
        }
    }

    let ty = chars.get(pos).copied();
    if let Some(t) = ty {
        pos += 1;
        if !matches!(t, 'd' | 's') {
            return Err(invalid(format!("unsupported format type '{t}'")));
        }
    }
    if pos != chars.len() {
        return Err(invalid(format!("unsupported format spec '{spec}'")));
    }

    Ok(FormatSpec {
        fill,
        align,
        zero,
        width,
        ty,
    })
}

fn apply_spec(value: &Value, spec: &str) -> Result<String, Error> {
    let spec = parse_spec(spec)?;
    match spec.ty {
        Some('d') => {
            let n = i64::try_from(value.clone()).map_err(|_| {
                invalid(format!("cannot format {value:?} as an integer"))
            })?;
            if spec.zero {
                // Sign-aware zero padding, as in Python
                return Ok(format!("{:01$}", n, spec.width));
            }
            Ok(pad(&n.to_string(), &spec, '>'))
        }
        _ => {
            if spec.zero {
                return Err(invalid("zero padding is only supported for integers"));
            }
            let text = match value.as_str() {
                Some(s) => s.to_string(),
                None => value.to_string(),
            };
            Ok(pad(&text, &spec, '<'))
        }
    }
}

fn pad(text: &str, spec: &FormatSpec, default_align: char) -> String {
    let len = text.chars().count();
    if len >= spec.width {
        return text.to_string();
    }
    let missing = spec.width - len;
    let fill: String = std::iter::repeat(spec.fill).take(missing).collect();
    match spec.align.unwrap_or(default_align) {
        '<' => format!("{text}{fill}"),
        '>' => format!("{fill}{text}"),
        _ => {
            let left = missing / 2;
            let right = missing - left;
            let lfill: String = std::iter::repeat(spec.fill).take(left).collect();
            let rfill: String = std::iter::repeat(spec.fill).take(right).collect();
            format!("{lfill}{text}{rfill}")
        }
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::new(ErrorKind::InvalidOperation, msg.into())
}
